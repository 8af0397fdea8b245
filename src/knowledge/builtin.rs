//! Builtin records, in model output order.

use super::{DiseaseRecord, Severity};

const NO_TREATMENT: &str = "No treatment needed. Continue current care practices.";

pub(super) fn records() -> Vec<(&'static str, DiseaseRecord)> {
    vec![
        (
            "Pepper__bell___Bacterial_spot",
            DiseaseRecord::new(
                "Bell Pepper Bacterial Spot",
                Severity::Moderate,
                "Apply copper-based fungicides like copper hydroxide or copper sulfate. Remove infected leaves and improve air circulation. Avoid overhead watering and ensure proper plant spacing.",
                "Use certified disease-free seeds, practice crop rotation, avoid working in wet fields, and maintain proper plant spacing for good air circulation. Water at soil level to keep leaves dry.",
            ),
        ),
        (
            "Pepper__bell___healthy",
            DiseaseRecord::new(
                "Healthy Bell Pepper",
                Severity::None,
                NO_TREATMENT,
                "Maintain proper watering, fertilization, and pest management. Monitor regularly for early signs of disease or pest issues.",
            ),
        ),
        (
            "PlantVillage",
            DiseaseRecord::new(
                "Unidentified Plant",
                Severity::Unknown,
                "Unable to identify specific disease. Consult with local agricultural extension services for proper diagnosis.",
                "Follow general good agricultural practices including crop rotation, proper spacing, and regular monitoring.",
            ),
        ),
        (
            "Potato___Early_blight",
            DiseaseRecord::new(
                "Potato Early Blight",
                Severity::Moderate,
                "Apply fungicides containing chlorothalonil, mancozeb, or copper compounds. Remove affected foliage and improve air circulation. Ensure adequate potassium nutrition.",
                "Use resistant varieties, practice 3-4 year crop rotation, avoid overhead irrigation, and maintain proper plant nutrition especially potassium levels.",
            ),
        ),
        (
            "Potato___Late_blight",
            DiseaseRecord::new(
                "Potato Late Blight",
                Severity::Severe,
                "Immediately apply systemic fungicides like metalaxyl or mefenoxam. Remove and destroy infected plants. Avoid irrigation during cool, wet weather.",
                "Use certified disease-free seed potatoes, apply preventive fungicides during favorable weather conditions, and practice good field sanitation.",
            ),
        ),
        (
            "Potato___healthy",
            DiseaseRecord::new(
                "Healthy Potato",
                Severity::None,
                NO_TREATMENT,
                "Maintain proper soil health, adequate nutrition, and regular monitoring. Ensure proper hilling and avoid mechanical damage to tubers.",
            ),
        ),
        (
            "Tomato_Bacterial_spot",
            DiseaseRecord::new(
                "Tomato Bacterial Spot",
                Severity::Moderate,
                "Apply copper-based bactericides. Remove infected leaves and improve air circulation. Use drip irrigation instead of overhead watering.",
                "Use certified disease-free seeds, practice crop rotation, avoid working in wet conditions, and maintain proper plant spacing.",
            ),
        ),
        (
            "Tomato_Early_blight",
            DiseaseRecord::new(
                "Tomato Early Blight",
                Severity::Moderate,
                "Apply fungicides containing chlorothalonil, mancozeb, or azoxystrobin. Remove lower infected leaves and improve air circulation.",
                "Mulch around plants, water at soil level, ensure adequate plant spacing, and maintain proper plant nutrition.",
            ),
        ),
        (
            "Tomato_Late_blight",
            DiseaseRecord::new(
                "Tomato Late Blight",
                Severity::Severe,
                "Apply systemic fungicides immediately. Remove and destroy infected plants. Avoid overhead watering and improve ventilation.",
                "Use resistant varieties, apply preventive fungicides during cool, wet weather, and ensure good air circulation.",
            ),
        ),
        (
            "Tomato_Leaf_Mold",
            DiseaseRecord::new(
                "Tomato Leaf Mold",
                Severity::Moderate,
                "Improve air circulation and reduce humidity. Apply fungicides containing chlorothalonil or copper compounds. Remove infected leaves.",
                "Ensure proper ventilation, avoid overhead watering, maintain proper plant spacing, and use resistant varieties when possible.",
            ),
        ),
        (
            "Tomato_Septoria_leaf_spot",
            DiseaseRecord::new(
                "Tomato Septoria Leaf Spot",
                Severity::Moderate,
                "Apply fungicides containing chlorothalonil, mancozeb, or copper compounds. Remove infected lower leaves and improve air circulation.",
                "Mulch around plants, water at soil level, practice crop rotation, and remove plant debris at end of season.",
            ),
        ),
        (
            "Tomato_Spider_mites_Two_spotted_spider_mite",
            DiseaseRecord::new(
                "Tomato Spider Mites",
                Severity::Moderate,
                "Apply miticides or insecticidal soaps. Increase humidity around plants. Introduce beneficial predatory mites. Remove heavily infested leaves.",
                "Maintain adequate soil moisture, avoid water stress, monitor regularly, and encourage beneficial insects.",
            ),
        ),
        (
            "Tomato__Target_Spot",
            DiseaseRecord::new(
                "Tomato Target Spot",
                Severity::Moderate,
                "Apply fungicides containing azoxystrobin, chlorothalonil, or mancozeb. Remove infected plant debris and improve air circulation.",
                "Practice crop rotation, use drip irrigation, mulch around plants, and remove plant debris at end of season.",
            ),
        ),
        (
            "Tomato__Tomato_YellowLeaf__Curl_Virus",
            DiseaseRecord::new(
                "Tomato Yellow Leaf Curl Virus",
                Severity::Severe,
                "No direct treatment available. Remove infected plants to prevent spread. Control whitefly vectors with insecticides or yellow sticky traps.",
                "Use virus-resistant varieties, control whitefly populations, use reflective mulches, and remove infected plants immediately.",
            ),
        ),
        (
            "Tomato__Tomato_mosaic_virus",
            DiseaseRecord::new(
                "Tomato Mosaic Virus",
                Severity::Severe,
                "No direct treatment available. Remove and destroy infected plants. Disinfect tools and hands when working with plants.",
                "Use virus-free seeds and transplants, practice good sanitation, avoid tobacco use around plants, and control aphid vectors.",
            ),
        ),
        (
            "Tomato_healthy",
            DiseaseRecord::new(
                "Healthy Tomato",
                Severity::None,
                NO_TREATMENT,
                "Maintain proper watering, fertilization, and pest management. Support plants properly and monitor for early signs of problems.",
            ),
        ),
    ]
}
