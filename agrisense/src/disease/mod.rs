//! Disease detection module
//!
//! This module provides:
//! - Decoding and normalization of leaf photographs
//! - The pretrained ResNet-9 image classifier
//! - The fixed, ordered 38-class disease label set
//!
//! The label ordering is the output ordering of the trained model and
//! must never be rearranged.

pub mod classifier;
pub mod preprocess;
pub mod resnet;

// Re-export main types for convenience
pub use classifier::{DiseaseClassifier, Prediction};
pub use preprocess::{preprocess, ImageTensor};
pub use resnet::{ResNet9, ResNet9Config};

/// Total number of disease classes
pub const NUM_CLASSES: usize = 38;

/// Disease class names (38 classes), in trained model output order.
/// Format: "Plant___Disease" or "Plant___healthy"
pub const DISEASE_CLASSES: [&str; 38] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

/// Get the class name for a given label index
pub fn class_name(label: usize) -> Option<&'static str> {
    DISEASE_CLASSES.get(label).copied()
}

/// Get the label index for a given class name
pub fn class_index(name: &str) -> Option<usize> {
    DISEASE_CLASSES.iter().position(|&n| n == name)
}

/// Check if a class represents a healthy plant (not diseased)
pub fn is_healthy_class(label: usize) -> bool {
    DISEASE_CLASSES
        .get(label)
        .map(|name| name.ends_with("healthy"))
        .unwrap_or(false)
}

/// Get the plant name from a class (e.g., "Tomato" from "Tomato___Bacterial_spot")
pub fn plant_name(label: usize) -> Option<&'static str> {
    DISEASE_CLASSES
        .get(label)
        .and_then(|name| name.split("___").next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        assert_eq!(class_name(0), Some("Apple___Apple_scab"));
        assert_eq!(class_name(37), Some("Tomato___healthy"));
        assert_eq!(class_name(38), None);
    }

    #[test]
    fn test_class_index() {
        assert_eq!(class_index("Apple___Apple_scab"), Some(0));
        assert_eq!(class_index("Tomato___healthy"), Some(37));
        assert_eq!(class_index("Unknown___class"), None);
    }

    #[test]
    fn test_is_healthy_class() {
        assert!(!is_healthy_class(0)); // Apple___Apple_scab
        assert!(is_healthy_class(3)); // Apple___healthy
        assert!(is_healthy_class(37)); // Tomato___healthy
    }

    #[test]
    fn test_plant_name() {
        assert_eq!(plant_name(0), Some("Apple"));
        assert_eq!(plant_name(28), Some("Tomato"));
    }

    #[test]
    fn test_class_count() {
        assert_eq!(DISEASE_CLASSES.len(), NUM_CLASSES);
    }
}
