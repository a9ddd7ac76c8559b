//! Prediction endpoints
//!
//! Every numeric form field is required and parsed explicitly, so
//! malformed input is rejected with a structured failure before it
//! reaches a model.

use std::collections::HashMap;

use agrisense::{Error, SoilSample};
use axum::extract::{Multipart, State};
use axum::{Form, Json};
use serde::Serialize;

use crate::routes::error::ApiError;
use crate::state::SharedState;

/// Response for a crop recommendation
#[derive(Debug, Serialize)]
pub struct CropResponse {
    pub crop: String,
}

/// Response for a fertilizer recommendation
#[derive(Debug, Serialize)]
pub struct FertilizerResponse {
    pub verdict: String,
    pub description: String,
    pub asset: String,
}

/// Response for a disease prediction
#[derive(Debug, Serialize)]
pub struct DiseaseResponse {
    pub label: String,
    pub confidence: f32,
    pub description: String,
}

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> Result<&'a str, Error> {
    form.get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::InvalidInput(format!("missing field '{}'", name)))
}

fn int_field(form: &HashMap<String, String>, name: &str) -> Result<i64, Error> {
    field(form, name)?
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("field '{}' must be an integer", name)))
}

fn float_field(form: &HashMap<String, String>, name: &str) -> Result<f64, Error> {
    field(form, name)?
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("field '{}' must be a number", name)))
}

/// POST /crop-predict - recommend a crop for soil/climate measurements
pub async fn crop_predict(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<CropResponse>, ApiError> {
    let sample = SoilSample {
        nitrogen: int_field(&form, "nitrogen")?,
        phosphorus: int_field(&form, "phosphorus")?,
        potassium: int_field(&form, "potassium")?,
        ph: float_field(&form, "pH")?,
        rainfall: float_field(&form, "rainfall")?,
        humidity: float_field(&form, "humidity")?,
        temperature: float_field(&form, "temperature")?,
    };

    let crop = state.service.recommend_crop(&sample)?;
    Ok(Json(CropResponse { crop }))
}

/// POST /fertilizer-predict - recommend a correction for measured N/P/K
pub async fn fertilizer_predict(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<FertilizerResponse>, ApiError> {
    let crop_name = field(&form, "cropname")?.to_string();
    let n = int_field(&form, "nitrogen")?;
    let p = int_field(&form, "phosphorus")?;
    let k = int_field(&form, "potassium")?;

    let advice = state.service.recommend_fertilizer(&crop_name, n, p, k)?;
    Ok(Json(FertilizerResponse {
        verdict: advice.verdict.to_string(),
        description: advice.description,
        asset: advice.asset,
    }))
}

/// POST /disease-predict - classify a leaf photograph
pub async fn disease_predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<DiseaseResponse>, ApiError> {
    let mut image_bytes = None;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        if part.name() == Some("file") {
            let bytes = part
                .bytes()
                .await
                .map_err(|e| Error::InvalidInput(format!("failed to read file field: {}", e)))?;
            image_bytes = Some(bytes);
        }
    }

    let bytes = image_bytes
        .filter(|bytes| !bytes.is_empty())
        .ok_or(Error::NoFileProvided)?;

    let report = state.service.classify_disease(&bytes)?;
    Ok(Json(DiseaseResponse {
        label: report.label,
        confidence: report.confidence,
        description: report.description,
    }))
}
