//! Defect diagnosis endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use super::DiagnosisState;
use crate::api::ApiError;
use crate::diagnosis::{self, coerce_features};
use crate::types::Diagnosis;

/// Status tag sent with every diagnosis; the endpoint is only called for
/// parts that already failed inspection.
pub const DIAGNOSIS_STATUS: &str = "FAIL";

/// Defect snapshot posted by the dashboard
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectRequest {
    #[serde(default)]
    pub cnc_name: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    /// Sensor name to value; values are coerced to numbers
    pub features: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResponse {
    pub status: &'static str,
    pub cnc_name: String,
    pub product_id: String,
    pub diagnosis: Diagnosis,
}

/// POST /chatbot/diagnose-from-defect
///
/// Model failures do not fail the request: the advice text carries a
/// `model error: ...` note and the findings are returned intact.
pub async fn post_diagnose_from_defect(
    State(state): State<DiagnosisState>,
    Json(request): Json<DefectRequest>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    let features = coerce_features(&state.tables, &request.features)?;
    let cnc_name = request.cnc_name.unwrap_or_default();
    let product_id = request.product_id.unwrap_or_default();

    let diagnosis = diagnosis::diagnose(&state.tables, state.model.as_ref(), &features).await;

    info!(
        cnc = %cnc_name,
        product = %product_id,
        abnormal = diagnosis.abnormal.len(),
        correlations = diagnosis.correlations.len(),
        severity = %diagnosis.severity,
        "Defect diagnosed"
    );

    Ok(Json(DiagnosisResponse {
        status: DIAGNOSIS_STATUS,
        cnc_name,
        product_id,
        diagnosis,
    }))
}
