//! Defect Diagnosis
//!
//! Linear per-request flow over a fixed ten-sensor snapshot:
//!
//! 1. **Anomaly Detector** (`anomaly`): z-score every table sensor, flag `|z| >= 2`
//! 2. **Correlation Engine** (`correlation`): map abnormal sensors to groups and
//!    look up directional rules between active groups
//! 3. **Summarization** (`summary`): one model call for a short plain-language
//!    summary, errors returned in-band
//!
//! The tables are immutable and shared; nothing is retained between requests.

mod anomaly;
mod correlation;
mod features;
mod summary;
mod tables;

pub use anomaly::{check_reading, detect_abnormal};
pub use correlation::{active_groups, correlate};
pub use features::{coerce_features, FeatureError};
pub use summary::{build_summary_prompt, summarize, MODEL_ERROR_PREFIX, SUMMARY_MAX_LINES};
pub use tables::DiagnosisTables;

use std::collections::HashMap;
use tracing::debug;

use crate::llm::LanguageModel;
use crate::types::Diagnosis;

/// Run detection, correlation and summarization for one snapshot.
///
/// The severity falls through to "mild" when nothing is abnormal; read it
/// together with `abnormal`.
pub async fn diagnose(
    tables: &DiagnosisTables,
    model: &dyn LanguageModel,
    features: &HashMap<String, f64>,
) -> Diagnosis {
    let abnormal = detect_abnormal(tables, features);
    let correlations = correlate(tables, abnormal.sensor_names());
    let severity = abnormal.overall_severity();

    debug!(
        abnormal = abnormal.len(),
        correlations = correlations.len(),
        severity = %severity,
        "Anomaly and correlation pass complete"
    );

    let expert_advice = summarize(model, &abnormal, &correlations).await;

    Diagnosis {
        expert_advice,
        abnormal,
        correlations,
        severity,
    }
}
