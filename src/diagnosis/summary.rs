//! Summarization Request Builder
//!
//! Turns the abnormal readings and correlation list into one prompt and asks
//! the model for a short operator-facing summary. A failed call never fails
//! the diagnosis: the error is returned in-band as the advice text.

use std::fmt::Write as _;
use tracing::warn;

use crate::llm::LanguageModel;
use crate::types::AbnormalReadings;

/// Prefix of the advice text when the model call fails.
pub const MODEL_ERROR_PREFIX: &str = "model error";

/// Maximum summary length requested from the model (lines).
pub const SUMMARY_MAX_LINES: usize = 5;

/// Build the summarization prompt.
pub fn build_summary_prompt(abnormal: &AbnormalReadings, correlations: &[String]) -> String {
    let mut prompt = String::with_capacity(512);

    let _ = writeln!(
        prompt,
        "Summarize the following CNC anomaly in {SUMMARY_MAX_LINES} lines or fewer."
    );
    prompt.push_str("\n● Abnormal readings:\n");
    if abnormal.is_empty() {
        prompt.push_str("- none\n");
    }
    for (sensor, reading) in abnormal.iter() {
        let _ = writeln!(
            prompt,
            "- {sensor}: value {}, {} (z = {}, {})",
            reading.value, reading.reason, reading.z, reading.level
        );
    }

    prompt.push_str("\n● Correlations:\n");
    if correlations.is_empty() {
        prompt.push_str("- none\n");
    }
    for correlation in correlations {
        let _ = writeln!(prompt, "- {correlation}");
    }

    prompt.push_str(
        "\nGuidelines:\n\
         - Stick to the essentials\n\
         - Make it something an operator can act on right away\n\
         - Avoid technical jargon; use plain language\n",
    );

    prompt
}

/// Ask the model for a summary; on failure return `model error: <detail>`.
pub async fn summarize(
    model: &dyn LanguageModel,
    abnormal: &AbnormalReadings,
    correlations: &[String],
) -> String {
    let prompt = build_summary_prompt(abnormal, correlations);

    match model.summarize(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                backend = model.backend_name(),
                timeout = e.is_timeout(),
                error = %e,
                "Summary request failed, returning in-band error"
            );
            format!("{MODEL_ERROR_PREFIX}: {e}")
        }
    }
}
