//! Correlation Engine - cross-references abnormal sensor groups
//!
//! ## Algorithm
//!
//! 1. A group is active when at least one member sensor is abnormal
//! 2. Fewer than two active groups: no inter-group signal, return nothing
//! 3. Order active groups by ascending priority
//! 4. For every ordered pair (g1, g2) of active groups, self-pairs included,
//!    append the rule text for (g1, g2) if one exists
//! 5. Drop repeated texts, keeping the first occurrence
//!
//! Self-pairs never match the stock rule table. A self-pair rule whose text
//! equals another rule's text would be merged by step 5.

use std::collections::HashSet;

use super::DiagnosisTables;
use crate::types::SensorGroup;

/// Correlation explanations for a set of abnormal sensor names.
pub fn correlate<'a, I>(tables: &DiagnosisTables, abnormal_sensors: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let abnormal: HashSet<&str> = abnormal_sensors.into_iter().collect();
    let active = active_groups(tables, &abnormal);

    if active.len() < 2 {
        return Vec::new();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut correlations = Vec::new();

    for cause in &active {
        for effect in &active {
            if let Some(text) = tables.rule(&cause.name, &effect.name) {
                if seen.insert(text) {
                    correlations.push(text.to_string());
                }
            }
        }
    }

    tracing::debug!(
        active_groups = active.len(),
        correlations = correlations.len(),
        "Correlation rules evaluated"
    );

    correlations
}

/// Groups touched by the abnormal set, sorted by ascending priority.
///
/// Ties keep table order.
pub fn active_groups<'t>(tables: &'t DiagnosisTables, abnormal: &HashSet<&str>) -> Vec<&'t SensorGroup> {
    let mut active: Vec<&SensorGroup> = tables
        .groups()
        .iter()
        .filter(|group| group.members.iter().any(|m| abnormal.contains(m.as_str())))
        .collect();
    active.sort_by_key(|group| group.priority);
    active
}
