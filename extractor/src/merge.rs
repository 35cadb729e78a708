//! Merge of settled workstream results into one profile
//!
//! Routing is fixed: each workstream writes only the fields listed in its
//! routing table entry, so two workstreams can never clobber each other.
//! Failed workstreams contribute nothing and their fields stay empty.

use tracing::{debug, warn};

use crate::types::{EnhancedProfile, Persona, WorkstreamId, WorkstreamResult};

/// Merge all settled results into a fresh profile
pub fn merge_results(results: &[WorkstreamResult]) -> EnhancedProfile {
    let mut profile = EnhancedProfile::default();

    for result in results {
        if !result.success {
            debug!(workstream = %result.id, "skipping failed workstream in merge");
            continue;
        }
        apply(&mut profile, result.id, &result.data);
    }

    profile.validation_score = validation_score(&profile, results);
    profile
}

fn apply(profile: &mut EnhancedProfile, id: WorkstreamId, data: &serde_json::Value) {
    match id {
        WorkstreamId::CustomerProfile => {
            profile.customer_triggers = string_array(data, "customer_triggers");
            profile.pain_points = string_array(data, "pain_points");
            profile.desired_outcomes = string_array(data, "desired_outcomes");
        }
        WorkstreamId::Transformations => {
            profile.transformations = string_array(data, "transformations");
            profile.benefits = string_array(data, "benefits");
        }
        WorkstreamId::Differentiators => {
            profile.products_services = string_array(data, "products_services");
            profile.differentiators = string_array(data, "differentiators");
            profile.proof_points = string_array(data, "proof_points");
        }
        WorkstreamId::Personas => {
            profile.personas = persona_array(data);
            profile.objections = string_array(data, "objections");
        }
        WorkstreamId::Hooks => {
            profile.power_words = string_array(data, "power_words");
            profile.hook_library = string_array(data, "hook_library");
        }
    }
}

/// Read a string array field, tolerating missing keys and non-string items
fn string_array(data: &serde_json::Value, key: &str) -> Vec<String> {
    match data.get(key) {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(other) => {
            warn!(key, value_type = json_type(other), "expected array, dropping field");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn persona_array(data: &serde_json::Value) -> Vec<Persona> {
    match data.get("personas") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .filter(|p: &Persona| !p.name.trim().is_empty())
            .collect(),
        Some(other) => {
            warn!(value_type = json_type(other), "personas is not an array, dropping");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Informational completeness score, 0..=100.
///
/// Counts successful workstreams and whether the key section of each
/// dimension came back populated. Never used for control flow.
fn validation_score(profile: &EnhancedProfile, results: &[WorkstreamResult]) -> u32 {
    let successes = results.iter().filter(|r| r.success).count() as u32;

    let key_sections = [
        !profile.customer_triggers.is_empty(),
        !profile.transformations.is_empty(),
        !profile.differentiators.is_empty(),
        !profile.personas.is_empty(),
        !profile.power_words.is_empty(),
    ];
    let populated = key_sections.iter().filter(|p| **p).count() as u32;

    (successes * 14 + populated * 6).min(100)
}
