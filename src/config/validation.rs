use super::schema::EngineConfig;

/// Validate engine configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &EngineConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(config.fuzzy_cutoff > 0.0 && config.fuzzy_cutoff <= 1.0) {
        errors.push(format!(
            "fuzzy_cutoff: must be in (0, 1], got {}",
            config.fuzzy_cutoff
        ));
    }

    if config.sheet_name.trim().is_empty() {
        errors.push("sheet_name: must not be empty".to_string());
    }

    if config.aggregate_region.trim().is_empty() {
        errors.push("aggregate_region: must not be empty".to_string());
    }

    if config.call_to_action.trim().is_empty() {
        errors.push("call_to_action: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
