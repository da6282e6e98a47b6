//! Keep an existing config file in step with the current `Config` fields.

use super::Config;
use crate::errors::AppResult;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Fields every config file is expected to carry.
pub const EXPECTED_FIELDS: &[&str] = &[
    "database",
    "backend",
    "graphql_url",
    "admin_secret",
    "request_timeout_secs",
    "day_offset_hours",
    "theme",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)?;
    Ok(yaml.as_mapping().cloned().unwrap_or_default())
}

/// Names of expected fields that are missing from the file at `path`.
/// A missing file reports every field.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    if !path.exists() {
        return Ok(EXPECTED_FIELDS.to_vec());
    }

    let map = read_mapping(path)?;
    Ok(EXPECTED_FIELDS
        .iter()
        .filter(|f| !map.contains_key(**f))
        .copied()
        .collect())
}

/// Add missing fields with their default values, keeping everything the
/// user already set. Returns the names of the fields that were added.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let missing = missing_fields(path)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let defaults = serde_yaml::to_value(Config::default())?;
    let defaults = defaults.as_mapping().cloned().unwrap_or_default();

    let mut map = if path.exists() {
        read_mapping(path)?
    } else {
        Mapping::new()
    };

    for field in &missing {
        let key = Value::String((*field).to_string());
        if let Some(v) = defaults.get(&key) {
            map.insert(key, v.clone());
        }
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_yaml::to_string(&Value::Mapping(map))?)?;

    Ok(missing)
}
