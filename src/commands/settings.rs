use crate::client::http::check_base_url;
use crate::client::DEFAULT_BASE_URL;
use crate::models::settings::{EffectiveSettings, OutputFormat, VoteWireFormat};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 2;
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

pub fn load_effective_settings(config_root: &str) -> Result<EffectiveSettings, String> {
    let settings = load_settings_from_disk(config_root)?;
    Ok(effective_from_value(&settings))
}

fn effective_from_value(settings: &Value) -> EffectiveSettings {
    let base_url = settings
        .get("baseUrl")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string();
    let vote_wire_format = settings
        .get("voteWireFormat")
        .and_then(Value::as_str)
        .and_then(VoteWireFormat::parse)
        .unwrap_or_default();
    let output_format = settings
        .get("outputFormat")
        .and_then(Value::as_str)
        .and_then(OutputFormat::parse)
        .unwrap_or_default();
    let log_level = settings
        .get("logLevel")
        .and_then(Value::as_str)
        .unwrap_or("warn")
        .to_string();
    let timeout_secs = settings
        .get("timeoutSecs")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    EffectiveSettings {
        base_url,
        vote_wire_format,
        output_format,
        log_level,
        timeout_secs,
    }
}

pub fn load_settings_from_disk(config_root: &str) -> Result<Value, String> {
    let path = settings_path(config_root);
    ensure_settings_dir(config_root)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|_| json!({}))
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(config_root: &str, settings: Value) -> Result<Value, String> {
    let path = settings_path(config_root);
    ensure_settings_dir(config_root)?;

    let mut merged = load_settings_from_disk(config_root).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    Ok(migrated)
}

/// Parses `key=value` from the command line into a one-key patch. Only keys
/// the settings file knows are accepted. Values that look like JSON (numbers,
/// booleans) are taken as such, anything else as a string.
pub fn parse_assignment(assignment: &str) -> Result<Value, String> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| format!("Expected KEY=VALUE, got '{assignment}'"))?;
    let key = key.trim();
    if key == "schema_version" {
        return Err(format!("Cannot set '{key}'"));
    }
    let defaults = default_settings();
    if defaults.get(key).is_none() {
        let known: Vec<&str> = defaults
            .as_object()
            .map(|obj| obj.keys().map(String::as_str).filter(|k| *k != "schema_version").collect())
            .unwrap_or_default();
        return Err(format!("Unknown setting '{key}' (expected one of: {})", known.join(", ")));
    }
    let raw = raw.trim();
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
        _ => Value::String(raw.to_string()),
    };
    let mut patch = Map::new();
    patch.insert(key.to_string(), value);
    Ok(Value::Object(patch))
}

pub fn settings_path(config_root: &str) -> PathBuf {
    Path::new(config_root)
        .join(".credicheck")
        .join("settings.json")
}

fn ensure_settings_dir(config_root: &str) -> Result<(), String> {
    let dir = Path::new(config_root).join(".credicheck");
    fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create .credicheck directory: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version < 1 {
        rename_key(&mut out, "apiBase", "baseUrl");
    }

    if version < 2 {
        // V2 introduces the request timeout with an explicit default.
        ensure_key(&mut out, "timeoutSecs", json!(0));
    }

    deep_merge_defaults(&mut out, &default_settings());
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "baseUrl": DEFAULT_BASE_URL,
        "voteWireFormat": "auto",
        "outputFormat": "text",
        "logLevel": "warn",
        "timeoutSecs": 0
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn ensure_key(target: &mut Value, key: &str, value: Value) {
    if let Some(obj) = target.as_object_mut() {
        obj.entry(key.to_string()).or_insert(value);
    }
}

fn rename_key(target: &mut Value, from: &str, to: &str) {
    let Some(obj) = target.as_object_mut() else {
        return;
    };
    if let Some(value) = obj.remove(from) {
        obj.entry(to.to_string()).or_insert(value);
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "timeoutSecs", 0, 120, 0);

    sanitize_enum(obj, "voteWireFormat", &["auto", "bare", "wrapped"], "auto");
    sanitize_enum(obj, "outputFormat", &["text", "json"], "text");
    sanitize_enum(obj, "logLevel", LOG_LEVELS, "warn");

    sanitize_base_url(obj);
}

fn sanitize_base_url(map: &mut Map<String, Value>) {
    let valid = map
        .get("baseUrl")
        .and_then(Value::as_str)
        .map(|raw| raw.trim().trim_end_matches('/'))
        .filter(|raw| check_base_url(raw).is_ok())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string();
    map.insert("baseUrl".to_string(), json!(valid));
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn sanitize_enum(map: &mut Map<String, Value>, key: &str, allowed: &[&str], default: &str) {
    let valid = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| allowed.contains(value))
        .unwrap_or(default);
    map.insert(key.to_string(), json!(valid));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrates_legacy_api_base_key() {
        let migrated = migrate_settings(json!({ "apiBase": "http://localhost:8000/" }));

        assert_eq!(migrated["baseUrl"], json!("http://localhost:8000"));
        assert!(migrated.get("apiBase").is_none());
        assert_eq!(migrated["timeoutSecs"], json!(0));
        assert_eq!(migrated["schema_version"], json!(SETTINGS_SCHEMA_VERSION));
    }

    #[test]
    fn sanitizes_bad_values_back_to_defaults() {
        let migrated = migrate_settings(json!({
            "schema_version": 2,
            "baseUrl": "ftp://example.com",
            "voteWireFormat": "xml",
            "outputFormat": "yaml",
            "logLevel": "loud",
            "timeoutSecs": 9000
        }));

        assert_eq!(migrated["baseUrl"], json!(DEFAULT_BASE_URL));
        assert_eq!(migrated["voteWireFormat"], json!("auto"));
        assert_eq!(migrated["outputFormat"], json!("text"));
        assert_eq!(migrated["logLevel"], json!("warn"));
        assert_eq!(migrated["timeoutSecs"], json!(120));
    }

    #[test]
    fn output_format_update_keeps_wire_format_and_base_url() {
        let mut existing = default_settings();
        merge_settings(&mut existing, &json!({ "outputFormat": "json" }));
        let migrated = migrate_settings(existing);

        assert_eq!(migrated["outputFormat"], json!("json"));
        assert_eq!(migrated["voteWireFormat"], json!("auto"));

        let effective = effective_from_value(&migrated);
        assert_eq!(effective.output_format, OutputFormat::Json);
        assert_eq!(effective.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn parses_cli_assignments() {
        assert_eq!(parse_assignment("timeoutSecs=15").unwrap(), json!({ "timeoutSecs": 15 }));
        assert_eq!(
            parse_assignment("baseUrl = http://127.0.0.1:8000").unwrap(),
            json!({ "baseUrl": "http://127.0.0.1:8000" })
        );
        assert!(parse_assignment("no-equals-sign").is_err());
        assert!(parse_assignment("schema_version=9").is_err());
    }

    #[test]
    fn rejects_unknown_or_miscased_keys() {
        let err = parse_assignment("baseurl=http://127.0.0.1:9").unwrap_err();
        assert!(err.contains("Unknown setting 'baseurl'"));
        assert!(err.contains("baseUrl"));
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("logLevel=debug").is_ok());
    }

    #[test]
    fn base_url_with_query_or_fragment_falls_back_to_default() {
        let migrated = migrate_settings(json!({ "baseUrl": "http://h.example/api?k=1" }));
        assert_eq!(migrated["baseUrl"], json!(DEFAULT_BASE_URL));

        let migrated = migrate_settings(json!({ "baseUrl": "http://h.example/api#top" }));
        assert_eq!(migrated["baseUrl"], json!(DEFAULT_BASE_URL));

        let migrated = migrate_settings(json!({ "baseUrl": "http://h.example/api/" }));
        assert_eq!(migrated["baseUrl"], json!("http://h.example/api"));
    }
}
