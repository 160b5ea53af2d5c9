// src/config/loader.rs
//! Layered option file loader with environment overrides

use crate::config::{
    constants::{fields, paths},
    RawSignalOptions,
};
use std::path::{Path, PathBuf};

/// Loads [`RawSignalOptions`] from TOML files merged in order
pub struct RequestLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

/// Option file loading errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// No file at the given path
    #[error("Option file not found: {0}")]
    FileNotFound(String),
    /// Invalid TOML or option shape
    #[error("Option file parse error: {0}")]
    Parse(String),
    /// Read failure
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl Default for RequestLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLoader {
    /// Create loader over the standard system and local option files
    pub fn new() -> Self {
        Self::with_paths(vec![
            PathBuf::from(paths::SYSTEM_CONFIG_PATH),
            PathBuf::from(paths::LOCAL_CONFIG_FILE),
        ])
    }

    /// Create loader with custom paths; later paths override earlier ones
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            env_prefix: paths::ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Load and merge all option sources
    pub fn load(&self) -> Result<RawSignalOptions, ConfigError> {
        let mut merged = toml::Value::Table(toml::value::Table::new());

        for config_path in &self.config_paths {
            match self.load_config_file(config_path) {
                Ok(file_config) => merge_toml_values(&mut merged, file_config),
                Err(ConfigError::FileNotFound(path)) => {
                    tracing::debug!(path = %path, "skipping missing option file");
                }
                Err(e) => return Err(e),
            }
        }

        self.apply_environment_overrides(&mut merged, std::env::vars());

        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(format!("Failed to deserialize options: {}", e)))
    }

    /// Load a single option file without merging or overrides
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<RawSignalOptions, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn load_config_file<P: AsRef<Path>>(&self, path: P) -> Result<toml::Value, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: toml::Value = toml::from_str(&content)?;

        Ok(config)
    }

    fn apply_environment_overrides<I>(&self, config: &mut toml::Value, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let toml::Value::Table(table) = config else {
            return;
        };

        for (key, value) in vars {
            if let Some(field) = key.strip_prefix(&self.env_prefix) {
                let field = field.to_lowercase();
                let value = parse_env_value(&field, &value);
                table.insert(field, value);
            }
        }
    }
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

/// Convert an environment value to the TOML shape its field expects
///
/// Name fields stay strings unless a separator is present, list fields are
/// always lists, and the policy is passed through as text.
fn parse_env_value(field: &str, value: &str) -> toml::Value {
    if fields::LIST_FIELDS.contains(&field) {
        return env_list(value);
    }
    if field == fields::UNRESOLVED_POLICY {
        return toml::Value::String(value.trim().to_string());
    }
    if fields::NAME_FIELDS.contains(&field) {
        return if value.contains(paths::ENV_LIST_SEPARATOR) {
            env_list(value)
        } else {
            toml::Value::String(value.trim().to_string())
        };
    }
    if value.contains(paths::ENV_LIST_SEPARATOR) {
        return env_list(value);
    }

    if let Ok(int_val) = value.parse::<i64>() {
        toml::Value::Integer(int_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        toml::Value::Float(float_val)
    } else if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn env_list(value: &str) -> toml::Value {
    if value.trim().is_empty() {
        return toml::Value::Array(Vec::new());
    }
    toml::Value::Array(
        value
            .split(paths::ENV_LIST_SEPARATOR)
            .map(|item| toml::Value::String(item.trim().to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnresolvedPolicy;
    use serde_json::json;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_file(&dir, "base.toml", "array_names = [\"M1\"]\nbin_size = 0.01\n");
        let local = write_file(&dir, "local.toml", "bin_size = 0.05\nextract_emg = true\n");

        let loader = RequestLoader::with_paths(vec![base, local]).with_env_prefix("TRIALSIG_TEST_UNUSED_");
        let options = loader.load().unwrap();

        assert_eq!(options.array_names, Some(json!(["M1"])));
        assert_eq!(options.bin_size, Some(json!(0.05)));
        assert_eq!(options.extract_emg, Some(json!(true)));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let present = write_file(&dir, "present.toml", "array_names = \"M1\"\n");
        let missing = dir.path().join("missing.toml");

        let loader = RequestLoader::with_paths(vec![missing, present]).with_env_prefix("TRIALSIG_TEST_UNUSED_");
        let options = loader.load().unwrap();

        assert_eq!(options.array_names, Some(json!("M1")));
    }

    #[test]
    fn test_parse_error_reported() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_file(&dir, "broken.toml", "array_names = [\"M1\"\n");

        let result = RequestLoader::with_paths(vec![broken]).load();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_nested_meta_tables_merge() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_file(&dir, "base.toml", "[extra_meta]\nmonkey = \"Han\"\ntask = \"COactpas\"\n");
        let local = write_file(&dir, "local.toml", "[extra_meta]\ntask = \"RW\"\n");

        let options = RequestLoader::with_paths(vec![base, local])
            .with_env_prefix("TRIALSIG_TEST_UNUSED_")
            .load()
            .unwrap();

        assert_eq!(options.extra_meta, Some(json!({"monkey": "Han", "task": "RW"})));
    }

    #[test]
    fn test_environment_overrides() {
        let loader = RequestLoader::with_paths(vec![]);
        let mut config = toml::Value::Table(toml::value::Table::new());
        let vars = vec![
            ("TRIALSIG_CONTINUOUS_NAMES".to_string(), "pos, vel".to_string()),
            ("TRIALSIG_BIN_SIZE".to_string(), "0.05".to_string()),
            ("TRIALSIG_UNRESOLVED_POLICY".to_string(), "error".to_string()),
            ("OTHER_BIN_SIZE".to_string(), "1".to_string()),
        ];

        loader.apply_environment_overrides(&mut config, vars);
        let options: RawSignalOptions = config.try_into().unwrap();

        assert_eq!(options.continuous_names, Some(json!(["pos", "vel"])));
        assert_eq!(options.bin_size, Some(json!(0.05)));
        assert_eq!(options.unresolved_policy, UnresolvedPolicy::Error);
    }

    #[test]
    fn test_environment_values_follow_field_shape() {
        let loader = RequestLoader::with_paths(vec![]);
        let mut config = toml::Value::Table(toml::value::Table::new());
        let vars = vec![
            ("TRIALSIG_ARRAY_NAMES".to_string(), "42".to_string()),
            ("TRIALSIG_SOURCE_ARRAY_NAMES".to_string(), "elec".to_string()),
            ("TRIALSIG_CONTINUOUS_NAMES".to_string(), "pos".to_string()),
            ("TRIALSIG_EVENT_NAMES".to_string(), "".to_string()),
            ("TRIALSIG_TRIAL_META_FIELDS".to_string(), "result, tgtDir".to_string()),
            ("TRIALSIG_EXTRACT_EMG".to_string(), "true".to_string()),
        ];

        loader.apply_environment_overrides(&mut config, vars);
        let options: RawSignalOptions = config.try_into().unwrap();

        assert_eq!(options.array_names, Some(json!("42")));
        assert_eq!(options.source_array_names, Some(json!("elec")));
        assert_eq!(options.continuous_names, Some(json!(["pos"])));
        assert_eq!(options.event_names, Some(json!([])));
        assert_eq!(options.trial_meta_fields, Some(json!(["result", "tgtDir"])));
        assert_eq!(options.extract_emg, Some(json!(true)));
    }

    #[test]
    fn test_environment_policy_any_case() {
        let loader = RequestLoader::with_paths(vec![]);
        let mut config = toml::Value::Table(toml::value::Table::new());
        let vars = vec![("TRIALSIG_UNRESOLVED_POLICY".to_string(), "Error".to_string())];

        loader.apply_environment_overrides(&mut config, vars);
        let options: RawSignalOptions = config.try_into().unwrap();

        assert_eq!(options.unresolved_policy, UnresolvedPolicy::Error);
    }

    #[test]
    fn test_load_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "one.toml", "array_names = [\"M1\", \"PMd\"]\n");

        let options = RequestLoader::load_file(path).unwrap();
        assert_eq!(options.array_names, Some(json!(["M1", "PMd"])));
    }
}
