use geopointcore::LoggerConfig;
use std::fs;
use std::path::Path;

/// Read logger settings from a YAML file passed on the command line.
pub fn load(path: &Path) -> Result<LoggerConfig, String> {
    let contents = fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))?;
    let config: LoggerConfig =
        serde_yaml::from_str(&contents).map_err(|e| format!("parsing {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|e| format!("validating {}: {}", path.display(), e))?;
    Ok(config)
}

/// Settings from the first program argument, or defaults plus a note on why.
pub fn from_args() -> (LoggerConfig, Option<String>) {
    match std::env::args().nth(1) {
        Some(arg) => match load(Path::new(&arg)) {
            Ok(config) => (config, None),
            Err(err) => (LoggerConfig::default(), Some(err)),
        },
        None => (LoggerConfig::default(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logger.yaml");
        fs::write(&path, "id_field: TAG\nzoom: 2.5\n").unwrap();
        let config = load(&path).unwrap();
        assert_eq!(config.id_field, "TAG");
        assert_eq!(config.zoom, 2.5);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load(Path::new("/nonexistent/logger.yaml")).unwrap_err();
        assert!(err.contains("reading"));
    }
}
