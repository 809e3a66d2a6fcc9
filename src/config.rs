use std::fs;
use std::path::Path;

use crate::error::ConfigLoadError;
use crate::model::Config;

pub const DEFAULT_CONFIG_PATH: &str = "./data/configs.json";

/// Reads the config from disk. Nothing is cached; every call hits the file.
pub fn load_config(path: &Path) -> Result<Config, ConfigLoadError> {
    let bytes = fs::read(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: Config = serde_json::from_slice(&bytes).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        product_service = %cfg.product_service_base(),
        capture_service = %cfg.capture_service_base(),
        "loaded config"
    );
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_all_consumed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "configs.json",
            r#"{
                "product_config_path": "./data/products.json",
                "product_service_ip": "127.0.0.1",
                "product_service_port": 5000,
                "capture_service_ip": "127.0.0.2",
                "capture_service_port": 5001,
                "request_timeout_secs": 3,
                "unrelated_key": true
            }"#,
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(
            cfg.product_config_path,
            std::path::PathBuf::from("./data/products.json")
        );
        assert_eq!(cfg.product_service_port, 5000);
        assert_eq!(cfg.capture_service_ip, "127.0.0.2");
        assert_eq!(cfg.request_timeout_secs, Some(3));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "configs.json", "{ not json");
        assert!(matches!(
            load_config(&path).unwrap_err(),
            ConfigLoadError::Parse { .. }
        ));
    }

    #[test]
    fn missing_required_key_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "configs.json",
            r#"{"product_service_ip": "h", "product_service_port": 1}"#,
        );
        assert!(matches!(
            load_config(&path).unwrap_err(),
            ConfigLoadError::Parse { .. }
        ));
    }

    #[test]
    fn every_call_rereads_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let body = |port: u16| {
            format!(
                r#"{{"product_config_path": "p.json", "product_service_ip": "h",
                    "product_service_port": {port}, "capture_service_ip": "h",
                    "capture_service_port": 1}}"#
            )
        };
        let path = write(dir.path(), "configs.json", &body(1000));
        assert_eq!(load_config(&path).unwrap().product_service_port, 1000);

        fs::write(&path, body(2000)).unwrap();
        assert_eq!(load_config(&path).unwrap().product_service_port, 2000);
    }
}
