use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub product_config_path: PathBuf,

    pub product_service_ip: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub product_service_port: u16,

    pub capture_service_ip: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub capture_service_port: u16,

    /// Per-request timeout; absent means the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Only treat transport errors as a failed deactivate, ignoring the status code.
    #[serde(default)]
    pub lenient_deactivate: bool,
}

impl Config {
    pub fn product_service_base(&self) -> String {
        format!(
            "http://{}:{}",
            self.product_service_ip, self.product_service_port
        )
    }

    pub fn capture_service_base(&self) -> String {
        format!(
            "http://{}:{}",
            self.capture_service_ip, self.capture_service_port
        )
    }
}

fn port_from_number_or_string<'de, D>(de: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u16),
        Text(String),
    }

    match RawPort::deserialize(de)? {
        RawPort::Number(n) => Ok(n),
        RawPort::Text(s) => s
            .trim()
            .parse::<u16>()
            .map_err(|_| serde::de::Error::custom(format!("invalid port {:?}", s))),
    }
}

/// `.` and `..` are collapsed by URL normalization and never reach the
/// service as a path segment.
pub fn is_routable_id(id: &str) -> bool {
    !matches!(id, "." | "..")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_id", default)]
    pub id: String,

    #[serde(rename = "product_name", default)]
    pub name: String,

    #[serde(default)]
    pub views: Vec<View>,
}

impl Product {
    pub fn is_selectable(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    #[serde(rename = "view_id", default)]
    pub id: String,

    #[serde(rename = "view_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl View {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
