//! Environment-driven server configuration.

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
    /// Whether the named-entity model is constructed at startup.
    pub entity_model_enabled: bool,
}

const MB: usize = 1024 * 1024;

impl ServerConfig {
    /// Default upload ceiling in megabytes.
    pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

    /// Read configuration from `DOCSTRUCT_*` environment variables,
    /// falling back to defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("DOCSTRUCT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("DOCSTRUCT_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .expect("DOCSTRUCT_PORT must be a valid port number");
        let max_upload_mb: usize = std::env::var("DOCSTRUCT_MAX_UPLOAD_MB")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_MB.to_string())
            .parse()
            .expect("DOCSTRUCT_MAX_UPLOAD_MB must be a number of megabytes");
        let entity_model_enabled = !matches!(
            std::env::var("DOCSTRUCT_NER").as_deref(),
            Ok("off") | Ok("0") | Ok("false")
        );

        Self {
            host,
            port,
            max_upload_bytes: max_upload_mb * MB,
            entity_model_enabled,
        }
    }

    /// Upload ceiling as a display string, e.g. `50MB`.
    pub fn max_upload_display(&self) -> String {
        format!("{}MB", self.max_upload_bytes / MB)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: Self::DEFAULT_MAX_UPLOAD_MB * MB,
            entity_model_enabled: true,
        }
    }
}
