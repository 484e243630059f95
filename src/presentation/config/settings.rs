use std::path::PathBuf;

use serde::Deserialize;

/// Runtime configuration, sourced from `PHONOSCREEN_*` environment
/// variables with defaults matching the development layout.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upload: UploadSettings,
    pub models: ModelSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Explicit bind address. When absent the outbound-facing local IP is
    /// auto-detected at startup.
    pub host: Option<String>,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    /// The phonation model participates in routing only when enabled; it is
    /// off by default and requests for it report "no usable model".
    pub model1_enabled: bool,
    pub model1_weights: PathBuf,
    pub model2_weights: PathBuf,
    pub model3_weights: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: std::env::var("PHONOSCREEN_HOST").ok(),
                port: std::env::var("PHONOSCREEN_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5000),
            },
            upload: UploadSettings {
                dir: env_path("PHONOSCREEN_UPLOAD_DIR", "uploads"),
                max_file_size_mb: std::env::var("PHONOSCREEN_MAX_UPLOAD_MB")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(25),
            },
            models: ModelSettings {
                model1_enabled: std::env::var("PHONOSCREEN_MODEL1_ENABLED")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
                model1_weights: env_path(
                    "PHONOSCREEN_MODEL1_WEIGHTS",
                    "models/model1/phonation_clf.safetensors",
                ),
                model2_weights: env_path(
                    "PHONOSCREEN_MODEL2_WEIGHTS",
                    "models/model2/mfcc_dense.safetensors",
                ),
                model3_weights: env_path(
                    "PHONOSCREEN_MODEL3_WEIGHTS",
                    "models/model3/mfcc_conv.safetensors",
                ),
            },
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
