use std::path::PathBuf;

use oqim_backends::RemoteConfig;

/// Default maximum upload size: 500 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: u64,
    /// Root directory for uploaded files; category subdirectories are
    /// created beneath it at startup.
    pub upload_root: PathBuf,
    /// Remote processing service endpoints.
    pub backends: RemoteConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                 |
    /// |--------------------|-------------------------|
    /// | `HOST`             | `0.0.0.0`               |
    /// | `PORT`             | `5000`                  |
    /// | `CORS_ORIGINS`     | `http://localhost:5173` |
    /// | `MAX_UPLOAD_BYTES` | `524288000` (500 MiB)   |
    /// | `UPLOAD_ROOT`      | `uploads`               |
    /// | `TRANSCRIBER_URL`  | `http://127.0.0.1:9001` |
    /// | `SYNTHESIZER_URL`  | `http://127.0.0.1:9002` |
    /// | `ANALYZER_URL`     | `http://127.0.0.1:9003` |
    /// | `TEXT_TOOLS_URL`   | `http://127.0.0.1:9004` |
    /// | `CIPHER_URL`       | `http://127.0.0.1:9005` |
    /// | `GENERATOR_URL`    | `http://127.0.0.1:9006` |
    /// | `ARTIFACT_DIR`     | `uploads/artifacts`     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid u64");

        let upload_root =
            PathBuf::from(std::env::var("UPLOAD_ROOT").unwrap_or_else(|_| "uploads".into()));

        let backends = RemoteConfig {
            transcriber_url: env_or("TRANSCRIBER_URL", "http://127.0.0.1:9001"),
            synthesizer_url: env_or("SYNTHESIZER_URL", "http://127.0.0.1:9002"),
            analyzer_url: env_or("ANALYZER_URL", "http://127.0.0.1:9003"),
            text_tools_url: env_or("TEXT_TOOLS_URL", "http://127.0.0.1:9004"),
            cipher_url: env_or("CIPHER_URL", "http://127.0.0.1:9005"),
            generator_url: env_or("GENERATOR_URL", "http://127.0.0.1:9006"),
            artifact_dir: PathBuf::from(env_or("ARTIFACT_DIR", "uploads/artifacts")),
        };

        Self {
            host,
            port,
            cors_origins,
            max_upload_bytes,
            upload_root,
            backends,
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}
