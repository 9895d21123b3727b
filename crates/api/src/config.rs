use std::path::PathBuf;

use v0mon_genai::api::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use v0mon_genai::GenAiConfig;
use v0mon_pipeline::PipelineConfig;

/// Where generated artwork is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Files in a local directory, served by this process under `/media`.
    Local { dir: PathBuf },
    /// An S3 bucket fronted by `public_url`.
    S3 { bucket: String, public_url: String },
    /// Process memory. Artwork is lost on restart.
    Memory,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). Generation calls
    /// routinely take tens of seconds.
    pub request_timeout_secs: u64,
    /// Public base URL of this service, used for page metadata and local
    /// media locations (default: `http://localhost:3000`).
    pub public_base_url: String,
    /// Shared secret expected in the `x-api-key` header of the generate
    /// endpoint. `None` rejects every call with a configuration error.
    pub internal_api_key: Option<String>,
    /// Artwork storage backend.
    pub storage: StorageConfig,
    /// Generation pipeline settings.
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                   |
    /// | `PORT`                 | `3000`                                      |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `180`                                       |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000`                     |
    /// | `INTERNAL_API_KEY`     | unset                                       |
    /// | `GOOGLE_GENAI_API_KEY` | unset                                       |
    /// | `GENAI_MODEL`          | `gemini-2.5-flash-image-preview`            |
    /// | `GENAI_BASE_URL`       | `https://generativelanguage.googleapis.com` |
    /// | `GENAI_TIMEOUT_SECS`   | `120`                                       |
    /// | `STORAGE_BACKEND`      | `local` (`local`, `s3`, `memory`)           |
    /// | `STORAGE_LOCAL_DIR`    | `./data/creatures`                          |
    /// | `S3_BUCKET`            | required for `s3`                           |
    /// | `S3_PUBLIC_URL`        | required for `s3`                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let internal_api_key = non_empty_var("INTERNAL_API_KEY");

        let storage = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "local" => StorageConfig::Local {
                dir: std::env::var("STORAGE_LOCAL_DIR")
                    .unwrap_or_else(|_| "./data/creatures".into())
                    .into(),
            },
            "s3" => StorageConfig::S3 {
                bucket: non_empty_var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when STORAGE_BACKEND=s3"),
                public_url: non_empty_var("S3_PUBLIC_URL")
                    .expect("S3_PUBLIC_URL must be set when STORAGE_BACKEND=s3"),
            },
            "memory" => StorageConfig::Memory,
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3, memory"),
        };

        let genai = non_empty_var("GOOGLE_GENAI_API_KEY").map(|api_key| GenAiConfig {
            api_key,
            model: std::env::var("GENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("GENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs: std::env::var("GENAI_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .expect("GENAI_TIMEOUT_SECS must be a valid u64"),
        });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            internal_api_key,
            storage,
            pipeline: PipelineConfig { genai },
        }
    }

    /// URL prefix under which locally stored artwork is served.
    pub fn media_base_url(&self) -> String {
        format!("{}{}", self.public_base_url, crate::routes::MEDIA_PATH)
    }
}

/// Read an env var, treating empty or whitespace-only values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
