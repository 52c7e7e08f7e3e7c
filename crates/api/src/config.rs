use vetrina_core::signing::RetireMode;
use vetrina_pipeline::PipelineConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the bucket names have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Color literals accepted by the signing endpoint.
    pub allowed_colors: Vec<String>,
    /// Optional S3-compatible endpoint override (local development).
    pub s3_endpoint: Option<String>,
    /// Signing pipeline knobs.
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ALLOWED_COLORS`       | `red,blue`                 |
    /// | `S3_ENDPOINT`          | unset                      |
    /// | `BUCKET_ORIGINAL`      | required                   |
    /// | `BUCKET_SIGNED`        | `BUCKET_ORIGINAL`          |
    /// | `CONTENT_TYPE`         | `image/png`                |
    /// | `WATERMARK_PREFIX`     | `watermark`                |
    /// | `OUTPUT_PREFIX`        | `immobili`                 |
    /// | `MIN_WIDTH`            | `1000`                     |
    /// | `APPLY_DARKEN`         | `false`                    |
    /// | `REQUIRE_PROPERTY`     | `true`                     |
    /// | `RETIRE_MODE`          | `delete`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = env_list("CORS_ORIGINS", "http://localhost:5173");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let allowed_colors = env_list("ALLOWED_COLORS", "red,blue");

        let s3_endpoint = std::env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());

        let bucket_original =
            std::env::var("BUCKET_ORIGINAL").expect("BUCKET_ORIGINAL must be set");
        // Single-bucket deployments simply omit BUCKET_SIGNED.
        let bucket_signed =
            std::env::var("BUCKET_SIGNED").unwrap_or_else(|_| bucket_original.clone());

        let min_width: u32 = std::env::var("MIN_WIDTH")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("MIN_WIDTH must be a valid u32");

        let retire_mode = RetireMode::parse(
            &std::env::var("RETIRE_MODE").unwrap_or_else(|_| "delete".into()),
        )
        .expect("RETIRE_MODE must be 'delete' or 'rename'");

        let pipeline = PipelineConfig {
            bucket_original,
            bucket_signed,
            content_type: std::env::var("CONTENT_TYPE").unwrap_or_else(|_| "image/png".into()),
            watermark_prefix: std::env::var("WATERMARK_PREFIX")
                .unwrap_or_else(|_| "watermark".into()),
            output_prefix: std::env::var("OUTPUT_PREFIX").unwrap_or_else(|_| "immobili".into()),
            min_width,
            apply_darken: env_bool("APPLY_DARKEN", false),
            require_property: env_bool("REQUIRE_PROPERTY", true),
            retire_mode,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            allowed_colors,
            s3_endpoint,
            pipeline,
        }
    }
}

/// Comma-separated env list with a default, trimmed and de-emptied.
fn env_list(name: &str, default: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_else(|_| default.into())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Boolean env var accepting `true`/`false`/`1`/`0`.
fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => match value.trim() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => panic!("{name} must be a boolean, got '{other}'"),
        },
        Err(_) => default,
    }
}
