/// Configuration management for post-service
///
/// Loads configuration from environment variables with development
/// fallbacks.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Object storage (S3) configuration
    pub s3: S3Config,
    /// Tag recommendation service configuration
    pub recommender: RecommenderConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for local stacks (minio, localstack); empty in AWS.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Base under which uploaded objects are publicly addressable.
    pub public_base_url: String,
}

/// Tag recommendation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Base URL of the recommendation service
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "post-service-dev".to_string());
        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        if app_env.eq_ignore_ascii_case("production") && std::env::var("S3_BUCKET").is_err() {
            return Err("S3_BUCKET must be set in production".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("POST_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("POST_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8082),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/posts".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            s3: S3Config {
                public_base_url: std::env::var("S3_PUBLIC_BASE_URL").unwrap_or_else(|_| {
                    format!("https://{}.s3.{}.amazonaws.com", bucket, region)
                }),
                access_key_id: std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
                secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
                endpoint: std::env::var("S3_ENDPOINT").ok().filter(|e| !e.trim().is_empty()),
                bucket,
                region,
            },
            recommender: RecommenderConfig {
                url: std::env::var("TAG_RECOMMENDER_URL")
                    .unwrap_or_else(|_| "http://localhost:8090".to_string()),
                timeout_ms: std::env::var("TAG_RECOMMENDER_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5_000),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}
