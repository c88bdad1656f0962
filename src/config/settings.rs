use serde::Deserialize;
use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    /// Base URL prepended to stored file keys when building public references.
    pub files_public_url: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        let s3_endpoint = env::get(EnvKey::S3Endpoint)?;
        let s3_bucket = env::get(EnvKey::S3Bucket)?;
        let default_public_url = format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket);

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            db_max_connections: env::get_parsed(EnvKey::DbMaxConnections, 20),
            jwt_secret: env::get(EnvKey::JwtSecret)?,
            s3_access_key: env::get(EnvKey::S3AccessKey)?,
            s3_secret_key: env::get(EnvKey::S3SecretKey)?,
            files_public_url: env::get_or(EnvKey::FilesPublicUrl, &default_public_url),
            s3_endpoint,
            s3_bucket,
        })
    }
}
