// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

/// Runtime knobs, assembled from the environment in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub cache_ttl: Duration,
    pub cache_max_entries: usize,
    pub token_ttl: Duration,
    pub auth_secret: Vec<u8>,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".to_string(),
            db_path: PathBuf::from("pousada.db"),
            cache_ttl: Duration::from_secs(300),
            cache_max_entries: 256,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            auth_secret: b"pousada-dev-secret".to_vec(),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}
