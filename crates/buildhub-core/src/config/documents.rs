//! Document upload configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to uploaded document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Maximum accepted file size in bytes (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MB
}
