use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Current service status
    pub status: String,

    /// RFC 3339 timestamp of the check
    pub timestamp: String,
}
