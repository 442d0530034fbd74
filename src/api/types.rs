//! API request and response types.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Number of tasks in the loaded dataset
    pub tasks: usize,
}

/// Task search parameters, from the query string or a urlencoded body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTagParams {
    #[serde(rename = "newTag")]
    pub new_tag: Option<String>,
}

/// `index` is kept as text so a malformed value can be reported as a bad request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoveTagParams {
    pub index: Option<String>,
}
