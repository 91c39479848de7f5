use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGuidelinesParams {
    /// Disaster type to look up, e.g. "flood" or "earthquake". Matched exactly.
    pub disaster_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuidelinesResponse {
    pub disaster_type: String,
    /// `false` when the store has no entry and `guidelines` holds the fallback record.
    pub found: bool,
    /// Stored guideline content, returned unchanged. Its shape is whatever the store holds.
    pub guidelines: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisasterTypesResponse {
    pub disaster_types: Vec<String>,
    pub count: usize,
}
