use serde::{Deserialize, Serialize};

/// Body the service sends alongside non-2xx statuses, e.g. `{"error": "Email content is required"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

impl ServiceErrorBody {
    /// Parses an error body, returning `None` for anything that is not the expected shape.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(bytes)
            .ok()
            .filter(|body| !body.error.trim().is_empty())
    }
}
