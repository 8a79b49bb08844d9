use serde::{Deserialize, Serialize};

/// Structured extraction returned by the classification service for one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub sender_name: Option<String>,
    pub greeting: String,
    pub classification: String,
    pub suggested_label: String,
    pub email_snippet: String,
}

impl ClassificationResult {
    /// Sender name for display; blank or absent names collapse to `None`.
    pub fn sender_display_name(&self) -> Option<&str> {
        self.sender_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub label: String,
    pub description: String,
}
