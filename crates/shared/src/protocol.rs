use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::CategoryInfo;

pub const PROCESS_EMAIL_PATH: &str = "/api/email/process";
pub const CATEGORIES_PATH: &str = "/api/email/categories";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEmailRequest {
    pub email_content: String,
}

/// Label to description map served by the categories endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoriesResponse(pub BTreeMap<String, String>);

impl CategoriesResponse {
    pub fn into_categories(self) -> Vec<CategoryInfo> {
        self.0
            .into_iter()
            .map(|(label, description)| CategoryInfo { label, description })
            .collect()
    }
}
