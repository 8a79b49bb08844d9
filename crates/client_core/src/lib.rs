use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{CategoryInfo, ClassificationResult},
    error::ServiceErrorBody,
    protocol::{CategoriesResponse, ProcessEmailRequest, CATEGORIES_PATH, PROCESS_EMAIL_PATH},
};
use tracing::{debug, warn};

pub mod category;
pub mod config;
pub mod error;
pub mod session;
pub mod submission;
pub mod validator;

pub use category::{builtin_catalogue, style_for, CategoryStyle};
pub use config::{load_settings, ClientSettings};
pub use error::ProcessError;
pub use session::{AttemptOutcome, SubmissionSession};
pub use submission::{
    AttemptId, Resolution, SubmissionController, SubmissionRequest, SubmissionState,
};
pub use validator::can_submit;

/// Remote classification capability. The client only drives it; how text is
/// classified is the service's business.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    async fn process_email(
        &self,
        email_content: &str,
    ) -> Result<ClassificationResult, ProcessError>;

    async fn list_categories(&self) -> Result<Vec<CategoryInfo>, ProcessError>;
}

pub struct HttpClassificationService {
    http: Client,
    service_url: String,
}

impl HttpClassificationService {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), service_url)
    }

    pub fn with_client(http: Client, service_url: impl Into<String>) -> Self {
        let service_url: String = service_url.into();
        Self {
            http,
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        let settings = settings.clone().validated()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self::with_client(http, settings.service_url))
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.service_url)
    }
}

/// Reads the body of a 2xx response, or turns a non-2xx response into a service error.
async fn success_body(response: Response) -> Result<Vec<u8>, ProcessError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let detail = ServiceErrorBody::parse(&body).map(|body| body.error);
        warn!(status = status.as_u16(), ?detail, "classification service rejected request");
        return Err(ProcessError::Service {
            status: status.as_u16(),
            detail,
        });
    }

    let body = response.bytes().await.map_err(|err| {
        warn!("failed to read classification response body: {err}");
        ProcessError::transport(err)
    })?;
    Ok(body.to_vec())
}

#[async_trait]
impl ClassificationService for HttpClassificationService {
    async fn process_email(
        &self,
        email_content: &str,
    ) -> Result<ClassificationResult, ProcessError> {
        let response = self
            .http
            .post(self.endpoint(PROCESS_EMAIL_PATH))
            .json(&ProcessEmailRequest {
                email_content: email_content.to_string(),
            })
            .send()
            .await
            .map_err(|err| {
                warn!("classification request failed before a response: {err}");
                ProcessError::transport(err)
            })?;

        let body = success_body(response).await?;
        let result = serde_json::from_slice::<ClassificationResult>(&body)
            .map_err(ProcessError::malformed)?;
        debug!(classification = %result.classification, "classification response decoded");
        Ok(result)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryInfo>, ProcessError> {
        let response = self
            .http
            .get(self.endpoint(CATEGORIES_PATH))
            .send()
            .await
            .map_err(ProcessError::transport)?;

        let body = success_body(response).await?;
        let categories = serde_json::from_slice::<CategoriesResponse>(&body)
            .map_err(ProcessError::malformed)?;
        Ok(categories.into_categories())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
