use crate::config::{newsletter_endpoint, Settings};
use crate::models::SubscriptionRequest;
use crate::submission::SubmitError;

/// HTTP client for the newsletter subscription endpoint
#[derive(Debug, Clone)]
pub struct NewsletterClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NewsletterClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_endpoint(settings.newsletter_endpoint())
    }

    /// Build a client for the API hosted at `api_url`
    pub fn for_api(api_url: &str) -> Self {
        Self::with_endpoint(newsletter_endpoint(api_url))
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one subscription. Any 2xx with a JSON body counts as success;
    /// the body is handed back untouched.
    pub async fn subscribe(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<serde_json::Value, SubmitError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        Ok(response.json().await?)
    }
}
