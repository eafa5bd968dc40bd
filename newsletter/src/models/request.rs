use serde::Serialize;

/// Body of `POST /api/v1/newsletter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionRequest {
    pub email: String,
    pub recaptcha_token: String,
}

impl SubscriptionRequest {
    pub fn new(email: impl Into<String>, recaptcha_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            recaptcha_token: recaptcha_token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_field_names() {
        let request = SubscriptionRequest::new("test@example.com", "abc123");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "test@example.com", "recaptcha_token": "abc123"})
        );
    }
}
