use anyhow::{Context, Result};

pub const API_URL_VAR: &str = "API_URL";
pub const RECAPTCHA_SITE_KEY_VAR: &str = "RECAPTCHA_SITE_KEY";

/// Path of the subscription endpoint, relative to the API base URL
pub const NEWSLETTER_PATH: &str = "/api/v1/newsletter";

/// Values the site needs at runtime: where to post subscriptions and which
/// reCAPTCHA site key to render the challenge with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub recaptcha_site_key: String,
}

impl Settings {
    pub fn new(api_url: impl Into<String>, recaptcha_site_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            recaptcha_site_key: recaptcha_site_key.into(),
        }
    }

    /// Read settings from the process environment. Only `API_URL` is
    /// required; a missing site key is left empty.
    ///
    /// Binaries should call `dotenvy::dotenv()` first so a local `.env` file
    /// is honoured.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(API_URL_VAR)
            .with_context(|| format!("{} is not set", API_URL_VAR))?;

        Ok(Self::new(api_url, site_key_from_env()))
    }

    /// Like [`Settings::from_env`], with the API base URL given explicitly
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self::new(api_url, site_key_from_env())
    }

    /// Full URL of the subscription endpoint
    pub fn newsletter_endpoint(&self) -> String {
        newsletter_endpoint(&self.api_url)
    }
}

fn site_key_from_env() -> String {
    std::env::var(RECAPTCHA_SITE_KEY_VAR).unwrap_or_default()
}

pub fn newsletter_endpoint(api_url: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), NEWSLETTER_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_appended_to_base_url() {
        let settings = Settings::new("https://api.rimabox.ir", "site-key");
        assert_eq!(
            settings.newsletter_endpoint(),
            "https://api.rimabox.ir/api/v1/newsletter"
        );
    }

    // The only test touching the process environment, so it cannot race another
    #[test]
    fn from_env_needs_only_the_api_url() {
        std::env::remove_var(RECAPTCHA_SITE_KEY_VAR);
        std::env::remove_var(API_URL_VAR);
        assert!(Settings::from_env().is_err());

        std::env::set_var(API_URL_VAR, "http://localhost:8000");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.api_url, "http://localhost:8000");
        assert_eq!(settings.recaptcha_site_key, "");
        assert_eq!(Settings::with_api_url("http://localhost:8000"), settings);

        std::env::set_var(RECAPTCHA_SITE_KEY_VAR, "site-key");
        assert_eq!(Settings::from_env().unwrap().recaptcha_site_key, "site-key");
        assert_eq!(
            Settings::with_api_url("https://api.rimabox.ir").recaptcha_site_key,
            "site-key"
        );

        std::env::remove_var(API_URL_VAR);
        std::env::remove_var(RECAPTCHA_SITE_KEY_VAR);
    }

    #[test]
    fn trailing_slash_on_base_url_is_tolerated() {
        assert_eq!(
            newsletter_endpoint("http://localhost:8000/"),
            "http://localhost:8000/api/v1/newsletter"
        );
    }
}
