use serde::Deserialize;

use crate::icons::IconKind;

/// Static text of the landing page
#[derive(Debug, Clone, Deserialize)]
pub struct PageContent {
    pub brand: String,
    pub tagline: String,
    pub copyright: String,
    pub newsletter: NewsletterCopy,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterCopy {
    pub heading: String,
    pub placeholder: String,
    pub submit: String,
    pub submitting: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub icon: IconKind,
    pub title: String,
    pub description: String,
}

pub fn load() -> Result<PageContent, toml::de::Error> {
    toml::from_str(include_str!("content.toml"))
}
