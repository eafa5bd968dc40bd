/// Failure to obtain a verification token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    /// The provider was invoked before its handle was bound
    #[error("challenge provider is not initialized")]
    NotInitialized,
    #[error("challenge provider rejected the request: {0}")]
    Rejected(String),
}

/// Bot-verification mechanism that issues one-time tokens on demand.
///
/// `Ok(None)` means the provider ran but produced no token.
#[allow(async_fn_in_trait)]
pub trait ChallengeProvider {
    async fn execute(&self) -> Result<Option<String>, ChallengeError>;
}

/// A handle that has not been bound yet behaves like an uninitialized provider
impl<P: ChallengeProvider> ChallengeProvider for Option<P> {
    async fn execute(&self) -> Result<Option<String>, ChallengeError> {
        match self {
            Some(provider) => provider.execute().await,
            None => Err(ChallengeError::NotInitialized),
        }
    }
}

/// A token handed over up front, e.g. from the command line
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl ChallengeProvider for StaticToken {
    async fn execute(&self) -> Result<Option<String>, ChallengeError> {
        Ok(self.0.clone())
    }
}
