use crate::external::{ChallengeError, ChallengeProvider, NewsletterClient};
use std::time::Duration;

use crate::models::{FormHandle, Notification, SubscriptionRequest, AUTO_DISMISS};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("challenge provider returned no verification token")]
    MissingToken,
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
    #[error("request to the newsletter endpoint failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("newsletter endpoint responded with {0}")]
    Status(reqwest::StatusCode),
}

impl SubmitError {
    /// Only a missing token gets the verification-specific message
    pub fn notification(&self) -> Notification {
        match self {
            SubmitError::MissingToken => Notification::verification_failed(),
            _ => Notification::submission_failed(),
        }
    }
}

/// Result of one submission attempt; on success, the parsed response body
pub type SubmitOutcome = Result<serde_json::Value, SubmitError>;

pub fn notification_for(outcome: &SubmitOutcome) -> Notification {
    match outcome {
        Ok(_) => Notification::subscribed(),
        Err(e) => e.notification(),
    }
}

/// Run one subscription: fetch a token, then post it with the email.
///
/// The backend is never contacted without a non-empty token.
pub async fn submit<P: ChallengeProvider>(
    email: &str,
    challenge: &P,
    client: &NewsletterClient,
) -> SubmitOutcome {
    let token = challenge
        .execute()
        .await?
        .filter(|token| !token.is_empty())
        .ok_or(SubmitError::MissingToken)?;

    let request = SubscriptionRequest::new(email, token);
    client.subscribe(&request).await
}

/// Drive one submission of the form behind `form` from start to finish.
///
/// Nothing happens and `None` is returned while another submission is in
/// flight. Otherwise the outcome is recorded on the form and the dismissal
/// of its notification is handed to `schedule` together with
/// [`AUTO_DISMISS`].
pub async fn run_submission<F, P, S>(
    form: F,
    challenge: &P,
    client: &NewsletterClient,
    schedule: S,
) -> Option<SubmitOutcome>
where
    F: FormHandle,
    P: ChallengeProvider,
    S: FnOnce(Box<dyn FnOnce()>, Duration),
{
    let email = form.update(|f| f.begin_submission()).flatten()?;

    let outcome = submit(&email, challenge, client).await;

    if let Some(ticket) = form.update(|f| f.finish(&outcome)) {
        let dismiss = Box::new(move || {
            form.update(|f| f.dismiss(ticket));
        });
        schedule(dismiss, AUTO_DISMISS);
    }
    Some(outcome)
}
