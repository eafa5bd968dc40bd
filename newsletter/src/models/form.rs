use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Notification;
use crate::submission::{notification_for, SubmitOutcome};

/// Identifies the notification a scheduled dismissal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTicket(u64);

/// State of the newsletter form: the typed email, the in-flight flag and the
/// single notification slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    email: String,
    loading: bool,
    notification: Option<Notification>,
    generation: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// The submit control is disabled while this is true
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Start a submission and return the email to send.
    ///
    /// Returns `None` while another submission is still in flight.
    pub fn begin_submission(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.notification = None;
        Some(self.email.clone())
    }

    /// Record the outcome of the in-flight submission and show its notification.
    ///
    /// The returned ticket must be passed to [`FormState::dismiss`] once
    /// `AUTO_DISMISS` has elapsed.
    pub fn finish(&mut self, outcome: &SubmitOutcome) -> DismissTicket {
        self.loading = false;
        if outcome.is_ok() {
            self.email.clear();
        }
        self.show(notification_for(outcome))
    }

    fn show(&mut self, notification: Notification) -> DismissTicket {
        self.generation += 1;
        self.notification = Some(notification);
        DismissTicket(self.generation)
    }

    /// Hide the notification the ticket was issued for. A ticket for an older
    /// notification leaves a newer one alone.
    pub fn dismiss(&mut self, ticket: DismissTicket) -> bool {
        if ticket.0 != self.generation || self.notification.is_none() {
            return false;
        }
        self.notification = None;
        true
    }
}

/// Shared access to a [`FormState`] owned elsewhere, e.g. by a UI signal.
///
/// `update` returns `None` once the state is gone.
pub trait FormHandle: Clone + 'static {
    fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R>;
}

impl FormHandle for Rc<RefCell<FormState>> {
    fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SUBMISSION_FAILED_TITLE, SUCCESS_TITLE, VERIFICATION_FAILED_TITLE};
    use crate::submission::SubmitError;

    fn filled(email: &str) -> FormState {
        let mut form = FormState::new();
        form.set_email(email);
        form
    }

    #[test]
    fn begin_submission_sets_loading_and_returns_email() {
        let mut form = filled("test@example.com");

        assert_eq!(form.begin_submission().as_deref(), Some("test@example.com"));
        assert!(form.is_loading());
    }

    #[test]
    fn second_submission_is_refused_while_loading() {
        let mut form = filled("test@example.com");
        form.begin_submission();

        assert_eq!(form.begin_submission(), None);
        assert!(form.is_loading());
    }

    #[test]
    fn success_clears_email_and_shows_success() {
        let mut form = filled("test@example.com");
        form.begin_submission();

        form.finish(&Ok(serde_json::json!({"status": "ok"})));

        assert!(!form.is_loading());
        assert_eq!(form.email(), "");
        assert_eq!(form.notification().unwrap().title, SUCCESS_TITLE);
    }

    #[test]
    fn failure_keeps_email() {
        let mut form = filled("test@example.com");
        form.begin_submission();

        form.finish(&Err(SubmitError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));

        assert!(!form.is_loading());
        assert_eq!(form.email(), "test@example.com");
        assert_eq!(form.notification().unwrap().title, SUBMISSION_FAILED_TITLE);
    }

    #[test]
    fn missing_token_shows_verification_failure() {
        let mut form = filled("test@example.com");
        form.begin_submission();

        form.finish(&Err(SubmitError::MissingToken));

        assert_eq!(form.email(), "test@example.com");
        assert_eq!(
            form.notification().unwrap().title,
            VERIFICATION_FAILED_TITLE
        );
    }

    #[test]
    fn dismiss_hides_notification_once() {
        let mut form = filled("test@example.com");
        form.begin_submission();
        let ticket = form.finish(&Err(SubmitError::MissingToken));

        assert!(form.dismiss(ticket));
        assert!(form.notification().is_none());
        assert!(!form.dismiss(ticket));
        assert!(form.notification().is_none());
    }

    #[test]
    fn new_result_replaces_visible_notification() {
        let mut form = filled("test@example.com");
        form.begin_submission();
        let first = form.finish(&Err(SubmitError::MissingToken));

        assert!(form.begin_submission().is_some());
        assert!(form.notification().is_none());
        let second = form.finish(&Ok(serde_json::json!({})));

        assert_ne!(first, second);
        assert_eq!(form.notification().unwrap().title, SUCCESS_TITLE);

        // the first timer fires late and must not hide the second notification
        assert!(!form.dismiss(first));
        assert_eq!(form.notification().unwrap().title, SUCCESS_TITLE);

        assert!(form.dismiss(second));
        assert!(form.notification().is_none());
    }
}
