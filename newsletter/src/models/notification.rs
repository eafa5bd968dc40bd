use std::time::Duration;

/// How long a notification stays on screen before it hides itself
pub const AUTO_DISMISS: Duration = Duration::from_millis(5000);

pub const SUCCESS_TITLE: &str = "ثبت‌نام موفق";
pub const SUCCESS_DESCRIPTION: &str =
    "ایمیل شما با موفقیت ثبت شد. از اشتیاق شما برای همراهی با ما سپاسگزاریم!";

pub const VERIFICATION_FAILED_TITLE: &str = "خطا در اعتبارسنجی";
pub const VERIFICATION_FAILED_DESCRIPTION: &str =
    "مشکلی در فرآیند اعتبارسنجی رخ داد. لطفاً صفحه را رفرش کرده و دوباره تلاش کنید.";

pub const SUBMISSION_FAILED_TITLE: &str = "خطا در ثبت‌نام";
pub const SUBMISSION_FAILED_DESCRIPTION: &str =
    "متأسفانه مشکلی در ثبت ایمیل شما پیش آمد. لطفاً دوباره تلاش کنید.";

/// Colour treatment of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

/// A transient message shown after a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn subscribed() -> Self {
        Self::new(SUCCESS_TITLE, SUCCESS_DESCRIPTION)
    }

    pub fn verification_failed() -> Self {
        Self::new(VERIFICATION_FAILED_TITLE, VERIFICATION_FAILED_DESCRIPTION)
    }

    pub fn submission_failed() -> Self {
        Self::new(SUBMISSION_FAILED_TITLE, SUBMISSION_FAILED_DESCRIPTION)
    }

    /// Success is recognised by the title alone; anything else renders as a failure
    pub fn tone(&self) -> Tone {
        if self.title == SUCCESS_TITLE {
            Tone::Success
        } else {
            Tone::Failure
        }
    }
}
