#[cfg(feature = "cli")]
pub mod cli;
pub mod form;
pub mod notification;
pub mod request;

#[cfg(feature = "cli")]
pub use cli::*;
pub use form::*;
pub use notification::*;
pub use request::*;
