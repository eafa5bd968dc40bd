pub mod challenge;
pub mod newsletter_api;

pub use challenge::*;
pub use newsletter_api::*;
