pub mod config;
pub mod external;
pub mod models;
pub mod submission;

pub use config::*;
pub use models::*;
pub use submission::*;
