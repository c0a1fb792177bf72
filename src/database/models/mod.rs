pub(crate) mod macros;

pub mod leave;
pub mod report;
pub mod settings;
pub mod user;

// Re-export all models for easy importing
pub use leave::*;
pub use report::*;
pub use settings::*;
pub use user::*;
