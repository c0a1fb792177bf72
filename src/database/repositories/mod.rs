pub mod leave_request;
pub mod settings;
pub mod user;

// Re-export all repositories for easy importing
pub use leave_request::LeaveRequestRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
