pub mod admin;
pub mod approval;
pub mod auth;
pub mod capabilities;
pub mod clock;
pub mod leave_validator;
pub mod lifecycle;
pub mod report;
pub mod user_context;

pub use admin::AdminService;
pub use approval::ApprovalService;
pub use auth::AuthService;
pub use clock::Clock;
pub use report::ReportService;
pub use user_context::UserContext;
