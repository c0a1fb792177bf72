use actix_web::{HttpRequest, error::JsonPayloadError, web};

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use database::Database;
pub use error::AppError;
pub use services::{AdminService, ApprovalService, AuthService, Clock, ReportService};

use database::repositories::{LeaveRequestRepository, SettingsRepository, UserRepository};

/// Shared state handed to every worker. Built once, then registered on each
/// `App` through [`AppState::register`].
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<Config>,
    pub clock: web::Data<Clock>,
    pub user_repository: web::Data<UserRepository>,
    pub leave_request_repository: web::Data<LeaveRequestRepository>,
    pub settings_repository: web::Data<SettingsRepository>,
    pub auth_service: web::Data<AuthService>,
    pub approval_service: web::Data<ApprovalService>,
    pub admin_service: web::Data<AdminService>,
    pub report_service: web::Data<ReportService>,
}

impl AppState {
    pub fn new(config: Config, database: Database, clock: Clock) -> Self {
        let user_repository = UserRepository::new(database.clone());
        let auth_service = AuthService::new(config.clone(), user_repository.clone());
        let admin_service = AdminService::new(database.clone(), &config);

        Self {
            config: web::Data::new(config),
            clock: web::Data::new(clock),
            user_repository: web::Data::new(user_repository),
            leave_request_repository: web::Data::new(LeaveRequestRepository::new(
                database.clone(),
            )),
            settings_repository: web::Data::new(SettingsRepository::new(database.clone())),
            auth_service: web::Data::new(auth_service),
            approval_service: web::Data::new(ApprovalService::new(database.clone())),
            admin_service: web::Data::new(admin_service),
            report_service: web::Data::new(ReportService::new(database)),
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.config.clone())
            .app_data(self.clock.clone())
            .app_data(self.user_repository.clone())
            .app_data(self.leave_request_repository.clone())
            .app_data(self.settings_repository.clone())
            .app_data(self.auth_service.clone())
            .app_data(self.approval_service.clone())
            .app_data(self.admin_service.clone())
            .app_data(self.report_service.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler));
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}
