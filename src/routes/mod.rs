use actix_web::web;

use crate::handlers::health;

pub mod admin;
pub mod auth;
pub mod leaves;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(users::configure)
            .configure(leaves::configure)
            .configure(admin::configure),
    );
}
