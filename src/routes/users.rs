use actix_web::web;

use crate::handlers::{settings, users};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/config", web::get().to(settings::get_configuration))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::get_login_users))
                .route("/{id}", web::get().to(users::get_user)),
        );
}
