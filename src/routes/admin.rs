use crate::handlers::admin;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(admin::get_users))
            .route("/users", web::post().to(admin::create_user))
            .route("/users/{id}", web::put().to(admin::update_user))
            .route("/users/{id}", web::delete().to(admin::delete_user))
            .route("/config", web::put().to(admin::update_configuration))
            .route("/leaves", web::get().to(admin::get_all_leaves))
            .route(
                "/reports/leaves.csv",
                web::get().to(admin::export_leaves_csv),
            )
            .route("/reset-data", web::post().to(admin::reset_data)),
    );
}
