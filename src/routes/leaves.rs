use actix_web::web;

use crate::handlers::leaves;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/leaves")
            .route("", web::post().to(leaves::create_leave))
            .route("/user/{user_id}", web::get().to(leaves::get_user_leaves))
            .route(
                "/manager/{manager_id}",
                web::get().to(leaves::get_manager_pending),
            )
            .route("/{id}/cancel", web::put().to(leaves::cancel_leave))
            .route("/{id}/decide", web::put().to(leaves::decide_leave)),
    );
}
