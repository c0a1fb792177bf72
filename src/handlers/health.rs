use actix_web::{HttpResponse, Responder, web};

use crate::services::Clock;

pub async fn health(clock: web::Data<Clock>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": clock.now()
    }))
}
