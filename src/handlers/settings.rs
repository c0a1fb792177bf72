use actix_web::{HttpResponse, web};

use crate::database::repositories::SettingsRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::UserContext;

pub async fn get_configuration(
    _ctx: UserContext,
    repo: web::Data<SettingsRepository>,
) -> Result<HttpResponse, AppError> {
    let configuration = repo.current().await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(configuration)))
}
