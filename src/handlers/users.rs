use actix_web::{HttpResponse, web};

use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{UserContext, capabilities::Capability};

/// Users offered on the login screen. Public.
pub async fn get_login_users(
    repo: web::Data<UserRepository>,
) -> Result<HttpResponse, AppError> {
    let users = repo.find_login_users().await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

pub async fn get_user(
    ctx: UserContext,
    repo: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    ctx.requires_self_or(&user_id, Capability::ViewDirectory)?;

    let user = repo
        .find_by_id(&user_id)
        .await
        .ok_or_else(|| AppError::not_found("User", &user_id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}
