use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::database::models::User;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{
    AuthService, UserContext,
    auth::LoginInput,
    capabilities::Capability,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
    pub capabilities: Vec<Capability>,
}

pub async fn login(
    auth_service: web::Data<AuthService>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.login(input.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub async fn me(ctx: UserContext) -> Result<HttpResponse, AppError> {
    let UserContext { user, capabilities } = ctx;
    let capabilities = capabilities.iter().collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MeResponse { user, capabilities })))
}
