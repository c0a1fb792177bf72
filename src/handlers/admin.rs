use actix_web::{HttpResponse, http::header, web};

use crate::database::models::{CreateUserInput, UpdateUserInput};
use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{AdminService, Clock, ReportService, UserContext, capabilities::Capability};

pub async fn get_users(
    ctx: UserContext,
    repo: web::Data<UserRepository>,
) -> Result<HttpResponse, AppError> {
    ctx.requires(Capability::ManageUsers)?;
    let users = repo.find_all().await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

pub async fn create_user(
    ctx: UserContext,
    service: web::Data<AdminService>,
    input: web::Json<CreateUserInput>,
) -> Result<HttpResponse, AppError> {
    let user = service.create_user(&ctx, input.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

pub async fn update_user(
    ctx: UserContext,
    service: web::Data<AdminService>,
    path: web::Path<String>,
    input: web::Json<UpdateUserInput>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = service
        .update_user(&ctx, &user_id, input.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

pub async fn delete_user(
    ctx: UserContext,
    service: web::Data<AdminService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    service.delete_user(&ctx, &user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        &format!("User {} deleted.", user_id),
    )))
}

/// Overwrites the whole configuration. The body is taken as raw JSON so
/// every malformed part is reported as a bad request.
pub async fn update_configuration(
    ctx: UserContext,
    service: web::Data<AdminService>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let configuration = service
        .update_configuration(&ctx, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(configuration)))
}

pub async fn get_all_leaves(
    ctx: UserContext,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, AppError> {
    let rows = service.all_requests(&ctx).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}

pub async fn export_leaves_csv(
    ctx: UserContext,
    service: web::Data<ReportService>,
    clock: web::Data<Clock>,
) -> Result<HttpResponse, AppError> {
    let csv = service.export_csv(&ctx).await?;
    let filename = format!("leave_report_{}.csv", clock.today());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(csv))
}

pub async fn reset_data(
    ctx: UserContext,
    service: web::Data<AdminService>,
) -> Result<HttpResponse, AppError> {
    service.reset_data(&ctx).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Mock data has been reset to default.",
    )))
}
