use actix_web::{HttpRequest, HttpResponse, web};

use crate::database::models::{DecisionInput, LeaveRequestInput};
use crate::database::repositories::LeaveRequestRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::{ApprovalService, Clock, UserContext, capabilities::Capability};

/// A user's own requests, newest first
pub async fn get_user_leaves(
    ctx: UserContext,
    repo: web::Data<LeaveRequestRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    ctx.requires_self_or(&user_id, Capability::ViewDirectory)?;

    let requests = repo.find_by_user(&user_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

pub async fn create_leave(
    ctx: UserContext,
    service: web::Data<ApprovalService>,
    clock: web::Data<Clock>,
    input: web::Json<LeaveRequestInput>,
) -> Result<HttpResponse, AppError> {
    let request = service
        .submit(&ctx, input.into_inner(), clock.now())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(request)))
}

pub async fn cancel_leave(
    ctx: UserContext,
    service: web::Data<ApprovalService>,
    clock: web::Data<Clock>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();
    let request = service.cancel(&ctx, &request_id, clock.today()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(request),
        "Leave cancelled successfully",
    )))
}

pub async fn get_manager_pending(
    ctx: UserContext,
    service: web::Data<ApprovalService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let manager_id = path.into_inner();
    let requests = service.pending_for_manager(&ctx, &manager_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

pub async fn decide_leave(
    req: HttpRequest,
    ctx: UserContext,
    service: web::Data<ApprovalService>,
    clock: web::Data<Clock>,
    path: web::Path<String>,
    input: web::Json<DecisionInput>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();
    let decision = input.into_inner().status;
    let request = service
        .decide(&ctx, &request_id, decision, clock.now())
        .await?;

    log::info!(
        "[{}] {} marked leave {} as {}",
        req.correlation_id().unwrap_or_default(),
        ctx.user_id(),
        request_id,
        decision
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(request),
        &format!("Leave {} successfully", decision),
    )))
}
