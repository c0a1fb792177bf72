use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::database::{
    Database,
    models::{
        BalanceKind, Decision, LeaveBalances, LeaveRequest, LeaveRequestInput, LeaveStatus,
        LeaveType,
    },
    repositories::LeaveRequestRepository,
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::capabilities::Capability;
use crate::services::leave_validator::{self, LeaveCandidate};
use crate::services::lifecycle::{self, Transition};
use crate::services::user_context::UserContext;

/// How an approved request was charged against its owner's balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debit {
    pub kind: Option<BalanceKind>,
    pub from_balance: u32,
    pub lop: u32,
}

/// Takes `days` from the bucket matching `leave_type`. Whatever the bucket
/// cannot cover is charged to loss of pay, as is the whole amount for types
/// without a bucket of their own.
pub fn debit_balance(balances: &mut LeaveBalances, leave_type: LeaveType, days: u32) -> Debit {
    let kind = leave_type.balance_kind();

    let from_balance = match kind.and_then(|kind| balances.get_mut(&kind)) {
        Some(remaining) => {
            let taken = (*remaining).min(days);
            *remaining -= taken;
            taken
        }
        None => 0,
    };

    let lop = days - from_balance;
    if lop > 0 {
        let entry = balances.entry(BalanceKind::Lop).or_insert(0);
        *entry = entry.saturating_add(lop);
    }

    Debit {
        kind,
        from_balance,
        lop,
    }
}

/// Submission, cancellation and manager decisions on leave requests.
#[derive(Clone)]
pub struct ApprovalService {
    database: Database,
    leave_request_repository: LeaveRequestRepository,
}

impl ApprovalService {
    pub fn new(database: Database) -> Self {
        let leave_request_repository = LeaveRequestRepository::new(database.clone());
        Self {
            database,
            leave_request_repository,
        }
    }

    /// Validates `input` against the configuration in force and stores it as
    /// a new pending request owned by the caller.
    pub async fn submit(
        &self,
        ctx: &UserContext,
        input: LeaveRequestInput,
        now: DateTime<Utc>,
    ) -> Result<LeaveRequest, AppError> {
        ctx.requires(Capability::ApplyLeave)?;

        if input
            .user_id
            .as_deref()
            .is_some_and(|user_id| user_id != ctx.user_id())
        {
            return Err(AppError::PermissionDenied(
                "Leave can only be requested for yourself".to_string(),
            ));
        }

        let candidate = LeaveCandidate {
            leave_type: input.leave_type,
            start_date: input.start_date,
            end_date: input.end_date,
        };
        let owner_id = ctx.user_id().to_string();

        let request = DatabaseTransaction::run(&self.database, |tx| {
            let days = leave_validator::validate(&candidate, &tx.configuration, now.date_naive())?;

            let request = LeaveRequest {
                id: format!("leave_{}_{}", owner_id, Uuid::new_v4().simple()),
                user_id: owner_id.clone(),
                leave_type: candidate.leave_type,
                start_date: candidate.start_date,
                end_date: candidate.end_date,
                reason: input.reason.trim().to_string(),
                status: LeaveStatus::Pending,
                applied_on: now,
                decided_by: None,
                decided_on: None,
            };

            log::info!(
                "Leave request {} submitted by {}: {} for {} day(s)",
                request.id,
                request.user_id,
                request.leave_type,
                days
            );

            tx.leave_requests.push(request.clone());
            Ok(request)
        })
        .await?;

        Ok(request)
    }

    /// Owner withdraws a pending request that has not started yet.
    pub async fn cancel(
        &self,
        ctx: &UserContext,
        request_id: &str,
        today: NaiveDate,
    ) -> Result<LeaveRequest, AppError> {
        DatabaseTransaction::run(&self.database, |tx| {
            let request = tx
                .leave_request_mut(request_id)
                .ok_or_else(|| AppError::not_found("Leave request", request_id))?;

            if request.user_id != ctx.user_id() {
                return Err(AppError::PermissionDenied(
                    "Only the requester can cancel a leave request".to_string(),
                ));
            }
            ctx.requires(Capability::CancelOwnLeave)?;

            lifecycle::apply(request, Transition::Cancel, today)?;
            log::info!("Leave request {} cancelled by {}", request.id, ctx.user_id());

            Ok(request.clone())
        })
        .await
    }

    /// Approves or rejects a pending request. On approval the owner's balance
    /// is debited in the same write when `deductOnApproval` is on.
    pub async fn decide(
        &self,
        ctx: &UserContext,
        request_id: &str,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> Result<LeaveRequest, AppError> {
        DatabaseTransaction::run(&self.database, |tx| {
            let mut request = tx
                .leave_request(request_id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Leave request", request_id))?;

            let allowed = match tx.user(&request.user_id) {
                Some(owner) => ctx.capabilities.can_decide_for(ctx.user_id(), owner),
                None => ctx.can(Capability::DecideAnyLeave),
            };
            if !allowed {
                return Err(AppError::PermissionDenied(
                    "Only the requester's manager or an admin can decide this request"
                        .to_string(),
                ));
            }

            let status = lifecycle::apply(&mut request, decision.into(), now.date_naive())?;
            request.decided_by = Some(ctx.user_id().to_string());
            request.decided_on = Some(now);
            log::info!(
                "Leave request {} {} by {}",
                request.id,
                status,
                ctx.user_id()
            );

            let deduct = tx.configuration.settings.deduct_on_approval;
            if status == LeaveStatus::Approved && deduct && request.leave_type.is_debited() {
                let days = leave_validator::day_count(request.start_date, request.end_date);
                if let Some(owner) = tx.user_mut(&request.user_id) {
                    let debit = debit_balance(&mut owner.leave_balances, request.leave_type, days);
                    log::info!(
                        "Debited {} day(s) from {} ({:?}: {}, lop: {})",
                        days,
                        owner.id,
                        debit.kind,
                        debit.from_balance,
                        debit.lop
                    );
                }
            }

            if let Some(stored) = tx.leave_request_mut(request_id) {
                *stored = request.clone();
            }

            Ok(request)
        })
        .await
    }

    /// Pending requests of `manager_id`'s current reports. Managers see their
    /// own queue, admins may look at anyone's.
    pub async fn pending_for_manager(
        &self,
        ctx: &UserContext,
        manager_id: &str,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        if ctx.user_id() == manager_id {
            ctx.requires(Capability::DecideTeamLeave)?;
        } else {
            ctx.requires(Capability::DecideAnyLeave)?;
        }

        Ok(self
            .leave_request_repository
            .find_pending_for_manager(manager_id)
            .await)
    }
}
