//! Leave request state machine.
//!
//! A request starts `pending` and moves at most once: a manager approves or
//! rejects it, or its owner cancels it before the start date. `approved`,
//! `rejected` and `cancelled` never change again.

use chrono::NaiveDate;
use thiserror::Error;

use crate::database::models::{Decision, LeaveRequest, LeaveStatus};

/// Status changes a leave request can go through. All of them start from
/// `pending`; the states they reach are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject,
    Cancel,
}

impl Transition {
    pub fn target(&self) -> LeaveStatus {
        match self {
            Transition::Approve => LeaveStatus::Approved,
            Transition::Reject => LeaveStatus::Rejected,
            Transition::Cancel => LeaveStatus::Cancelled,
        }
    }
}

impl From<Decision> for Transition {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Transition::Approve,
            Decision::Rejected => Transition::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition: leave request is {from} and cannot become {to}")]
    InvalidTransition { from: LeaveStatus, to: LeaveStatus },

    #[error("Invalid transition: leave starting on {start_date} can no longer be cancelled")]
    AlreadyStarted { start_date: NaiveDate },
}

/// Status `request` would move to under `transition` as of `today`.
pub fn next_status(
    request: &LeaveRequest,
    transition: Transition,
    today: NaiveDate,
) -> Result<LeaveStatus, TransitionError> {
    let to = transition.target();

    if request.status.is_terminal() {
        return Err(TransitionError::InvalidTransition {
            from: request.status,
            to,
        });
    }

    if transition == Transition::Cancel && request.start_date <= today {
        return Err(TransitionError::AlreadyStarted {
            start_date: request.start_date,
        });
    }

    Ok(to)
}

pub fn apply(
    request: &mut LeaveRequest,
    transition: Transition,
    today: NaiveDate,
) -> Result<LeaveStatus, TransitionError> {
    let status = next_status(request, transition, today)?;
    request.status = status;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::LeaveType;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request(status: LeaveStatus, start: &str) -> LeaveRequest {
        LeaveRequest {
            id: "leave_1".to_string(),
            user_id: "emp1".to_string(),
            leave_type: LeaveType::Sick,
            start_date: date(start),
            end_date: date(start),
            reason: String::new(),
            status,
            applied_on: Utc::now(),
            decided_by: None,
            decided_on: None,
        }
    }

    const ALL: [Transition; 3] = [Transition::Approve, Transition::Reject, Transition::Cancel];

    #[test]
    fn pending_reaches_every_terminal_state() {
        let today = date("2025-06-01");
        for transition in ALL {
            let mut leave = request(LeaveStatus::Pending, "2025-06-10");
            let status = apply(&mut leave, transition, today).unwrap();
            assert_eq!(status, transition.target());
            assert_eq!(leave.status, transition.target());
        }
    }

    #[test]
    fn terminal_states_never_move() {
        let today = date("2025-06-01");
        for from in [
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
            LeaveStatus::Cancelled,
        ] {
            for transition in ALL {
                let mut leave = request(from, "2025-06-10");
                let result = apply(&mut leave, transition, today);
                assert_eq!(
                    result,
                    Err(TransitionError::InvalidTransition {
                        from,
                        to: transition.target()
                    })
                );
                assert_eq!(leave.status, from);
            }
        }
    }

    #[test]
    fn cancellation_needs_a_future_start() {
        let mut leave = request(LeaveStatus::Pending, "2025-06-10");

        assert_eq!(
            apply(&mut leave, Transition::Cancel, date("2025-06-10")),
            Err(TransitionError::AlreadyStarted {
                start_date: date("2025-06-10")
            })
        );
        assert!(apply(&mut leave, Transition::Cancel, date("2025-06-12")).is_err());
        assert_eq!(leave.status, LeaveStatus::Pending);

        assert_eq!(
            apply(&mut leave, Transition::Cancel, date("2025-06-09")),
            Ok(LeaveStatus::Cancelled)
        );
    }

    #[test]
    fn managers_may_decide_requests_that_already_started() {
        let mut leave = request(LeaveStatus::Pending, "2025-06-01");
        assert_eq!(
            apply(&mut leave, Transition::Approve, date("2025-06-05")),
            Ok(LeaveStatus::Approved)
        );
    }
}
