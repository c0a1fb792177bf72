use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;
use super::user::BalanceKind;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum LeaveType {
        Casual => "casual",
        Sick => "sick",
        Vacation => "vacation",
        Wfh => "wfh",
        CompOff => "comp-off",
        Academic => "academic",
    }
}

impl LeaveType {
    /// Casual and vacation leave have to be booked ahead of time.
    pub fn requires_advance_notice(&self) -> bool {
        matches!(self, LeaveType::Casual | LeaveType::Vacation)
    }

    /// Work from home is time at work, so it never touches a balance.
    pub fn is_debited(&self) -> bool {
        !matches!(self, LeaveType::Wfh)
    }

    pub fn balance_kind(&self) -> Option<BalanceKind> {
        match self {
            LeaveType::Casual => Some(BalanceKind::Casual),
            LeaveType::Sick => Some(BalanceKind::Sick),
            LeaveType::Vacation => Some(BalanceKind::Vacation),
            LeaveType::CompOff => Some(BalanceKind::CompOff),
            LeaveType::Wfh | LeaveType::Academic => None,
        }
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum LeaveStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

impl LeaveStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

string_enum! {
    /// A manager's verdict on a pending request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Decision {
        Approved => "approved",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub user_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_on: DateTime<Utc>,
    pub decided_by: Option<String>,
    pub decided_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestInput {
    /// Optional, must match the caller when present.
    #[serde(default)]
    pub user_id: Option<String>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionInput {
    pub status: Decision,
}
