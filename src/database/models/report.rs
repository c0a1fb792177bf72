use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::leave::{LeaveStatus, LeaveType};

/// A leave request joined with its owner's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveReportRow {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub applied_on: DateTime<Utc>,
    pub reason: String,
}
