use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::{BalanceKind, EmployeeType};

/// Monthly accrual per employee type and balance kind.
pub type LeaveQuotas = BTreeMap<EmployeeType, BTreeMap<BalanceKind, f64>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub advance_notice_days: u32,
    #[serde(rename = "maxLOPs", alias = "maxLops", default = "default_max_lops")]
    pub max_lops: u32,
    #[serde(default = "default_carry_forward_cap")]
    pub carry_forward_cap: u32,
    /// Whether approving a request debits the owner's balance.
    #[serde(default = "default_deduct_on_approval")]
    pub deduct_on_approval: bool,
    /// Keys this service does not interpret, kept as written.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_max_lops() -> u32 {
    10
}

fn default_carry_forward_cap() -> u32 {
    5
}

fn default_deduct_on_approval() -> bool {
    true
}

/// Calendar and policy record read by the leave validator. Every overwrite
/// produces a new `version`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub version: u64,
    pub holidays: BTreeSet<NaiveDate>,
    pub leave_quotas: LeaveQuotas,
    pub settings: Settings,
}

impl Configuration {
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn advance_notice_days(&self) -> u32 {
        self.settings.advance_notice_days
    }
}

/// Body of a configuration overwrite. Holidays stay strings here so a bad
/// date can be named in the error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationInput {
    pub holidays: Vec<String>,
    pub leave_quotas: LeaveQuotas,
    pub settings: Settings,
}
