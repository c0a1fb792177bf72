use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Role {
        Employee => "employee",
        Manager => "manager",
        Admin => "admin",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum EmployeeType {
        FullTime => "full-time",
        Intern => "intern",
        Trainee => "trainee",
    }
}

string_enum! {
    /// Buckets a user's remaining leave is tracked in. `Lop` (loss of pay)
    /// accumulates the days taken beyond what a bucket could cover.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum BalanceKind {
        Sick => "sick",
        Casual => "casual",
        Vacation => "vacation",
        Lop => "lop",
        CompOff => "compOff",
    }
}

pub type LeaveBalances = BTreeMap<BalanceKind, u32>;

/// Every balance kind present and set to zero.
pub fn empty_balances() -> LeaveBalances {
    BalanceKind::ALL.iter().map(|kind| (*kind, 0)).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub manager_id: Option<String>,
    pub employee_type: EmployeeType,
    pub leave_balances: LeaveBalances,
}

impl User {
    pub fn reports_to(&self, manager_id: &str) -> bool {
        self.manager_id.as_deref() == Some(manager_id)
    }
}

/// The subset of a user shown on the login picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for LoginUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub manager_id: Option<String>,
    pub employee_type: EmployeeType,
}

/// Partial update of a user. Balances arrive as raw JSON so that malformed
/// numbers can be reported per field instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub employee_type: Option<EmployeeType>,
    /// Absent leaves the manager untouched, `null` or `""` clears it.
    #[serde(default, deserialize_with = "present")]
    pub manager_id: Option<Option<String>>,
    pub leave_balances: Option<BTreeMap<String, serde_json::Value>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
