use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};

use crate::database::Tables;
use crate::database::models::{
    BalanceKind, Configuration, EmployeeType, LeaveBalances, LeaveQuotas, LeaveRequest,
    LeaveStatus, LeaveType, Role, Settings, User,
};

/// The data set `reset-data` restores: one employee reporting to one manager
/// reporting to one admin, two leave requests and the default calendar.
pub fn baseline() -> Tables {
    let users = [
        user(
            "emp1",
            "Uday (Employee)",
            Role::Employee,
            Some("mgr1"),
            [5, 7, 10, 0, 2],
        ),
        user(
            "mgr1",
            "Syl (Manager)",
            Role::Manager,
            Some("adm1"),
            [5, 5, 12, 0, 0],
        ),
        user(
            "adm1",
            "Kaladin (Admin)",
            Role::Admin,
            None,
            [8, 8, 15, 0, 0],
        ),
    ]
    .into_iter()
    .map(|user| (user.id.clone(), user))
    .collect();

    let leave_requests = vec![
        leave_request(
            "leave_emp1_1721989800",
            LeaveType::Sick,
            date(2025, 7, 20),
            date(2025, 7, 20),
            "Fever",
            LeaveStatus::Approved,
            date(2025, 7, 19),
        ),
        leave_request(
            "leave_emp1_1721999800",
            LeaveType::Casual,
            date(2025, 8, 5),
            date(2025, 8, 5),
            "Personal work",
            LeaveStatus::Pending,
            date(2025, 7, 24),
        ),
    ];

    Tables {
        users,
        leave_requests,
        configuration: default_configuration(),
    }
}

/// No users, no requests, default calendar.
pub fn empty() -> Tables {
    Tables {
        users: BTreeMap::new(),
        leave_requests: Vec::new(),
        configuration: default_configuration(),
    }
}

pub fn default_configuration() -> Configuration {
    let holidays: BTreeSet<NaiveDate> = [
        date(2025, 1, 1),
        date(2025, 1, 26),
        date(2025, 8, 15),
        date(2025, 10, 2),
        date(2025, 12, 25),
    ]
    .into_iter()
    .collect();

    let mut leave_quotas = LeaveQuotas::new();
    leave_quotas.insert(
        EmployeeType::FullTime,
        quotas([
            (BalanceKind::Sick, 1.0),
            (BalanceKind::Casual, 1.0),
            (BalanceKind::Vacation, 1.5),
        ]),
    );
    for employee_type in [EmployeeType::Intern, EmployeeType::Trainee] {
        leave_quotas.insert(
            employee_type,
            quotas([
                (BalanceKind::Sick, 0.5),
                (BalanceKind::Casual, 0.5),
                (BalanceKind::Vacation, 0.0),
            ]),
        );
    }

    Configuration {
        version: 1,
        holidays,
        leave_quotas,
        settings: Settings {
            advance_notice_days: 3,
            max_lops: 10,
            carry_forward_cap: 5,
            deduct_on_approval: true,
            extra: BTreeMap::new(),
        },
    }
}

fn user(
    id: &str,
    name: &str,
    role: Role,
    manager_id: Option<&str>,
    [sick, casual, vacation, lop, comp_off]: [u32; 5],
) -> User {
    let leave_balances: LeaveBalances = [
        (BalanceKind::Sick, sick),
        (BalanceKind::Casual, casual),
        (BalanceKind::Vacation, vacation),
        (BalanceKind::Lop, lop),
        (BalanceKind::CompOff, comp_off),
    ]
    .into_iter()
    .collect();

    User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        manager_id: manager_id.map(str::to_string),
        employee_type: EmployeeType::FullTime,
        leave_balances,
    }
}

fn leave_request(
    id: &str,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
    status: LeaveStatus,
    applied_on: NaiveDate,
) -> LeaveRequest {
    LeaveRequest {
        id: id.to_string(),
        user_id: "emp1".to_string(),
        leave_type,
        start_date,
        end_date,
        reason: reason.to_string(),
        status,
        applied_on: midnight(applied_on),
        decided_by: None,
        decided_on: None,
    }
}

fn quotas<const N: usize>(entries: [(BalanceKind, f64); N]) -> BTreeMap<BalanceKind, f64> {
    entries.into_iter().collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
