use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::Config;
use crate::database::{
    Database, Tables,
    models::{
        BalanceKind, Configuration, ConfigurationInput, CreateUserInput, Role, UpdateUserInput,
        User, empty_balances,
    },
    seed,
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::capabilities::Capability;
use crate::services::user_context::UserContext;

/// User directory and configuration maintenance. Every operation requires
/// the matching admin capability and writes all-or-nothing.
#[derive(Clone)]
pub struct AdminService {
    database: Database,
    allow_reset: bool,
}

impl AdminService {
    pub fn new(database: Database, config: &Config) -> Self {
        Self {
            database,
            allow_reset: !config.is_production(),
        }
    }

    pub async fn create_user(
        &self,
        ctx: &UserContext,
        input: CreateUserInput,
    ) -> Result<User, AppError> {
        ctx.requires(Capability::ManageUsers)?;
        let name = required_name(&input.name)?;
        let manager_id = normalize_manager_id(input.manager_id);

        DatabaseTransaction::run(&self.database, |tx| {
            let id = loop {
                let candidate = new_user_id();
                if tx.user(&candidate).is_none() {
                    break candidate;
                }
            };

            if let Some(manager_id) = manager_id.as_deref() {
                check_manager(tx, &id, manager_id)?;
            }

            let user = User {
                id: id.clone(),
                name,
                role: input.role,
                manager_id,
                employee_type: input.employee_type,
                leave_balances: empty_balances(),
            };

            log::info!("User {} ({}) created by {}", user.id, user.role, ctx.user_id());
            tx.users.insert(id, user.clone());
            Ok(user)
        })
        .await
    }

    pub async fn update_user(
        &self,
        ctx: &UserContext,
        user_id: &str,
        input: UpdateUserInput,
    ) -> Result<User, AppError> {
        ctx.requires(Capability::ManageUsers)?;

        let balances = match &input.leave_balances {
            Some(raw) => parse_balances(raw)?,
            None => Vec::new(),
        };
        let name = input.name.as_deref().map(required_name).transpose()?;

        DatabaseTransaction::run(&self.database, |tx| {
            let mut user = tx
                .user(user_id)
                .cloned()
                .ok_or_else(|| AppError::not_found("User", user_id))?;
            let previous_role = user.role;

            if let Some(name) = name {
                user.name = name;
            }
            if let Some(role) = input.role {
                user.role = role;
            }
            if let Some(employee_type) = input.employee_type {
                user.employee_type = employee_type;
            }
            if let Some(manager_id) = input.manager_id.clone() {
                user.manager_id = normalize_manager_id(manager_id);
                if let Some(manager_id) = user.manager_id.as_deref() {
                    check_manager(tx, user_id, manager_id)?;
                }
            }
            for (kind, value) in &balances {
                user.leave_balances.insert(*kind, *value);
            }

            if previous_role != user.role {
                if !user.role.can_manage_team() && tx.direct_reports(user_id).next().is_some() {
                    return Err(AppError::BadRequest(format!(
                        "{} still has direct reports and must keep a managing role",
                        user_id
                    )));
                }
                if previous_role == Role::Admin && admin_count(tx) == 1 {
                    return Err(AppError::BadRequest(
                        "Cannot demote the last admin".to_string(),
                    ));
                }
            }

            log::info!("User {} updated by {}", user_id, ctx.user_id());
            tx.users.insert(user_id.to_string(), user.clone());
            Ok(user)
        })
        .await
    }

    /// Removes the user. Their reports lose their manager; their leave
    /// requests stay on record.
    pub async fn delete_user(&self, ctx: &UserContext, user_id: &str) -> Result<User, AppError> {
        ctx.requires(Capability::ManageUsers)?;

        DatabaseTransaction::run(&self.database, |tx| {
            let user = tx
                .users
                .remove(user_id)
                .ok_or_else(|| AppError::not_found("User", user_id))?;

            if user.role == Role::Admin && admin_count(tx) == 0 {
                return Err(AppError::BadRequest(
                    "Cannot delete the last admin".to_string(),
                ));
            }

            for report in tx.users.values_mut() {
                if report.reports_to(user_id) {
                    log::info!("Clearing manager of {} after deleting {}", report.id, user_id);
                    report.manager_id = None;
                }
            }

            log::info!("User {} deleted by {}", user_id, ctx.user_id());
            Ok(user)
        })
        .await
    }

    /// Replaces the configuration with `body`. The body is checked as a
    /// whole before anything is stored; success bumps the version.
    pub async fn update_configuration(
        &self,
        ctx: &UserContext,
        body: serde_json::Value,
    ) -> Result<Configuration, AppError> {
        ctx.requires(Capability::ManageConfiguration)?;

        let input: ConfigurationInput = serde_json::from_value(body)
            .map_err(|err| AppError::BadRequest(format!("Invalid configuration: {}", err)))?;

        let holidays: BTreeSet<NaiveDate> = input
            .holidays
            .iter()
            .map(|raw| {
                raw.trim().parse::<NaiveDate>().map_err(|_| {
                    AppError::BadRequest(format!("Invalid holiday date: {:?}", raw))
                })
            })
            .collect::<Result<_, _>>()?;

        for (employee_type, quotas) in &input.leave_quotas {
            if let Some((kind, quota)) = quotas
                .iter()
                .find(|(_, quota)| !quota.is_finite() || **quota < 0.0)
            {
                return Err(AppError::BadRequest(format!(
                    "Invalid {} quota for {}: {}",
                    kind, employee_type, quota
                )));
            }
        }

        DatabaseTransaction::run(&self.database, |tx| {
            let configuration = Configuration {
                version: tx.configuration.version + 1,
                holidays,
                leave_quotas: input.leave_quotas,
                settings: input.settings,
            };

            log::info!(
                "Configuration updated to version {} by {}",
                configuration.version,
                ctx.user_id()
            );
            tx.configuration = configuration.clone();
            Ok(configuration)
        })
        .await
    }

    /// Restores the baseline data set. Refused in production.
    pub async fn reset_data(&self, ctx: &UserContext) -> Result<(), AppError> {
        ctx.requires(Capability::ResetData)?;

        if !self.allow_reset {
            return Err(AppError::PermissionDenied(
                "Data reset is disabled in production".to_string(),
            ));
        }

        let version = self.database.read().await.configuration.version;
        let mut tables = seed::baseline();
        tables.configuration.version = version + 1;
        self.database.replace(tables).await;

        log::info!("Data reset to baseline by {}", ctx.user_id());
        Ok(())
    }
}

fn new_user_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("emp_{}", &hex[..6])
}

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}

/// An empty manager id means "no manager".
fn normalize_manager_id(manager_id: Option<String>) -> Option<String> {
    manager_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

fn check_manager(tx: &Tables, user_id: &str, manager_id: &str) -> Result<(), AppError> {
    if manager_id == user_id {
        return Err(AppError::BadRequest(
            "A user cannot be their own manager".to_string(),
        ));
    }

    let manager = tx
        .user(manager_id)
        .ok_or_else(|| AppError::BadRequest(format!("Manager {} does not exist", manager_id)))?;

    if !manager.role.can_manage_team() {
        return Err(AppError::BadRequest(format!(
            "{} cannot manage a team",
            manager_id
        )));
    }

    Ok(())
}

fn admin_count(tx: &Tables) -> usize {
    tx.users
        .values()
        .filter(|user| user.role == Role::Admin)
        .count()
}

fn parse_balances(
    raw: &BTreeMap<String, serde_json::Value>,
) -> Result<Vec<(BalanceKind, u32)>, AppError> {
    raw.iter()
        .map(|(key, value)| {
            let kind: BalanceKind = key
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Unknown balance kind: {}", key)))?;
            let count = parse_count(value).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid balance for {}: {}", kind, value))
            })?;
            Ok((kind, count))
        })
        .collect()
}

/// Non-negative whole numbers, given either as JSON numbers or numeric
/// strings.
fn parse_count(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(count) = number.as_u64() {
                return u32::try_from(count).ok();
            }
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32)
        }
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
