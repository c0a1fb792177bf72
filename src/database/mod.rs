use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::database::models::{Configuration, LeaveRequest, User};

pub mod models;
pub mod repositories;
pub mod seed;
pub mod transaction;

/// Everything the portal stores. Users are keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Tables {
    pub users: BTreeMap<String, User>,
    pub leave_requests: Vec<LeaveRequest>,
    pub configuration: Configuration,
}

impl Tables {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    pub fn leave_request(&self, id: &str) -> Option<&LeaveRequest> {
        self.leave_requests.iter().find(|request| request.id == id)
    }

    pub fn leave_request_mut(&mut self, id: &str) -> Option<&mut LeaveRequest> {
        self.leave_requests.iter_mut().find(|request| request.id == id)
    }

    /// Users whose manager is `manager_id`.
    pub fn direct_reports(&self, manager_id: &str) -> impl Iterator<Item = &User> {
        self.users
            .values()
            .filter(move |user| user.reports_to(manager_id))
    }
}

/// Shared handle to the in-process store. Cloning is cheap; all clones see
/// the same tables.
#[derive(Clone)]
pub struct Database {
    inner: Arc<RwLock<Tables>>,
}

impl Database {
    pub fn new(tables: Tables) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tables)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().await
    }

    /// Swap every table for `tables` in one step.
    pub async fn replace(&self, tables: Tables) {
        let mut guard = self.inner.write().await;
        *guard = tables;
    }

    pub(crate) fn lock(&self) -> &RwLock<Tables> {
        &self.inner
    }
}

pub async fn init_database(seed: bool) -> Result<Database> {
    let tables = if seed {
        log::info!("Seeding store with baseline data");
        seed::baseline()
    } else {
        log::info!("Starting with an empty store");
        seed::empty()
    };

    Ok(Database::new(tables))
}
