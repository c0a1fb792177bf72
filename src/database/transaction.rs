use crate::database::{Database, Tables};
use crate::error::AppError;

#[derive(Debug)]
pub struct DatabaseTransaction;

impl DatabaseTransaction {
    /// Run a closure against a working copy of the tables and commit it only
    /// when the closure succeeds. Holds the write lock throughout, so
    /// concurrent writers are serialized.
    pub async fn run<T, F>(database: &Database, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Tables) -> Result<T, AppError>,
    {
        let mut guard = database.lock().write().await;
        let mut working = guard.clone();

        match f(&mut working) {
            Ok(value) => {
                *guard = working;
                Ok(value)
            }
            Err(err) => {
                log::warn!("Transaction failed with error: {}, rolling back", err);
                Err(err)
            }
        }
    }
}
