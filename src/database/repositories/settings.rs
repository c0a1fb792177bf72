use crate::database::{Database, models::Configuration};

#[derive(Clone)]
pub struct SettingsRepository {
    database: Database,
}

impl SettingsRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Snapshot of the configuration as it is right now.
    pub async fn current(&self) -> Configuration {
        self.database.read().await.configuration.clone()
    }
}
