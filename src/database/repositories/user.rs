use crate::database::{
    Database,
    models::{LoginUser, User},
};

#[derive(Clone)]
pub struct UserRepository {
    database: Database,
}

impl UserRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.database.read().await.user(id).cloned()
    }

    pub async fn find_all(&self) -> Vec<User> {
        self.database.read().await.users.values().cloned().collect()
    }

    /// Everyone who can be picked on the login screen.
    pub async fn find_login_users(&self) -> Vec<LoginUser> {
        self.database
            .read()
            .await
            .users
            .values()
            .map(LoginUser::from)
            .collect()
    }
}
