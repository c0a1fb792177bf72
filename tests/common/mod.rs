#![allow(dead_code)]

use chrono::NaiveDate;
use fake::{
    Fake,
    faker::{lorem::en::Sentence, name::en::Name},
};
use serde_json::{Value, json};

use leave_portal::database::{Database, Tables, seed};
use leave_portal::handlers::shared::ApiResponse;
use leave_portal::services::auth::LoginInput;
use leave_portal::{AppState, Clock, Config};

/// Builds an actix test service with the full route table, app data and
/// request id middleware registered.
macro_rules! test_app {
    ($state:expr) => {{
        let state = $state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| state.register(cfg))
                .wrap(leave_portal::middleware::RequestId)
                .configure(leave_portal::routes::configure),
        )
        .await
    }};
}

/// "Today" used by most tests: a Friday in July 2025, before the seeded
/// pending request starts.
pub fn today() -> NaiveDate {
    date("2025-07-25")
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

pub struct TestContext {
    pub state: AppState,
    pub database: Database,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_tables(seed::baseline(), today())
    }

    pub fn on(today: NaiveDate) -> Self {
        Self::with_tables(seed::baseline(), today)
    }

    pub fn with_tables(tables: Tables, today: NaiveDate) -> Self {
        Self::with_config(tables, today, Config::test_config())
    }

    pub fn with_config(tables: Tables, today: NaiveDate, config: Config) -> Self {
        setup_test_env();
        let database = Database::new(tables);
        let state = AppState::new(config.clone(), database.clone(), Clock::fixed_on(today));

        Self {
            state,
            database,
            config,
        }
    }

    pub async fn token_for(&self, user_id: &str) -> String {
        self.state
            .auth_service
            .login(LoginInput {
                user_id: user_id.to_string(),
            })
            .await
            .expect("seeded user can log in")
            .token
    }
}

pub struct TestData;

impl TestData {
    pub fn user(role: &str, manager_id: Option<&str>) -> Value {
        let name: String = Name().fake();
        json!({
            "name": name,
            "role": role,
            "managerId": manager_id,
            "employeeType": "full-time",
        })
    }

    pub fn leave(leave_type: &str, start: &str, end: &str) -> Value {
        let reason: String = Sentence(3..6).fake();
        json!({
            "leaveType": leave_type,
            "startDate": start,
            "endDate": end,
            "reason": reason,
        })
    }

    pub fn auth_header(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }
}

pub struct TestAssertions;

impl TestAssertions {
    pub fn assert_success(body: &ApiResponse<Value>) -> Value {
        assert!(
            body.success,
            "Expected successful response but got error: {:?}",
            body.message
        );
        body.data.clone().expect("Expected data in successful response")
    }

    pub fn assert_error_contains(body: &ApiResponse<Value>, needle: &str) {
        assert!(!body.success, "Expected an error response");
        let message = body.message.as_deref().unwrap_or_default();
        assert!(
            message.contains(needle),
            "Expected error message containing {:?}, got {:?}",
            needle,
            message
        );
    }
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}
