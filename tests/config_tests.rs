use std::env;

use leave_portal::config::Config;
use pretty_assertions::assert_eq;
use serial_test::serial;

mod common;

const KEYS: [&str; 7] = [
    "JWT_SECRET",
    "JWT_EXPIRATION_DAYS",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "CLIENT_BASE_URL",
    "SEED_DATA",
];

// Runs `f` with the given variables set and every other known key cleared,
// then restores the original environment.
fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let original: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|key| (*key, env::var(key).ok())).collect();

    unsafe {
        for key in KEYS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    f();

    unsafe {
        for (key, value) in original {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    common::setup_test_env();

    with_env(&[], || {
        let config = Config::from_env_only().unwrap();

        assert_eq!(config.jwt_expiration_days, 30);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.client_base_url, "http://localhost:3000");
        assert!(config.seed_data);
        assert!(!config.is_production());
        assert_eq!(config.server_address(), "127.0.0.1:8080");
    });
}

#[test]
#[serial]
fn test_config_custom_values() {
    common::setup_test_env();

    with_env(
        &[
            ("JWT_SECRET", "test-secret"),
            ("JWT_EXPIRATION_DAYS", "7"),
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("ENVIRONMENT", "production"),
            ("CLIENT_BASE_URL", "https://leave.example.com"),
            ("SEED_DATA", "false"),
        ],
        || {
            let config = Config::from_env_only().unwrap();

            assert_eq!(config.jwt_secret, "test-secret");
            assert_eq!(config.jwt_expiration_days, 7);
            assert_eq!(config.server_address(), "0.0.0.0:3000");
            assert!(config.is_production());
            assert_eq!(config.client_base_url, "https://leave.example.com");
            assert!(!config.seed_data);
        },
    );
}

#[test]
#[serial]
fn test_config_rejects_invalid_numbers() {
    common::setup_test_env();

    with_env(&[("PORT", "not-a-port")], || {
        let error = Config::from_env_only().unwrap_err();
        assert!(error.to_string().contains("PORT"));
    });

    with_env(&[("SEED_DATA", "maybe")], || {
        assert!(Config::from_env_only().is_err());
    });
}

#[test]
fn test_test_config_is_not_production() {
    let config = Config::test_config();

    assert!(!config.is_production());
    assert_eq!(config.port, 0);
}
