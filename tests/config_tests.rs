use std::path::PathBuf;
use std::{env, panic};

use collab3pl_access::{AppConfig, Env};
use serial_test::serial;

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward.
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

const CONFIG_VARS: [&str; 3] = ["APP_ENV", "COLLAB3PL_NAMESPACE", "COLLAB3PL_SESSION_FILE"];

// --- Tests ---

#[test]
fn test_default_config_is_local_and_needs_no_environment() {
    let config = AppConfig::default();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.namespace, "collab3pl.v18");
    assert_eq!(config.session_file, None);
}

#[test]
fn test_session_key_is_namespaced() {
    let config = AppConfig::default();
    assert_eq!(config.session_key(), "collab3pl.v18:authUser");

    let custom = AppConfig {
        namespace: "collab3pl.v19".to_string(),
        ..AppConfig::default()
    };
    assert_eq!(custom.session_key(), "collab3pl.v19:authUser");
}

#[test]
#[serial]
fn test_load_defaults_to_local_when_unset() {
    run_with_env(
        || {
            unsafe {
                env::remove_var("APP_ENV");
                env::remove_var("COLLAB3PL_NAMESPACE");
                env::remove_var("COLLAB3PL_SESSION_FILE");
            }
            let config = AppConfig::load();

            assert_eq!(config.env, Env::Local);
            assert_eq!(config.namespace, "collab3pl.v18");
            assert_eq!(config.session_file, None);
        },
        CONFIG_VARS.to_vec(),
    );
}

#[test]
#[serial]
fn test_load_honors_overrides_in_local() {
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("COLLAB3PL_NAMESPACE", "collab3pl.test");
                env::set_var("COLLAB3PL_SESSION_FILE", "/tmp/collab3pl-session.json");
            }
            let config = AppConfig::load();

            assert_eq!(config.namespace, "collab3pl.test");
            assert_eq!(
                config.session_file,
                Some(PathBuf::from("/tmp/collab3pl-session.json"))
            );
        },
        CONFIG_VARS.to_vec(),
    );
}

#[test]
#[serial]
fn test_production_fails_fast_without_a_session_file() {
    let panicked = run_with_env(
        || {
            panic::catch_unwind(|| {
                unsafe {
                    env::set_var("APP_ENV", "production");
                    env::remove_var("COLLAB3PL_SESSION_FILE");
                }
                AppConfig::load()
            })
            .is_err()
        },
        CONFIG_VARS.to_vec(),
    );

    assert!(panicked, "production load must refuse to run memory-only");
}

#[test]
#[serial]
fn test_production_loads_with_a_session_file() {
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("COLLAB3PL_SESSION_FILE", "/var/lib/collab3pl/session.json");
            }
            let config = AppConfig::load();

            assert_eq!(config.env, Env::Production);
            assert_eq!(
                config.session_file,
                Some(PathBuf::from("/var/lib/collab3pl/session.json"))
            );
        },
        CONFIG_VARS.to_vec(),
    );
}
