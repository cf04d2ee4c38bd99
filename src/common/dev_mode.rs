// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing authentication for testing purposes, but only when a
//! test user identity is configured alongside the flag.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct DevModeConfig {
    /// Raw `AUTH_DISABLED` flag (or CLI override)
    pub auth_disabled: bool,
    /// Identity substituted for every request while the bypass is active
    pub test_user_id: Option<String>,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let auth_disabled = env::var("AUTH_DISABLED")
            .unwrap_or_else(|_| "false".to_string())
            .trim()
            .eq_ignore_ascii_case("true");

        let test_user_id = env::var("TEST_USER_ID").ok();

        Self::new(auth_disabled, test_user_id)
    }

    pub fn new(auth_disabled: bool, test_user_id: Option<String>) -> Self {
        let test_user_id = test_user_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Self {
            auth_disabled,
            test_user_id,
        }
    }

    /// Returns the test user id when the bypass is fully configured.
    ///
    /// The flag alone never disables authentication.
    pub fn bypass_user(&self) -> Option<&str> {
        if self.auth_disabled {
            self.test_user_id.as_deref()
        } else {
            None
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.bypass_user().is_some()
    }
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    match config.bypass_user() {
        Some(user_id) => {
            println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
            println!("   Authentication bypassed for testing");
            println!("   Test User: {}", user_id);
            println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
            println!();
        }
        None if config.auth_disabled => {
            println!("⚠️  AUTH_DISABLED is set but TEST_USER_ID is missing");
            println!("   Authentication remains enforced");
            println!();
        }
        None => println!("🔒 Production mode - Authentication required"),
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => return Some(true),
            "--no-dev" | "--prod" | "--production" => return Some(false),
            _ => {}
        }
    }

    None
}

/// Override the bypass flag from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        println!("🔧 CLI override: AUTH_DISABLED = {}", cli_dev_mode);
        config.auth_disabled = cli_dev_mode;
    }

    config
}
