use std::fmt;
use thiserror::Error;

const JWT_SECRET_VAR: &str = "JWT_SECRET";
const JWT_SECRET_MIN_LENGTH: usize = 32;

/// Error type for secret loading failures
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Centralized manager for application secrets.
///
/// Loaded once at process start; read-only thereafter. The signing
/// secret is passed explicitly into TokenService, never read from
/// ambient state at request time.
pub struct SecretManager {
    jwt_secret: String,
}

impl SecretManager {
    /// Initialize the SecretManager by loading and validating all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or too short
    pub fn init() -> Result<Self, SecretError> {
        let jwt_secret = Self::load_env_secret(JWT_SECRET_VAR, JWT_SECRET_MIN_LENGTH)?;

        Ok(Self { jwt_secret })
    }

    /// Get the JWT signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    fn load_env_secret(name: &str, min_length: usize) -> Result<String, SecretError> {
        let value = std::env::var(name).map_err(|_| SecretError::Missing {
            secret_name: name.to_string(),
        })?;

        if value.len() < min_length {
            return Err(SecretError::InvalidLength {
                secret_name: name.to_string(),
                expected: min_length,
                actual: value.len(),
            });
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize the tests.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new(vars: Vec<&str>) -> Self {
            for var in &vars {
                std::env::remove_var(var);
            }
            Self {
                vars: vars.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_init_with_valid_secret() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(vec!["JWT_SECRET"]);

        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");

        let manager = SecretManager::init().expect("init should succeed");
        assert_eq!(
            manager.jwt_secret(),
            "this-is-a-valid-jwt-secret-with-32-characters"
        );
    }

    #[test]
    fn test_error_when_secret_missing() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(vec!["JWT_SECRET"]);

        let result = SecretManager::init();

        match result {
            Err(SecretError::Missing { secret_name }) => {
                assert_eq!(secret_name, "JWT_SECRET");
            }
            other => panic!("Expected Missing error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_error_when_secret_too_short() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(vec!["JWT_SECRET"]);

        std::env::set_var("JWT_SECRET", "short-secret");

        let result = SecretManager::init();

        match result {
            Err(SecretError::InvalidLength {
                secret_name,
                expected,
                actual,
            }) => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, "short-secret".len());
            }
            other => panic!("Expected InvalidLength error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(vec!["JWT_SECRET"]);

        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");

        let manager = SecretManager::init().unwrap();
        let debug_output = format!("{:?}", manager);

        assert!(!debug_output.contains("valid-jwt-secret"));
        assert!(debug_output.contains("<redacted>"));
    }
}
