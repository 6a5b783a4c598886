use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How account secrets are stored and compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretScheme {
    /// Stored as given, compared byte for byte.
    #[default]
    Plain,
    Bcrypt,
}

impl SecretScheme {
    /// Turn a submitted secret into its stored form.
    pub fn seal(&self, secret: &str) -> Result<String, AppError> {
        match self {
            SecretScheme::Plain => Ok(secret.to_string()),
            SecretScheme::Bcrypt => hash(secret, DEFAULT_COST)
                .map_err(|e| AppError::Internal(format!("Failed to hash secret: {}", e))),
        }
    }

    /// Check a submitted secret against its stored form. A stored value that
    /// is not a valid bcrypt hash never matches.
    pub fn verify(&self, secret: &str, stored: &str) -> bool {
        match self {
            SecretScheme::Plain => secret == stored,
            SecretScheme::Bcrypt => match verify(secret, stored) {
                Ok(matches) => matches,
                Err(e) => {
                    tracing::warn!(error = %e, "stored secret is not a bcrypt hash");
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_stored_as_given() {
        let sealed = SecretScheme::Plain.seal("123").unwrap();
        assert_eq!(sealed, "123");
        assert!(SecretScheme::Plain.verify("123", &sealed));
        assert!(!SecretScheme::Plain.verify("1234", &sealed));
        assert!(!SecretScheme::Plain.verify("", &sealed));
    }

    #[test]
    fn test_bcrypt_seal_and_verify() {
        let sealed = SecretScheme::Bcrypt.seal("test-secret-123").unwrap();

        assert_ne!(sealed, "test-secret-123");
        assert!(SecretScheme::Bcrypt.verify("test-secret-123", &sealed));
        assert!(!SecretScheme::Bcrypt.verify("wrong-secret", &sealed));
    }

    #[test]
    fn test_bcrypt_rejects_plain_stored_value() {
        assert!(!SecretScheme::Bcrypt.verify("123", "123"));
    }
}
