use std::sync::Arc;

use crate::auth::SecretScheme;
use crate::error::{AppError, Result};
use crate::models::{AuthenticatedUser, NewUser, Role};
use crate::repositories::AccountStore;

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    scheme: SecretScheme,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, scheme: SecretScheme) -> Self {
        Self { store, scheme }
    }

    /// Create an account and return its id.
    pub async fn register(
        &self,
        login: &str,
        secret: &str,
        display_name: &str,
        role: Role,
    ) -> Result<i64> {
        require("login", login)?;
        require("secret", secret)?;
        require("displayName", display_name)?;

        let id = self
            .store
            .insert_user(NewUser {
                login: login.to_string(),
                secret: self.scheme.seal(secret)?,
                display_name: display_name.to_string(),
                role,
            })
            .await?;

        tracing::info!(id, login, role = %role, "registered account");
        Ok(id)
    }

    /// Unknown login and wrong secret fail the same way.
    pub async fn authenticate(&self, login: &str, secret: &str) -> Result<AuthenticatedUser> {
        if login.is_empty() || secret.is_empty() {
            return Err(AppError::Authentication);
        }

        let user = self
            .store
            .find_by_login(login)
            .await?
            .ok_or(AppError::Authentication)?;

        if !self.scheme.verify(secret, &user.secret) {
            return Err(AppError::Authentication);
        }

        Ok(AuthenticatedUser::from(&user))
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use pretty_assertions::assert_eq;

    fn service() -> AccountService {
        AccountService::new(Arc::new(InMemoryStore::new()), SecretScheme::Plain)
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let accounts = service();
        let id = accounts
            .register("admin", "123", "Technical lead", Role::Rt)
            .await
            .unwrap();

        let user = accounts.authenticate("admin", "123").await.unwrap();
        assert_eq!(
            user,
            AuthenticatedUser {
                id,
                display_name: "Technical lead".into(),
                role: Role::Rt,
            }
        );
    }

    #[tokio::test]
    async fn test_wrong_secret_and_unknown_login_fail_alike() {
        let accounts = service();
        accounts
            .register("chef", "456", "Agent manager", Role::Ra)
            .await
            .unwrap();

        for (login, secret) in [("chef", "457"), ("chef", "45"), ("nobody", "456"), ("", "")] {
            let err = accounts.authenticate(login, secret).await.unwrap_err();
            assert!(matches!(err, AppError::Authentication), "{login}/{secret}");
        }
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let accounts = service();
        for (login, secret, name) in [("", "x", "n"), ("l", "", "n"), ("l", "x", "  ")] {
            let err = accounts
                .register(login, secret, name, Role::Agent)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_login_conflicts() {
        let accounts = service();
        accounts
            .register("agent01", "789", "Jean Dupont", Role::Agent)
            .await
            .unwrap();

        let err = accounts
            .register("agent01", "other", "Impostor", Role::Rt)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let user = accounts.authenticate("agent01", "789").await.unwrap();
        assert_eq!(user.role, Role::Agent);
        assert_eq!(user.display_name, "Jean Dupont");
    }

    #[tokio::test]
    async fn test_bcrypt_scheme_does_not_store_plaintext() {
        let store = Arc::new(InMemoryStore::new());
        let accounts = AccountService::new(store.clone(), SecretScheme::Bcrypt);
        accounts
            .register("admin", "123", "Technical lead", Role::Rt)
            .await
            .unwrap();

        let stored = store.find_by_login("admin").await.unwrap().unwrap();
        assert_ne!(stored.secret, "123");
        assert!(accounts.authenticate("admin", "123").await.is_ok());
        assert!(accounts.authenticate("admin", "124").await.is_err());
    }
}
