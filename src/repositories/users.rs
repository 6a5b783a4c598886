use async_trait::async_trait;
use sqlx::FromRow;

use super::AccountStore;
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{NewUser, Role, User};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    login: String,
    secret: String,
    display_name: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| AppError::Internal(format!("user {}: {}", row.login, e)))?;
        Ok(User {
            id: row.id,
            login: row.login,
            secret: row.secret,
            display_name: row.display_name,
            role,
        })
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgUserRepository {
    async fn insert_user(&self, user: NewUser) -> Result<i64> {
        match sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (login, secret, display_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.login)
        .bind(&user.secret)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(AppError::Conflict(format!(
                    "login {} already exists",
                    user.login
                )))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login, secret, display_name, role
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_unknown_role_is_rejected() {
        let row = UserRow {
            id: 1,
            login: "ghost".into(),
            secret: "x".into(),
            display_name: "Ghost".into(),
            role: "Admin".into(),
        };
        assert!(matches!(User::try_from(row), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_row_converts_to_user() {
        let row = UserRow {
            id: 4,
            login: "chef".into(),
            secret: "456".into(),
            display_name: "Agent manager".into(),
            role: "RA".into(),
        };
        let user = User::try_from(row).unwrap();
        assert_eq!(user.id, 4);
        assert_eq!(user.role, Role::Ra);
    }
}
