use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{InsertOutcome, NewUser};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; uniqueness is decided by the store, not the caller.
    async fn insert(&self, user: NewUser) -> InsertOutcome;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> InsertOutcome {
        let res = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, date_created, last_login)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.date_created)
        .bind(user.last_login)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(id) => InsertOutcome::Created(id),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                match unique_field(db.constraint()) {
                    Some("email") => {
                        debug!(email = %user.email, "unique violation on email");
                        InsertOutcome::DuplicateKey {
                            field: "email".into(),
                            value: user.email,
                        }
                    }
                    Some(field) => InsertOutcome::DuplicateKey {
                        field: field.into(),
                        value: user.id.to_string(),
                    },
                    None => InsertOutcome::Failed(db.message().to_string()),
                }
            }
            Err(e) => InsertOutcome::Failed(e.to_string()),
        }
    }
}

/// Maps a Postgres constraint name to the user column it guards.
fn unique_field(constraint: Option<&str>) -> Option<&'static str> {
    match constraint? {
        "users_email_key" => Some("email"),
        "users_pkey" => Some("id"),
        _ => None,
    }
}
