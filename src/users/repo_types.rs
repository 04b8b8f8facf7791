use time::OffsetDateTime;
use uuid::Uuid;

/// A user row as written to the `users` table.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,                // unique across all users
    pub phone: String,
    pub password_hash: String,        // Argon2 PHC string, never the plaintext
    pub date_created: OffsetDateTime,
    pub last_login: OffsetDateTime,
}

impl NewUser {
    /// Timestamps are taken here, once per record.
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            date_created: now,
            last_login: now,
        }
    }
}

/// Result of a single insert, as reported by a store.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(Uuid),
    /// A uniqueness constraint rejected the write.
    DuplicateKey { field: String, value: String },
    Failed(String),
}
