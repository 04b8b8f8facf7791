use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    dto::RegisterRequest,
    error::RegisterError,
    password::hash_password,
    repo::UserStore,
    repo_types::{InsertOutcome, NewUser},
};
use crate::config::HashingConfig;

/// A request that passed validation.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;

/// Dot-atom local part, dotted domain, alphabetic TLD of at least two characters.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(
            r"^[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~])*@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$"
        )
        .unwrap();
    }
    if email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            local.len() <= MAX_LOCAL_LEN && domain.split('.').all(|l| l.len() <= MAX_LABEL_LEN)
        }
        None => false,
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RegisterError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RegisterError::Validation { field }),
    }
}

/// Checks fields in order name, email, phone, password; the first failure wins.
pub fn validate(req: RegisterRequest) -> Result<Registration, RegisterError> {
    let name = required(req.name, "name")?;
    let email = required(req.email, "email")?;
    if !is_valid_email(&email) {
        return Err(RegisterError::Validation { field: "email" });
    }
    let phone = required(req.phone, "phone")?;
    let password = required(req.password, "password")?;

    Ok(Registration {
        name,
        email,
        phone,
        password,
    })
}

/// Hashes the credential off the async executor, then performs the single insert.
pub async fn register_user(
    store: &dyn UserStore,
    hashing: &HashingConfig,
    reg: Registration,
) -> Result<Uuid, RegisterError> {
    let Registration {
        name,
        email,
        phone,
        password,
    } = reg;

    let cfg = hashing.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &cfg))
        .await
        .map_err(|e| {
            error!(error = %e, "hashing task failed");
            RegisterError::unexpected(e)
        })?
        .map_err(|e| {
            error!(error = %e, "hash_password failed");
            RegisterError::unexpected(e)
        })?;

    match store
        .insert(NewUser::new(name, email.clone(), phone, password_hash))
        .await
    {
        InsertOutcome::Created(user_id) => {
            info!(%user_id, %email, "user registered");
            Ok(user_id)
        }
        InsertOutcome::DuplicateKey { field, value } if field == "email" => {
            warn!(email = %value, "email already registered");
            Err(RegisterError::DuplicateKey { field, value })
        }
        InsertOutcome::DuplicateKey { field, value } => {
            error!(%field, %value, "unexpected duplicate key");
            Err(RegisterError::unexpected(format!(
                "duplicate value for {}: {}",
                field, value
            )))
        }
        InsertOutcome::Failed(detail) => {
            error!(error = %detail, "create user failed");
            Err(RegisterError::UnexpectedPersistence { detail })
        }
    }
}
