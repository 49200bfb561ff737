use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    users::{
        dto::RegisterRequest,
        password::hash_password_blocking,
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

pub async fn register_user(store: &dyn UserStore, req: RegisterRequest) -> Result<User, AppError> {
    let reg = req
        .validate()
        .inspect_err(|e| warn!(error = %e, "registration rejected"))?;

    // Ensure email is not taken
    let existing = store
        .find_by_email(&reg.email)
        .await
        .map_err(AppError::on_create)?;
    if existing.is_some() {
        warn!(email = %reg.email, "email already registered");
        return Err(AppError::AlreadyExists);
    }

    let password_hash = hash_password_blocking(reg.password)
        .await
        .map_err(AppError::CreateFailed)?;

    let user = store
        .insert(NewUser {
            name: reg.name,
            email: reg.email,
            age: reg.age,
            password_hash,
        })
        .await
        .map_err(AppError::on_create)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Ids that do not parse cannot name a stored user, so they are not found.
pub async fn find_user(store: &dyn UserStore, id: &str) -> Result<User, AppError> {
    let Ok(id) = Uuid::parse_str(id) else {
        debug!(%id, "malformed user id");
        return Err(AppError::NotFound);
    };
    store
        .get(id)
        .await
        .map_err(AppError::on_fetch)?
        .ok_or(AppError::NotFound)
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, AppError> {
    store
        .list()
        .await
        .map_err(AppError::on_fetch)
}
