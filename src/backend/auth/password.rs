//! Password hashing
//!
//! bcrypt is deliberately slow, so both operations run on the blocking
//! thread pool instead of a runtime worker.

use crate::backend::error::BackendError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::internal(format!("Failed to hash password: {}", e))
        })
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            BackendError::internal(format!("Password verification error: {}", e))
        })
}
