use tracing::error;

use crate::error::AppError;

/// bcrypt work factor.
const COST: u32 = 10;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        AppError::Hashing(e)
    })
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        AppError::Hashing(e)
    })
}
