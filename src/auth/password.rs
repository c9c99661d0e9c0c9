use crate::Result;

/// Salted bcrypt hash of `plain` at the given cost.
pub fn hash_password(plain: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Check `plain` against a stored bcrypt hash. A hash that cannot be parsed
/// never matches.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// [`hash_password`] on the blocking thread pool, off the async workers.
pub async fn hash_password_blocking(plain: &str, cost: u32) -> Result<String> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&plain, cost)).await?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(plain: &str, hash: &str) -> Result<bool> {
    let (plain, hash) = (plain.to_owned(), hash.to_owned());
    Ok(tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?)
}
