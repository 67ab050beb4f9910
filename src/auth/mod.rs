//! One-time login codes: generation, at-rest hashing, verification.
//! Session tokens live in [`token`].

pub mod token;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

pub const CODE_LENGTH: usize = 6;

const CODE_CHARSET: &[u8] = b"0123456789ABCDEF";

/// Six uppercase hex characters from the thread CSPRNG.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Hash a code for storage. Codes never hit the database in clear.
pub fn hash_code(code: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(code.as_bytes(), &salt)?
        .to_string())
}

/// Check a submitted code against its stored hash. Any parse failure or
/// mismatch is simply "no".
pub fn verify_code(code: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(code.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Light shape check on the address; anything stricter belongs to actual
/// email delivery.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}
