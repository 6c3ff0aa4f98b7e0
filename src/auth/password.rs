//! Salted PBKDF2-HMAC-SHA256 password hashes, stored as base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use uuid::Uuid;

const ITERATIONS: u32 = 10_000;

fn derive_key(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);
    key
}

/// Returns `(salt, hash)`, both base64.
pub fn hash_password(password: &str) -> (String, String) {
    let salt = *Uuid::new_v4().as_bytes();
    let key = derive_key(password, &salt);
    (B64.encode(salt), B64.encode(key))
}

pub fn verify_password(password: &str, salt_b64: &str, hash_b64: &str) -> bool {
    let (Ok(salt), Ok(expected)) = (B64.decode(salt_b64), B64.decode(hash_b64)) else {
        return false;
    };
    let key = derive_key(password, &salt);

    // compare every byte
    key.len() == expected.len()
        && key
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let (salt, hash) = hash_password("s3cret!");
        assert!(verify_password("s3cret!", &salt, &hash));
        assert!(!verify_password("s3cret", &salt, &hash));
        assert!(!verify_password("s3cret!", "not base64!", &hash));
    }

    #[test]
    fn salts_differ_per_hash() {
        let (s1, h1) = hash_password("pw");
        let (s2, h2) = hash_password("pw");
        assert_ne!(s1, s2);
        assert_ne!(h1, h2);
    }
}
