//! Public access key generation for repos.
//!
//! Keys are the only public identifier a repo has; they are generated, never
//! user-chosen. Ten mixed-case alphanumeric characters give ~59 bits of
//! entropy, so collisions are negligible and handled by an insert retry.

use rand::Rng;

const KEY_LENGTH: usize = 10;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Randomly generates a 10 character access key from upper and lowercase
/// letters and digits.
pub fn generate_access_key() -> String {
    let mut rng = rand::rng();
    (0..KEY_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
