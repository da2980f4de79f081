//! Small shared utilities: passphrase hashing, access key generation,
//! validated JSON extraction.

pub mod access_key;
pub mod password;
pub mod validate;
