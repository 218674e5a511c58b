//! Credentials: Argon2id password hashes ([`password`]) and access/refresh
//! tokens ([`jwt`]).

pub mod jwt;
pub mod password;
