//! Password hashing (credential verification)

mod hasher;

pub use hasher::PasswordHasher;
