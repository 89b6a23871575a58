//! Session service module
//!
//! Orchestrates the credential and token components:
//! - Sign-up with salted password hashing
//! - Sign-in issuing an access/refresh token pair
//! - Single-use refresh-token rotation
//! - Logout and access-token verification
//! - Housekeeping of expired refresh records

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionConfig;
pub use service::SessionService;
