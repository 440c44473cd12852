//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with zeroization of sensitive data
//! - Outbound mail transport (HTTP mail-API client or log-only)

pub mod mailer;
pub mod password;
