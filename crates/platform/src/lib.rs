//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random bytes, constant-time compare)
//! - Credential hashing and verification (salted SHA-256 with legacy fallback)
//! - Password strength policy
//! - Input sanitization for untrusted string fields

pub mod crypto;
pub mod password;
pub mod sanitize;
