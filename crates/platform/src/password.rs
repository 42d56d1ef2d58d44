//! Credential Hashing and Verification
//!
//! Salted SHA-256 credential handling:
//! - Stored format `sha256$<salt>$<digest>` with a fresh random salt per hash
//! - Stored values without the scheme prefix are legacy plaintext and are
//!   compared directly (pre-hashing user rows must keep working)
//! - Constant-time comparison
//! - Zeroization of clear-text material
//!
//! Verification never fails: malformed stored values simply do not match.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, hex_encode, random_bytes, sha256_hex};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length accepted by the strength policy
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Salt length in bytes (hex-encoded to twice this many characters)
pub const SALT_LENGTH: usize = 16;

/// Algorithm tag inside the stored format
const SCHEME_TAG: &str = "sha256";

/// Prefix that marks a stored value as hashed rather than legacy plaintext
const SCHEME_PREFIX: &str = "sha256$";

// ============================================================================
// Error Types
// ============================================================================

/// Strength policy violations, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is shorter than [`MIN_PASSWORD_LENGTH`]
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// No uppercase letter
    #[error("Password must contain uppercase letter")]
    MissingUppercase,

    /// No lowercase letter
    #[error("Password must contain lowercase letter")]
    MissingLowercase,

    /// No digit
    #[error("Password must contain number")]
    MissingDigit,
}

/// Hashing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Hashing requires a non-empty password
    #[error("Password cannot be empty")]
    EmptyPassword,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a raw password. Empty input is rejected; all other policy
    /// checks live in [`check_strength`] and only apply at registration.
    pub fn new(raw: String) -> Result<Self, PasswordHashError> {
        if raw.is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash into the stored format with a fresh random salt.
    ///
    /// Two hashes of the same password always differ.
    pub fn hash(&self) -> StoredCredential {
        let salt = hex_encode(&random_bytes(SALT_LENGTH));
        let digest = sha256_hex(format!("{}{}", self.0, salt).as_bytes());
        StoredCredential(format!("{SCHEME_TAG}${salt}${digest}"))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Stored Credential
// ============================================================================

/// Credential in its stored representation
///
/// Either `sha256$<salt>$<digest>` or a legacy bare value. Construction
/// never fails; an unrecognized format is simply treated as legacy
/// plaintext at verification time.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential(String);

impl StoredCredential {
    /// Wrap a stored value (e.g. fetched from the persistence service).
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Stored representation, suitable for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the stored value is not in the hashed format.
    pub fn is_legacy_plaintext(&self) -> bool {
        !self.0.starts_with(SCHEME_PREFIX)
    }

    /// True when the credential should be re-hashed on next successful
    /// verification (currently: legacy plaintext rows).
    pub fn needs_rehash(&self) -> bool {
        self.is_legacy_plaintext()
    }

    /// Verify a clear-text attempt against this credential.
    ///
    /// Never panics and never errors: empty input and malformed stored
    /// values return `false`.
    pub fn verify(&self, password: &str) -> bool {
        if password.is_empty() || self.0.is_empty() {
            return false;
        }

        // Legacy plaintext path for rows created before hashing existed.
        if self.is_legacy_plaintext() {
            return constant_time_eq(password.as_bytes(), self.0.as_bytes());
        }

        let parts: Vec<&str> = self.0.split('$').collect();
        if parts.len() != 3 {
            return false;
        }

        let (algorithm, salt, digest) = (parts[0], parts[1], parts[2]);
        if algorithm != SCHEME_TAG {
            return false;
        }

        let computed = sha256_hex(format!("{password}{salt}").as_bytes());
        constant_time_eq(computed.as_bytes(), digest.as_bytes())
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Legacy values contain the plaintext itself; always redact.
        f.debug_tuple("StoredCredential")
            .field(&"[CREDENTIAL]")
            .finish()
    }
}

// ============================================================================
// Strength Policy
// ============================================================================

/// Check password strength, reporting the first violated rule.
///
/// Rule order: length, uppercase, lowercase, digit. Runs at registration
/// only; sign-in accepts whatever the stored credential accepts.
pub fn check_strength(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_rejected() {
        assert_eq!(
            ClearTextPassword::new(String::new()).unwrap_err(),
            PasswordHashError::EmptyPassword
        );
    }

    #[test]
    fn test_hash_format() {
        let password = ClearTextPassword::new("Secret1!".to_string()).unwrap();
        let stored = password.hash();

        let parts: Vec<&str> = stored.as_str().split('$').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "sha256");
        // 16 bytes of salt, hex-encoded
        assert_eq!(parts[1].len(), SALT_LENGTH * 2);
        // SHA-256 digest, hex-encoded
        assert_eq!(parts[2].len(), 64);
        assert!(!stored.is_legacy_plaintext());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123".to_string()).unwrap();
        let stored = password.hash();

        assert!(stored.verify("TestPassword123"));
        assert!(!stored.verify("WrongPassword123"));
    }

    #[test]
    fn test_salt_randomness() {
        let password = ClearTextPassword::new("TestPassword123".to_string()).unwrap();
        let first = password.hash();
        let second = password.hash();

        // Fresh salt per call: same password, different stored values
        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("TestPassword123"));
        assert!(second.verify("TestPassword123"));
    }

    #[test]
    fn test_verify_empty_inputs() {
        let stored = ClearTextPassword::new("Secret1!".to_string()).unwrap().hash();
        assert!(!stored.verify(""));

        let empty = StoredCredential::from_stored("");
        assert!(!empty.verify("anything"));
        assert!(!empty.verify(""));
    }

    #[test]
    fn test_legacy_plaintext_fallback() {
        // Pre-hashing rows store the bare password
        let stored = StoredCredential::from_stored("admin123");
        assert!(stored.is_legacy_plaintext());
        assert!(stored.needs_rehash());
        assert!(stored.verify("admin123"));
        assert!(!stored.verify("admin124"));
    }

    #[test]
    fn test_malformed_stored_values() {
        // Wrong part count inside the hashed format
        assert!(!StoredCredential::from_stored("sha256$onlysalt").verify("x"));
        assert!(!StoredCredential::from_stored("sha256$a$b$c").verify("x"));
        assert!(!StoredCredential::from_stored("sha256$$").verify("x"));
    }

    #[test]
    fn test_unknown_algorithm_is_plaintext() {
        // No recognized prefix: falls back to direct comparison
        let stored = StoredCredential::from_stored("md5$salt$digest");
        assert!(stored.is_legacy_plaintext());
        assert!(!stored.verify("password"));
        assert!(stored.verify("md5$salt$digest"));
    }

    #[test]
    fn test_check_strength_order() {
        // First violated rule wins, in declaration order
        assert_eq!(check_strength("short"), Err(PasswordPolicyError::TooShort));
        assert_eq!(
            check_strength("alllower1"),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            check_strength("ALLUPPER1"),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            check_strength("NoDigitsHere"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(check_strength("Valid1Pass"), Ok(()));
    }

    #[test]
    fn test_check_strength_messages() {
        assert_eq!(
            PasswordPolicyError::TooShort.to_string(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            PasswordPolicyError::MissingUppercase.to_string(),
            "Password must contain uppercase letter"
        );
        assert_eq!(
            PasswordPolicyError::MissingLowercase.to_string(),
            "Password must contain lowercase letter"
        );
        assert_eq!(
            PasswordPolicyError::MissingDigit.to_string(),
            "Password must contain number"
        );
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("SuperSecret1".to_string()).unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("SuperSecret1"));

        let stored = StoredCredential::from_stored("legacy-plaintext");
        let debug = format!("{:?}", stored);
        assert!(!debug.contains("legacy-plaintext"));
    }

    #[test]
    fn test_unicode_password() {
        let password = ClearTextPassword::new("パスワード安全です".to_string()).unwrap();
        let stored = password.hash();
        assert!(stored.verify("パスワード安全です"));
        assert!(!stored.verify("パスワード"));
    }
}
