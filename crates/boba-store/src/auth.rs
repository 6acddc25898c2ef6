//! # Auth Session Contract
//!
//! The credential service the surrounding screens sign in through. The
//! engine's catalog core never touches this - it exists so the sign-in and
//! sign-up flows in boba-sync have a substitutable seam, the same way the
//! record store does.
//!
//! Failure messages are vendor-owned text: the flows relay them verbatim
//! rather than interpreting them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

// =============================================================================
// Auth Session Trait
// =============================================================================

/// Email/password credential service.
#[async_trait]
pub trait AuthSession: Send + Sync {
    /// Signs in with an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()>;

    /// Registers a new account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<()>;

    /// Sends a verification email to the signed-in account.
    async fn send_verification_email(&self) -> AuthResult<()>;

    /// Ends the current session. Always succeeds; signing out while signed
    /// out is a no-op.
    fn sign_out(&self);
}

// =============================================================================
// In-Memory Auth Session
// =============================================================================

/// Bookkeeping for the in-memory fake.
#[derive(Debug, Default)]
struct AuthBook {
    /// email → password
    accounts: HashMap<String, String>,

    /// Currently signed-in email, if any.
    current: Option<String>,

    /// Emails a verification message was "sent" to, in send order.
    verification_sent: Vec<String>,
}

/// An in-memory [`AuthSession`] for tests.
#[derive(Debug, Default)]
pub struct MemoryAuthSession {
    book: Mutex<AuthBook>,
}

impl MemoryAuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account without going through sign-up.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.book
            .lock()
            .expect("auth mutex poisoned")
            .accounts
            .insert(email.into(), password.into());
        self
    }

    /// Email of the signed-in account, if any.
    pub fn current_user(&self) -> Option<String> {
        self.book.lock().expect("auth mutex poisoned").current.clone()
    }

    /// Emails that received a verification message, in send order.
    pub fn verification_sent_to(&self) -> Vec<String> {
        self.book
            .lock()
            .expect("auth mutex poisoned")
            .verification_sent
            .clone()
    }
}

#[async_trait]
impl AuthSession for MemoryAuthSession {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        let mut book = self.book.lock().expect("auth mutex poisoned");

        match book.accounts.get(email) {
            Some(stored) if stored == password => {
                book.current = Some(email.to_string());
                debug!(email = %email, "Signed in");
                Ok(())
            }
            Some(_) => Err(AuthError::Rejected("wrong password".into())),
            None => Err(AuthError::Rejected(format!("no account for {email}"))),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<()> {
        let mut book = self.book.lock().expect("auth mutex poisoned");

        if book.accounts.contains_key(email) {
            return Err(AuthError::Rejected(format!(
                "account {email} already exists"
            )));
        }

        book.accounts.insert(email.to_string(), password.to_string());
        book.current = Some(email.to_string());
        debug!(email = %email, "Account created");
        Ok(())
    }

    async fn send_verification_email(&self) -> AuthResult<()> {
        let mut book = self.book.lock().expect("auth mutex poisoned");

        let email = book.current.clone().ok_or(AuthError::NotSignedIn)?;
        book.verification_sent.push(email);
        Ok(())
    }

    fn sign_out(&self) {
        self.book.lock().expect("auth mutex poisoned").current = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_checks_credentials() {
        let auth = MemoryAuthSession::new().with_account("a@example.com", "secret");

        assert!(auth.sign_in("a@example.com", "secret").await.is_ok());
        assert_eq!(auth.current_user().as_deref(), Some("a@example.com"));

        auth.sign_out();
        assert!(auth.sign_in("a@example.com", "wrong").await.is_err());
        assert!(auth.sign_in("b@example.com", "secret").await.is_err());
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_account() {
        let auth = MemoryAuthSession::new();

        assert!(auth.sign_up("a@example.com", "secret").await.is_ok());
        let err = auth.sign_up("a@example.com", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_verification_requires_signed_in_account() {
        let auth = MemoryAuthSession::new();
        assert!(matches!(
            auth.send_verification_email().await,
            Err(AuthError::NotSignedIn)
        ));

        auth.sign_up("a@example.com", "secret").await.unwrap();
        auth.send_verification_email().await.unwrap();
        assert_eq!(auth.verification_sent_to(), vec!["a@example.com"]);
    }
}
