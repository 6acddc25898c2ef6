//! # Credential Flows
//!
//! Sign-in and sign-up logic for the screens surrounding the catalog.
//! Field checks run locally first; only well-formed requests reach the
//! credential service, and its failure messages are relayed untouched.
//!
//! ## Flow Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Credential Flows                                  │
//! │                                                                         │
//! │  sign_in(email, password)                                               │
//! │    ├── empty email or password ──► MissingCredentials (no vendor call)  │
//! │    └── AuthSession::sign_in ─────► Ok | Auth(rejection message)         │
//! │                                                                         │
//! │  sign_up(email, password, confirm)                                      │
//! │    ├── any field empty ──────────► MissingCredentials (no vendor call)  │
//! │    ├── password ≠ confirm ───────► PasswordMismatch   (no vendor call)  │
//! │    ├── AuthSession::sign_up ─────► Ok | Auth(rejection message)         │
//! │    └── send_verification_email ──► best effort; failure is logged,      │
//! │                                    sign-up still succeeds               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tracing::{info, warn};

use boba_store::{AuthError, AuthSession};

// =============================================================================
// Flow Errors
// =============================================================================

/// Failures of the credential flows.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// Email or password (or the confirmation) was left empty.
    #[error("Email and password are required")]
    MissingCredentials,

    /// Password and confirmation do not match.
    #[error("Password confirmation does not match")]
    PasswordMismatch,

    /// The credential service refused the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result of a completed sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpReport {
    /// Whether the verification email actually went out. The account
    /// exists either way.
    pub verification_email_sent: bool,
}

// =============================================================================
// Flows
// =============================================================================

/// Signs in with an existing account.
pub async fn sign_in(
    auth: &dyn AuthSession,
    email: &str,
    password: &str,
) -> Result<(), AuthFlowError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthFlowError::MissingCredentials);
    }

    auth.sign_in(email, password).await?;
    info!(email = %email, "Signed in");
    Ok(())
}

/// Registers a new account, then requests a verification email.
///
/// The verification send is best effort: the account was already created,
/// so a failed send is logged and reported in the [`SignUpReport`] rather
/// than failing the flow.
pub async fn sign_up(
    auth: &dyn AuthSession,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<SignUpReport, AuthFlowError> {
    if email.trim().is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(AuthFlowError::MissingCredentials);
    }

    if password != confirm_password {
        return Err(AuthFlowError::PasswordMismatch);
    }

    auth.sign_up(email, password).await?;
    info!(email = %email, "Account created");

    let verification_email_sent = match auth.send_verification_email().await {
        Ok(()) => true,
        Err(err) => {
            warn!(email = %email, %err, "Verification email not sent");
            false
        }
    };

    Ok(SignUpReport {
        verification_email_sent,
    })
}

/// Ends the current session.
pub fn sign_out(auth: &dyn AuthSession) {
    auth.sign_out();
    info!("Signed out");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boba_store::MemoryAuthSession;

    #[tokio::test]
    async fn test_sign_in_rejects_empty_fields_without_vendor_call() {
        let auth = MemoryAuthSession::new().with_account("a@example.com", "secret");

        assert!(matches!(
            sign_in(&auth, "", "secret").await,
            Err(AuthFlowError::MissingCredentials)
        ));
        assert!(matches!(
            sign_in(&auth, "a@example.com", "").await,
            Err(AuthFlowError::MissingCredentials)
        ));
        // No session was established by the rejected attempts.
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn test_sign_in_relays_vendor_rejection() {
        let auth = MemoryAuthSession::new().with_account("a@example.com", "secret");

        let err = sign_in(&auth, "a@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthFlowError::Auth(AuthError::Rejected(_))));

        assert!(sign_in(&auth, "a@example.com", "secret").await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_up_checks_confirmation_before_vendor_call() {
        let auth = MemoryAuthSession::new();

        assert!(matches!(
            sign_up(&auth, "a@example.com", "secret", "other").await,
            Err(AuthFlowError::PasswordMismatch)
        ));
        assert!(matches!(
            sign_up(&auth, "a@example.com", "", "").await,
            Err(AuthFlowError::MissingCredentials)
        ));

        // Neither rejected attempt created the account.
        assert!(matches!(
            auth.sign_in("a@example.com", "secret").await,
            Err(AuthError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_up_sends_verification_email() {
        let auth = MemoryAuthSession::new();

        let report = sign_up(&auth, "a@example.com", "secret", "secret")
            .await
            .unwrap();
        assert!(report.verification_email_sent);
        assert_eq!(auth.verification_sent_to(), vec!["a@example.com"]);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let auth = MemoryAuthSession::new();
        sign_up(&auth, "a@example.com", "secret", "secret")
            .await
            .unwrap();
        assert!(auth.current_user().is_some());

        sign_out(&auth);
        assert_eq!(auth.current_user(), None);
    }
}
