//! In-memory identity provider double.
//!
//! Stores salted password digests, never plaintext. The real deployment
//! delegates all of this to the hosted identity service; this double
//! exists so the flow and registry can run in tests and demo mode.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::domain::models::{AuthenticatedUser, ClientProfile};
use crate::storage::traits::{IdentityError, IdentityProvider, RegistrationOutcome};

struct Account {
    profile: ClientProfile,
    password_digest: [u8; 32],
    confirmed: bool,
    session_active: bool,
}

#[derive(Clone)]
pub struct MemoryIdentity {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    /// When set, new registrations require a (simulated) email
    /// confirmation before login succeeds
    require_confirmation: bool,
}

fn digest(email: &str, password: &str) -> [u8; 32] {
    // Email doubles as the salt; good enough for a test double
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            require_confirmation: false,
        }
    }

    pub fn with_confirmation_required() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            require_confirmation: true,
        }
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: &str,
    ) -> Result<RegistrationOutcome, IdentityError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(IdentityError::Invalid("invalid email address".to_string()));
        }
        if password.len() < 6 {
            return Err(IdentityError::Invalid(
                "password must be at least 6 characters".to_string(),
            ));
        }

        let mut accounts = self.accounts.lock().expect("identity lock");
        if accounts.contains_key(&email) {
            return Err(IdentityError::EmailTaken(email));
        }

        let user_id = Uuid::new_v4();
        let account = Account {
            profile: ClientProfile {
                id: user_id,
                name: name.trim().to_string(),
                phone: phone.trim().to_string(),
                email: email.clone(),
                registered_at: Utc::now(),
            },
            password_digest: digest(&email, password),
            confirmed: !self.require_confirmation,
            session_active: false,
        };
        accounts.insert(email.clone(), account);
        info!("Registered client {} ({})", name, email);

        Ok(RegistrationOutcome {
            user_id,
            confirmation_pending: self.require_confirmation,
        })
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        let email = email.trim().to_lowercase();
        let mut accounts = self.accounts.lock().expect("identity lock");
        let account = accounts
            .get_mut(&email)
            .ok_or(IdentityError::InvalidCredentials)?;

        if account.password_digest != digest(&email, password) {
            return Err(IdentityError::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(IdentityError::ConfirmationPending);
        }

        account.session_active = true;
        let profile = &account.profile;
        Ok(AuthenticatedUser {
            id: profile.id,
            email: profile.email.clone(),
            name: profile.name.clone(),
            phone: profile.phone.clone(),
        })
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), IdentityError> {
        let email = email.trim().to_lowercase();
        let mut accounts = self.accounts.lock().expect("identity lock");
        let account = accounts
            .get_mut(&email)
            .ok_or_else(|| IdentityError::Other(format!("no account for {}", email)))?;
        // The double has no mailer; resending simply confirms
        account.confirmed = true;
        info!("Confirmation resent for {}", email);
        Ok(())
    }

    async fn logout(&self, user_id: Uuid) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.lock().expect("identity lock");
        for account in accounts.values_mut() {
            if account.profile.id == user_id {
                account.session_active = false;
            }
        }
        Ok(())
    }

    async fn current_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<AuthenticatedUser>, IdentityError> {
        let accounts = self.accounts.lock().expect("identity lock");
        let user = accounts
            .values()
            .find(|a| a.profile.id == user_id && a.session_active)
            .map(|a| AuthenticatedUser {
                id: a.profile.id,
                email: a.profile.email.clone(),
                name: a.profile.name.clone(),
                phone: a.profile.phone.clone(),
            });
        Ok(user)
    }

    async fn list_profiles(&self) -> Result<Vec<ClientProfile>, IdentityError> {
        let accounts = self.accounts.lock().expect("identity lock");
        let mut profiles: Vec<ClientProfile> =
            accounts.values().map(|a| a.profile.clone()).collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }
}
