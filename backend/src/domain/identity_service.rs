//! Thin domain wrapper over the identity collaborator.
//!
//! Validates input shape before it leaves the process and feeds the staff
//! client registry. Credential custody stays with the provider.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::models::{AuthenticatedUser, ClientProfile};
use crate::storage::traits::{IdentityError, IdentityProvider, RegistrationOutcome};

#[derive(Clone)]
pub struct IdentityService {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: &str,
    ) -> Result<RegistrationOutcome, IdentityError> {
        if name.trim().is_empty() {
            return Err(IdentityError::Invalid("name is required".to_string()));
        }
        if phone.trim().is_empty() {
            return Err(IdentityError::Invalid("phone is required".to_string()));
        }
        let outcome = self.provider.register(email, password, name, phone).await?;
        info!(
            "Registered {} (confirmation pending: {})",
            email, outcome.confirmation_pending
        );
        Ok(outcome)
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        match self.provider.login(email, password).await {
            Ok(user) => {
                info!("Login for {}", user.email);
                Ok(user)
            }
            Err(err) => {
                warn!("Login failed for {}: {}", email, err);
                Err(err)
            }
        }
    }

    pub async fn resend_confirmation(&self, email: &str) -> Result<(), IdentityError> {
        info!("Resending confirmation for {}", email);
        self.provider.resend_confirmation(email).await
    }

    pub async fn logout(&self, user_id: Uuid) -> Result<(), IdentityError> {
        self.provider.logout(user_id).await
    }

    pub async fn current_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<AuthenticatedUser>, IdentityError> {
        self.provider.current_user(user_id).await
    }

    /// Registered clients for the staff registry view, sorted by name
    pub async fn list_clients(&self) -> Result<Vec<ClientProfile>, IdentityError> {
        let profiles = self.provider.list_profiles().await?;
        info!("Registry query returned {} clients", profiles.len());
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryIdentity;

    fn service() -> IdentityService {
        IdentityService::new(Arc::new(MemoryIdentity::new()))
    }

    #[tokio::test]
    async fn register_validates_profile_fields() {
        let svc = service();
        let err = svc
            .register("dana@example.com", "hunter22", "  ", "050-1234567")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Invalid(_)));

        let err = svc
            .register("dana@example.com", "hunter22", "Dana", "")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Invalid(_)));
    }

    #[tokio::test]
    async fn registry_reflects_registrations() {
        let svc = service();
        svc.register("dana@example.com", "hunter22", "Dana", "050-1234567")
            .await
            .unwrap();
        let clients = svc.list_clients().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].email, "dana@example.com");
    }
}
