use std::time::Duration;

use async_trait::async_trait;

use crate::auth::{AuthError, AuthProvider, Credentials, Identity, Registration};

pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

pub const DEMO_USERS: &[CredentialRecord] = &[CredentialRecord {
    email: "demo@example.com",
    password: "password123",
    name: "Demo User",
}];

/// Fixed, read-only user list with a fake network delay in front of it.
pub struct MockAuthProvider {
    users: &'static [CredentialRecord],
    latency: Duration,
}

impl MockAuthProvider {
    pub fn new(latency: Duration) -> Self {
        Self {
            users: DEMO_USERS,
            latency,
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_LATENCY)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        self.simulate_latency().await;

        self.users
            .iter()
            .find(|u| u.email == credentials.email && u.password == credentials.password)
            .map(|u| Identity {
                email: u.email.to_string(),
                name: u.name.to_string(),
            })
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn register(&self, registration: &Registration) -> Result<Identity, AuthError> {
        self.simulate_latency().await;

        if self.users.iter().any(|u| u.email == registration.email) {
            return Err(AuthError::EmailAlreadyExists {
                email: registration.email.clone(),
            });
        }

        Ok(Identity {
            email: registration.email.clone(),
            name: registration.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_authenticate_waits_for_latency() {
        let provider = MockAuthProvider::default();
        let started = tokio::time::Instant::now();

        let identity = provider
            .authenticate(&Credentials {
                email: "demo@example.com".into(),
                password: "password123".into(),
            })
            .await
            .unwrap();

        assert_eq!(identity.name, "Demo User");
        assert!(started.elapsed() >= DEFAULT_AUTH_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_waits_even_when_rejected() {
        let provider = MockAuthProvider::default();
        let started = tokio::time::Instant::now();

        let err = provider
            .register(&Registration {
                email: "demo@example.com".into(),
                password: "x".into(),
                name: "X".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailAlreadyExists { .. }));
        assert!(started.elapsed() >= DEFAULT_AUTH_LATENCY);
    }
}
