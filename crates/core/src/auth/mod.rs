pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    notify::{Toast, ToastVariant},
    session::{Session, SessionMarker},
};

pub use mock::{CredentialRecord, MockAuthProvider};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl AuthError {
    pub fn toast(&self) -> Toast {
        match self {
            AuthError::InvalidCredentials => Toast::new("Login failed", "Invalid credentials")
                .with_variant(ToastVariant::Destructive),
            AuthError::EmailAlreadyExists { .. } => {
                Toast::new("Registration failed", "Email already exists")
                    .with_variant(ToastVariant::Destructive)
            }
            AuthError::InvalidInput { reason } => {
                Toast::new("Check your details", reason.clone())
                    .with_variant(ToastVariant::Destructive)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Registration {
    fn validate(&self) -> std::result::Result<(), AuthError> {
        let invalid = |reason: &str| AuthError::InvalidInput {
            reason: reason.to_string(),
        };

        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(invalid("Email must be a valid address"));
        }
        if self.password.is_empty() {
            return Err(invalid("Password must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("Name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

impl From<Identity> for SessionMarker {
    fn from(identity: Identity) -> Self {
        SessionMarker {
            email: identity.email,
            name: identity.name,
        }
    }
}

/// Anything that can vouch for a user. The mock lives in [`mock`]; a real
/// backend plugs in here without touching [`Authenticator`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<Identity, AuthError>;

    async fn register(
        &self,
        registration: &Registration,
    ) -> std::result::Result<Identity, AuthError>;
}

/// Login, registration and logout on top of a provider and a session.
///
/// Failed attempts never write to the session.
#[derive(Clone)]
pub struct Authenticator {
    provider: Arc<dyn AuthProvider>,
    session: Session,
}

impl Authenticator {
    pub fn new(provider: Arc<dyn AuthProvider>, session: Session) -> Self {
        Self { provider, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let identity = match self.provider.authenticate(&credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::info!(email, error = %e, "login rejected");
                return Err(e.into());
            }
        };

        self.session.store(&identity.clone().into())?;
        tracing::info!(email, "login succeeded");
        Ok(identity)
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<Identity> {
        let registration = Registration {
            email: email.trim().to_string(),
            password: password.to_string(),
            name: name.trim().to_string(),
        };
        registration.validate()?;

        let identity = match self.provider.register(&registration).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::info!(email, error = %e, "registration rejected");
                return Err(e.into());
            }
        };

        self.session.store(&identity.clone().into())?;
        tracing::info!(email, "registration succeeded");
        Ok(identity)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}
