use crate::error::AuthError;
use configuration::AdminCredentials;
use core_types::{ClientId, UserRole};
use database::{ClientRepository, LedgerStore};

/// Who is logged in, and for client users, which ledger they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: UserRole,
    pub username: String,
    pub client_id: Option<ClientId>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::AdminOnly)
        }
    }

    /// Picks the client a command acts on.
    ///
    /// The administrator may act on any client but has to name one. A client
    /// user always acts on their own ledger and may only name that one.
    pub fn resolve_client(&self, requested: Option<&str>) -> Result<ClientId, AuthError> {
        match (self.role, requested, &self.client_id) {
            (UserRole::Admin, Some(id), _) => Ok(id.to_string()),
            (UserRole::Admin, None, _) => Err(AuthError::ClientRequired),
            (UserRole::Client, None, Some(own)) => Ok(own.clone()),
            (UserRole::Client, Some(id), Some(own)) if id == own.as_str() => Ok(own.clone()),
            (UserRole::Client, _, _) => Err(AuthError::Forbidden),
        }
    }
}

/// Checks a username/password pair.
///
/// The administrator pair is tried first, then every client record. Passwords
/// are compared as plain text.
pub fn authenticate<S: LedgerStore>(
    username: &str,
    password: &str,
    admin: &AdminCredentials,
    clients: &ClientRepository<S>,
) -> Result<Session, AuthError> {
    if username == admin.username && password == admin.password {
        tracing::info!("Administrator logged in.");
        return Ok(Session {
            role: UserRole::Admin,
            username: username.to_string(),
            client_id: None,
        });
    }

    match clients.find_by_credentials(username, password) {
        Some(client) => {
            tracing::info!(client_id = %client.id, "Client logged in.");
            Ok(Session {
                role: UserRole::Client,
                username: username.to_string(),
                client_id: Some(client.id.clone()),
            })
        }
        None => {
            tracing::warn!(username = %username, "Rejected login attempt.");
            Err(AuthError::InvalidCredentials)
        }
    }
}
