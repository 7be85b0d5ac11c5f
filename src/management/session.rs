use tower_sessions::Session;

use crate::{Res, types::Credential};

const SESSION_AUTH_STATE: &str = "auth:state";
const SESSION_AUTH_CREDENTIAL: &str = "auth:credential";

/// Typed access to the authentication data kept in a browser session.
///
/// Wraps the `tower-sessions` [`Session`] so the key names and value types for
/// the anti-forgery token and the credential live in one place.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_state(&self, state: &str) -> Res<()> {
        self.session
            .insert(SESSION_AUTH_STATE, state.to_string())
            .await?;
        Ok(())
    }

    pub async fn state(&self) -> Res<Option<String>> {
        Ok(self.session.get::<String>(SESSION_AUTH_STATE).await?)
    }

    pub async fn clear_state(&self) -> Res<()> {
        self.session.remove::<String>(SESSION_AUTH_STATE).await?;
        Ok(())
    }

    pub async fn set_credential(&self, credential: &Credential) -> Res<()> {
        self.session
            .insert(SESSION_AUTH_CREDENTIAL, credential)
            .await?;
        Ok(())
    }

    pub async fn credential(&self) -> Res<Option<Credential>> {
        Ok(self
            .session
            .get::<Credential>(SESSION_AUTH_CREDENTIAL)
            .await?)
    }

    /// Drops every value and the session itself.
    pub async fn discard(&self) -> Res<()> {
        self.session.flush().await?;
        Ok(())
    }
}
