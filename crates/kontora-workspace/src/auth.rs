//! The authentication collaborator.
//!
//! Session handling lives outside Kontora; the services only ask who the
//! caller is.

use async_trait::async_trait;
use kontora_core::Result;

use crate::model::User;

/// Resolves the user behind the current request.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, or `None` for an anonymous caller.
    async fn current_user(&self) -> Result<Option<User>>;
}

/// An [`AuthProvider`] that always reports the same caller.
///
/// Used by the CLI (`--user`) and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<User>,
}

impl StaticAuth {
    /// Always report `user` as signed in.
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Always report an anonymous caller.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user(&self) -> Result<Option<User>> {
        Ok(self.user.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_static_auth_signed_in() {
        let user = User::new(Uuid::new_v4());
        let auth = StaticAuth::signed_in(user.clone());
        assert_eq!(auth.current_user().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_static_auth_anonymous() {
        let auth = StaticAuth::anonymous();
        assert!(auth.current_user().await.unwrap().is_none());
    }
}
