//! The authenticator abstraction the REST layer is generic over.

use std::future::Future;

use chrono::Utc;

use crate::error::{Error, ErrorKind, Result};
use crate::token::{Token, TokenCache};

/// A source of Salesforce sessions.
///
/// Implementors provide the grant logic (`authenticate`,
/// `refresh_access_token`) and expose their [`TokenCache`]; the cache
/// accessors are provided.
pub trait Authenticator: Send + Sync {
    /// The cache holding this authenticator's session.
    fn cache(&self) -> &TokenCache;

    /// Obtain a new session and cache it.
    fn authenticate(&self) -> impl Future<Output = Result<Token>> + Send;

    /// Renew the access token and return it.
    fn refresh_access_token(&self) -> impl Future<Output = Result<String>> + Send;

    /// The cached session, authenticating first if none is cached or the
    /// cached one has expired.
    fn session(&self) -> impl Future<Output = Result<Token>> + Send {
        async move {
            if let Some(token) = self.cache().valid_token(Utc::now()).await {
                return Ok(token);
            }
            self.authenticate().await
        }
    }

    /// The access token of the current session.
    fn access_token(&self) -> impl Future<Output = Result<String>> + Send {
        async move { Ok(self.session().await?.access_token().to_string()) }
    }

    /// The instance URL of the current session.
    fn instance_url(&self) -> impl Future<Output = Result<String>> + Send {
        async move { Ok(self.session().await?.instance_url) }
    }

    /// The cached token, without authenticating.
    fn token(&self) -> impl Future<Output = Option<Token>> + Send {
        self.cache().token()
    }

    /// The cached refresh token.
    fn refresh_token(&self) -> impl Future<Output = Option<String>> + Send {
        self.cache().refresh_token()
    }

    /// Replace the cached access token.
    ///
    /// Fails when no session is cached, since there is no instance URL to
    /// pair the token with.
    fn set_access_token(&self, access_token: String) -> impl Future<Output = Result<()>> + Send {
        async move {
            if self.cache().set_access_token(access_token).await {
                Ok(())
            } else {
                Err(Error::new(ErrorKind::InvalidInput(
                    "no session is cached".to_string(),
                )))
            }
        }
    }

    /// Replace the cached refresh token.
    fn set_refresh_token(&self, refresh_token: String) -> impl Future<Output = ()> + Send {
        self.cache().set_refresh_token(refresh_token)
    }

    /// Drop the cached session so the next call re-authenticates.
    fn invalidate(&self) -> impl Future<Output = ()> + Send {
        self.cache().invalidate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hands out numbered tokens without any network.
    #[derive(Default)]
    struct CountingAuth {
        cache: TokenCache,
        grants: AtomicUsize,
    }

    impl Authenticator for CountingAuth {
        fn cache(&self) -> &TokenCache {
            &self.cache
        }

        async fn authenticate(&self) -> Result<Token> {
            let mut session = self.cache.lock().await;
            let n = self.grants.fetch_add(1, Ordering::SeqCst) + 1;
            let token = Token::new(format!("token-{n}"), "https://na1.salesforce.com");
            session.store(token.clone(), None);
            Ok(token)
        }

        async fn refresh_access_token(&self) -> Result<String> {
            Ok(self.authenticate().await?.access_token().to_string())
        }
    }

    #[tokio::test]
    async fn test_access_token_authenticates_once() {
        let auth = CountingAuth::default();

        assert_eq!(auth.access_token().await.unwrap(), "token-1");
        assert_eq!(auth.access_token().await.unwrap(), "token-1");
        assert_eq!(
            auth.instance_url().await.unwrap(),
            "https://na1.salesforce.com"
        );
        assert_eq!(auth.grants.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_session() {
        let auth = CountingAuth::default();
        auth.access_token().await.unwrap();

        auth.invalidate().await;
        assert!(auth.token().await.is_none());
        assert_eq!(auth.access_token().await.unwrap(), "token-2");
    }

    #[tokio::test]
    async fn test_set_tokens() {
        let auth = CountingAuth::default();
        assert!(auth.set_access_token("manual".into()).await.is_err());

        auth.session().await.unwrap();
        auth.set_access_token("manual".into()).await.unwrap();
        auth.set_refresh_token("refresh".into()).await;

        assert_eq!(auth.access_token().await.unwrap(), "manual");
        assert_eq!(auth.refresh_token().await.as_deref(), Some("refresh"));
    }
}
