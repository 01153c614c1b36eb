//! Navigation policy.
//!
//! The guard is a pure function of the requested path and the current
//! authentication state. It is re-evaluated on every navigation and caches
//! nothing, so a token cleared between two navigations is observed by the
//! second one.

use crate::auth::TokenStore;

/// Views the client can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Chat,
}

impl View {
    /// Resolves a path to a view. `/` is an alias for the chat view.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/login" => Some(Self::Login),
            "/" | "/chat" => Some(Self::Chat),
            _ => None,
        }
    }

    /// Canonical path of the view.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Chat => "/chat",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Outcome of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(View),
    RedirectToLogin,
}

impl RouteDecision {
    /// The view that ends up on screen.
    pub fn view(&self) -> View {
        match self {
            Self::Render(view) => *view,
            Self::RedirectToLogin => View::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decides a navigation.
    ///
    /// The login view is always reachable, every other view requires
    /// authentication, and unmatched paths redirect to login.
    pub fn decide(path: &str, authenticated: bool) -> RouteDecision {
        match View::from_path(path) {
            Some(view) if !view.requires_auth() || authenticated => RouteDecision::Render(view),
            _ => RouteDecision::RedirectToLogin,
        }
    }

    /// Decides a navigation against the live token store.
    pub async fn navigate(path: &str, tokens: &dyn TokenStore) -> RouteDecision {
        Self::decide(path, tokens.is_authenticated().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthToken;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockTokenStore {
        token: Mutex<Option<AuthToken>>,
    }

    #[async_trait]
    impl TokenStore for MockTokenStore {
        async fn set_token(&self, token: AuthToken) -> Result<()> {
            *self.token.lock().unwrap() = Some(token);
            Ok(())
        }

        async fn get_token(&self) -> Option<AuthToken> {
            self.token.lock().unwrap().clone()
        }

        async fn clear_token(&self) -> Result<()> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_login_always_reachable() {
        assert_eq!(
            RouteGuard::decide("/login", false),
            RouteDecision::Render(View::Login)
        );
        assert_eq!(
            RouteGuard::decide("/login", true),
            RouteDecision::Render(View::Login)
        );
    }

    #[test]
    fn test_protected_views_require_auth() {
        for path in ["/", "/chat"] {
            assert_eq!(RouteGuard::decide(path, false), RouteDecision::RedirectToLogin);
            assert_eq!(
                RouteGuard::decide(path, true),
                RouteDecision::Render(View::Chat)
            );
        }
    }

    #[test]
    fn test_unmatched_paths_redirect_to_login() {
        for path in ["/settings", "", "chat", "/chat/extra"] {
            assert_eq!(RouteGuard::decide(path, true), RouteDecision::RedirectToLogin);
            assert_eq!(RouteGuard::decide(path, false), RouteDecision::RedirectToLogin);
        }
    }

    #[test]
    fn test_decision_view() {
        assert_eq!(RouteDecision::RedirectToLogin.view(), View::Login);
        assert_eq!(RouteDecision::Render(View::Chat).view(), View::Chat);
    }

    #[tokio::test]
    async fn test_navigate_rereads_store_each_time() {
        let store = MockTokenStore {
            token: Mutex::new(Some(AuthToken::new("T"))),
        };

        assert_eq!(
            RouteGuard::navigate("/chat", &store).await,
            RouteDecision::Render(View::Chat)
        );

        store.clear_token().await.unwrap();

        assert_eq!(
            RouteGuard::navigate("/chat", &store).await,
            RouteDecision::RedirectToLogin
        );
    }
}
