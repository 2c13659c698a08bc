//! Route guard: the pure gating decision for protected views.
//!
//! No state of its own; the decision is recomputed from the session
//! snapshot whenever it changes.

use crate::session::SessionState;

/// What a protected route should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session check still in flight: render a placeholder, do not
    /// navigate anywhere yet.
    Loading,
    /// No session, or the session lacks the required role.
    RedirectToLogin,
    /// Render the protected content.
    Render,
}

/// Decide access for a route requiring `required_role`.
pub fn decide(state: &SessionState, required_role: &str) -> RouteDecision {
    if state.is_loading {
        return RouteDecision::Loading;
    }

    match &state.current_user {
        Some(user) if user.role == required_role => RouteDecision::Render,
        _ => RouteDecision::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;

    fn admin_user() -> Identity {
        Identity {
            id: "u1".to_string(),
            email: "admin@mane.example".to_string(),
            role: "admin".to_string(),
            full_name: Some("Site Admin".to_string()),
        }
    }

    #[test]
    fn test_loading_renders_placeholder_no_redirect() {
        let state = SessionState {
            current_user: None,
            is_loading: true,
        };
        assert_eq!(decide(&state, "admin"), RouteDecision::Loading);

        // Loading wins even with a user already present.
        let state = SessionState {
            current_user: Some(admin_user()),
            is_loading: true,
        };
        assert_eq!(decide(&state, "admin"), RouteDecision::Loading);
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        let state = SessionState {
            current_user: None,
            is_loading: false,
        };
        assert_eq!(decide(&state, "admin"), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn test_wrong_role_redirects_to_login() {
        let mut user = admin_user();
        user.role = "viewer".to_string();
        let state = SessionState {
            current_user: Some(user),
            is_loading: false,
        };
        assert_eq!(decide(&state, "admin"), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn test_matching_role_renders() {
        let state = SessionState {
            current_user: Some(admin_user()),
            is_loading: false,
        };
        assert_eq!(decide(&state, "admin"), RouteDecision::Render);
    }
}
