//! Access-control decisions for page navigation.
//!
//! The gate is a pure decision function: given a request path and whatever
//! session state the caller has already resolved, it returns either
//! [`GateDecision::Allow`] or [`GateDecision::RedirectTo`]. Navigation
//! mechanics (issuing the actual redirect, refreshing cookies) live in the
//! API layer's middleware, which is also responsible for the public-path
//! short-circuit: public paths must be decided without resolving a session
//! at all, so the middleware classifies first and only passes session state
//! for protected paths.

use crate::types::DbId;

/// Exact-match public paths.
const PUBLIC_EXACT: &[&str] = &["/", "/login", "/register", "/explore", "/auth/callback"];

/// Result of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Decided without any session or profile lookup.
    Public,
    /// Requires an authenticated, onboarded user.
    Protected,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectTo(String),
}

/// The identity of the current actor, as resolved from request credentials.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: DbId,
    pub email: String,
}

/// The slice of the profile the gate needs.
#[derive(Debug, Clone, Copy)]
pub struct GateProfile {
    pub onboarding_completed: bool,
}

/// Classify a path as public or protected.
///
/// Public: the exact allow-list, `/posts/{id}` (but not `/posts/new` and
/// not `/posts/{id}/edit`), and everything under `/users/`. Everything
/// else is protected.
pub fn classify(path: &str) -> PathClass {
    if PUBLIC_EXACT.contains(&path) {
        return PathClass::Public;
    }
    if let Some(rest) = path.strip_prefix("/posts/") {
        // A bare id segment only: `/posts/new` is the creation form and
        // `/posts/{id}/edit` has a trailing segment, both protected.
        if !rest.is_empty() && rest != "new" && !rest.contains('/') {
            return PathClass::Public;
        }
    }
    if path.strip_prefix("/users/").is_some_and(|rest| !rest.is_empty()) {
        return PathClass::Public;
    }
    PathClass::Protected
}

/// Evaluate the gate for `path` with caller-resolved session state.
///
/// Decision order:
///
/// 1. An authenticated user who has not completed onboarding is sent to
///    `/onboarding` from every path except `/onboarding` itself and the
///    `/login` / `/register` pages, regardless of classification.
/// 2. An authenticated user on `/login` or `/register` is sent to
///    `/dashboard` (or `/onboarding` when onboarding is incomplete).
/// 3. Public paths are allowed.
/// 4. Without a session, protected paths redirect to `/login` (fail
///    closed: callers must map failed session/profile lookups to `None`).
/// 5. Everything else is allowed.
pub fn evaluate(
    path: &str,
    session: Option<&Session>,
    profile: Option<&GateProfile>,
) -> GateDecision {
    if session.is_some() {
        let onboarded = profile.map(|p| p.onboarding_completed).unwrap_or(true);

        if !onboarded && path != "/onboarding" && path != "/login" && path != "/register" {
            return GateDecision::RedirectTo("/onboarding".to_string());
        }

        if path == "/login" || path == "/register" {
            let target = if onboarded { "/dashboard" } else { "/onboarding" };
            return GateDecision::RedirectTo(target.to_string());
        }
    }

    if classify(path) == PathClass::Public {
        return GateDecision::Allow;
    }

    if session.is_none() {
        return GateDecision::RedirectTo("/login".to_string());
    }

    GateDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: 1,
            email: "user@example.com".to_string(),
        }
    }

    fn onboarded() -> GateProfile {
        GateProfile {
            onboarding_completed: true,
        }
    }

    fn not_onboarded() -> GateProfile {
        GateProfile {
            onboarding_completed: false,
        }
    }

    // -----------------------------------------------------------------------
    // Path classification
    // -----------------------------------------------------------------------

    #[test]
    fn root_is_public() {
        assert_eq!(classify("/"), PathClass::Public);
    }

    #[test]
    fn allow_list_paths_are_public() {
        for path in ["/login", "/register", "/explore", "/auth/callback"] {
            assert_eq!(classify(path), PathClass::Public, "{path}");
        }
    }

    #[test]
    fn post_detail_is_public() {
        assert_eq!(classify("/posts/123"), PathClass::Public);
    }

    #[test]
    fn post_new_is_protected() {
        assert_eq!(classify("/posts/new"), PathClass::Protected);
    }

    #[test]
    fn post_edit_is_protected() {
        assert_eq!(classify("/posts/123/edit"), PathClass::Protected);
    }

    #[test]
    fn posts_index_is_protected() {
        assert_eq!(classify("/posts/"), PathClass::Protected);
        assert_eq!(classify("/posts"), PathClass::Protected);
    }

    #[test]
    fn user_profiles_are_public() {
        assert_eq!(classify("/users/alice"), PathClass::Public);
        assert_eq!(classify("/users/alice/posts"), PathClass::Public);
    }

    #[test]
    fn bare_users_prefix_is_protected() {
        assert_eq!(classify("/users/"), PathClass::Protected);
    }

    #[test]
    fn everything_else_is_protected() {
        for path in ["/dashboard", "/onboarding", "/settings", "/chat/5"] {
            assert_eq!(classify(path), PathClass::Protected, "{path}");
        }
    }

    // -----------------------------------------------------------------------
    // Public paths allow without a session
    // -----------------------------------------------------------------------

    #[test]
    fn public_path_without_session_allows() {
        assert_eq!(evaluate("/", None, None), GateDecision::Allow);
        assert_eq!(evaluate("/explore", None, None), GateDecision::Allow);
        assert_eq!(evaluate("/posts/42", None, None), GateDecision::Allow);
        assert_eq!(evaluate("/users/bob", None, None), GateDecision::Allow);
    }

    // -----------------------------------------------------------------------
    // Protected paths fail closed
    // -----------------------------------------------------------------------

    #[test]
    fn protected_path_without_session_redirects_to_login() {
        assert_eq!(
            evaluate("/dashboard", None, None),
            GateDecision::RedirectTo("/login".to_string())
        );
        assert_eq!(
            evaluate("/posts/new", None, None),
            GateDecision::RedirectTo("/login".to_string())
        );
    }

    #[test]
    fn protected_path_with_session_allows() {
        assert_eq!(
            evaluate("/dashboard", Some(&session()), Some(&onboarded())),
            GateDecision::Allow
        );
    }

    // -----------------------------------------------------------------------
    // Onboarding precedence
    // -----------------------------------------------------------------------

    #[test]
    fn incomplete_onboarding_redirects_from_protected_path() {
        assert_eq!(
            evaluate("/dashboard", Some(&session()), Some(&not_onboarded())),
            GateDecision::RedirectTo("/onboarding".to_string())
        );
    }

    #[test]
    fn incomplete_onboarding_redirects_regardless_of_classification() {
        // Even a public path redirects when the caller has resolved an
        // un-onboarded session.
        assert_eq!(
            evaluate("/explore", Some(&session()), Some(&not_onboarded())),
            GateDecision::RedirectTo("/onboarding".to_string())
        );
        assert_eq!(
            evaluate("/posts/7", Some(&session()), Some(&not_onboarded())),
            GateDecision::RedirectTo("/onboarding".to_string())
        );
    }

    #[test]
    fn onboarding_page_itself_is_reachable() {
        assert_eq!(
            evaluate("/onboarding", Some(&session()), Some(&not_onboarded())),
            GateDecision::Allow
        );
    }

    // -----------------------------------------------------------------------
    // Authenticated users on the login/register pages
    // -----------------------------------------------------------------------

    #[test]
    fn authenticated_login_redirects_to_dashboard() {
        assert_eq!(
            evaluate("/login", Some(&session()), Some(&onboarded())),
            GateDecision::RedirectTo("/dashboard".to_string())
        );
        assert_eq!(
            evaluate("/register", Some(&session()), Some(&onboarded())),
            GateDecision::RedirectTo("/dashboard".to_string())
        );
    }

    #[test]
    fn authenticated_login_redirects_to_onboarding_when_incomplete() {
        assert_eq!(
            evaluate("/login", Some(&session()), Some(&not_onboarded())),
            GateDecision::RedirectTo("/onboarding".to_string())
        );
    }

    // -----------------------------------------------------------------------
    // Missing profile is treated as onboarded
    // -----------------------------------------------------------------------

    #[test]
    fn session_without_profile_snapshot_allows_protected() {
        assert_eq!(
            evaluate("/dashboard", Some(&session()), None),
            GateDecision::Allow
        );
    }
}
