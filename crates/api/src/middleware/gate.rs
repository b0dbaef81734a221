//! Page-navigation gate middleware.
//!
//! Wraps the page fallback router. The decision itself is the pure
//! [`skillswap_core::gate::evaluate`]; this layer does the IO around it:
//! classify first so public paths are served without touching the
//! database, resolve the session from cookies for protected paths
//! (rotating an expired access token via the refresh cookie when
//! possible), fetch the onboarding flag, and turn `RedirectTo` into a
//! `303 See Other`. Any refreshed cookies are attached to the outgoing
//! response whether the request is allowed or redirected.
//!
//! Failures resolve closed: a broken token, a failed profile lookup, or a
//! database error all evaluate as "no session", which redirects protected
//! paths to `/login`.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use skillswap_core::gate::{self, GateDecision, GateProfile, PathClass, Session};
use skillswap_db::models::session::CreateSession;
use skillswap_db::repositories::{ProfileRepo, SessionRepo};

use crate::auth::cookies::{
    access_cookie, read_cookie, refresh_cookie, COOKIE_ACCESS, COOKIE_REFRESH,
};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token, validate_token};
use crate::state::AppState;

/// Session resolved from request cookies, plus any `Set-Cookie` values a
/// refresh rotation produced. The cookies must reach the response even
/// when the gate redirects.
struct ResolvedSession {
    session: Option<Session>,
    refreshed_cookies: Vec<String>,
}

pub async fn enforce(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    // Public paths are decided on the path alone: no session resolution,
    // no database round-trip.
    if gate::classify(&path) == PathClass::Public {
        return next.run(req).await;
    }

    let resolved = resolve_session(&state, req.headers()).await;

    let profile = match &resolved.session {
        Some(session) => {
            match ProfileRepo::onboarding_completed(&state.pool, session.user_id).await {
                Ok(Some(onboarding_completed)) => Some(GateProfile {
                    onboarding_completed,
                }),
                // Missing profile or lookup failure: fail closed below.
                Ok(None) => None,
                Err(e) => {
                    tracing::error!(error = %e, user_id = session.user_id, "Gate profile lookup failed");
                    None
                }
            }
        }
        None => None,
    };

    // A session whose profile cannot be read is not trusted.
    let session = match (&resolved.session, &profile) {
        (Some(s), Some(_)) => Some(s.clone()),
        _ => None,
    };

    let decision = gate::evaluate(&path, session.as_ref(), profile.as_ref());

    let mut response = match decision {
        GateDecision::Allow => next.run(req).await,
        GateDecision::RedirectTo(target) => {
            tracing::debug!(path = %path, target = %target, "Gate redirect");
            Redirect::to(&target).into_response()
        }
    };

    for cookie in resolved.refreshed_cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Resolve the current session from request cookies.
///
/// A valid access cookie wins outright. Otherwise, a valid refresh cookie
/// rotates the session (revoke old row, create new row, re-issue both
/// cookies). Every failure path yields `session: None`.
async fn resolve_session(state: &AppState, headers: &axum::http::HeaderMap) -> ResolvedSession {
    if let Some(token) = read_cookie(headers, COOKIE_ACCESS) {
        if let Ok(claims) = validate_token(&token, &state.config.jwt) {
            return ResolvedSession {
                session: Some(Session {
                    user_id: claims.sub,
                    email: claims.email,
                }),
                refreshed_cookies: Vec::new(),
            };
        }
    }

    let Some(refresh_token) = read_cookie(headers, COOKIE_REFRESH) else {
        return ResolvedSession {
            session: None,
            refreshed_cookies: Vec::new(),
        };
    };

    match rotate_session(state, &refresh_token).await {
        Ok(Some(resolved)) => resolved,
        Ok(None) => ResolvedSession {
            session: None,
            refreshed_cookies: Vec::new(),
        },
        Err(e) => {
            tracing::error!(error = %e, "Gate session refresh failed");
            ResolvedSession {
                session: None,
                refreshed_cookies: Vec::new(),
            }
        }
    }
}

/// Exchange a refresh cookie for a fresh token pair.
async fn rotate_session(
    state: &AppState,
    refresh_token: &str,
) -> Result<Option<ResolvedSession>, sqlx::Error> {
    let hash = hash_refresh_token(refresh_token);
    let Some(session_row) = SessionRepo::find_by_refresh_token_hash(&state.pool, &hash).await?
    else {
        return Ok(None);
    };

    let Some(profile) = ProfileRepo::find_by_id(&state.pool, session_row.user_id).await? else {
        return Ok(None);
    };

    // Rotation: the presented token is single-use.
    SessionRepo::revoke(&state.pool, session_row.id).await?;

    let (new_refresh, new_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: profile.id,
            refresh_token_hash: new_hash,
            expires_at,
        },
    )
    .await?;

    let access_token = match generate_access_token(profile.id, &profile.email, &state.config.jwt) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Gate token generation failed");
            return Ok(None);
        }
    };

    tracing::debug!(user_id = profile.id, "Gate rotated session from refresh cookie");

    let access_max_age = state.config.jwt.access_token_expiry_mins * 60;
    let refresh_max_age = state.config.jwt.refresh_token_expiry_days * 86_400;

    Ok(Some(ResolvedSession {
        session: Some(Session {
            user_id: profile.id,
            email: profile.email,
        }),
        refreshed_cookies: vec![
            access_cookie(&access_token, access_max_age),
            refresh_cookie(&new_refresh, refresh_max_age),
        ],
    }))
}
