use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Name of the cookie carrying the raw remember token.
pub const TOKEN_COOKIE: &str = "token";

const LOGIN_PATH: &str = "/login";

/// Paths served without identity resolution.
const STATIC_PREFIXES: &[&str] = &["/images/", "/assets/"];

/// Identity of the requesting user, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Attach the identity behind the `token` cookie, if any.
///
/// A missing or stale cookie leaves the request anonymous.
pub async fn resolve_user(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    if is_static(req.uri().path()) {
        return next.run(req).await;
    }

    if let Some(user) = lookup(&state, &jar).await {
        req.extensions_mut().insert(CurrentUser(user));
    }

    next.run(req).await
}

/// Only let identified requests through; everyone else goes to the login page.
pub async fn require_user(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<CurrentUser>().is_none() {
        match lookup(&state, &jar).await {
            Some(user) => {
                req.extensions_mut().insert(CurrentUser(user));
            }
            None => return redirect_to_login(),
        }
    }

    next.run(req).await
}

async fn lookup(state: &AppState, jar: &CookieJar) -> Option<User> {
    let token = jar.get(TOKEN_COOKIE)?.value();
    if token.is_empty() {
        return None;
    }

    match state.user_service.find_by_remember_token(token).await {
        Ok(user) => Some(user),
        Err(e) if e.is_not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve remember token");
            None
        }
    }
}

fn is_static(path: &str) -> bool {
    STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn redirect_to_login() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LOGIN_PATH)]).into_response()
}

/// Cookie holding a freshly issued remember token.
pub fn token_cookie(token: String, max_age_hours: i64) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::hours(max_age_hours))
        .build()
}

/// Removal cookie for `name` on path `/`.
pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_paths_skip_resolution() {
        assert!(is_static("/images/galleries/abc/cat.png"));
        assert!(is_static("/assets/app.css"));
        assert!(!is_static("/api/galleries"));
        assert!(!is_static("/imagesx"));
    }

    #[test]
    fn test_token_cookie_attributes() {
        let cookie = token_cookie("abc".to_string(), 120);

        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(120)));
    }

    #[test]
    fn test_login_redirect() {
        let response = redirect_to_login();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }
}
