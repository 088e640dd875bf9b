use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::delete_me;
use super::handlers::account::forgot_password;
use super::handlers::account::login;
use super::handlers::account::logout;
use super::handlers::account::me;
use super::handlers::account::reset_password;
use super::handlers::account::signup;
use super::handlers::account::update_me;
use super::handlers::alerts::get_alert;
use super::handlers::galleries::create_gallery;
use super::handlers::galleries::delete_gallery;
use super::handlers::galleries::get_gallery;
use super::handlers::galleries::list_galleries;
use super::handlers::galleries::update_gallery;
use super::handlers::images::delete_image;
use super::handlers::images::upload_images;
use super::handlers::oauth::callback;
use super::handlers::oauth::connect;
use super::handlers::oauth::dropbox_files;
use super::middleware::require_user;
use super::middleware::resolve_user;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::domain::gallery::ports::ImageStore;
use crate::domain::mail::ports::Mailer;
use crate::domain::oauth::ports::OAuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::outbound::dropbox::DropboxClient;
use crate::outbound::dropbox::DropboxOAuth;

/// Upper bound for a multipart image upload request.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub gallery_service: Arc<dyn GalleryServicePort>,
    pub oauth_service: Arc<dyn OAuthServicePort>,
    pub image_store: Arc<dyn ImageStore>,
    pub mailer: Arc<dyn Mailer>,
    pub dropbox_oauth: Arc<DropboxOAuth>,
    pub dropbox: Arc<DropboxClient>,
    pub remember_token_hours: i64,
}

pub fn create_router(state: AppState, images_dir: impl AsRef<Path>) -> Router {
    let public_routes = Router::new()
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/me", get(me))
        .route("/api/alert", get(get_alert))
        .route("/api/password/forgot", post(forgot_password))
        .route("/api/password/reset", post(reset_password))
        .route("/api/galleries/:gallery_id", get(get_gallery));

    let protected_routes = Router::new()
        .route("/api/logout", post(logout))
        .route("/api/me", patch(update_me).delete(delete_me))
        .route(
            "/api/galleries",
            get(list_galleries).post(create_gallery),
        )
        .route(
            "/api/galleries/:gallery_id",
            patch(update_gallery).delete(delete_gallery),
        )
        .route(
            "/api/galleries/:gallery_id/images",
            post(upload_images).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/galleries/:gallery_id/images/:file_name",
            delete(delete_image),
        )
        .route("/api/oauth/dropbox/files", get(dropbox_files))
        .route("/api/oauth/:provider/connect", get(connect))
        .route("/api/oauth/:provider/callback", get(callback))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/images", ServeDir::new(images_dir.as_ref()))
        .layer(middleware::from_fn_with_state(state.clone(), resolve_user))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
