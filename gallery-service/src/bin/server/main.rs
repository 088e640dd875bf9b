use std::sync::Arc;

use auth::Authenticator;
use gallery_service::config::Config;
use gallery_service::domain::gallery::service::GalleryService;
use gallery_service::domain::gallery::validator::GalleryValidator;
use gallery_service::domain::oauth::service::OAuthService;
use gallery_service::domain::oauth::validator::OAuthValidator;
use gallery_service::domain::password_reset::service::PasswordResetService;
use gallery_service::domain::password_reset::validator::PasswordResetValidator;
use gallery_service::domain::user::service::UserService;
use gallery_service::domain::user::validator::UserValidator;
use gallery_service::inbound::http::router::create_router;
use gallery_service::inbound::http::router::AppState;
use gallery_service::outbound::dropbox::DropboxClient;
use gallery_service::outbound::dropbox::DropboxOAuth;
use gallery_service::outbound::email::SmtpMailer;
use gallery_service::outbound::images::FilesystemImageStore;
use gallery_service::outbound::repositories::PostgresGalleryRepository;
use gallery_service::outbound::repositories::PostgresOAuthRepository;
use gallery_service::outbound::repositories::PostgresPasswordResetRepository;
use gallery_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gallery-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        images_dir = %config.server.images_dir,
        base_url = %config.app.base_url,
        smtp_enabled = !config.smtp.host.is_empty(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Authenticator::new(config.security.hash_secret_key.as_bytes())?;

    let password_resets = Arc::new(PasswordResetService::new(
        Arc::new(PasswordResetValidator::new(
            PostgresPasswordResetRepository::new(pg_pool.clone()),
            authenticator.clone(),
        )),
        chrono::Duration::minutes(config.security.password_reset_ttl_minutes),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::new(UserValidator::new(
            PostgresUserRepository::new(pg_pool.clone()),
            authenticator.clone(),
        )),
        password_resets,
        authenticator,
    ));
    let gallery_service = Arc::new(GalleryService::new(Arc::new(GalleryValidator::new(
        PostgresGalleryRepository::new(pg_pool.clone()),
    ))));
    let oauth_service = Arc::new(OAuthService::new(Arc::new(OAuthValidator::new(
        PostgresOAuthRepository::new(pg_pool),
    ))));

    let state = AppState {
        user_service,
        gallery_service,
        oauth_service,
        image_store: Arc::new(FilesystemImageStore::new(&config.server.images_dir)),
        mailer: Arc::new(SmtpMailer::new(config.smtp.clone(), &config.app)),
        dropbox_oauth: Arc::new(DropboxOAuth::new(&config.dropbox)?),
        dropbox: Arc::new(DropboxClient::new(&config.dropbox)),
        remember_token_hours: config.security.remember_token_hours,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.images_dir);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}
