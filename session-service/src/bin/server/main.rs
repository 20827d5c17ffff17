use std::sync::Arc;

use auth::Authenticator;
use auth::SigningSecret;
use session_service::config::Config;
use session_service::domain::session::guard::AccessGuard;
use session_service::domain::session::notifications::NotificationDispatcher;
use session_service::domain::session::service::SessionService;
use session_service::inbound::http::router::create_router;
use session_service::outbound::notifications::SmtpLoginNotifier;
use session_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        smtp_host = %config.smtp.host,
        notification_queue_capacity = config.notifications.queue_capacity,
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

    let secret = if config.jwt.secret.is_empty() {
        tracing::warn!(
            "No jwt.secret configured, generated a random one; tokens will not survive a restart"
        );
        SigningSecret::generate()
    } else {
        SigningSecret::from_config(&config.jwt.secret)?
    };

    let authenticator = Arc::new(Authenticator::new(
        &secret,
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));

    let shutdown = CancellationToken::new();
    let notifier = Arc::new(SmtpLoginNotifier::new(&config.smtp)?);
    let (notifications, notification_worker) = NotificationDispatcher::spawn(
        notifier,
        config.notifications.queue_capacity,
        shutdown.clone(),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let session_service = Arc::new(SessionService::new(
        user_repository,
        Arc::clone(&authenticator),
        notifications,
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service, AccessGuard::new(authenticator));

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.cancel();
    if let Err(e) = notification_worker.await {
        tracing::error!(error = %e, "Login notice worker failed");
    }

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
