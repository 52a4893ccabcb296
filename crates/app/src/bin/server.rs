// Keystone API - HTTP Server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    StatusCode,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, sensitive_headers::SetSensitiveHeadersLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use keystone_app::password::Argon2Passwords;
use keystone_app::store::{InMemoryUserStore, User};
use keystone_common::{Config, LogFormat};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(&config);

    info!("Starting Keystone API server");
    info!(config = ?config, "Configuration loaded successfully");

    let passwords = Argon2Passwords::default();
    let users = InMemoryUserStore::new();
    seed_user(&config, &passwords, &users)?;

    let app = keystone_app::create_app(&config, Arc::new(users), Arc::new(passwords)).map_err(|e| {
        error!("Failed to create application: {}", e);
        e
    })?;

    let app = app.layer(
        ServiceBuilder::new()
            .layer(SetSensitiveHeadersLayer::new([AUTHORIZATION, COOKIE]))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                REQUEST_TIMEOUT,
            ))
            .into_inner(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &Config) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&config.rust_log));

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Register the bootstrap account from `SEED_USERNAME` / `SEED_PASSWORD`
fn seed_user(
    config: &Config,
    passwords: &Argon2Passwords,
    users: &InMemoryUserStore,
) -> anyhow::Result<()> {
    match (&config.seed_username, &config.seed_password) {
        (Some(username), Some(password)) => {
            let encrypted_password = passwords
                .hash_password(password)
                .map_err(|e| anyhow::anyhow!("Failed to hash seed password: {}", e))?;
            users.insert(User {
                username: username.clone(),
                encrypted_password,
            });
            info!(username = %username, "Seeded user");
        }
        (None, None) => {
            warn!("No seed user configured; every login will be rejected");
        }
        _ => {
            return Err(anyhow::anyhow!(
                "SEED_USERNAME and SEED_PASSWORD must be set together"
            ));
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
