use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::AdminConfig;
use user_service::config::Config;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        jwt_algorithm = ?config.jwt.algorithm,
        password_scheme = ?config.password.scheme,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.auth_settings()?)?);

    match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(
                &config,
                Arc::new(PostgresUserRepository::new(pg_pool)),
                authenticator,
            )
            .await
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            serve(&config, Arc::new(InMemoryUserRepository::new()), authenticator).await
        }
    }
}

async fn serve<UR>(
    config: &Config,
    user_repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
) -> Result<(), anyhow::Error>
where
    UR: UserRepository,
{
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));

    if let Some(admin) = &config.admin {
        seed_admin(user_service.as_ref(), admin).await?;
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, auth_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn seed_admin(
    user_service: &dyn UserServicePort,
    admin: &AdminConfig,
) -> Result<(), anyhow::Error> {
    let username = Username::new(admin.username.clone())?;
    let user = user_service
        .ensure_admin(username, admin.password.clone())
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap admin ready");

    Ok(())
}
