/// Campus Finance Server - school finance API
use campus_core::{CreateUser, Role};
use campus_finance_server::{config::FinanceConfig, create_router, services::AuthService, state::AppState};
use chrono::Duration;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "campus-finance-server")]
#[command(about = "School finance management API", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Create a new staff user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Full name shown in transaction history
        #[arg(short, long)]
        full_name: String,
        /// Admin, Teaching Staff or Non-Teaching Staff
        #[arg(short, long, default_value = "Admin")]
        role: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_finance_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = FinanceConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::Migrate => {
            campus_storage::connect(&config.storage.database_url).await?;
            tracing::info!("Migrations applied");
        }
        Commands::AddUser {
            username,
            password,
            full_name,
            role,
        } => {
            add_user(config, &username, &password, &full_name, &role).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

fn auth_service(config: &FinanceConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        Duration::minutes(config.auth.token_ttl_minutes),
        config.auth.bcrypt_cost,
    )
}

async fn serve(config: FinanceConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Campus Finance Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = campus_storage::connect(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));
    tracing::info!(
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Auth service initialized"
    );

    let app = create_router(AppState::new(pool, auth_service));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: FinanceConfig,
    username: &str,
    password: &str,
    full_name: &str,
    role: &str,
) -> anyhow::Result<()> {
    let role: Role = role.parse()?;
    let pool = campus_storage::connect(&config.storage.database_url).await?;

    let password_hash = auth_service(&config).hash_password(password)?;
    let user = campus_storage::users::create(
        &pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
            full_name: full_name.to_string(),
            role,
        },
    )
    .await?;

    println!("Created user {} ({}) with id {}", user.username, user.role, user.user_id);

    Ok(())
}

async fn list_users(config: FinanceConfig) -> anyhow::Result<()> {
    let pool = campus_storage::connect(&config.storage.database_url).await?;

    let users = campus_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        let status = if user.is_active { "active" } else { "inactive" };
        println!(
            "  {} - {} ({}, {}, {})",
            user.user_id, user.username, user.full_name, user.role, status
        );
    }

    Ok(())
}
