use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::{ApiSecrets, Config, SupabaseCredentials};
use repository::{init_repository, StoreOptions};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets = util::load_env()?;
    let database_url = secrets.require("DATABASE_URL")?;
    let gemini_api_key = secrets.require("GEMINI_API_KEY")?;
    let supabase = match (
        secrets.get("SUPABASE_URL"),
        secrets.get("SUPABASE_ANON_KEY"),
    ) {
        (Some(url), Some(anon_key)) => {
            Some(SupabaseCredentials { url, anon_key })
        }
        _ => None,
    };

    let config_name =
        format!("Config{}.toml", secrets.get("CONFIG").unwrap_or_default());
    let config = Config::load_or_default(&config_name)?;
    info!(task = "load config", config = config_name);

    let repository = init_repository(
        &database_url,
        &StoreOptions {
            max_connections: config.store.max_connections,
            timeout: config.store.timeout(),
        },
    )
    .await
    .context("failed to initialize the event store")?;

    let port = config.server.port;
    let router = api::serve(
        repository,
        ApiSecrets {
            gemini_api_key,
            supabase,
        },
        config,
    )?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(&address).await?;
    info!(task = "listen", address = %address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(task = "install ctrl+c handler", error = e.to_string());
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
                error!(task = "install sigterm handler", error = e.to_string());
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(task = "shutdown");
}
