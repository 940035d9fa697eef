use std::sync::Arc;
use tokio::signal;
use tracing::info;

use rack_core::{LexicalSearch, OfflineDictionary, SearchOptions};
use rack_persistence::{KeyValueStore, SqliteStore, connection::connect_and_migrate};
use rack_server::{
    config::Config,
    create_routes,
    progress::ProgressService,
    sources::{DatamuseSource, KategloSource},
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Word Master server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Offline word lists back every search when live sources fail
    info!("Loading offline words from directory: {}", config.words_directory);
    let dictionary = match OfflineDictionary::from_directory(&config.words_directory) {
        Ok(dictionary) => {
            info!(
                "Loaded {} English and {} Malay offline words",
                dictionary.english.len(),
                dictionary.malay.len()
            );
            dictionary
        }
        Err(e) => {
            tracing::error!(
                "Failed to load words from directory '{}': {:#}",
                config.words_directory,
                e
            );
            tracing::error!(
                "Set WORDS_DIRECTORY to a directory containing english/ and malay/ .txt word files."
            );
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::new();
    let search = Arc::new(
        LexicalSearch::new(Arc::new(dictionary))
            .with_source(Arc::new(DatamuseSource::new(
                client.clone(),
                config.datamuse_url.clone(),
            )))
            .with_source(Arc::new(KategloSource::new(
                client,
                config.kateglo_url.clone(),
            )))
            .with_timeout(config.source_timeout),
    );
    info!(
        "Word sources: {:?} (timeout {:?})",
        search.source_names(),
        search.source_timeout()
    );

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db));
    let progress = Arc::new(ProgressService::new(store, &config.profile_id));

    let defaults = SearchOptions {
        min_length: config.min_word_length,
        max_length: config.max_word_length,
        ..SearchOptions::default()
    };
    let routes = create_routes(search, progress, defaults);

    info!("Server starting on {}:{}", config.host, config.port);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let (mut sigint, mut sigterm) = match (
                signal::unix::signal(signal::unix::SignalKind::interrupt()),
                signal::unix::signal(signal::unix::SignalKind::terminate()),
            ) {
                (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
                _ => {
                    tracing::error!("Failed to install signal handlers, falling back to Ctrl+C");
                    let _ = signal::ctrl_c().await;
                    return;
                }
            };

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
                return;
            }
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
