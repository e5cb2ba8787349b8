use chirp_api::{AppState, build_router, config::Config};
use tracing::info;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let config = Config::load();

    let state = AppState::new(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health                  - Health check");
    info!("  POST   /auth/signup             - Create account");
    info!("  POST   /auth/login              - Login");
    info!("  GET    /users/me                - Get current user (auth)");
    info!("  GET    /profiles/:username      - Get profile by username");
    info!("  POST   /posts                   - Create post (auth, rate limited)");
    info!("  GET    /posts                   - List posts (newest first)");
    info!("  GET    /posts/:id               - Get specific post");
    info!("  GET    /users/:user_id/posts    - List posts by author");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("Shutdown signal received");
}
