use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    api::health_checks::ok, app::App, config::Config, database::setup_database,
    environment::Environment, router::router,
};

pub async fn handle_serve_command(environment: Environment, config: Config) {
    let port = config.server.port;

    // A temporary liveness-only server answers probes while migrations run.
    let liveness_server_task = tokio::spawn(start_liveness_server(port));

    let (db, migration_receiver) = setup_database(&config.database).await;

    match migration_receiver.await {
        Ok(Ok(())) => {
            info!("✅ Database is ready!");
        }
        Ok(Err(e)) => {
            error!("❌ Database setup failed: {}", e);
            liveness_server_task.abort();
            return;
        }
        Err(_) => {
            error!("❌ Database setup channel closed unexpectedly");
            liveness_server_task.abort();
            return;
        }
    }

    let app = App {
        config,
        environment,
        db,
    };

    liveness_server_task.abort();
    let _ = liveness_server_task.await;

    let router = router(app);
    start_server(router, port).await;
}

// Minimal server that only serves liveness endpoint during migrations
async fn start_liveness_server(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.unwrap();

    let migration_router = Router::new().route("/liveness", get(ok));
    axum::serve(listener, migration_router).await.unwrap();
}

async fn start_server(router: Router, port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.unwrap();

    info!("🌐 Server starting on http://{}", addr);
    axum::serve(listener, router).await.unwrap();
}
