use dealflow::logging::init_tracing;
use dealflow::metrics::{init_metrics, metrics_app};
use dealflow::router::init_router;
use dealflow::state::init_app_state;
use dealflow_config::ServerConfig;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = init_app_state().await?;
    let mut app = init_router(state);

    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    axum::serve(listener, app).await?;

    Ok(())
}
