use certificate_dispatch_processor::environment::Environment;
use certificate_dispatch_processor_worker::infra::shutdown::shutdown_signal;
use certificate_dispatch_processor_worker::routes::Routes;
use certificate_dispatch_processor_worker::state::AppState;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::log::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO");
    env::set_var("RUST_LOG", rust_log);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(Box::new(tracing_subscriber::fmt::layer().with_writer(non_blocking)))
        .init();

    info!("Starting...");

    let app_state = AppState::new();
    let routes = Routes::routes(app_state).await;

    let port = Environment::u16("PORT", 9095);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("Running http server...");

    axum::serve(listener, routes).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Stopped!");

    Ok(())
}
