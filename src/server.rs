use crossbeam_channel::Receiver;
use signal_hook::{consts, iterator::Signals};
use stagecraft_model::error::ErrorStack;
use tracing::{error, info};

use std::{net::SocketAddr, process, sync::Arc, thread};
use tokio::runtime::Runtime;

use crate::{config::read_config, logger::init_logger, routes::routes, state::ApiState};

pub fn run() {
    let config = read_config().unwrap_or_else(|err| panic!("Invalid configuration.\n{err}"));
    if let Err(err) = init_logger(config.logger.clone()) {
        panic!("Failed to initialize logger.\n{err}");
    }

    info!("Starting Stagecraft with config:\n{:#?}", config);
    let runtime = Runtime::new()
        .map(Arc::new)
        .unwrap_or_else(|err| panic!("Failed to start tokio runtime.\n{err}"));
    let state = ApiState::new(config).unwrap_or_else(|err| {
        panic!(
            "Failed to start Stagecraft instance.\n{}",
            ErrorStack::new(&err).into_string()
        )
    });

    let (should_close_sender, should_close_receiver) = crossbeam_channel::bounded(1);
    let server_thread = thread::Builder::new()
        .name("HTTP server thread".to_string())
        .spawn(move || {
            if let Err(err) = run_api(Arc::new(state), runtime, should_close_receiver) {
                error!(%err, "HTTP server failed.");
                process::exit(1);
            }
        })
        .unwrap_or_else(|err| panic!("Failed to spawn HTTP server thread.\n{err}"));

    let mut signals = Signals::new([consts::SIGINT, consts::SIGTERM])
        .unwrap_or_else(|err| panic!("Failed to register signal handlers.\n{err}"));
    signals.forever().next();

    info!("Received exit signal. Terminating...");
    if should_close_sender.send(()).is_err() {
        error!("HTTP server already stopped.");
    }
    if server_thread.join().is_err() {
        error!("HTTP server thread panicked.");
    }
}

pub fn run_api(
    state: Arc<ApiState>,
    runtime: Arc<Runtime>,
    should_close: Receiver<()>,
) -> tokio::io::Result<()> {
    runtime.block_on(async {
        let port = state.config.api_port;
        let app = routes(state);
        let listener =
            tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
        info!("Listening on port {port}.");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::task::spawn_blocking(move || should_close.recv()).await;
            })
            .await
    })
}
