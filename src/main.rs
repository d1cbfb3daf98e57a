use stagecraft::server;
use tracing::info;

fn main() {
    server::run();

    info!("Server stopped.")
}
