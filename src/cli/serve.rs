use crate::{config::Settings, server};

/// Runs the HTTP backend until the process is stopped. `addr` overrides
/// `SERVER_ADDRESS`.
pub async fn serve(addr: Option<String>) {
    let mut settings = Settings::from_env();
    if let Some(addr) = addr {
        settings.server_addr = addr;
    }

    server::start_api_server(settings).await;
}
