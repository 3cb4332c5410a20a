use crate::{config::Settings, error, info, server, warning};

pub async fn serve(settings: Settings, open: bool) {
    let landing_page = format!("http://{}/", settings.server_addr);
    info!("Starting Vibester on {}", landing_page);

    if open {
        // the listener is bound right after; the browser's first request
        // simply waits on it
        if webbrowser::open(&landing_page).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                landing_page
            )
        }
    }

    if let Err(e) = server::start_api_server(settings).await {
        error!("Server stopped. Err: {}", e);
    }
}
