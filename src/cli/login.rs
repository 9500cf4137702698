use crate::{config, info, warning};

pub async fn login() {
    let login_url = format!("{}/login", config::wallify_server_url());

    info!("Opening the Spotify login page...");
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        );
    }

    info!("After approving access the browser lands on the front-end with a token_key parameter.");
    info!("Pass that value to `wallify top` and `wallify grid` via --token-key.");
}
