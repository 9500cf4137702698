use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error,
    management::ContentManager,
    types::{ContentTableRow, ContentType, MAX_TOP_ITEMS},
    warning,
};

pub async fn top(content: ContentType, limit: usize, token_key: String) {
    if limit > MAX_TOP_ITEMS {
        error!(
            "At most {} top {} can be assembled per session.",
            MAX_TOP_ITEMS, content
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching top {}...", content));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut manager = ContentManager::new(config::wallify_server_url(), token_key);
    let result = manager.get_superset(content).await;
    pb.finish_and_clear();

    match result {
        Ok(items) => {
            if items.is_empty() {
                warning!(
                    "No {} data available. Try again after listening to more music on Spotify.",
                    content
                );
                return;
            }

            let table_rows: Vec<ContentTableRow> = items
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, item)| ContentTableRow {
                    position: i + 1,
                    name: item.name().to_string(),
                    image: item.image_url().unwrap_or("-").to_string(),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
        }
        Err(e) => error!("Cannot fetch top {}. Err: {}", content, e),
    }
}
