use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error,
    management::ContentManager,
    success,
    types::{ContentTableRow, ContentType, GridConfiguration},
    warning,
};

pub async fn grid(grid_config: GridConfiguration, content: ContentType, token_key: String) {
    let mut manager = ContentManager::new(config::wallify_server_url(), token_key);

    if grid_config.include_profile_picture {
        match manager.profile_picture().await {
            Ok(Some(url)) => success!("Profile picture: {}", url),
            Ok(None) => warning!("This account has no profile picture."),
            Err(e) => warning!("Could not fetch profile picture. Err: {}", e),
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Assembling {} grid...", content));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = manager.grid_content(&grid_config, content).await;
    pb.finish_and_clear();

    match result {
        Ok(Some(selection)) => {
            let requested = grid_config.total_items();
            if selection.available < requested {
                warning!(
                    "Only {} {} available. Please reduce the grid size.",
                    selection.available,
                    content
                );
            }

            let table_rows: Vec<ContentTableRow> = selection
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| ContentTableRow {
                    position: i + 1,
                    name: item.name().to_string(),
                    image: item.image_url().unwrap_or("-").to_string(),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);

            success!(
                "Selected {} items for a {}x{} grid",
                selection.items.len(),
                grid_config.dimensions.columns,
                grid_config.dimensions.rows
            );
        }
        // a one-shot command is never superseded inside the debounce window
        Ok(None) => {}
        Err(e) => error!("Cannot build grid. Err: {}", e),
    }
}
