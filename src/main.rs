use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use wallify::{
    cli, config, error,
    types::{ContentType, GridBackground, GridConfiguration, GridDimensions},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the Wallify API server
    Serve,

    /// Open the Spotify login page in your browser
    Login,

    /// Show your top artists or tracks
    Top(TopOptions),

    /// Preview the items a grid configuration selects
    Grid(GridOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Content type to fetch (artists or tracks)
    #[clap(long = "type", default_value = "artists", value_parser = utils::parse_content_type)]
    pub content: ContentType,

    /// Number of items to show (at most 99)
    #[clap(long, default_value_t = 50)]
    pub limit: usize,

    /// Session key from the login redirect
    #[clap(long)]
    pub token_key: String,
}

#[derive(Parser, Debug, Clone)]
pub struct GridOptions {
    /// Grid columns
    #[clap(long, default_value_t = 3)]
    pub columns: u32,

    /// Grid rows
    #[clap(long, default_value_t = 3)]
    pub rows: u32,

    /// Content type to fetch (artists or tracks)
    #[clap(long = "type", default_value = "artists", value_parser = utils::parse_content_type)]
    pub content: ContentType,

    /// Session key from the login redirect
    #[clap(long)]
    pub token_key: String,

    /// Skip items without a usable image
    #[clap(long)]
    pub exclude_missing_images: bool,

    /// Also fetch the account's profile picture
    #[clap(long)]
    pub include_profile_picture: bool,

    /// Use a two-color gradient background
    #[clap(long)]
    pub gradient: bool,

    /// First background color
    #[clap(long, default_value = "#000000")]
    pub color1: String,

    /// Second background color
    #[clap(long, default_value = "#ffffff")]
    pub color2: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve().await,
        Command::Login => cli::login().await,
        Command::Top(opt) => cli::top(opt.content, opt.limit, opt.token_key).await,
        Command::Grid(opt) => {
            let grid_config = GridConfiguration {
                dimensions: GridDimensions {
                    columns: opt.columns,
                    rows: opt.rows,
                },
                include_profile_picture: opt.include_profile_picture,
                exclude_imageless_items: opt.exclude_missing_images,
                background: GridBackground {
                    gradient: opt.gradient,
                    color1: opt.color1,
                    color2: opt.color2,
                },
            };
            cli::grid(grid_config, opt.content, opt.token_key).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
