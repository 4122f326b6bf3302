use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use chromabot::{cli, config, error, utils};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP backend
    Serve(ServeOptions),

    /// Show the albums of your top tracks sorted by color
    Albums(AlbumsOptions),

    /// Show the albums of your top tracks grouped by color similarity
    Groups(GroupsOptions),

    /// Inspect the color cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Bind address, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TopTracksOptions {
    /// Spotify access token (falls back to SPOTIFY_TOKEN)
    #[clap(long)]
    pub token: Option<String>,

    /// Ranking window: 1m, 6m or a
    #[clap(long, default_value = "6m", value_parser = utils::parse_term)]
    pub time_revision: utils::Term,

    /// Number of top tracks to analyse (1-50)
    #[clap(long, default_value_t = 20)]
    pub quantity: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumsOptions {
    #[clap(flatten)]
    pub tracks: TopTracksOptions,

    /// Sort by hue, saturation or brightness
    #[clap(long)]
    pub sort: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GroupsOptions {
    #[clap(flatten)]
    pub tracks: TopTracksOptions,

    /// Minimum histogram similarity for two albums to share a group
    #[clap(long)]
    pub threshold: Option<f64>,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// List cached albums
    List,

    /// Remove the cached colors of one album
    Forget(ForgetOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ForgetOpts {
    /// Spotify album id
    pub album_id: String,
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
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Albums(opt) => {
            cli::albums(
                opt.tracks.token,
                opt.tracks.time_revision,
                opt.tracks.quantity,
                opt.sort,
            )
            .await
        }
        Command::Groups(opt) => {
            cli::groups(
                opt.tracks.token,
                opt.tracks.time_revision,
                opt.tracks.quantity,
                opt.threshold,
            )
            .await
        }
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::List => cli::list_cache().await,
            CacheSubcommand::Forget(f) => cli::forget_cache(f.album_id).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
