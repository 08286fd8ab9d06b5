pub mod app;
pub mod columns;
pub mod detail;
pub mod pager;
pub mod pagination;
pub mod router;
pub mod theme;
pub mod tracing_setup;
pub mod ui_theme;
pub mod user_config;
pub mod virtual_grid;

use std::path::PathBuf;
use std::sync::Arc;

use app::types::ViewMode;
use app::{App, AppSetup};
use roster_client::RecordClient;
use roster_core::ThemeMode;
use roster_error::{ErrorPolicy, TracingPolicy};
use theme::ThemeStore;
use user_config::UserConfig;

/// Browse a paginated user collection in the terminal.
#[derive(Debug, Default, clap::Parser)]
#[command(name = "roster", version)]
pub struct Cli {
    /// API base URL, e.g. https://dummyjson.com
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to config.toml
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Start path, e.g. /records/3
    #[arg(long)]
    pub route: Option<String>,

    /// Initial presentation of the collection
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,
}

pub async fn try_main(cli: Cli) -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();

    let (config, config_error) = UserConfig::load(cli.config.as_deref());
    let config = config.apply_cli(&cli);
    let _guards = tracing_setup::init_tracing(&config.log_dir())?;
    if let Some(err) = config_error {
        TracingPolicy.emit(&err);
    }
    tracing::info!(view = ?config.view, route = config.start_route(), "starting roster");

    let theme = match ThemeStore::default_prefs_path() {
        Some(path) => ThemeStore::load(path),
        None => ThemeStore::in_memory(ThemeMode::default()),
    };
    let client = RecordClient::new(config.http_config()?)?;
    let http = client.config();
    tracing::info!(
        base_url = %http.base_url(),
        collection = http.collection(),
        timeout = ?http.timeout(),
        "record client ready"
    );

    let terminal = ratatui::init();
    let app = App::new(AppSetup {
        source: Arc::new(client),
        theme: Arc::new(theme),
        config,
    });
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
