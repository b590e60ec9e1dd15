use core_config::tracing::{init_tracing, install_color_eyre};
use shadow_id::{bridge, App, Config};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment, &config.log_level);

    let app = App::new(config);
    app.startup();

    bridge::run(&app, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    info!("Shell disconnected, shutting down");
    Ok(())
}
