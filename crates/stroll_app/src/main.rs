use anyhow::Context as _;
use stroll_app::{App, AppConfig, Explorer};

/// Config file read from the working directory, if present.
const CONFIG_PATH: &str = "stroll.toml";

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(CONFIG_PATH)
        .with_context(|| format!("loading {CONFIG_PATH}"))?;

    App::new(Explorer::from_config(&config))
        .with_config(config)
        .run()
}
