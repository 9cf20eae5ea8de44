use std::{env, sync::Arc};

use template_web::{
    config::{Config, DEFAULT_CONFIG},
    data::DataStore,
    pages::web_server,
};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // an explicitly named config has to exist
    let config = match env::args().nth(1) {
        Some(config_path) => Config::new(config_path)?,
        None => Config::new_or_default(DEFAULT_CONFIG)?,
    };
    info!(data = config.data, bind = %config.bind, "loaded configuration");

    // load before serving, a failure is shown on the page instead
    let store = Arc::new(DataStore::new(config.data.as_str()));
    if let Err(err) = store.load_cached().await {
        error!("could not load problem data: {err}");
    }

    web_server(config, store).await
}
