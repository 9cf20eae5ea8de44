use std::path::PathBuf;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use template_web::crawl::{update, Generated};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Generates the templates of every known problem into the data file.
#[derive(Parser, Debug)]
#[command(name = "crawl", version)]
struct Args {
    /// data file to update
    #[arg(long, default_value = "data.json")]
    file: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut generated = match Generated::load(&args.file) {
        Ok(generated) => generated,
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::new();
    let mut rng = StdRng::from_entropy();
    let result = update(&client, &mut generated, &mut rng).await;

    // whatever was generated so far is kept
    generated.save(&args.file)?;
    info!(
        problems = generated.records().len(),
        file = %args.file.display(),
        "saved problem data"
    );
    result
}
