use clap::Parser;
use lingoflash::Provider;
use lingoflash::core::config::{self, CliOverrides, LingoConfig};
use lingoflash::core::topic::{Difficulty, Topic};
use lingoflash::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "lingoflash", about = "AI-generated vocabulary flashcards in your terminal")]
struct Args {
    /// Deck generator to use (overrides config file)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name (overrides config file)
    #[arg(short, long)]
    model: Option<String>,

    /// Topic preselected on the start screen
    #[arg(short, long, value_enum)]
    topic: Option<Topic>,

    /// Level preselected on the start screen
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Cards per session
    #[arg(short = 'n', long)]
    deck_size: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to lingoflash.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("lingoflash.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            log::warn!("Failed to load config: {}", e);
            LingoConfig::default()
        }
    };

    let cli = CliOverrides {
        provider: args.provider,
        model: args.model,
        topic: args.topic,
        difficulty: args.difficulty,
        deck_size: args.deck_size,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "LingoFlash starting up with provider: {}, model: {}, deck size: {}",
        resolved.provider.label(),
        resolved.model_name,
        resolved.deck_size
    );

    let generator = match tui::build_provider(&resolved) {
        Ok(generator) => generator,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tui::run(resolved, generator)
}
