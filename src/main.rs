use clap::Parser;
use pewpew_leaderboard::{ScraperConfig, WebDriverSession, scrape};
use std::fs::File;
use std::io::{BufWriter, Write};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let config = ScraperConfig::from_env()?;

    ::log::info!("Starting the scraper, output goes to {}", args.output.display());
    let start_time = std::time::Instant::now();

    let mut session = WebDriverSession::connect(&config.session).await?;
    let result = scrape::collect_players(&mut session, &config.leaderboard_url).await;

    // Release the browser before looking at the result
    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }
    let players = result?;

    let mut writer = BufWriter::new(File::create(&args.output)?);
    serde_json::to_writer(&mut writer, &players)?;
    writer.flush()?;

    ::log::info!(
        "Saved {} players to {} in {:.2} seconds",
        players.len(),
        args.output.display(),
        start_time.elapsed().as_secs_f64()
    );

    println!("{}", serde_json::to_string_pretty(&players)?);
    Ok(())
}
