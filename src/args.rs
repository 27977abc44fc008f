use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pewpew-leaderboard")]
#[command(about = "Collects pewpew.live leaderboard and player profile data into a JSON file")]
pub struct Args {
    /// File to write the collected players to
    pub output: PathBuf,
}
