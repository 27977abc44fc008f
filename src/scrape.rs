use crate::error::ScrapeError;
use crate::extract::{extract_profile, extract_roster};
use crate::page::Query;
use crate::records::{PlayerProfile, PlayerRecord};
use crate::session::PageSource;
use url::Url;

/// Id of the leaderboard table element
pub const SCORE_TABLE_ID: &str = "score_table";

/// Reads the leaderboard and every listed player's profile
///
/// Profiles are visited one at a time through the same source. Any failure
/// aborts the run; no partially collected data is returned.
pub async fn collect_players<S: PageSource>(
    source: &mut S,
    leaderboard_url: &str,
) -> Result<Vec<PlayerProfile>, ScrapeError> {
    let players = get_players(source, leaderboard_url).await?;

    let mut full_data = Vec::with_capacity(players.len());
    for player in players {
        full_data.push(get_full_data(source, player).await?);
    }

    ::log::info!("Finished collecting data on {} players", full_data.len());
    Ok(full_data)
}

/// Reads the leaderboard table, resolving profile links against its URL
pub async fn get_players<S: PageSource>(
    source: &mut S,
    leaderboard_url: &str,
) -> Result<Vec<PlayerRecord>, ScrapeError> {
    ::log::info!("Getting basic player info from {}", leaderboard_url);

    let base = Url::parse(leaderboard_url)?;
    let page = source.open(base.as_str()).await?;
    let table = page.find(&Query::id(SCORE_TABLE_ID))?;

    let mut players = extract_roster(table)?;
    for player in &mut players {
        player.profile_link = base.join(&player.profile_link)?.to_string();
    }
    Ok(players)
}

/// Visits the player's profile and attaches its details
pub async fn get_full_data<S: PageSource>(
    source: &mut S,
    player: PlayerRecord,
) -> Result<PlayerProfile, ScrapeError> {
    ::log::debug!("Getting full player data on {}", player.name);

    let page = source.open(&player.profile_link).await?;
    let details = extract_profile(&page)?;
    Ok(details.attach_to(player))
}
