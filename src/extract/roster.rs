use crate::error::ScrapeError;
use crate::page::{PageElement, Query};
use crate::records::PlayerRecord;
use std::str::FromStr;

/// Cells per leaderboard row: rank, score, name, country, world records
pub const CELLS_PER_ROW: usize = 5;

/// Parses the leaderboard table into player records, in row order
///
/// The first row holds the column headers and is skipped. Any row with the
/// wrong number of cells or an unparseable number fails the whole call.
pub fn extract_roster(table: &PageElement) -> Result<Vec<PlayerRecord>, ScrapeError> {
    ::log::debug!("Starting to go through leaderboard...");

    let rows = table.find_all(&Query::tag("tr"));
    let mut players = Vec::with_capacity(rows.len().saturating_sub(1));

    for (row_index, row) in rows.iter().enumerate().skip(1) {
        let player = parse_row(row_index, row)?;
        ::log::trace!("Got player: {:?}", player);
        players.push(player);
    }

    ::log::info!("Found {} players on the leaderboard", players.len());
    Ok(players)
}

fn parse_row(row: usize, element: &PageElement) -> Result<PlayerRecord, ScrapeError> {
    let cells = element.find_all(&Query::tag("td"));
    let [rank, score, name, country, wr_count] = cells.as_slice() else {
        return Err(ScrapeError::MalformedRow {
            row,
            expected: CELLS_PER_ROW,
            actual: cells.len(),
        });
    };

    let rank = parse_rank(row, &rank.text)?;
    let score = parse_score(row, &score.text)?;

    if name.text.is_empty() {
        return Err(ScrapeError::not_found(format_args!(
            "player name in row {row}"
        )));
    }
    let profile_link = name
        .find(&Query::tag("a"))?
        .attr("href")
        .ok_or_else(|| ScrapeError::not_found(format_args!("profile link in row {row}")))?
        .to_string();

    let wr_count = if wr_count.text.is_empty() {
        0
    } else {
        parse_number(row, "world record count", &wr_count.text)?
    };

    Ok(PlayerRecord {
        rank,
        score,
        name: name.text.clone(),
        profile_link,
        country: country.text.clone(),
        wr_count,
    })
}

/// Ranks are displayed with a suffix glyph after the digits (`1.`, `2nd`)
fn parse_rank(row: usize, text: &str) -> Result<u32, ScrapeError> {
    let digits = text.trim_end_matches(|c: char| !c.is_ascii_digit());
    match digits.parse::<u32>() {
        Ok(rank) if rank > 0 => Ok(rank),
        _ => Err(invalid_number(row, "rank", text)),
    }
}

/// Scores must be finite: JSON has no representation for NaN or infinity
fn parse_score(row: usize, text: &str) -> Result<f64, ScrapeError> {
    match parse_number::<f64>(row, "score", text)? {
        score if score.is_finite() => Ok(score),
        _ => Err(invalid_number(row, "score", text)),
    }
}

fn parse_number<T: FromStr>(row: usize, field: &'static str, text: &str) -> Result<T, ScrapeError> {
    text.parse().map_err(|_| invalid_number(row, field, text))
}

fn invalid_number(row: usize, field: &'static str, text: &str) -> ScrapeError {
    ScrapeError::InvalidNumber {
        row,
        field,
        text: text.to_string(),
    }
}
