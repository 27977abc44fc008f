use crate::page::{PageElement, Query};
use crate::records::MedalRecord;

/// Label of the section header the medal entries follow
pub const MEDALS_LABEL: &str = "Medals";

/// Reads the medal entries that follow the "Medals" header on a profile page
///
/// Returns `None` when the page has no such header, which is how a player
/// hiding their medals shows up. The entries are separated by `<br>` tags,
/// each one being a level name, a run of single-player star glyphs and a run
/// of multiplayer star glyphs. The first segment with fewer than two
/// elements marks the end of the medals area (the "Scores" section comes
/// next) and is not included.
pub fn extract_medals(page: &PageElement) -> Option<Vec<MedalRecord>> {
    ::log::debug!("Getting medals for a player");

    let Some(siblings) = page.following_siblings(&Query::own_text_contains(MEDALS_LABEL)) else {
        ::log::warn!("No medals header found, player hides their medals");
        return None;
    };

    let mut medals = Vec::new();
    for segment in split_by_line_breaks(siblings) {
        let [level, stars, rest @ ..] = segment else {
            ::log::trace!("Reached the end of the medals area at {:?}", segment);
            break;
        };

        // Only two elements: no multiplayer stars shown for this level
        let stars_multiplayer = rest.first().map_or(0, |e| star_count(&e.text));

        medals.push(MedalRecord::new(
            level.text.clone(),
            star_count(&stars.text),
            stars_multiplayer,
        ));
    }

    Some(medals)
}

/// Splits elements into the maximal runs between line-break markers
///
/// The markers themselves are dropped, and so are the empty runs produced by
/// leading, trailing or consecutive markers.
pub fn split_by_line_breaks(elements: &[PageElement]) -> Vec<&[PageElement]> {
    ::log::trace!("Splitting {} elements by `br` tags", elements.len());

    elements
        .split(PageElement::is_line_break)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// One glyph per earned star
pub fn star_count(text: &str) -> u32 {
    text.chars().count() as u32
}
