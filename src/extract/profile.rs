use crate::error::ScrapeError;
use crate::extract::medals::extract_medals;
use crate::page::{PageElement, Query};
use crate::records::{MedalRecord, PlayerProfile, PlayerRecord};
use regex::Regex;
use std::sync::LazyLock;

/// Class of the element holding the `#<digits>` discriminator
pub const DISCRIMINATOR_CLASS: &str = "discriminator";

/// Position of the bio block below the document root: `/html/body/div[1]/div[2]`
pub const BIO_PATH: &[(&str, usize)] = &[("body", 0), ("div", 0), ("div", 1)];

static DISCRIMINATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(\d+)$").expect("discriminator pattern should be valid"));

/// Details read from a player's profile page
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDetails {
    pub discriminator: u32,
    pub bio: Option<String>,
    pub medals: Option<Vec<MedalRecord>>,
}

impl ProfileDetails {
    /// Combines these details with the leaderboard row they belong to
    pub fn attach_to(self, player: PlayerRecord) -> PlayerProfile {
        PlayerProfile {
            player,
            discriminator: self.discriminator,
            bio: self.bio,
            medals: self.medals,
        }
    }
}

/// Extracts discriminator, bio and medals from a profile page root
pub fn extract_profile(page: &PageElement) -> Result<ProfileDetails, ScrapeError> {
    let discriminator = parse_discriminator(&page.find(&Query::class(DISCRIMINATOR_CLASS))?.text)?;

    let bio = page.at_path(BIO_PATH).map(|e| e.text.clone());
    if bio.is_none() {
        ::log::debug!("Profile has no bio");
    }

    Ok(ProfileDetails {
        discriminator,
        bio,
        medals: extract_medals(page),
    })
}

/// Parses `#0042` into 42
pub fn parse_discriminator(text: &str) -> Result<u32, ScrapeError> {
    DISCRIMINATOR_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| ScrapeError::InvalidDiscriminator {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PROFILE: &str = r#"<html><body>
        <div>
            <div><span>Ada</span><span class="discriminator">#0042</span></div>
            <div>Likes   hard levels.</div>
            <div>
                <h3>Medals</h3>
                <span>Hard</span><span>★★★</span><span>★</span><br>
                <h3>Scores</h3>
            </div>
        </div>
    </body></html>"#;

    #[test]
    fn test_parse_discriminator() {
        assert_eq!(parse_discriminator("#42").unwrap(), 42);
        assert_eq!(parse_discriminator("#0042").unwrap(), 42);
        assert!(matches!(
            parse_discriminator("42"),
            Err(ScrapeError::InvalidDiscriminator { .. })
        ));
        assert!(parse_discriminator("#").is_err());
        assert!(parse_discriminator("#12a").is_err());
    }

    #[test]
    fn test_extract_full_profile() {
        let page = PageElement::parse_document(FULL_PROFILE);
        let details = extract_profile(&page).unwrap();

        assert_eq!(
            details,
            ProfileDetails {
                discriminator: 42,
                bio: Some("Likes hard levels.".to_string()),
                medals: Some(vec![MedalRecord::new("Hard", 3, 1)]),
            }
        );
    }

    #[test]
    fn test_multi_line_bio() {
        let page = PageElement::parse_document(
            r#"<html><body><div>
                <div><span class="discriminator">#3</span></div>
                <div>First line<br>Second   line<p>Para</p></div>
            </div></body></html>"#,
        );
        let details = extract_profile(&page).unwrap();
        assert_eq!(
            details.bio.as_deref(),
            Some("First line\nSecond line\nPara")
        );
    }

    #[test]
    fn test_missing_discriminator() {
        let page = PageElement::parse_document("<html><body><div></div></body></html>");
        assert!(matches!(
            extract_profile(&page),
            Err(ScrapeError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_hidden_sections() {
        let page = PageElement::parse_document(
            r#"<html><body><div><span class="discriminator">#7</span></div></body></html>"#,
        );
        let details = extract_profile(&page).unwrap();
        assert_eq!(details.discriminator, 7);
        assert_eq!(details.bio, None);
        assert_eq!(details.medals, None);
    }
}
