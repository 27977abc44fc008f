use serde::{Deserialize, Serialize};

/// One row of the leaderboard table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Rank as displayed on the leaderboard (1-based)
    pub rank: u32,

    pub score: f64,

    pub name: String,

    /// URL of the player's profile page
    #[serde(rename = "link")]
    pub profile_link: String,

    /// Country code, empty if the player has none set
    pub country: String,

    /// Number of world records held
    pub wr_count: u32,
}

/// Stars earned on a single level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
    #[serde(rename = "level")]
    pub level_name: String,

    pub stars: u32,

    pub stars_multiplayer: u32,
}

impl MedalRecord {
    pub fn new(level_name: impl Into<String>, stars: u32, stars_multiplayer: u32) -> Self {
        Self {
            level_name: level_name.into(),
            stars,
            stars_multiplayer,
        }
    }
}

/// A leaderboard row combined with the details from the player's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub player: PlayerRecord,

    /// Numeric suffix distinguishing players with the same name
    pub discriminator: u32,

    /// Biography text, if the profile has one
    pub bio: Option<String>,

    /// Medals in page order, `None` when the player hides the section
    pub medals: Option<Vec<MedalRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PlayerProfile> {
        vec![
            PlayerProfile {
                player: PlayerRecord {
                    rank: 1,
                    score: 100.5,
                    name: "Ada".to_string(),
                    profile_link: "https://x/p1".to_string(),
                    country: "US".to_string(),
                    wr_count: 0,
                },
                discriminator: 42,
                bio: None,
                medals: Some(vec![MedalRecord::new("Hard", 3, 0)]),
            },
            PlayerProfile {
                player: PlayerRecord {
                    rank: 2,
                    score: -3.25,
                    name: "Grace".to_string(),
                    profile_link: "https://x/p2".to_string(),
                    country: String::new(),
                    wr_count: 7,
                },
                discriminator: 7,
                bio: Some("hello ★".to_string()),
                medals: None,
            },
        ]
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(&sample()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rank": 1,
                "score": 100.5,
                "name": "Ada",
                "link": "https://x/p1",
                "country": "US",
                "wr_count": 0,
                "discriminator": 42,
                "bio": null,
                "medals": [{"level": "Hard", "stars": 3, "stars_multiplayer": 0}]
            })
        );
    }

    #[test]
    fn test_serialize_then_parse_is_identical() {
        let profiles = sample();
        let json = serde_json::to_string(&profiles).unwrap();
        let parsed: Vec<PlayerProfile> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profiles);
    }
}
