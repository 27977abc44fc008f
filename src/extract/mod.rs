pub mod medals;
pub mod profile;
pub mod roster;


pub use medals::{extract_medals, split_by_line_breaks};
pub use profile::{ProfileDetails, extract_profile};
pub use roster::extract_roster;
