pub mod config;
pub mod ids;
pub mod prefs;

pub use config::ViewerConfig;
pub use ids::{extract_post_id, PostId};
pub use prefs::{Preferences, TrackedKeyword};
