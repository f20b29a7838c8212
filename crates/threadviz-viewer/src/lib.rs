pub mod cli;
pub mod error;
pub mod graph;
pub mod net;
pub mod render;
pub mod state;
pub mod ui;
pub mod util;

pub use error::{ThreadError, TrackError};
pub use state::{ThreadViewState, ViewStatus};
