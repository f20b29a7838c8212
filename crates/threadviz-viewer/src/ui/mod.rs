pub mod interaction;
pub mod panel;
pub mod tooltips;

pub use interaction::{InteractionController, PointerState, ZoomCommand};
pub use panel::PostDetails;
pub use tooltips::{TooltipContent, TooltipOverlay};
