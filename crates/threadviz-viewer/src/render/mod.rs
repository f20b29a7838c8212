pub mod camera;
pub mod style;
pub mod surface;
pub mod svg;

pub use camera::{Camera, ViewTransform};
pub use style::{ScoreClass, Theme};
pub use surface::{Frame, RenderSurface, MARGIN};
