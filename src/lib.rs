pub mod anchored;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod place;
pub mod recovery;
pub mod slice;

pub use anchored::{AnchoredRect, TaggedRect};
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use geom::{GridPoint, GridRect, MinMax, Rect};
pub use grid::{Pattern, PatternGrid};
