pub mod badge;
pub mod color;
pub mod config;
pub mod draw;
pub mod font;
pub mod redraw;

// Re-export for hosts embedding the badge
pub use crate::badge::PlaceholderBadgeView;
pub use crate::color::Color;
pub use crate::draw::{Canvas, Rect};
pub use crate::font::Font;
pub use crate::redraw::{RedrawFlag, RedrawScheduler};
