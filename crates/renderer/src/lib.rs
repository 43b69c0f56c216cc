//! Layout and drawing engine for the status bar.
//!
//! - [`layout`]: pure zone placement arithmetic
//! - [`frame`]: one full redraw through a [`Canvas`]
//! - [`driver`]: the refresh/draw/event main loop

pub mod canvas;
pub mod driver;
pub mod frame;
pub mod layout;

pub use canvas::{Backend, Canvas, FontMetrics, Rect};
pub use driver::{BarSetup, Driver, Phase};
pub use frame::draw_frame;
pub use layout::{layout_zone, BarLayout, DecorationLine, Geometry, Placement};
