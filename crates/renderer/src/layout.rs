//! Pure placement arithmetic for the three bar zones.
//!
//! Nothing here measures or draws; callers pass measured widths in and get
//! coordinates back. Overlapping zones are not detected.

use crate::canvas::{FontMetrics, Rect};
use obsidian_config::{BarConfig, Position};
use obsidian_core::Zone;

/// Bar-wide layout settings taken from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub height: i32,
    pub position: Position,
    pub padding: i32,
    pub spacing: i32,
    /// Decoration thickness; `None` when decoration is disabled.
    pub decoration: Option<i32>,
}

impl BarLayout {
    /// Build a [`BarLayout`] from the loaded configuration.
    pub fn from_config(config: &BarConfig) -> Self {
        Self {
            height: i32::from(config.global.height),
            position: config.global.position,
            padding: i32::from(config.theme.padding),
            spacing: i32::from(config.theme.spacing),
            decoration: config
                .decoration
                .enabled
                .then(|| i32::from(config.decoration.thickness)),
        }
    }

    /// Combine with the per-frame values supplied by the backend.
    pub fn geometry(&self, bar_width: i32, metrics: FontMetrics) -> Geometry {
        let decoration = self.decoration.map(|thickness| DecorationLine {
            // Sit on the edge facing away from the screen border.
            y: match self.position {
                Position::Top => self.height - thickness,
                Position::Bottom => 0,
            },
            thickness,
        });

        Geometry {
            bar_width,
            bar_height: self.height,
            ascent: metrics.ascent,
            descent: metrics.descent,
            padding: self.padding,
            spacing: self.spacing,
            decoration,
        }
    }
}

/// Vertical band occupied by module decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationLine {
    pub y: i32,
    pub thickness: i32,
}

/// Everything layout needs to know about the bar for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub bar_width: i32,
    pub bar_height: i32,
    pub ascent: i32,
    pub descent: i32,
    pub padding: i32,
    pub spacing: i32,
    pub decoration: Option<DecorationLine>,
}

impl Geometry {
    /// Text baseline that centres the glyph box vertically in the bar.
    pub fn baseline(&self) -> i32 {
        (self.bar_height + self.ascent - self.descent) / 2
    }
}

/// Where one module's text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub decoration: Option<Rect>,
}

/// Place the modules of `zone`, given their widths in registry order.
///
/// The result has one entry per width, in the same order.
/// - Left: packed from `padding` rightwards.
/// - Right: packed from `bar_width - padding` leftwards; the first module is
///   rightmost.
/// - Center: the whole group (including trailing spacing) is centred as one
///   block, then packed left to right.
pub fn layout_zone(zone: Zone, widths: &[i32], geometry: &Geometry) -> Vec<Placement> {
    let y = geometry.baseline();
    let place = |x: i32, width: i32| Placement {
        x,
        y,
        width,
        decoration: geometry.decoration.map(|line| Rect {
            x,
            y: line.y,
            width,
            height: line.thickness,
        }),
    };

    match zone {
        Zone::Left => pack_left(geometry.padding, widths, geometry.spacing, place),
        Zone::Center => {
            let total: i32 = widths.iter().map(|w| w + geometry.spacing).sum();
            let start = (geometry.bar_width - total) / 2;
            pack_left(start, widths, geometry.spacing, place)
        }
        Zone::Right => {
            let mut cursor = geometry.bar_width - geometry.padding;
            widths
                .iter()
                .map(|&width| {
                    let x = cursor - width;
                    cursor = x - geometry.spacing;
                    place(x, width)
                })
                .collect()
        }
    }
}

fn pack_left(
    start: i32,
    widths: &[i32],
    spacing: i32,
    place: impl Fn(i32, i32) -> Placement,
) -> Vec<Placement> {
    let mut cursor = start;
    widths
        .iter()
        .map(|&width| {
            let x = cursor;
            cursor += width + spacing;
            place(x, width)
        })
        .collect()
}
