use crate::canvas::{Canvas, Rect};
use crate::layout::{layout_zone, BarLayout, Geometry};
use obsidian_core::{Module, Registry, Result, Zone};
use obsidian_theme::Theme;

/// Draw one complete frame: background, then left, center and right zones.
///
/// Reads module buffers as they are; never refreshes them.
pub fn draw_frame<C>(
    canvas: &mut C,
    registry: &Registry,
    layout: &BarLayout,
    theme: &Theme,
) -> Result<()>
where
    C: Canvas + ?Sized,
{
    let geometry = layout.geometry(canvas.bar_width(), canvas.font_metrics());

    canvas.fill_rectangle(
        Rect {
            x: 0,
            y: 0,
            width: geometry.bar_width,
            height: geometry.bar_height,
        },
        theme.background,
    )?;

    for zone in Zone::ALL {
        draw_zone(canvas, registry, zone, &geometry, theme)?;
    }

    canvas.present()
}

fn draw_zone<C>(
    canvas: &mut C,
    registry: &Registry,
    zone: Zone,
    geometry: &Geometry,
    theme: &Theme,
) -> Result<()>
where
    C: Canvas + ?Sized,
{
    let modules: Vec<&Module> = registry.zone(zone).collect();
    if modules.is_empty() {
        return Ok(());
    }

    let widths = modules
        .iter()
        .map(|m| canvas.measure_text(m.text()))
        .collect::<Result<Vec<_>>>()?;

    for (module, placement) in modules.iter().zip(layout_zone(zone, &widths, geometry)) {
        // Nothing to show before the first refresh; the slot is still reserved.
        if module.text().is_empty() {
            continue;
        }
        if let Some(rect) = placement.decoration {
            canvas.fill_rectangle(rect, theme.decoration)?;
        }
        canvas.draw_text(placement.x, placement.y, module.text(), theme.foreground)?;
    }

    Ok(())
}
