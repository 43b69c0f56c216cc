use obsidian_config::{BarConfig, Position};
use obsidian_core::{BarError, BarEvent, Result};
use obsidian_renderer::{Backend, Canvas, FontMetrics, Rect};
use obsidian_theme::{Color, Theme};
use tracing::{debug, info, trace};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ChangeGCAux, Char2b, ConnectionExt as _, CreateGCAux, CreateWindowAux, EventMask,
    Font, Gcontext, PropMode, Rectangle, Window, WindowClass,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

/// The bar window plus the server-side resources used to draw into it.
///
/// Acquired in the order connection → window → font → GC; [`Backend::release`]
/// frees them in reverse.
pub struct XBackend {
    conn: RustConnection,
    window: Window,
    font: Font,
    gc: Gcontext,
    width: u16,
    metrics: FontMetrics,
    /// Foreground pixel currently set on `gc`.
    foreground: u32,
}

impl XBackend {
    /// Open the display, create and map the bar window.
    ///
    /// Nothing is mapped unless every step succeeds.
    pub fn connect(config: &BarConfig, theme: &Theme) -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(BarError::display("cannot open display"))?;

        let screen = &conn.setup().roots[screen_num];
        let (root, visual, screen_width, screen_height) = (
            screen.root,
            screen.root_visual,
            screen.width_in_pixels,
            screen.height_in_pixels,
        );

        let height = config.global.height;
        let y = match config.global.position {
            Position::Top => 0,
            Position::Bottom => clamp_i16(i32::from(screen_height) - i32::from(height)),
        };

        // ── Window ────────────────────────────────────────────────────────────
        let window = conn.generate_id().map_err(BarError::display("allocate window id"))?;
        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            window,
            root,
            0,
            y,
            screen_width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            visual,
            &CreateWindowAux::new()
                .background_pixel(theme.background.to_pixel())
                .override_redirect(1)
                .event_mask(EventMask::EXPOSURE | EventMask::STRUCTURE_NOTIFY),
        )
        .map_err(BarError::display("create window"))?
        .check()
        .map_err(BarError::display("create window"))?;

        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            b"obsidianbar",
        )
        .map_err(BarError::display("set window name"))?;

        // ── Font ──────────────────────────────────────────────────────────────
        let font_name = config.theme.font.as_str();
        let font = conn.generate_id().map_err(BarError::display("allocate font id"))?;
        conn.open_font(font, font_name.as_bytes())
            .map_err(BarError::display("open font"))?
            .check()
            .map_err(|e| BarError::Display(format!("cannot load font '{font_name}': {e}")))?;

        let info = conn
            .query_font(font)
            .map_err(BarError::display("query font"))?
            .reply()
            .map_err(BarError::display("query font"))?;
        let metrics = FontMetrics {
            ascent: i32::from(info.font_ascent),
            descent: i32::from(info.font_descent),
        };

        // ── Graphics context ──────────────────────────────────────────────────
        let foreground = theme.foreground.to_pixel();
        let gc = conn.generate_id().map_err(BarError::display("allocate gc id"))?;
        conn.create_gc(
            gc,
            window,
            &CreateGCAux::new()
                .foreground(foreground)
                .background(theme.background.to_pixel())
                .font(font)
                .graphics_exposures(0),
        )
        .map_err(BarError::display("create gc"))?
        .check()
        .map_err(BarError::display("create gc"))?;

        conn.map_window(window).map_err(BarError::display("map window"))?;
        conn.flush().map_err(BarError::display("flush"))?;

        info!(
            width = screen_width,
            height,
            font = font_name,
            ascent = metrics.ascent,
            descent = metrics.descent,
            "Bar window mapped"
        );

        Ok(Self {
            conn,
            window,
            font,
            gc,
            width: screen_width,
            metrics,
            foreground,
        })
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        let pixel = color.to_pixel();
        if pixel != self.foreground {
            self.conn
                .change_gc(self.gc, &ChangeGCAux::new().foreground(pixel))
                .map_err(BarError::display("change gc"))?;
            self.foreground = pixel;
        }
        Ok(())
    }
}

impl Canvas for XBackend {
    fn bar_width(&self) -> i32 {
        i32::from(self.width)
    }

    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn measure_text(&mut self, text: &str) -> Result<i32> {
        if text.is_empty() {
            return Ok(0);
        }
        let chars: Vec<Char2b> = latin1(text)
            .into_iter()
            .map(|byte2| Char2b { byte1: 0, byte2 })
            .collect();

        let extents = self
            .conn
            .query_text_extents(self.font, &chars)
            .map_err(BarError::display("query text extents"))?
            .reply()
            .map_err(BarError::display("query text extents"))?;
        Ok(extents.overall_width)
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.set_foreground(color)?;
        self.conn
            .poly_fill_rectangle(
                self.window,
                self.gc,
                &[Rectangle {
                    x: clamp_i16(rect.x),
                    y: clamp_i16(rect.y),
                    width: clamp_u16(rect.width),
                    height: clamp_u16(rect.height),
                }],
            )
            .map_err(BarError::display("fill rectangle"))?;
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> Result<()> {
        self.set_foreground(color)?;
        let mut bytes = latin1(text);
        // ImageText8 carries at most 255 bytes.
        bytes.truncate(255);
        self.conn
            .image_text8(self.window, self.gc, clamp_i16(x), clamp_i16(y), &bytes)
            .map_err(BarError::display("draw text"))?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.conn.flush().map_err(BarError::display("flush"))
    }
}

impl Backend for XBackend {
    fn drain_events(&mut self) -> Result<Vec<BarEvent>> {
        let mut events = Vec::new();

        while let Some(event) = self
            .conn
            .poll_for_event()
            .map_err(BarError::display("poll events"))?
        {
            match event {
                // Only the last Expose of a batch triggers a redraw.
                Event::Expose(e) if e.window == self.window && e.count == 0 => {
                    events.push(BarEvent::Expose);
                }
                Event::ConfigureNotify(e) if e.window == self.window => {
                    if e.width != self.width {
                        debug!("Bar resized: {} -> {}", self.width, e.width);
                    }
                    self.width = e.width;
                    events.push(BarEvent::Resize {
                        width: e.width,
                        height: e.height,
                    });
                }
                other => trace!(?other, "ignoring X event"),
            }
        }

        Ok(events)
    }

    fn release(self) -> Result<()> {
        self.conn.free_gc(self.gc).map_err(BarError::display("free gc"))?;
        self.conn.close_font(self.font).map_err(BarError::display("close font"))?;
        self.conn
            .destroy_window(self.window)
            .map_err(BarError::display("destroy window"))?;
        self.conn.flush().map_err(BarError::display("flush"))?;
        debug!("X resources released; closing connection");
        Ok(())
    }
}

/// Encode for an 8-bit core font. Characters outside Latin-1 become `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn clamp_i16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

fn clamp_u16(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}
