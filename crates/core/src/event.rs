/// External events that invalidate the bar surface.
///
/// Sources:
/// - Display server → `Expose` (surface content lost) and `Resize`
///   (bar geometry changed).
///
/// Both kinds trigger a redraw from the last-refreshed module buffers; neither
/// triggers a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEvent {
    /// Part of the bar window was uncovered and must be repainted.
    Expose,
    /// The bar window changed size.
    Resize { width: u16, height: u16 },
}
