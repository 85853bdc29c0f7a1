pub mod header;
pub mod help;
pub mod picked;
pub mod status_bar;
pub mod tree;

use ratatui::layout::Rect;

/// Centered overlay region — 70% width, 80% height, capped.
pub fn overlay_rect(area: Rect) -> Rect {
    let width = ((area.width as f32 * 0.70) as u16).min(80).min(area.width);
    let height = ((area.height as f32 * 0.80) as u16).min(50).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Inner (scrollable) height of the overlay region, minus its borders.
pub fn overlay_view_height(area: Rect) -> usize {
    overlay_rect(area).height.saturating_sub(2) as usize
}
