use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode};
use crate::components::header::HeaderWidget;
use crate::components::help::HelpOverlay;
use crate::components::picked::PickedOverlay;
use crate::components::status_bar::{FooterWidget, PadFooterWidget, PromptWidget};
use crate::components::tree::TreeWidget;

/// Render the application UI: header row, tree viewport, footer row, plus
/// the active overlay. Window geometry is written back to the app so the
/// next actions page and scroll against the current terminal size.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    app.viewport_height = chunks[1].height as usize;
    app.overlay_height = crate::components::overlay_view_height(frame.area());

    let header_path = app
        .current_row()
        .map(|row| row.path.display().to_string())
        .unwrap_or_else(|| app.tree.root.path.display().to_string());

    frame.render_widget(
        HeaderWidget::new(&app.user_host, &header_path, &app.theme),
        chunks[0],
    );
    frame.render_widget(
        TreeWidget::new(&app.rows, &app.tree.nav, &app.theme),
        chunks[1],
    );

    match app.mode {
        Mode::Prompt => {
            frame.render_widget(PromptWidget::new(&app.prompt, &app.theme), chunks[2]);
        }
        Mode::Help | Mode::Picked => {
            frame.render_widget(PadFooterWidget::new(&app.theme), chunks[2]);
        }
        Mode::Browse => {
            frame.render_widget(FooterWidget::new(app.current_row(), &app.theme), chunks[2]);
        }
    }

    match app.mode {
        Mode::Help => {
            frame.render_widget(HelpOverlay::new(&app.theme, app.pad_scroll), frame.area());
        }
        Mode::Picked => {
            frame.render_widget(
                PickedOverlay::new(&app.tree.nav.picked, &app.theme, app.pad_scroll),
                frame.area(),
            );
        }
        _ => {}
    }
}
