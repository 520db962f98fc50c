// tiledash-cli/src/ui.rs
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tiledash_core::{GridItem, GridLayout, Zone, is_removal_target};

use crate::app::{App, Pane, Pointer};

const CATALOG_WIDTH: u16 = 30;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    if app.dashboard.is_editing() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(CATALOG_WIDTH)])
            .split(chunks[1]);
        draw_grid(frame, app, body[0]);
        draw_catalog(frame, app, body[1]);
    } else {
        app.catalog_area = None;
        draw_grid(frame, app, chunks[1]);
    }

    draw_drop_marker(frame, app);
    draw_drag_preview(frame, app);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " tiledash · Overview ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.dashboard.is_editing() {
        spans.push(Span::styled(
            " EDITING ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<GridItem> = app
        .dashboard
        .widgets()
        .iter()
        .enumerate()
        .filter_map(|(index, instance)| {
            let container = app.container(&instance.id)?;
            Some(GridItem {
                index,
                span: app.registry.size_hint(&instance.widget_type),
                height: container.preferred_height(),
            })
        })
        .collect();

    app.grid = GridLayout::place(area, &items, app.row_height);

    let dragged = app
        .dashboard
        .drag_state()
        .and_then(|drag| drag.operation())
        .map(|op| op.item.dragged_id().to_string());

    let cells = app.grid.cells().to_vec();
    let ids: Vec<String> = app.dashboard.widgets().iter().map(|w| w.id.clone()).collect();
    let focus = app.focus;
    let focus_visible = app.pane == Pane::Dashboard;

    for cell in cells {
        let Some(id) = ids.get(cell.index) else {
            continue;
        };
        if let Some(container) = app.container_mut(id) {
            container.render_focused(cell.area, frame.buffer_mut(), focus_visible && cell.index == focus);
        }
        if dragged.as_deref() == Some(id.as_str()) {
            let buf = frame.buffer_mut();
            buf.set_style(cell.area, Style::default().add_modifier(Modifier::DIM));
        }
    }
}

fn draw_catalog(frame: &mut Frame, app: &mut App, area: Rect) {
    let removing = app.dashboard.drag_state().is_some_and(is_removal_target);
    let hovered = app
        .dashboard
        .drag_state()
        .and_then(|drag| drag.operation())
        .and_then(|op| op.hover)
        .is_some_and(|target| target.zone == Zone::Catalog);

    let (title, border) = if removing && hovered {
        (" Drop to remove ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else if removing {
        (" Drop here to remove ", Style::default().fg(Color::Red))
    } else {
        (" Catalog ", Style::default().fg(Color::Cyan))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border);
    let inner = block.inner(area);
    app.catalog_area = Some(inner);

    let cursor_visible = app.pane == Pane::Catalog;
    let items: Vec<ListItem> = app
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut style = if entry.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            if cursor_visible && i == app.catalog_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let marker = if entry.disabled { "✓ " } else { "+ " };
            ListItem::new(Line::from(format!("{}{}", marker, entry.label))).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Marks where the current drag would land on the dashboard
fn draw_drop_marker(frame: &mut Frame, app: &App) {
    let Some(target) = app
        .dashboard
        .drag_state()
        .and_then(|drag| drag.operation())
        .and_then(|op| op.hover)
    else {
        return;
    };
    if target.zone != Zone::Dashboard {
        return;
    }

    let style = Style::default().fg(Color::Black).bg(Color::Cyan);
    let buf = frame.buffer_mut();
    match app.grid.area_of(target.index) {
        Some(area) => {
            buf.set_string(area.x + 1, area.y, " ▼ drop here ", style);
        }
        None => {
            // Past the last widget: mark just below the lowest placed cell
            let grid = app.grid.area();
            let y = app
                .grid
                .cells()
                .iter()
                .map(|c| c.area.bottom())
                .max()
                .unwrap_or(grid.y);
            if y < grid.bottom() {
                buf.set_string(grid.x + 1, y, " ▼ drop at end ", style);
            }
        }
    }
}

/// Floating label following the pointer while dragging
fn draw_drag_preview(frame: &mut Frame, app: &App) {
    let Pointer::Dragging { at } = app.pointer else {
        return;
    };
    let Some(label) = app.drag_label() else {
        return;
    };

    let screen = frame.area();
    let width = (label.chars().count() as u16 + 4).min(screen.width);
    let height = 3.min(screen.height);
    let x = at.0.saturating_add(1).min(screen.right().saturating_sub(width));
    let y = at.1.saturating_add(1).min(screen.bottom().saturating_sub(height));
    let area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(label).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}

fn footer_hint(app: &App) -> &'static str {
    if !app.dashboard.is_editing() {
        " e edit layout · Tab focus · Ctrl+r reload · q quit "
    } else if app.keyboard_target.is_some() {
        " ←→ move · Tab switch zone · Enter drop · Esc cancel "
    } else {
        " e done · Space pick up · Tab catalog · Del remove · Enter add · drag with mouse "
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(footer_hint(app), Style::default().fg(Color::DarkGray))];
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!(" {} ", status), Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
