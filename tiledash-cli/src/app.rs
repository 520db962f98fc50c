// tiledash-cli/src/app.rs
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossbeam::channel::Receiver;
use ratatui::layout::{Position, Rect};
use std::collections::HashMap;
use tracing::debug;

use tiledash_core::event::{LayoutSaveFailed, LayoutSaved, Subscription};
use tiledash_core::{
    BusEvent, CatalogEntry, Dashboard, DragSource, DropTarget, GridLayout, WidgetContainer,
    WidgetRegistry, Zone, catalog_entries, topics,
};

/// Which panel keyboard focus is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Dashboard,
    Catalog,
}

/// Mouse gesture progress. A press only becomes a drag once the pointer
/// leaves the cell it was pressed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pointer {
    Idle,
    Pressed { source: DragSource, at: (u16, u16) },
    Dragging { at: (u16, u16) },
}

pub struct App {
    pub dashboard: Dashboard,
    pub registry: WidgetRegistry,
    containers: HashMap<String, WidgetContainer>,
    /// Placement from the last draw, used for hit testing
    pub grid: GridLayout,
    /// Catalog list area from the last draw
    pub catalog_area: Option<Rect>,
    pub focus: usize,
    pub catalog_cursor: usize,
    pub pane: Pane,
    /// Drop cursor of a keyboard drag
    pub keyboard_target: Option<DropTarget>,
    pub pointer: Pointer,
    pub row_height: u16,
    /// Last persistence notice, shown in the footer
    pub status: Option<String>,
    pub should_quit: bool,
    _subscription: Subscription,
    notices: Receiver<BusEvent>,
}

impl App {
    pub fn new(dashboard: Dashboard, registry: WidgetRegistry, row_height: u16) -> Self {
        let (subscription, notices) = dashboard.bus().subscribe("layout.*");
        let mut app = Self {
            dashboard,
            registry,
            containers: HashMap::new(),
            grid: GridLayout::default(),
            catalog_area: None,
            focus: 0,
            catalog_cursor: 0,
            pane: Pane::Dashboard,
            keyboard_target: None,
            pointer: Pointer::Idle,
            row_height,
            status: None,
            should_quit: false,
            _subscription: subscription,
            notices,
        };
        app.sync_widgets();
        app
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        catalog_entries(&self.registry, self.dashboard.layout())
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut WidgetContainer> {
        self.containers.get_mut(id)
    }

    pub fn container(&self, id: &str) -> Option<&WidgetContainer> {
        self.containers.get(id)
    }

    /// Mount widgets that appeared in the layout and unmount those that left.
    /// Types the registry cannot resolve get no container and render nothing.
    pub fn sync_widgets(&mut self) {
        let layout = self.dashboard.layout();

        self.containers.retain(|id, container| {
            let keep = layout.contains_id(id);
            if !keep {
                container.unmount();
            }
            keep
        });

        for instance in layout.widgets() {
            if self.containers.contains_key(&instance.id) {
                continue;
            }
            match self.registry.create(&instance.widget_type, &instance.props) {
                Some(widget) => {
                    let mut container = WidgetContainer::new(
                        instance.id.clone(),
                        instance.widget_type.clone(),
                        widget,
                    );
                    container.mount();
                    self.containers.insert(instance.id.clone(), container);
                }
                None => debug!(id = %instance.id, widget_type = %instance.widget_type, "no renderer for widget type"),
            }
        }

        let len = self.dashboard.widgets().len();
        self.focus = self.focus.min(len.saturating_sub(1));
        self.catalog_cursor = self
            .catalog_cursor
            .min(self.registry.len().saturating_sub(1));
    }

    pub fn tick(&mut self) {
        for container in self.containers.values_mut() {
            container.update();
        }
        self.drain_notices();
    }

    fn drain_notices(&mut self) {
        while let Ok(event) = self.notices.try_recv() {
            let notice = match event.topic.as_str() {
                topics::LAYOUT_SAVED => event
                    .payload
                    .downcast::<LayoutSaved>()
                    .map(|saved| format!("Layout saved ({} widgets)", saved.widgets)),
                topics::LAYOUT_SAVE_FAILED => event
                    .payload
                    .downcast::<LayoutSaveFailed>()
                    .map(|failed| format!("Layout not saved: {}", failed.reason)),
                topics::LAYOUT_RELOADED => Some("Layout reloaded".to_string()),
                _ => None,
            };
            if let Some(notice) = notice {
                self.status = Some(notice);
            }
        }
    }

    pub fn shutdown(&mut self) {
        if self.dashboard.is_editing() {
            self.dashboard.toggle_edit_mode();
        }
        for container in self.containers.values_mut() {
            container.unmount();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.dashboard.is_editing() {
            self.handle_edit_key(key);
        } else {
            self.handle_view_key(key);
        }
        self.sync_widgets();
        self.drain_notices();
    }

    fn handle_view_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('e') => self.toggle_edit_mode(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dashboard.reload();
            }
            KeyCode::Tab => self.focus_step(1),
            KeyCode::BackTab => self.focus_step(-1),
            _ => {
                let focused = self.dashboard.widgets().get(self.focus).map(|w| w.id.clone());
                if let Some(container) = focused.and_then(|id| self.containers.get_mut(&id)) {
                    container.handle_event(tiledash_core::Event::Key(key));
                }
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        if self.keyboard_target.is_some() {
            self.handle_keyboard_drag(key);
            return;
        }
        if matches!(self.pointer, Pointer::Dragging { .. }) {
            if key.code == KeyCode::Esc {
                self.pointer = Pointer::Idle;
                self.dashboard.end_drag();
            }
            return;
        }

        match (key.code, self.pane) {
            (KeyCode::Char('e'), _) => self.toggle_edit_mode(),
            (KeyCode::Tab | KeyCode::BackTab, Pane::Dashboard) => self.pane = Pane::Catalog,
            (KeyCode::Tab | KeyCode::BackTab, Pane::Catalog) => self.pane = Pane::Dashboard,
            (KeyCode::Left | KeyCode::Up, Pane::Dashboard) => self.focus_step(-1),
            (KeyCode::Right | KeyCode::Down, Pane::Dashboard) => self.focus_step(1),
            (KeyCode::Up, Pane::Catalog) => self.catalog_cursor = self.catalog_cursor.saturating_sub(1),
            (KeyCode::Down, Pane::Catalog) => {
                self.catalog_cursor = (self.catalog_cursor + 1).min(self.registry.len().saturating_sub(1));
            }
            (KeyCode::Delete | KeyCode::Backspace, Pane::Dashboard) => {
                if let Some(id) = self.dashboard.widgets().get(self.focus).map(|w| w.id.clone()) {
                    self.dashboard.remove_widget(&id);
                }
            }
            (KeyCode::Enter, Pane::Catalog) => {
                if let Some(entry) = self.catalog().get(self.catalog_cursor) {
                    self.dashboard.add_widget(&entry.widget_type);
                }
            }
            (KeyCode::Char(' '), _) => self.pick_up(),
            _ => {}
        }
    }

    fn toggle_edit_mode(&mut self) {
        self.keyboard_target = None;
        self.pointer = Pointer::Idle;
        self.pane = Pane::Dashboard;
        self.dashboard.toggle_edit_mode();
    }

    fn focus_step(&mut self, step: isize) {
        let len = self.dashboard.widgets().len();
        if len == 0 {
            return;
        }
        self.focus = (self.focus as isize + step).rem_euclid(len as isize) as usize;
    }

    /// Keyboard drag start: the focused widget or catalog entry
    fn pick_up(&mut self) {
        let (source, start) = match self.pane {
            Pane::Dashboard => (
                self.dashboard.drag_source_for_widget(self.focus),
                DropTarget::dashboard(self.focus),
            ),
            Pane::Catalog => {
                let source = self.catalog().get(self.catalog_cursor).and_then(|entry| {
                    self.dashboard
                        .drag_source_for_catalog(&entry.widget_type, self.catalog_cursor)
                });
                (source, DropTarget::dashboard(self.dashboard.widgets().len()))
            }
        };

        if let Some(source) = source
            && self.dashboard.begin_drag(source)
        {
            self.keyboard_target = Some(start);
            self.dashboard.drag_over(Some(start));
        }
    }

    fn handle_keyboard_drag(&mut self, key: KeyEvent) {
        let Some(target) = self.keyboard_target else {
            return;
        };

        let len = self.dashboard.widgets().len();
        let moved = match (key.code, target.zone) {
            (KeyCode::Left | KeyCode::Up, Zone::Dashboard) => {
                DropTarget::dashboard(target.index.saturating_sub(1))
            }
            (KeyCode::Right | KeyCode::Down, Zone::Dashboard) => {
                DropTarget::dashboard((target.index + 1).min(len))
            }
            (KeyCode::Tab | KeyCode::BackTab, Zone::Dashboard) => DropTarget::catalog(0),
            (KeyCode::Tab | KeyCode::BackTab, Zone::Catalog) => DropTarget::dashboard(self.focus),
            (KeyCode::Enter, _) => {
                self.keyboard_target = None;
                if self.dashboard.drop_on(Some(target)) && target.zone == Zone::Dashboard {
                    self.focus = target.index.min(len);
                }
                return;
            }
            (KeyCode::Esc, _) => {
                self.keyboard_target = None;
                self.dashboard.end_drag();
                return;
            }
            _ => target,
        };

        self.keyboard_target = Some(moved);
        self.dashboard.drag_over(Some(moved));
    }

    /// Drop target under a terminal position
    pub fn target_at(&self, x: u16, y: u16) -> Option<DropTarget> {
        if let Some(area) = self.catalog_area
            && area.contains(Position::new(x, y))
        {
            return Some(DropTarget::catalog(usize::from(y - area.y)));
        }

        self.grid
            .drop_index_at(x, y, self.dashboard.widgets().len())
            .map(DropTarget::dashboard)
    }

    /// Drag source under a terminal position, if dragging is allowed there
    fn source_at(&self, x: u16, y: u16) -> Option<DragSource> {
        if let Some(area) = self.catalog_area
            && area.contains(Position::new(x, y))
        {
            let index = usize::from(y - area.y);
            let entry = self.catalog().into_iter().nth(index)?;
            return self.dashboard.drag_source_for_catalog(&entry.widget_type, index);
        }

        let cell = self.grid.cell_at(x, y)?;
        self.dashboard.drag_source_for_widget(cell.index)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let at = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(cell) = self.grid.cell_at(at.0, at.1) {
                    self.focus = cell.index;
                    self.pane = Pane::Dashboard;
                }
                if self.keyboard_target.is_none()
                    && let Some(source) = self.source_at(at.0, at.1)
                {
                    self.pointer = Pointer::Pressed { source, at };
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match &self.pointer {
                Pointer::Pressed { source, at: origin } => {
                    if self.left_origin(*origin, at) {
                        let source = source.clone();
                        if self.dashboard.begin_drag(source) {
                            self.pointer = Pointer::Dragging { at };
                            self.dashboard.drag_over(self.target_at(at.0, at.1));
                        } else {
                            self.pointer = Pointer::Idle;
                        }
                    }
                }
                Pointer::Dragging { .. } => {
                    self.pointer = Pointer::Dragging { at };
                    self.dashboard.drag_over(self.target_at(at.0, at.1));
                }
                Pointer::Idle => {}
            },
            MouseEventKind::Up(MouseButton::Left) => {
                if matches!(self.pointer, Pointer::Dragging { .. }) {
                    let target = self.target_at(at.0, at.1);
                    self.dashboard.drop_on(target);
                }
                self.pointer = Pointer::Idle;
                self.sync_widgets();
            }
            _ => {}
        }
    }

    /// Whether the pointer has left the cell or catalog row it was pressed on
    fn left_origin(&self, origin: (u16, u16), now: (u16, u16)) -> bool {
        if let Some(cell) = self.grid.cell_at(origin.0, origin.1) {
            return !cell.area.contains(Position::new(now.0, now.1));
        }
        origin.1 != now.1
    }

    /// Catalog label or widget label for the item being dragged
    pub fn drag_label(&self) -> Option<String> {
        let op = self.dashboard.drag_state()?.operation()?;
        let widget_type = match &op.item {
            tiledash_core::DragItem::Placed { id, .. } => self
                .dashboard
                .widgets()
                .iter()
                .find(|w| &w.id == id)
                .map(|w| w.widget_type.clone())?,
            tiledash_core::DragItem::CatalogType { widget_type, .. } => widget_type.clone(),
        };
        Some(self.registry.label(&widget_type).to_string())
    }
}
