// tiledash-core/src/dashboard.rs

use tracing::{debug, info};

use crate::drag::{DragItem, DragSource, DropTarget};
use crate::event::{
    DragEnded, DragStarted, EditModeChanged, Event, EventBus, LayoutSaveFailed, LayoutSaved, topics,
};
use crate::model::{IdGenerator, Layout, WidgetInstance};
use crate::orchestrator::{DragState, Transition};
use crate::store::LayoutStore;

/// Viewing or editing. A drag can only exist while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Viewing,
    Editing { drag: DragState },
}

impl Mode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing { .. })
    }

    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Mode::Editing { drag } => Some(drag),
            Mode::Viewing => None,
        }
    }
}

pub struct Dashboard {
    layout: Layout,
    mode: Mode,
    store: Box<dyn LayoutStore>,
    ids: IdGenerator,
    bus: EventBus,
}

impl Dashboard {
    /// Create a dashboard showing the stored layout (or the default one)
    pub fn new(store: Box<dyn LayoutStore>, bus: EventBus) -> Self {
        let layout = store.load();
        Self {
            layout,
            mode: Mode::Viewing,
            store,
            ids: IdGenerator::new(),
            bus,
        }
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        self.layout.widgets()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Flip edit mode. Leaving edit mode drops any drag in flight and saves
    /// the layout. Returns whether edit mode is now active.
    pub fn toggle_edit_mode(&mut self) -> bool {
        match std::mem::take(&mut self.mode) {
            Mode::Viewing => {
                self.mode = Mode::Editing {
                    drag: DragState::Idle,
                };
                info!("entered edit mode");
            }
            Mode::Editing { mut drag } => {
                if let Some(item) = drag.cancel() {
                    self.publish(topics::DRAG_END, DragEnded { item, target: None });
                }
                info!("left edit mode");
                self.persist();
            }
        }

        let editing = self.is_editing();
        self.publish(topics::EDIT_MODE_CHANGED, EditModeChanged { editing });
        editing
    }

    /// Append a widget of `widget_type`. No-op if the type is already placed.
    pub fn add_widget(&mut self, widget_type: &str) -> bool {
        self.apply(Transition::Add {
            widget_type: widget_type.to_string(),
            index: self.layout.len(),
        })
    }

    /// Remove by instance id. Removing an absent id changes nothing.
    pub fn remove_widget(&mut self, id: &str) -> bool {
        self.apply(Transition::Remove { id: id.to_string() })
    }

    pub fn reorder_widgets(&mut self, from: usize, to: usize) -> bool {
        self.apply(Transition::Reorder { from, to })
    }

    /// Replace the in-memory layout with whatever storage holds now
    pub fn reload(&mut self) {
        let cancelled = match &mut self.mode {
            Mode::Editing { drag } => drag.cancel(),
            Mode::Viewing => None,
        };
        if let Some(item) = cancelled {
            self.publish(topics::DRAG_END, DragEnded { item, target: None });
        }
        self.layout = self.store.load();
        self.publish(topics::LAYOUT_RELOADED, self.layout.len());
    }

    /// Drag source for the placed widget at `index`, if it may be dragged
    pub fn drag_source_for_widget(&self, index: usize) -> Option<DragSource> {
        if !self.is_editing() {
            return None;
        }

        let widget = self.layout.get(index)?;
        Some(DragSource::new(DragItem::Placed {
            id: widget.id.clone(),
            index,
        }))
    }

    /// Drag source for a catalog entry. Placed types stay disabled.
    pub fn drag_source_for_catalog(&self, widget_type: &str, index: usize) -> Option<DragSource> {
        if !self.is_editing() || self.layout.contains_type(widget_type) {
            return None;
        }

        Some(DragSource::new(DragItem::CatalogType {
            widget_type: widget_type.to_string(),
            index,
        }))
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.mode.drag()
    }

    pub fn begin_drag(&mut self, source: DragSource) -> bool {
        let Mode::Editing { drag } = &mut self.mode else {
            return false;
        };

        let Some(item) = drag.begin(source).cloned() else {
            return false;
        };

        debug!(item = ?item, "drag started");
        self.publish(topics::DRAG_START, DragStarted { item });
        true
    }

    /// Track the target currently under the gesture
    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        if let Mode::Editing { drag } = &mut self.mode {
            drag.hover(target);
        }
    }

    /// Complete the drag on `target` (`None` = released outside any zone).
    /// Returns whether the layout changed.
    pub fn drop_on(&mut self, target: Option<DropTarget>) -> bool {
        let Mode::Editing { drag } = &mut self.mode else {
            return false;
        };

        let Some((item, transition)) = drag.finish(target) else {
            return false;
        };

        let transition = transition.rebase(&item, &self.layout);
        debug!(item = ?item, ?target, ?transition, "drag dropped");
        self.publish(topics::DRAG_END, DragEnded { item, target });
        self.apply(transition)
    }

    /// End the drag without a drop
    pub fn end_drag(&mut self) {
        self.drop_on(None);
    }

    fn apply(&mut self, transition: Transition) -> bool {
        match transition.apply(&mut self.layout, &mut self.ids) {
            Some(change) => {
                debug!(?change, "layout changed");
                self.publish(change.topic(), change);
                true
            }
            None => false,
        }
    }

    fn persist(&mut self) {
        match self.store.save(&self.layout) {
            Ok(()) => {
                self.publish(
                    topics::LAYOUT_SAVED,
                    LayoutSaved {
                        widgets: self.layout.len(),
                    },
                );
            }
            Err(e) => {
                self.publish(
                    topics::LAYOUT_SAVE_FAILED,
                    LayoutSaveFailed {
                        reason: e.to_string(),
                    },
                );
            }
        }
    }

    fn publish<T: std::any::Any + Send + Sync>(&self, topic: &str, data: T) {
        self.bus.publish(Event::new(topic, data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::Zone;
    use crate::store::MemoryLayoutStore;
    use std::sync::Arc;

    fn dashboard() -> (Dashboard, MemoryLayoutStore) {
        let store = MemoryLayoutStore::new();
        let dashboard = Dashboard::new(Box::new(store.clone()), EventBus::new());
        (dashboard, store)
    }

    fn ids(dashboard: &Dashboard) -> Vec<&str> {
        dashboard.widgets().iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_first_load_uses_default_layout() {
        let (dashboard, _) = dashboard();
        assert_eq!(
            ids(&dashboard),
            vec![
                "stats-1",
                "stats-2",
                "stats-3",
                "stats-4",
                "line-chart-1",
                "doughnut-chart-1",
                "bar-chart-1",
                "table-1",
            ]
        );
        assert!(!dashboard.is_editing());
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let (mut dashboard, _) = dashboard();
        assert!(!dashboard.add_widget("table"));
        assert_eq!(dashboard.widgets().len(), 8);
    }

    #[test]
    fn test_reorder_first_to_last() {
        let (mut dashboard, _) = dashboard();
        assert!(dashboard.reorder_widgets(0, 7));
        assert_eq!(
            ids(&dashboard),
            vec![
                "stats-2",
                "stats-3",
                "stats-4",
                "line-chart-1",
                "doughnut-chart-1",
                "bar-chart-1",
                "table-1",
                "stats-1",
            ]
        );
    }

    #[test]
    fn test_remove_then_exit_edit_mode_saves() {
        let (mut dashboard, store) = dashboard();
        dashboard.toggle_edit_mode();
        assert!(dashboard.remove_widget("stats-2"));
        assert_eq!(store.save_count(), 0);

        assert!(!dashboard.toggle_edit_mode());
        assert_eq!(store.save_count(), 1);

        let saved = store.load();
        assert_eq!(saved.len(), 7);
        assert!(!saved.contains_id("stats-2"));
        assert_eq!(&saved, dashboard.layout());

        let reopened = Dashboard::new(Box::new(store.clone()), EventBus::new());
        assert_eq!(reopened.layout(), &saved);
    }

    #[test]
    fn test_entering_edit_mode_does_not_save() {
        let (mut dashboard, store) = dashboard();
        assert!(dashboard.toggle_edit_mode());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_remove_missing_id_is_idempotent() {
        let (mut dashboard, _) = dashboard();
        assert!(!dashboard.remove_widget("never-there"));
        assert_eq!(dashboard.layout(), &Layout::default());
    }

    #[test]
    fn test_no_drag_sources_outside_edit_mode() {
        let (mut dashboard, _) = dashboard();
        for i in 0..dashboard.widgets().len() {
            assert!(dashboard.drag_source_for_widget(i).is_none());
        }
        assert!(
            dashboard
                .drag_source_for_catalog("accounts-overview", 0)
                .is_none()
        );
        assert!(dashboard.drag_state().is_none());

        dashboard.toggle_edit_mode();
        assert!(dashboard.drag_source_for_widget(0).is_some());
        assert!(dashboard.drag_source_for_widget(8).is_none());
    }

    #[test]
    fn test_placed_catalog_types_cannot_be_dragged() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();
        assert!(dashboard.drag_source_for_catalog("table", 0).is_none());
        assert!(
            dashboard
                .drag_source_for_catalog("accounts-overview", 1)
                .is_some()
        );
    }

    #[test]
    fn test_drag_reorder() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();

        let source = dashboard.drag_source_for_widget(0).unwrap();
        assert!(dashboard.begin_drag(source));
        assert!(dashboard.drag_state().is_some_and(DragState::is_dragging));

        assert!(dashboard.drop_on(Some(DropTarget::dashboard(7))));
        assert_eq!(ids(&dashboard)[7], "stats-1");
        assert_eq!(dashboard.drag_state(), Some(&DragState::Idle));
    }

    #[test]
    fn test_drag_from_catalog_adds_at_drop_index() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();

        let source = dashboard
            .drag_source_for_catalog("accounts-overview", 8)
            .unwrap();
        dashboard.begin_drag(source);
        assert!(dashboard.drop_on(Some(DropTarget::dashboard(4))));

        let added = &dashboard.widgets()[4];
        assert_eq!(added.widget_type, "accounts-overview");
        assert!(added.id.starts_with("accounts-overview-"));
        assert_eq!(dashboard.widgets().len(), 9);
    }

    #[test]
    fn test_drag_to_catalog_removes() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();

        let source = dashboard.drag_source_for_widget(1).unwrap();
        dashboard.begin_drag(source);
        dashboard.drag_over(Some(DropTarget::catalog(0)));
        assert!(
            dashboard
                .drag_state()
                .is_some_and(crate::catalog::is_removal_target)
        );

        assert!(dashboard.drop_on(Some(DropTarget::catalog(0))));
        assert!(!dashboard.layout().contains_id("stats-2"));
    }

    #[test]
    fn test_catalog_to_catalog_and_outside_drops_are_noops() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();

        let source = dashboard
            .drag_source_for_catalog("accounts-overview", 0)
            .unwrap();
        dashboard.begin_drag(source);
        assert!(!dashboard.drop_on(Some(DropTarget::catalog(3))));

        let source = dashboard.drag_source_for_widget(0).unwrap();
        dashboard.begin_drag(source);
        dashboard.end_drag();

        assert_eq!(dashboard.layout(), &Layout::default());
        assert_eq!(dashboard.drag_state(), Some(&DragState::Idle));
    }

    #[test]
    fn test_unregistered_type_is_a_removable_entry() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();

        let source = dashboard
            .drag_source_for_catalog("new-widget-type", 0)
            .unwrap();
        dashboard.begin_drag(source);
        assert!(dashboard.drop_on(Some(DropTarget::dashboard(8))));

        let id = dashboard.widgets()[8].id.clone();
        assert!(id.starts_with("new-widget-type-"));
        assert!(dashboard.remove_widget(&id));
        assert_eq!(dashboard.layout(), &Layout::default());
    }

    #[test]
    fn test_leaving_edit_mode_discards_drag() {
        let (mut dashboard, store) = dashboard();
        dashboard.toggle_edit_mode();
        let source = dashboard.drag_source_for_widget(2).unwrap();
        dashboard.begin_drag(source);

        dashboard.toggle_edit_mode();
        assert_eq!(dashboard.mode(), &Mode::Viewing);
        assert_eq!(store.load(), Layout::default());
    }

    #[test]
    fn test_save_failure_keeps_session() {
        let (mut dashboard, store) = dashboard();
        let (_sub, rx) = dashboard.bus().subscribe("layout.*");
        store.set_fail_writes(true);

        dashboard.toggle_edit_mode();
        dashboard.remove_widget("table-1");
        dashboard.toggle_edit_mode();

        assert_eq!(store.save_count(), 0);
        assert_eq!(dashboard.widgets().len(), 7);

        let topics: Vec<String> = rx.try_iter().map(|e| e.topic).collect();
        assert_eq!(topics, vec!["layout.removed", "layout.save_failed"]);
    }

    #[test]
    fn test_intents_are_published() {
        let (mut dashboard, _) = dashboard();
        let (_sub, rx) = dashboard.bus().subscribe("*");

        dashboard.toggle_edit_mode();
        let source = dashboard.drag_source_for_widget(0).unwrap();
        dashboard.begin_drag(source);
        dashboard.drop_on(Some(DropTarget::catalog(0)));
        dashboard.toggle_edit_mode();

        let events: Vec<_> = rx.try_iter().collect();
        let topics: Vec<&str> = events.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec![
                "edit_mode.changed",
                "drag.start",
                "drag.end",
                "layout.removed",
                "layout.saved",
                "edit_mode.changed",
            ]
        );

        let ended: Arc<DragEnded> = events[2].payload.downcast().unwrap();
        assert_eq!(ended.item.origin(), Zone::Dashboard);
        assert_eq!(ended.target, Some(DropTarget::catalog(0)));

        let saved: Arc<LayoutSaved> = events[4].payload.downcast().unwrap();
        assert_eq!(saved.widgets, 7);
    }

    #[test]
    fn test_reload_restores_stored_layout() {
        let (mut dashboard, store) = dashboard();
        dashboard.toggle_edit_mode();
        dashboard.reorder_widgets(0, 3);
        dashboard.toggle_edit_mode();

        dashboard.remove_widget("table-1");
        dashboard.reload();
        assert_eq!(dashboard.layout(), &store.load());
        assert!(dashboard.layout().contains_id("table-1"));
    }

    #[test]
    fn test_reorder_drop_follows_dragged_widget() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();
        let source = dashboard.drag_source_for_widget(1).unwrap();
        dashboard.begin_drag(source);

        dashboard.remove_widget("stats-1");
        assert!(dashboard.drop_on(Some(DropTarget::dashboard(6))));

        assert_eq!(
            ids(&dashboard),
            vec![
                "stats-3",
                "stats-4",
                "line-chart-1",
                "doughnut-chart-1",
                "bar-chart-1",
                "table-1",
                "stats-2",
            ]
        );
    }

    #[test]
    fn test_drop_of_removed_widget_is_discarded() {
        let (mut dashboard, _) = dashboard();
        dashboard.toggle_edit_mode();
        let source = dashboard.drag_source_for_widget(1).unwrap();
        dashboard.begin_drag(source);

        dashboard.remove_widget("stats-2");
        let before = dashboard.layout().clone();
        assert!(!dashboard.drop_on(Some(DropTarget::dashboard(0))));
        assert_eq!(dashboard.layout(), &before);
    }

    #[test]
    fn test_reload_ends_drag_in_flight() {
        let (mut dashboard, _) = dashboard();
        let (_sub, rx) = dashboard.bus().subscribe("drag.*");

        dashboard.toggle_edit_mode();
        let source = dashboard.drag_source_for_widget(2).unwrap();
        dashboard.begin_drag(source);
        dashboard.reload();

        let events: Vec<_> = rx.try_iter().collect();
        let topics: Vec<&str> = events.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(topics, vec!["drag.start", "drag.end"]);

        let ended: Arc<DragEnded> = events[1].payload.downcast().unwrap();
        assert_eq!(ended.item.dragged_id(), "stats-3");
        assert_eq!(ended.target, None);
        assert!(dashboard.drag_state().is_some_and(|drag| !drag.is_dragging()));
    }
}
