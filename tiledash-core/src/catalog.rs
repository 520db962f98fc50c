// tiledash-core/src/catalog.rs
use crate::drag::Zone;
use crate::model::Layout;
use crate::orchestrator::DragState;
use crate::registry::WidgetRegistry;

/// One row of the catalog panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub widget_type: String,
    pub label: String,
    /// Already placed, so it cannot be dragged in again
    pub disabled: bool,
}

/// Catalog rows for every registered type, in registration order.
///
/// Derived from the layout on each call; nothing is cached.
pub fn catalog_entries(registry: &WidgetRegistry, layout: &Layout) -> Vec<CatalogEntry> {
    registry
        .types()
        .map(|widget_type| CatalogEntry {
            widget_type: widget_type.to_string(),
            label: registry.label(widget_type).to_string(),
            disabled: layout.contains_type(widget_type),
        })
        .collect()
}

/// Whether the catalog should present itself as a removal target
pub fn is_removal_target(drag: &DragState) -> bool {
    drag.operation()
        .is_some_and(|op| op.item.origin() == Zone::Dashboard)
}
