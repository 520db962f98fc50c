// tiledash-core/src/drag.rs

/// Surface a drag starts from or ends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Dashboard,
    Catalog,
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    /// A placed widget, identified by instance id
    Placed { id: String, index: usize },
    /// A catalog entry, identified by widget type
    CatalogType { widget_type: String, index: usize },
}

impl DragItem {
    pub fn origin(&self) -> Zone {
        match self {
            DragItem::Placed { .. } => Zone::Dashboard,
            DragItem::CatalogType { .. } => Zone::Catalog,
        }
    }

    /// Instance id for placed widgets, type key for catalog entries
    pub fn dragged_id(&self) -> &str {
        match self {
            DragItem::Placed { id, .. } => id,
            DragItem::CatalogType { widget_type, .. } => widget_type,
        }
    }

    /// Position within the origin zone at drag start
    pub fn source_index(&self) -> usize {
        match self {
            DragItem::Placed { index, .. } | DragItem::CatalogType { index, .. } => *index,
        }
    }
}

/// Where a drag was released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub zone: Zone,
    pub index: usize,
}

impl DropTarget {
    pub fn dashboard(index: usize) -> Self {
        Self {
            zone: Zone::Dashboard,
            index,
        }
    }

    pub fn catalog(index: usize) -> Self {
        Self {
            zone: Zone::Catalog,
            index,
        }
    }
}

/// Handle that makes one item draggable.
///
/// Not constructible outside the crate: its existence is the proof that
/// dragging is currently allowed for the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSource {
    item: DragItem,
}

impl DragSource {
    pub(crate) fn new(item: DragItem) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &DragItem {
        &self.item
    }

    pub fn origin(&self) -> Zone {
        self.item.origin()
    }

    pub(crate) fn into_item(self) -> DragItem {
        self.item
    }
}
