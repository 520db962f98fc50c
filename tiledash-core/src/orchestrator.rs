// tiledash-core/src/orchestrator.rs

use crate::drag::{DragItem, DragSource, DropTarget, Zone};
use crate::event::LayoutChange;
use crate::model::{IdGenerator, Layout, WidgetInstance};
use tracing::debug;

/// An in-flight drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOperation {
    pub item: DragItem,
    /// Drop target currently under the pointer or keyboard cursor
    pub hover: Option<DropTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragOperation),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn operation(&self) -> Option<&DragOperation> {
        match self {
            DragState::Dragging(op) => Some(op),
            DragState::Idle => None,
        }
    }

    /// Idle -> Dragging. Only one gesture can be active, so a second start
    /// while dragging is ignored.
    pub fn begin(&mut self, source: DragSource) -> Option<&DragItem> {
        if self.is_dragging() {
            debug!(item = ?source.item(), "drag already in progress, ignoring start");
            return None;
        }

        *self = DragState::Dragging(DragOperation {
            item: source.into_item(),
            hover: None,
        });
        self.operation().map(|op| &op.item)
    }

    pub fn hover(&mut self, target: Option<DropTarget>) {
        if let DragState::Dragging(op) = self {
            op.hover = target;
        }
    }

    /// Dragging -> Idle, classifying the drop
    pub fn finish(&mut self, target: Option<DropTarget>) -> Option<(DragItem, Transition)> {
        match std::mem::take(self) {
            DragState::Dragging(op) => {
                let transition = Transition::classify(&op.item, target);
                Some((op.item, transition))
            }
            DragState::Idle => None,
        }
    }

    /// Dragging -> Idle without a drop
    pub fn cancel(&mut self) -> Option<DragItem> {
        match std::mem::take(self) {
            DragState::Dragging(op) => Some(op.item),
            DragState::Idle => None,
        }
    }
}

/// Layout change resolved from `(origin zone, destination zone)`.
///
/// Dashboard to dashboard reorders, catalog to dashboard adds (unless the
/// type is already placed), dashboard to catalog removes. Anything else,
/// including a drop outside every zone, is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Reorder { from: usize, to: usize },
    Add { widget_type: String, index: usize },
    Remove { id: String },
    Discard,
}

impl Transition {
    pub fn classify(item: &DragItem, target: Option<DropTarget>) -> Transition {
        let Some(target) = target else {
            return Transition::Discard;
        };

        match (item, target.zone) {
            (DragItem::Placed { index, .. }, Zone::Dashboard) => Transition::Reorder {
                from: *index,
                to: target.index,
            },
            (DragItem::CatalogType { widget_type, .. }, Zone::Dashboard) => Transition::Add {
                widget_type: widget_type.clone(),
                index: target.index,
            },
            (DragItem::Placed { id, .. }, Zone::Catalog) => Transition::Remove { id: id.clone() },
            (DragItem::CatalogType { .. }, Zone::Catalog) => Transition::Discard,
        }
    }

    /// Re-anchor a reorder on where the dragged instance sits in `layout`
    /// now. The layout may have changed since the drag began; an instance
    /// that is gone turns the drop into a discard.
    pub fn rebase(self, item: &DragItem, layout: &Layout) -> Transition {
        match (self, item) {
            (Transition::Reorder { to, .. }, DragItem::Placed { id, .. }) => {
                match layout.position(id) {
                    Some(from) => Transition::Reorder { from, to },
                    None => Transition::Discard,
                }
            }
            (transition, _) => transition,
        }
    }

    /// Apply to `layout`. Returns the change made, or `None` for a no-op.
    ///
    /// Every branch goes through the guarded [`Layout`] mutators, so id and
    /// type uniqueness survive any transition.
    pub fn apply(&self, layout: &mut Layout, ids: &mut IdGenerator) -> Option<LayoutChange> {
        match self {
            Transition::Reorder { from, to } => {
                let id = layout.get(*from)?.id.clone();
                let to = layout.move_widget(*from, *to)?;
                Some(LayoutChange::Reordered {
                    id,
                    from: *from,
                    to,
                })
            }
            Transition::Add { widget_type, index } => {
                if layout.contains_type(widget_type) {
                    debug!(%widget_type, "type already placed, ignoring add");
                    return None;
                }

                let instance = WidgetInstance::new(ids.generate(widget_type, layout), widget_type.as_str());
                let index = layout.insert(*index, instance.clone())?;
                Some(LayoutChange::Added { instance, index })
            }
            Transition::Remove { id } => {
                let (index, instance) = layout.remove(id)?;
                Some(LayoutChange::Removed { instance, index })
            }
            Transition::Discard => None,
        }
    }
}
