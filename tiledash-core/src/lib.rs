pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod drag;
pub mod event;
pub mod grid;
pub mod model;
pub mod orchestrator;
pub mod registry;
pub mod store;
pub mod widget;

pub use catalog::{CatalogEntry, catalog_entries, is_removal_target};
pub use config::{ConfigError, ConfigFile};
pub use dashboard::{Dashboard, Mode};
pub use drag::{DragItem, DragSource, DropTarget, Zone};
pub use event::{Event as BusEvent, EventBus, EventPayload, LayoutChange, topics};
pub use grid::{GRID_COLUMNS, GridCell, GridItem, GridLayout, GridSpan};
pub use model::{IdGenerator, Layout, LayoutError, Props, WidgetInstance};
pub use orchestrator::{DragOperation, DragState, Transition};
pub use registry::{RenderFn, WidgetRegistry};
pub use store::{FileLayoutStore, LayoutStore, MemoryLayoutStore, StoreError};
pub use widget::{Event, EventResult, Size, Widget, WidgetContainer};
