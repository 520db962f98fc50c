use crate::{GridSpan, Props, Widget};
use std::collections::HashMap;

/// Builds a renderable widget from an instance's props
pub type RenderFn = Box<dyn Fn(&Props) -> Box<dyn Widget>>;

struct RegistryEntry {
    label: String,
    size_hint: GridSpan,
    render: RenderFn,
}

/// Static mapping from widget type to its render function and size hint.
///
/// Lookups never fail loudly: an unknown type resolves to `None` and the
/// caller renders nothing for it.
pub struct WidgetRegistry {
    entries: HashMap<String, RegistryEntry>,
    order: Vec<String>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a widget type. Re-registering a type replaces its entry but
    /// keeps its original catalog position.
    pub fn register(&mut self, widget_type: &str, label: &str, size_hint: GridSpan, render: RenderFn) {
        let entry = RegistryEntry {
            label: label.to_string(),
            size_hint,
            render,
        };

        if self.entries.insert(widget_type.to_string(), entry).is_none() {
            self.order.push(widget_type.to_string());
        }
    }

    pub fn resolve(&self, widget_type: &str) -> Option<&RenderFn> {
        self.entries.get(widget_type).map(|e| &e.render)
    }

    /// Column span for a type; unknown types take the full width
    pub fn size_hint(&self, widget_type: &str) -> GridSpan {
        self.entries
            .get(widget_type)
            .map(|e| e.size_hint)
            .unwrap_or(GridSpan::FULL)
    }

    /// Human-readable name, falling back to the type key itself
    pub fn label<'a>(&'a self, widget_type: &'a str) -> &'a str {
        self.entries
            .get(widget_type)
            .map(|e| e.label.as_str())
            .unwrap_or(widget_type)
    }

    pub fn contains(&self, widget_type: &str) -> bool {
        self.entries.contains_key(widget_type)
    }

    /// Resolve and render in one step
    pub fn create(&self, widget_type: &str, props: &Props) -> Option<Box<dyn Widget>> {
        self.resolve(widget_type).map(|render| render(props))
    }

    /// All known types in registration order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Register a widget type whose struct has a `from_props(&Props)` constructor
#[macro_export]
macro_rules! register_widget {
    ($registry:expr, $widget_type:expr, $label:expr, $span:expr, $widget:ty) => {
        $registry.register(
            $widget_type,
            $label,
            $span,
            Box::new(|props: &$crate::Props| -> Box<dyn $crate::Widget> {
                Box::new(<$widget>::from_props(props))
            }),
        );
    };
}
