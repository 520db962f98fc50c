// tiledash-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque configuration bag handed to a widget's render function
pub type Props = serde_json::Map<String, serde_json::Value>;

/// A placed widget occurrence on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetInstance {
    /// Unique per placed occurrence, never reused
    pub id: String,
    /// Key into the widget registry
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub props: Props,
}

impl WidgetInstance {
    pub fn new(id: impl Into<String>, widget_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            props: Props::new(),
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("duplicate widget id: {0}")]
    DuplicateId(String),
    #[error("duplicate widget type: {0}")]
    DuplicateType(String),
}

/// Ordered widget instances; position is the visual reading order.
///
/// Holds two invariants at all times: ids are unique and types are unique.
/// Deserialization goes through [`Layout::from_instances`], so stored data
/// that breaks either invariant is rejected like any other schema mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WidgetInstance>", into = "Vec<WidgetInstance>")]
pub struct Layout {
    widgets: Vec<WidgetInstance>,
}

/// Types of the built-in default layout, in order, paired with their ids
const DEFAULT_WIDGETS: &[(&str, &str)] = &[
    ("stats-1", "stats-balance"),
    ("stats-2", "stats-income"),
    ("stats-3", "stats-expenses"),
    ("stats-4", "stats-savings"),
    ("line-chart-1", "line-chart"),
    ("doughnut-chart-1", "doughnut-chart"),
    ("bar-chart-1", "bar-chart"),
    ("table-1", "table"),
];

impl Default for Layout {
    /// The layout shown on first launch or when stored data is unusable.
    /// Props are left empty so each widget shows its built-in sample data.
    fn default() -> Self {
        Self {
            widgets: DEFAULT_WIDGETS
                .iter()
                .map(|(id, widget_type)| WidgetInstance::new(*id, *widget_type))
                .collect(),
        }
    }
}

impl TryFrom<Vec<WidgetInstance>> for Layout {
    type Error = LayoutError;

    fn try_from(widgets: Vec<WidgetInstance>) -> Result<Self, Self::Error> {
        Self::from_instances(widgets)
    }
}

impl From<Layout> for Vec<WidgetInstance> {
    fn from(layout: Layout) -> Self {
        layout.widgets
    }
}

impl Layout {
    pub fn empty() -> Self {
        Self {
            widgets: Vec::new(),
        }
    }

    /// Build a layout, rejecting duplicate ids or types
    pub fn from_instances(widgets: Vec<WidgetInstance>) -> Result<Self, LayoutError> {
        let mut ids = HashSet::new();
        let mut types = HashSet::new();

        for widget in &widgets {
            if !ids.insert(widget.id.as_str()) {
                return Err(LayoutError::DuplicateId(widget.id.clone()));
            }
            if !types.insert(widget.widget_type.as_str()) {
                return Err(LayoutError::DuplicateType(widget.widget_type.clone()));
            }
        }

        Ok(Self { widgets })
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WidgetInstance> {
        self.widgets.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn contains_type(&self, widget_type: &str) -> bool {
        self.widgets.iter().any(|w| w.widget_type == widget_type)
    }

    /// Insert at `index` (clamped to the end). Refuses duplicate ids or types.
    pub fn insert(&mut self, index: usize, instance: WidgetInstance) -> Option<usize> {
        if self.contains_id(&instance.id) || self.contains_type(&instance.widget_type) {
            return None;
        }

        let index = index.min(self.widgets.len());
        self.widgets.insert(index, instance);
        Some(index)
    }

    /// Remove by id, returning the instance and the index it occupied
    pub fn remove(&mut self, id: &str) -> Option<(usize, WidgetInstance)> {
        let index = self.position(id)?;
        Some((index, self.widgets.remove(index)))
    }

    /// Move the widget at `from` so it ends up at `to` (clamped to the last slot).
    ///
    /// Returns the effective destination, or `None` when nothing moved.
    pub fn move_widget(&mut self, from: usize, to: usize) -> Option<usize> {
        if from >= self.widgets.len() {
            return None;
        }

        let to = to.min(self.widgets.len() - 1);
        if from == to {
            return None;
        }

        let widget = self.widgets.remove(from);
        self.widgets.insert(to, widget);
        Some(to)
    }
}

/// Produces `<type>-<millis>` instance ids.
///
/// The timestamp part is bumped whenever the clock has not advanced past the
/// last issued value, so two adds within the same millisecond still get
/// distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self, widget_type: &str, layout: &Layout) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        self.generate_at(widget_type, now, layout)
    }

    fn generate_at(&mut self, widget_type: &str, now: u64, layout: &Layout) -> String {
        let mut stamp = now.max(self.last.saturating_add(1));
        let mut id = format!("{}-{}", widget_type, stamp);

        // Stored layouts may already hold ids from an earlier session
        while layout.contains_id(&id) {
            stamp += 1;
            id = format!("{}-{}", widget_type, stamp);
        }

        self.last = stamp;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(layout: &Layout) -> Vec<&str> {
        layout.widgets().iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_default_layout_order() {
        let layout = Layout::default();
        assert_eq!(
            ids(&layout),
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
        assert!(Layout::from_instances(layout.widgets().to_vec()).is_ok());
        // Widgets draw their built-in sample figures when props are empty
        assert!(layout.widgets().iter().all(|w| w.props.is_empty()));
    }

    #[test]
    fn test_rejects_duplicates() {
        let dup_id = vec![
            WidgetInstance::new("a", "stats-balance"),
            WidgetInstance::new("a", "table"),
        ];
        assert_eq!(
            Layout::from_instances(dup_id),
            Err(LayoutError::DuplicateId("a".to_string()))
        );

        let dup_type = vec![
            WidgetInstance::new("a", "table"),
            WidgetInstance::new("b", "table"),
        ];
        assert_eq!(
            Layout::from_instances(dup_type),
            Err(LayoutError::DuplicateType("table".to_string()))
        );
    }

    #[test]
    fn test_insert_guards_and_clamps() {
        let mut layout = Layout::default();
        assert_eq!(layout.insert(0, WidgetInstance::new("table-2", "table")), None);
        assert_eq!(
            layout.insert(99, WidgetInstance::new("accounts-1", "accounts-overview")),
            Some(8)
        );
        assert_eq!(layout.len(), 9);
    }

    #[test]
    fn test_move_widget() {
        let mut layout = Layout::default();
        assert_eq!(layout.move_widget(0, 7), Some(7));
        assert_eq!(ids(&layout)[7], "stats-1");
        assert_eq!(ids(&layout)[0], "stats-2");

        assert_eq!(layout.move_widget(3, 3), None);
        assert_eq!(layout.move_widget(42, 0), None);
        assert_eq!(layout.move_widget(0, 100), Some(7));
        assert_eq!(ids(&layout)[7], "stats-2");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut layout = Layout::default();
        assert!(layout.remove("nope").is_none());
        assert_eq!(layout, Layout::default());
    }

    #[test]
    fn test_serialized_shape() {
        let layout = Layout::from_instances(vec![WidgetInstance::new("table-1", "table")]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, r#"[{"id":"table-1","type":"table","props":{}}]"#);

        let parsed: Layout = serde_json::from_str(r#"[{"id":"x","type":"table"}]"#).unwrap();
        assert!(parsed.widgets()[0].props.is_empty());
    }

    #[test]
    fn test_duplicate_json_is_rejected() {
        let json = r#"[{"id":"a","type":"table"},{"id":"b","type":"table"}]"#;
        assert!(serde_json::from_str::<Layout>(json).is_err());
    }

    #[test]
    fn test_id_generator_never_repeats() {
        let layout = Layout::empty();
        let mut ids = IdGenerator::new();
        let first = ids.generate_at("table", 1000, &layout);
        let second = ids.generate_at("table", 1000, &layout);
        assert_eq!(first, "table-1000");
        assert_eq!(second, "table-1001");
    }

    #[test]
    fn test_id_generator_skips_stored_ids() {
        let layout = Layout::from_instances(vec![WidgetInstance::new("table-500", "table")]).unwrap();
        let mut ids = IdGenerator::new();
        assert_eq!(ids.generate_at("table", 500, &layout), "table-501");
    }
}
