// tiledash-core/src/widget.rs
use ratatui::{buffer::Buffer, layout::Rect};
use std::time::Duration;

/// Core widget trait with lifecycle hooks
pub trait Widget: Send + Sync {
    /// Called once when the widget is placed on the dashboard
    fn on_mount(&mut self) {}

    /// Called every tick with delta time since last update
    fn on_update(&mut self, _delta: Duration) {}

    /// Handle input events (keyboard, mouse, custom events)
    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    /// Render the widget to the buffer
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// Render the widget with focus awareness (default implementation calls render)
    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, _focused: bool) {
        self.render(area, buf);
    }

    /// Widget's preferred size (None = grid default)
    fn preferred_size(&self) -> Option<Size> {
        None
    }

    /// Whether widget needs regular updates (for animations/polling)
    fn needs_update(&self) -> bool {
        false
    }

    /// Cleanup when the widget is removed from the dashboard
    fn on_unmount(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
    Custom(String, Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed, // Stop propagation
    Ignored,  // Continue to next widget
}

/// Rendered widget bound to one placed instance
pub struct WidgetContainer {
    widget: Box<dyn Widget>,
    last_update: std::time::Instant,
    mounted: bool,
    instance_id: String,
    widget_type: String,
}

impl WidgetContainer {
    pub fn new(instance_id: String, widget_type: String, widget: Box<dyn Widget>) -> Self {
        Self {
            widget,
            last_update: std::time::Instant::now(),
            mounted: false,
            instance_id,
            widget_type,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn preferred_height(&self) -> Option<u16> {
        self.widget.preferred_size().map(|s| s.height)
    }

    pub fn mount(&mut self) {
        if !self.mounted {
            self.widget.on_mount();
            self.mounted = true;
        }
    }

    pub fn update(&mut self) {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_update);

        if self.widget.needs_update() {
            self.widget.on_update(delta);
        }

        self.last_update = now;
    }

    pub fn handle_event(&mut self, event: Event) -> EventResult {
        self.widget.on_event(event)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.widget.render(area, buf);
    }

    pub fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        self.widget.render_focused(area, buf, focused);
    }

    pub fn unmount(&mut self) {
        if self.mounted {
            self.widget.on_unmount();
            self.mounted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        mounts: Arc<AtomicUsize>,
        unmounts: Arc<AtomicUsize>,
    }

    impl Widget for Counting {
        fn on_mount(&mut self) {
            self.mounts.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self, _area: Rect, _buf: &mut Buffer) {}

        fn preferred_size(&self) -> Option<Size> {
            Some(Size {
                width: 10,
                height: 4,
            })
        }

        fn on_unmount(&mut self) {
            self.unmounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_mount_is_idempotent() {
        let widget = Counting::default();
        let mounts = widget.mounts.clone();
        let unmounts = widget.unmounts.clone();
        let mut container =
            WidgetContainer::new("table-1".into(), "table".into(), Box::new(widget));

        container.mount();
        container.mount();
        assert_eq!(mounts.load(Ordering::SeqCst), 1);
        assert!(container.is_mounted());

        container.unmount();
        container.unmount();
        assert_eq!(unmounts.load(Ordering::SeqCst), 1);
        assert_eq!(container.preferred_height(), Some(4));
        assert_eq!(container.instance_id(), "table-1");
    }
}
