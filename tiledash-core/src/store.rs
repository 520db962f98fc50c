// tiledash-core/src/store.rs

use std::cell::{Cell, RefCell};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::config::ConfigError;
use crate::model::Layout;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read layout at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write layout at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored layout is invalid: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize layout: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the dashboard keeps its layout. Reads never fail outward:
/// anything unusable becomes the default layout.
pub trait LayoutStore {
    /// Read the stored layout. `Ok(None)` means nothing has been stored yet.
    fn try_load(&self) -> Result<Option<Layout>, StoreError>;

    fn try_save(&self, layout: &Layout) -> Result<(), StoreError>;

    /// Stored layout, or the default one if it is missing or unusable
    fn load(&self) -> Layout {
        match self.try_load() {
            Ok(Some(layout)) => {
                debug!(widgets = layout.len(), "loaded stored layout");
                layout
            }
            Ok(None) => {
                debug!("no stored layout, using default");
                Layout::default()
            }
            Err(e) => {
                warn!(error = %e, "stored layout unusable, using default");
                Layout::default()
            }
        }
    }

    /// Write and log the outcome. A failure leaves the caller's in-memory
    /// layout as the only copy; the error is handed back for reporting.
    fn save(&self, layout: &Layout) -> Result<(), StoreError> {
        match self.try_save(layout) {
            Ok(()) => {
                info!(widgets = layout.len(), "layout saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save layout, keeping in-memory copy");
                Err(e)
            }
        }
    }
}

/// Parse a serialized layout, validating uniqueness invariants
pub fn parse_layout(content: &str) -> Result<Layout, StoreError> {
    serde_json::from_str(content).map_err(StoreError::Parse)
}

pub fn serialize_layout(layout: &Layout) -> Result<String, StoreError> {
    serde_json::to_string_pretty(layout).map_err(StoreError::Serialize)
}

/// Read a layout file; a missing file is `Ok(None)`
pub fn read_layout(path: &Path) -> Result<Option<Layout>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_layout(&content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Write a layout file, creating parent directories as needed
pub fn write_layout(path: &Path, layout: &Layout) -> Result<(), StoreError> {
    let content = serialize_layout(layout)?;

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Local key/value storage: one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    path: PathBuf,
}

impl FileLayoutStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.resolved_dir()?, &config.key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStore for FileLayoutStore {
    fn try_load(&self) -> Result<Option<Layout>, StoreError> {
        read_layout(&self.path)
    }

    fn try_save(&self, layout: &Layout) -> Result<(), StoreError> {
        write_layout(&self.path, layout)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    value: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_writes: Cell<bool>,
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// while the dashboard owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutStore {
    inner: Rc<MemoryInner>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw stored content, as if written by an earlier session
    pub fn with_raw(content: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.value.replace(Some(content.into()));
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.inner.value.borrow().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.inner.saves.get()
    }

    /// Make subsequent writes fail, like a full storage quota
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn try_load(&self) -> Result<Option<Layout>, StoreError> {
        self.inner
            .value
            .borrow()
            .as_deref()
            .map(parse_layout)
            .transpose()
    }

    fn try_save(&self, layout: &Layout) -> Result<(), StoreError> {
        if self.inner.fail_writes.get() {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }

        let content = serialize_layout(layout)?;
        self.inner.value.replace(Some(content));
        self.inner.saves.set(self.inner.saves.get() + 1);
        Ok(())
    }
}
