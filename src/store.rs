//! Persistence boundary.
//!
//! [`JsonFileStore`] plays the desktop bridge: a directory holding
//! `menus.json` and `menu_items_refactored.json`. Saves after a commit are
//! best effort; see [`persist_detached`].

use crate::error::MenuError;
use crate::model::{CanonicalItem, ItemsFile, Menu, MenusFile};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const MENUS_FILE: &str = "menus.json";
pub const RECIPES_FILE: &str = "recipes.json";
pub const ITEMS_FILE: &str = "menu_items_refactored.json";

/// Menus and items as held by a store
#[derive(Debug, Clone, Default)]
pub struct StoredData {
    pub menus: MenusFile,
    pub items: ItemsFile,
}

#[async_trait]
pub trait DataStore: Send + Sync {
    /// `Ok(None)` when the store has never been written.
    async fn load(&self) -> Result<Option<StoredData>, MenuError>;

    async fn save(&self, menus: &[Menu], items: &[CanonicalItem]) -> Result<(), MenuError>;
}

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn menus_path(&self) -> PathBuf {
        self.dir.join(MENUS_FILE)
    }

    fn items_path(&self) -> PathBuf {
        self.dir.join(ITEMS_FILE)
    }
}

#[async_trait]
impl DataStore for JsonFileStore {
    async fn load(&self) -> Result<Option<StoredData>, MenuError> {
        let menus_path = self.menus_path();
        let items_path = self.items_path();

        if !menus_path.exists() || !items_path.exists() {
            debug!("No stored data in {}", self.dir.display());
            return Ok(None);
        }

        let menus_raw = tokio::fs::read_to_string(&menus_path).await?;
        let items_raw = tokio::fs::read_to_string(&items_path).await?;

        Ok(Some(StoredData {
            menus: serde_json::from_str(&menus_raw)?,
            items: serde_json::from_str(&items_raw)?,
        }))
    }

    async fn save(&self, menus: &[Menu], items: &[CanonicalItem]) -> Result<(), MenuError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let menus_json = serde_json::to_string_pretty(&MenusFile {
            menus: menus.to_vec(),
        })?;
        let items_json = serde_json::to_string_pretty(&ItemsFile {
            items: items.to_vec(),
        })?;

        tokio::fs::write(self.menus_path(), menus_json).await?;
        tokio::fs::write(self.items_path(), items_json).await?;

        info!(
            "Saved {} menus and {} items to {}",
            menus.len(),
            items.len(),
            self.dir.display()
        );
        Ok(())
    }
}

/// Save in a background task. Failures are logged and dropped; the in-memory
/// state is already authoritative. The handle resolves once the attempt ends.
pub fn persist_detached(
    store: Arc<dyn DataStore>,
    menus: Vec<Menu>,
    items: Vec<CanonicalItem>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = store.save(&menus, &items).await {
            warn!("Ignoring failed save of menu data: {}", e);
        }
    })
}
