use crate::commit::{build_menu, MenuDraft, MenuSelection};
use crate::config::AppConfig;
use crate::consolidator::{ItemCollection, ItemId};
use crate::error::MenuError;
use crate::model::{CanonicalItem, ItemsFile, Menu, MenusFile, Recipe, RecipesFile};
use crate::scrape::RecipeScraper;
use crate::store::{persist_detached, DataStore, ITEMS_FILE, MENUS_FILE, RECIPES_FILE};
use chrono::NaiveDate;
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Everything the application works on during one session
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub menus: Vec<Menu>,
    pub recipes: Vec<Recipe>,
    pub items: ItemCollection,
}

async fn read_data_file<T: DeserializeOwned>(path: &Path) -> Result<T, MenuError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MenuError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    serde_json::from_str(&raw).map_err(|e| MenuError::LoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

impl Library {
    pub fn new(menus: Vec<Menu>, recipes: Vec<Recipe>, items: Vec<CanonicalItem>) -> Self {
        Self {
            menus,
            recipes,
            items: ItemCollection::new(items),
        }
    }

    /// Read the bundled data files from `data_dir`. Any missing file fails the load.
    pub async fn load_bundled(data_dir: &Path) -> Result<Self, MenuError> {
        let menus: MenusFile = read_data_file(&data_dir.join(MENUS_FILE)).await?;
        let recipes: RecipesFile = read_data_file(&data_dir.join(RECIPES_FILE)).await?;
        let items: ItemsFile = read_data_file(&data_dir.join(ITEMS_FILE)).await?;

        info!(
            "Loaded {} menus, {} recipes, {} items from {}",
            menus.menus.len(),
            recipes.recipes.len(),
            items.items.len(),
            data_dir.display()
        );
        Ok(Self::new(menus.menus, recipes.recipes, items.items))
    }

    /// Load for a session: desktop-store menus and items win over the bundled
    /// ones when the store has been written. Recipes always come bundled.
    pub async fn load(config: &AppConfig, store: Option<&dyn DataStore>) -> Result<Self, MenuError> {
        let stored = match store {
            Some(store) => store.load().await?,
            None => None,
        };

        match stored {
            Some(stored) => {
                debug!("Using menus and items from the desktop store");
                let recipes: RecipesFile =
                    read_data_file(&config.data_dir.join(RECIPES_FILE)).await?;
                Ok(Self::new(
                    stored.menus.menus,
                    recipes.recipes,
                    stored.items.items,
                ))
            }
            None => Self::load_bundled(&config.data_dir).await,
        }
    }

    /// Commit a selection as a new menu and fold it into the item aggregates.
    ///
    /// The menu goes to the front of the list. Re-committing an identical menu
    /// replaces it, so committing twice leaves the same state as once; a
    /// different menu under an existing file name is rejected.
    pub fn commit(
        &mut self,
        selection: &MenuSelection,
        draft: &MenuDraft,
        today: NaiveDate,
    ) -> Result<Menu, MenuError> {
        let menu = build_menu(&self.items, selection, draft, today)?;
        if let Some(existing) = self.menus.iter().find(|m| m.file == menu.file) {
            if *existing != menu {
                return Err(MenuError::InvalidSelection(format!(
                    "A different menu is already saved as '{}'",
                    menu.file
                )));
            }
        }
        self.items.apply_menu(&menu, selection.ids())?;

        self.menus.retain(|m| m.file != menu.file);
        self.menus.insert(0, menu.clone());

        info!(
            "Committed menu '{}' with {} items",
            menu.file,
            menu.items.len()
        );
        Ok(menu)
    }

    /// [`Library::commit`] followed by a best-effort background save.
    pub fn commit_and_persist(
        &mut self,
        selection: &MenuSelection,
        draft: &MenuDraft,
        today: NaiveDate,
        store: Arc<dyn DataStore>,
    ) -> Result<(Menu, JoinHandle<()>), MenuError> {
        let menu = self.commit(selection, draft, today)?;
        let handle = persist_detached(
            store,
            self.menus.clone(),
            self.items.items().to_vec(),
        );
        Ok((menu, handle))
    }

    /// Scrape `url` and add it as a new item. A URL that is already known
    /// returns the existing id without calling the scraper.
    pub async fn add_from_url(
        &mut self,
        scraper: &dyn RecipeScraper,
        url: &str,
    ) -> Result<ItemId, MenuError> {
        let url = url.trim();
        if let Some(existing) = self.items.find_by_url(url) {
            debug!("{} is already item {}", url, existing);
            return Ok(existing);
        }

        let result = scraper.scrape(url).await?;
        let id = self.items.insert(CanonicalItem::from_scrape(url, result));
        info!("Added item {} from {}", id, url);
        Ok(id)
    }
}
