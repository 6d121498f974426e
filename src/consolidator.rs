//! Canonical item collection and the menu-commit aggregate update.
//!
//! Items live in an arena and are addressed by [`ItemId`], assigned when an
//! item is inserted. Batch updates trust the caller's ids; identity is never
//! re-derived from item text here.

use crate::error::MenuError;
use crate::model::{push_unique, CanonicalItem, ItemsFile, Menu};
use crate::season::Season;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to an item within an [`ItemCollection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection {
    items: Vec<CanonicalItem>,
}

impl ItemCollection {
    pub fn new(items: Vec<CanonicalItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items never move, so the id stays valid for the life of the collection.
    pub fn insert(&mut self, item: CanonicalItem) -> ItemId {
        self.items.push(item);
        ItemId(self.items.len() - 1)
    }

    pub fn get(&self, id: ItemId) -> Option<&CanonicalItem> {
        self.items.get(id.0)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut CanonicalItem> {
        self.items.get_mut(id.0)
    }

    pub fn require(&self, id: ItemId) -> Result<&CanonicalItem, MenuError> {
        self.get(id).ok_or(MenuError::UnknownItem(id.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &CanonicalItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId(index), item))
    }

    pub fn items(&self) -> &[CanonicalItem] {
        &self.items
    }

    pub fn find_by_url(&self, url: &str) -> Option<ItemId> {
        self.iter()
            .find(|(_, item)| {
                item.url.as_deref() == Some(url) || item.urls.iter().any(|u| u == url)
            })
            .map(|(id, _)| id)
    }

    /// Fold a committed menu into the aggregates of the referenced items.
    ///
    /// Set-union semantics: applying the same menu again changes nothing.
    /// All ids are checked before anything is mutated.
    pub fn apply_menu(&mut self, menu: &Menu, ids: &[ItemId]) -> Result<(), MenuError> {
        if let Some(missing) = ids.iter().find(|id| self.get(**id).is_none()) {
            return Err(MenuError::UnknownItem(missing.0));
        }

        let week = menu.week_of_date.as_deref().filter(|w| !w.is_empty());
        let season = Season::from_iso(week);

        for id in ids {
            if let Some(item) = self.items.get_mut(id.0) {
                apply_to_item(item, &menu.file, week, season);
            }
        }

        debug!(
            "Applied menu '{}' to {} item(s) (week: {:?}, season: {:?})",
            menu.file,
            ids.len(),
            week,
            season
        );
        Ok(())
    }

    pub fn to_file(&self) -> ItemsFile {
        ItemsFile {
            items: self.items.clone(),
        }
    }

    pub fn into_inner(self) -> Vec<CanonicalItem> {
        self.items
    }
}

impl From<ItemsFile> for ItemCollection {
    fn from(file: ItemsFile) -> Self {
        ItemCollection::new(file.items)
    }
}

fn apply_to_item(item: &mut CanonicalItem, file: &str, week: Option<&str>, season: Option<Season>) {
    push_unique(&mut item.menu_files, file);
    if let Some(week) = week {
        push_unique(&mut item.menu_weeks, week);
    }
    if let Some(season) = season {
        push_unique(&mut item.menu_seasons, season.as_str());
    }
    item.recount();
}
