use crate::consolidator::{ItemCollection, ItemId};
use crate::error::MenuError;
use crate::model::{CanonicalItem, Link, Menu, MenuItem};
use crate::season::{parse_iso_date, short_date};
use chrono::NaiveDate;

const DEFAULT_MEAL_TYPE: &str = "Dinner";

/// Items picked for one export or commit session, in pick order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSelection {
    ids: Vec<ItemId>,
}

impl MenuSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ids, dropping repeats after the first.
    pub fn from_ids<I: IntoIterator<Item = ItemId>>(ids: I) -> Self {
        let mut selection = Self::new();
        for id in ids {
            selection.add(id);
        }
        selection
    }

    pub fn add(&mut self, id: ItemId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| *i != id);
        self.ids.len() != before
    }

    /// Add when absent, remove when present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve the selection against a collection, in selection order.
    pub fn resolve<'a>(
        &self,
        collection: &'a ItemCollection,
    ) -> Result<Vec<&'a CanonicalItem>, MenuError> {
        self.ids.iter().map(|id| collection.require(*id)).collect()
    }
}

/// User-supplied details for a new menu; anything unset gets a default
#[derive(Debug, Clone, Default)]
pub struct MenuDraft {
    pub title: Option<String>,
    pub week_of: Option<NaiveDate>,
    pub file: Option<String>,
}

impl MenuDraft {
    pub fn with_week(mut self, week_of: NaiveDate) -> Self {
        self.week_of = Some(week_of);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Parse an ISO week date for the draft
    pub fn week_from_iso(mut self, iso: &str) -> Result<Self, MenuError> {
        let date = parse_iso_date(iso).ok_or_else(|| MenuError::InvalidDate(iso.to_string()))?;
        self.week_of = Some(date);
        Ok(self)
    }
}

/// Menu entry derived from one canonical item
pub fn menu_item_from(item: &CanonicalItem) -> MenuItem {
    let title = item.display_title().to_string();
    let links = item
        .url
        .as_ref()
        .map(|url| vec![Link::new(title.clone(), url.clone())])
        .unwrap_or_default();

    MenuItem {
        text: title,
        section: item.sections.first().cloned(),
        meal_type: item
            .meal_types
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_MEAL_TYPE.to_string()),
        source_hint: item.source_hints.first().cloned(),
        links,
        urls: Vec::new(),
    }
}

/// Turn a selection into a new [`Menu`], one entry per selected item.
///
/// `today` names the file when the draft has no week.
pub fn build_menu(
    collection: &ItemCollection,
    selection: &MenuSelection,
    draft: &MenuDraft,
    today: NaiveDate,
) -> Result<Menu, MenuError> {
    if selection.is_empty() {
        return Err(MenuError::InvalidSelection(
            "Cannot commit an empty menu".to_string(),
        ));
    }

    let items = selection
        .resolve(collection)?
        .into_iter()
        .map(menu_item_from)
        .collect();

    let stamp = draft.week_of.unwrap_or(today);
    let file = draft
        .file
        .clone()
        .unwrap_or_else(|| format!("menu-{}.md", stamp.format("%Y-%m-%d")));
    let title = draft.title.clone().unwrap_or_else(|| match draft.week_of {
        Some(week) => format!("Menu week of {}", short_date(week)),
        None => "Menu".to_string(),
    });

    Ok(Menu {
        file,
        title: Some(title),
        week_of_date: draft.week_of.map(|d| d.format("%Y-%m-%d").to_string()),
        items,
    })
}
