use crate::consolidator::{ItemCollection, ItemId};
use crate::model::CanonicalItem;
use crate::season::Season;

/// Criteria for narrowing the item list. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive text searched in link and item texts
    pub query: Option<String>,
    pub season: Option<Season>,
    pub meal_type: Option<String>,
    pub protein: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &CanonicalItem) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            let found = item
                .link_texts
                .iter()
                .chain(item.item_texts.iter())
                .any(|text| text.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        if let Some(season) = self.season {
            if !item.menu_seasons.iter().any(|s| s == season.as_str()) {
                return false;
            }
        }

        if let Some(meal_type) = &self.meal_type {
            if !item
                .meal_types
                .iter()
                .any(|m| m.eq_ignore_ascii_case(meal_type))
            {
                return false;
            }
        }

        if let Some(protein) = &self.protein {
            match &item.main_protein {
                Some(p) if p.eq_ignore_ascii_case(protein) => {}
                _ => return false,
            }
        }

        true
    }

    /// Matching items, most frequent first.
    pub fn apply<'a>(&self, collection: &'a ItemCollection) -> Vec<(ItemId, &'a CanonicalItem)> {
        let matched: Vec<(ItemId, &CanonicalItem)> = collection
            .iter()
            .filter(|(_, item)| self.matches(item))
            .collect();
        sort_items(matched)
    }
}

/// Count descending, then display title.
pub fn sort_items(mut items: Vec<(ItemId, &CanonicalItem)>) -> Vec<(ItemId, &CanonicalItem)> {
    items.sort_by(|(_, a), (_, b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.display_title().cmp(b.display_title()))
    });
    items
}
