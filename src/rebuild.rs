//! Offline rebuild of the canonical item collection from raw menus.
//!
//! Occurrences are grouped by URL, then entries sharing a title are merged.
//! Commits never go through here; they update existing items in place.

use crate::model::{push_unique, CanonicalItem, Menu, MenuItem};
use crate::season::Season;
use log::{debug, info};
use std::collections::HashMap;

/// Canonical items for every occurrence in `menus`, most frequent first.
pub fn build_canonical_items(menus: &[Menu]) -> Vec<CanonicalItem> {
    let mut order: Vec<CanonicalItem> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for menu in menus {
        let week = menu.week_of_date.as_deref().filter(|w| !w.is_empty());
        let season = Season::from_iso(week);

        for (index, item) in menu.items.iter().enumerate() {
            let urls = occurrence_urls(item);

            if urls.is_empty() {
                let key = format!("no_url::{}::{}", menu.file, index);
                let entry = entry_for(&mut order, &mut by_key, key, None);
                record_occurrence(entry, menu, week, season, item);
                continue;
            }

            for url in urls {
                let entry =
                    entry_for(&mut order, &mut by_key, url.clone(), Some(url.as_str()));
                push_unique(&mut entry.urls, &url);
                record_occurrence(entry, menu, week, season, item);
                for link in item.links.iter().filter(|l| l.url == url) {
                    push_unique(&mut entry.link_texts, &link.text);
                }
            }
        }
    }

    for item in order.iter_mut() {
        item.count = item.menu_files.len();
    }
    debug!("Grouped occurrences into {} entries", order.len());

    let mut merged = merge_by_title(order);
    merged.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.url.as_deref().unwrap_or("").cmp(b.url.as_deref().unwrap_or("")))
    });

    info!(
        "Rebuilt {} canonical items from {} menus",
        merged.len(),
        menus.len()
    );
    merged
}

fn occurrence_urls(item: &MenuItem) -> Vec<String> {
    item.links
        .iter()
        .map(|link| link.url.clone())
        .filter(|url| !url.is_empty())
        .chain(item.urls.iter().cloned())
        .collect()
}

fn entry_for<'a>(
    order: &'a mut Vec<CanonicalItem>,
    by_key: &mut HashMap<String, usize>,
    key: String,
    url: Option<&str>,
) -> &'a mut CanonicalItem {
    let index = *by_key.entry(key).or_insert_with(|| {
        order.push(CanonicalItem {
            url: url.map(str::to_string),
            ..Default::default()
        });
        order.len() - 1
    });
    &mut order[index]
}

fn record_occurrence(
    entry: &mut CanonicalItem,
    menu: &Menu,
    week: Option<&str>,
    season: Option<Season>,
    item: &MenuItem,
) {
    push_unique(&mut entry.menu_files, &menu.file);
    if let Some(week) = week {
        push_unique(&mut entry.menu_weeks, week);
    }
    if let Some(season) = season {
        push_unique(&mut entry.menu_seasons, season.as_str());
    }
    push_unique(&mut entry.meal_types, &item.meal_type);
    if let Some(section) = &item.section {
        push_unique(&mut entry.sections, section);
    }
    if let Some(hint) = &item.source_hint {
        push_unique(&mut entry.source_hints, hint);
    }
    push_unique(&mut entry.item_texts, &item.text);
}

/// Merge entries whose primary titles match case-insensitively.
///
/// The first non-null URL wins; list fields are unioned; untitled entries are
/// kept as-is at the end.
pub fn merge_by_title(items: Vec<CanonicalItem>) -> Vec<CanonicalItem> {
    let mut groups: Vec<Vec<CanonicalItem>> = Vec::new();
    let mut by_title: HashMap<String, usize> = HashMap::new();
    let mut untitled = Vec::new();

    for item in items {
        let title_key = item.primary_title().map(str::to_lowercase);
        match title_key {
            Some(key) => match by_title.get(&key) {
                Some(&index) => groups[index].push(item),
                None => {
                    by_title.insert(key, groups.len());
                    groups.push(vec![item]);
                }
            },
            None => untitled.push(item),
        }
    }

    let mut merged: Vec<CanonicalItem> = groups
        .into_iter()
        .map(|mut group| {
            if group.len() == 1 {
                group.remove(0)
            } else {
                debug!(
                    "Merging {} entries titled '{}'",
                    group.len(),
                    group[0].display_title()
                );
                merge_group(group)
            }
        })
        .collect();
    merged.extend(untitled);
    merged
}

fn merge_group(group: Vec<CanonicalItem>) -> CanonicalItem {
    let mut merged = CanonicalItem {
        url: group.iter().find_map(|item| item.url.clone()),
        ..Default::default()
    };

    for item in &group {
        let lists: [(&mut Vec<String>, &Vec<String>); 10] = [
            (&mut merged.urls, &item.urls),
            (&mut merged.link_texts, &item.link_texts),
            (&mut merged.menu_files, &item.menu_files),
            (&mut merged.menu_weeks, &item.menu_weeks),
            (&mut merged.menu_seasons, &item.menu_seasons),
            (&mut merged.meal_types, &item.meal_types),
            (&mut merged.sections, &item.sections),
            (&mut merged.source_hints, &item.source_hints),
            (&mut merged.item_texts, &item.item_texts),
            (&mut merged.ingredients, &item.ingredients),
        ];
        for (target, source) in lists {
            for value in source {
                push_unique(target, value);
            }
        }
        if merged.main_protein.is_none() {
            merged.main_protein = item.main_protein.clone();
        }
    }

    merged.count = merged.menu_files.len();
    merged
}

/// Copy ingredient data from a previous collection onto rebuilt items that
/// share a primary URL. Menus carry no ingredient lists of their own.
pub fn carry_over_details(rebuilt: &mut [CanonicalItem], previous: &[CanonicalItem]) {
    let by_url: HashMap<&str, &CanonicalItem> = previous
        .iter()
        .filter_map(|item| item.url.as_deref().map(|url| (url, item)))
        .collect();

    for item in rebuilt.iter_mut() {
        let Some(old) = item.url.as_deref().and_then(|url| by_url.get(url)) else {
            continue;
        };
        if item.ingredients.is_empty() {
            item.ingredients = old.ingredients.clone();
        }
        if item.main_protein.is_none() {
            item.main_protein = old.main_protein.clone();
        }
        if item.side_dishes.is_none() {
            item.side_dishes = old.side_dishes.clone();
        }
        if item.tags.is_empty() {
            item.tags = old.tags.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Link;

    fn occurrence(text: &str, links: &[(&str, &str)], urls: &[&str]) -> MenuItem {
        MenuItem {
            text: text.to_string(),
            section: Some("Dinners".to_string()),
            meal_type: "Dinner".to_string(),
            source_hint: None,
            links: links.iter().map(|(t, u)| Link::new(*t, *u)).collect(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    fn menu(file: &str, week: Option<&str>, items: Vec<MenuItem>) -> Menu {
        Menu {
            file: file.to_string(),
            title: None,
            week_of_date: week.map(str::to_string),
            items,
        }
    }

    #[test]
    fn test_groups_by_url_across_menus() {
        let tacos = "https://example.com/tacos";
        let menus = vec![
            menu(
                "a.md",
                Some("2024-01-08"),
                vec![
                    occurrence("[Tacos](https://example.com/tacos)", &[("Tacos", tacos)], &[tacos]),
                    occurrence("Leftovers", &[], &[]),
                ],
            ),
            menu(
                "b.md",
                Some("2024-07-01"),
                vec![occurrence("Fish tacos", &[("Fish Tacos", tacos)], &[])],
            ),
        ];

        let items = build_canonical_items(&menus);
        assert_eq!(items.len(), 2);

        let grouped = &items[0];
        assert_eq!(grouped.url.as_deref(), Some(tacos));
        assert_eq!(grouped.urls, vec![tacos]);
        assert_eq!(grouped.link_texts, vec!["Tacos", "Fish Tacos"]);
        assert_eq!(grouped.menu_files, vec!["a.md", "b.md"]);
        assert_eq!(grouped.menu_seasons, vec!["Winter", "Summer"]);
        assert_eq!(grouped.count, 2);

        let leftovers = &items[1];
        assert!(leftovers.url.is_none());
        assert_eq!(leftovers.item_texts, vec!["Leftovers"]);
        assert_eq!(leftovers.count, 1);
    }

    #[test]
    fn test_url_less_occurrences_stay_separate_until_title_merge() {
        let menus = vec![
            menu("a.md", None, vec![occurrence("Pizza night", &[], &[])]),
            menu("b.md", None, vec![occurrence("pizza NIGHT", &[], &[])]),
        ];
        let items = build_canonical_items(&menus);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_texts, vec!["Pizza night", "pizza NIGHT"]);
        assert_eq!(items[0].menu_files, vec!["a.md", "b.md"]);
        assert!(items[0].menu_seasons.is_empty());
        assert_eq!(items[0].count, 2);
    }

    #[test]
    fn test_merge_prefers_first_url() {
        let items = vec![
            CanonicalItem {
                item_texts: vec!["Chili".to_string()],
                menu_files: vec!["a.md".to_string()],
                count: 1,
                ..Default::default()
            },
            CanonicalItem {
                url: Some("https://example.com/chili".to_string()),
                link_texts: vec!["chili".to_string()],
                menu_files: vec!["a.md".to_string(), "b.md".to_string()],
                count: 2,
                ..Default::default()
            },
            CanonicalItem::default(),
        ];
        let merged = merge_by_title(items);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].url.as_deref(), Some("https://example.com/chili"));
        assert_eq!(merged[0].menu_files, vec!["a.md", "b.md"]);
        assert_eq!(merged[0].count, 2);
        assert_eq!(merged[1], CanonicalItem::default());
    }

    #[test]
    fn test_carry_over_details() {
        let mut rebuilt = vec![CanonicalItem {
            url: Some("https://example.com/chili".to_string()),
            ..Default::default()
        }];
        let previous = vec![CanonicalItem {
            url: Some("https://example.com/chili".to_string()),
            ingredients: vec!["1 can beans".to_string()],
            main_protein: Some("vegetarian".to_string()),
            ..Default::default()
        }];

        carry_over_details(&mut rebuilt, &previous);
        assert_eq!(rebuilt[0].ingredients, vec!["1 can beans"]);
        assert_eq!(rebuilt[0].main_protein.as_deref(), Some("vegetarian"));
    }
}
