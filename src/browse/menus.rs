use crate::model::{Menu, MenuItem};
use crate::season::parse_iso_date;
use std::cmp::Ordering;

pub const UNSECTIONED_SECTION: &str = "Unsectioned";

/// Newest week first; dated menus before undated ones, which sort by title.
pub fn sort_menus(menus: &[Menu]) -> Vec<&Menu> {
    let mut sorted: Vec<&Menu> = menus.iter().collect();
    sorted.sort_by(|a, b| compare_menus(a, b));
    sorted
}

fn compare_menus(a: &Menu, b: &Menu) -> Ordering {
    let week_a = a.week_of_date.as_deref().and_then(parse_iso_date);
    let week_b = b.week_of_date.as_deref().and_then(parse_iso_date);
    match (week_a, week_b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .title
            .as_deref()
            .unwrap_or("")
            .cmp(b.title.as_deref().unwrap_or("")),
    }
}

/// Items grouped by section label in first-seen order.
pub fn group_by_section(items: &[MenuItem]) -> Vec<(String, Vec<&MenuItem>)> {
    let mut groups: Vec<(String, Vec<&MenuItem>)> = Vec::new();
    for item in items {
        let key = item.section.as_deref().unwrap_or(UNSECTIONED_SECTION);
        match groups.iter_mut().find(|(section, _)| section == key) {
            Some((_, members)) => members.push(item),
            None => groups.push((key.to_string(), vec![item])),
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStats {
    pub total: usize,
    pub linked: usize,
}

pub fn menu_stats(menu: &Menu) -> MenuStats {
    MenuStats {
        total: menu.items.len(),
        linked: menu.items.iter().filter(|item| item.has_links()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Link;

    fn menu(file: &str, title: Option<&str>, week: Option<&str>) -> Menu {
        Menu {
            file: file.to_string(),
            title: title.map(str::to_string),
            week_of_date: week.map(str::to_string),
            items: Vec::new(),
        }
    }

    fn item(text: &str, section: Option<&str>) -> MenuItem {
        MenuItem {
            text: text.to_string(),
            section: section.map(str::to_string),
            meal_type: "Dinner".to_string(),
            source_hint: None,
            links: Vec::new(),
            urls: Vec::new(),
        }
    }

    #[test]
    fn test_sort_menus() {
        let menus = vec![
            menu("b.md", Some("Beta"), None),
            menu("old.md", None, Some("2021-06-01")),
            menu("a.md", Some("Alpha"), Some("not-a-date")),
            menu("new.md", None, Some("2024-01-08")),
        ];
        let files: Vec<&str> = sort_menus(&menus).iter().map(|m| m.file.as_str()).collect();
        assert_eq!(files, vec!["new.md", "old.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_group_by_section_preserves_order() {
        let items = vec![
            item("Oatmeal", Some("Breakfast")),
            item("Soup", None),
            item("Pancakes", Some("Breakfast")),
            item("Tacos", Some("Dinner")),
        ];
        let groups = group_by_section(&items);

        let sections: Vec<&str> = groups.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(sections, vec!["Breakfast", UNSECTIONED_SECTION, "Dinner"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].text, "Pancakes");
    }

    #[test]
    fn test_menu_stats() {
        let mut linked = item("Tacos", None);
        linked.links.push(Link::new("Tacos", "https://example.com/tacos"));
        let mut bare_url = item("Soup", None);
        bare_url.urls.push("https://example.com/soup".to_string());

        let mut week = menu("m.md", None, None);
        week.items = vec![linked, bare_url, item("Leftovers", None)];

        assert_eq!(menu_stats(&week), MenuStats { total: 3, linked: 2 });
    }
}
