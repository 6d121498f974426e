use chrono::NaiveDate;
use menumaker::export::{ingredients_file_name, write_export};
use menumaker::{
    ingredients_markdown, menu_markdown, AppConfig, CanonicalItem, Grouping, ItemId, Library,
    MenuSelection,
};
use std::fs;
use std::path::Path;

const MENUS: &str = r#"{"menus": []}"#;
const RECIPES: &str = r#"{"recipes": []}"#;
const ITEMS: &str = r#"{
  "items": [
    {
      "url": "https://example.com/tacos",
      "urls": ["https://example.com/tacos"],
      "link_texts": ["Tacos"],
      "menu_files": ["Menu week of 1-8-24.md"],
      "menu_weeks": ["2024-01-08"],
      "menu_seasons": ["Winter"],
      "meal_types": ["Dinner"],
      "sections": ["Dinners"],
      "source_hints": [],
      "item_texts": ["[Tacos](https://example.com/tacos)"],
      "ingredients": ["1 lb ground beef", "2 tortillas"],
      "main_protein": "meat",
      "count": 1
    },
    {
      "url": null,
      "link_texts": [],
      "item_texts": ["Salad"],
      "ingredients": ["1 head lettuce"],
      "count": 1
    },
    {
      "url": null,
      "item_texts": ["Leftovers"],
      "count": 3
    }
  ]
}"#;

fn write_bundle(dir: &Path) {
    fs::write(dir.join("menus.json"), MENUS).unwrap();
    fs::write(dir.join("recipes.json"), RECIPES).unwrap();
    fs::write(dir.join("menu_items_refactored.json"), ITEMS).unwrap();
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
}

async fn load(dir: &Path) -> Library {
    let config = AppConfig {
        data_dir: dir.to_path_buf(),
        ..Default::default()
    };
    Library::load(&config, None).await.unwrap()
}

#[tokio::test]
async fn test_tacos_and_salad_by_category() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let library = load(dir.path()).await;

    let selection = MenuSelection::from_ids([ItemId(0), ItemId(1)]);
    let selected = selection.resolve(&library.items).unwrap();
    let doc = ingredients_markdown(&selected, Grouping::Category, date());

    assert_eq!(
        doc,
        "# Ingredients - January 8, 2024\n\
         \n## Produce\n\n- [ ] 1 head lettuce\n\
         \n## Proteins\n\n- [ ] 1 lb ground beef\n\
         \n## Packaged Items\n\n- [ ] 2 tortillas\n"
    );
}

#[tokio::test]
async fn test_no_ingredients_gives_heading_only() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let library = load(dir.path()).await;

    let selection = MenuSelection::from_ids([ItemId(2)]);
    let selected = selection.resolve(&library.items).unwrap();

    let doc = ingredients_markdown(&selected, Grouping::Category, date());
    assert_eq!(doc, "# Ingredients - January 8, 2024\n");
    assert!(!doc.contains("##"));
}

#[tokio::test]
async fn test_menu_checklist_and_file_export() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let library = load(dir.path()).await;

    let selection = MenuSelection::from_ids([ItemId(1), ItemId(0)]);
    let selected = selection.resolve(&library.items).unwrap();

    let menu = menu_markdown(&selected, date());
    assert_eq!(
        menu,
        "# Menu - January 8, 2024\n\n- [ ] Salad\n- [ ] [Tacos](https://example.com/tacos)\n"
    );

    let export_dir = dir.path().join("exports");
    let doc = ingredients_markdown(&selected, Grouping::MenuItem, date());
    let path = write_export(&export_dir, &ingredients_file_name(date()), &doc)
        .await
        .unwrap();

    assert_eq!(path, export_dir.join("ingredients-2024-01-08.md"));
    let written = fs::read_to_string(path).unwrap();
    assert!(written.starts_with("# Ingredients - January 8, 2024\n\n## Salad\n"));
    assert!(written.contains("## Tacos\n\n- [ ] 1 lb ground beef\n- [ ] 2 tortillas\n"));
}

#[test]
fn test_category_dedupe_spans_the_selection() {
    let a = CanonicalItem {
        link_texts: vec!["Pancakes".to_string()],
        ingredients: vec!["2 Tablespoons  butter".to_string(), "1 cup flour".to_string()],
        ..Default::default()
    };
    let b = CanonicalItem {
        link_texts: vec!["Cookies".to_string()],
        ingredients: vec!["2 tablespoon butter".to_string(), "1 cup Flour".to_string()],
        ..Default::default()
    };

    let doc = ingredients_markdown(&[&a, &b], Grouping::Category, date());
    assert_eq!(doc.matches("butter").count(), 1);
    assert_eq!(doc.matches("flour").count() + doc.matches("Flour").count(), 1);
    assert!(doc.contains("- [ ] 2 Tablespoons  butter\n"));
}

#[tokio::test]
async fn test_missing_bundle_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let err = Library::load(&config, None).await.unwrap_err();
    assert!(err.to_string().contains("menus.json"));
}
