pub mod browse;
pub mod classifier;
pub mod commit;
pub mod config;
pub mod consolidator;
pub mod error;
pub mod export;
pub mod library;
pub mod markdown;
pub mod model;
pub mod rebuild;
pub mod recipe_text;
pub mod scrape;
pub mod season;
pub mod store;

pub use classifier::{classify, detect_main_protein, group_by_category, Category};
pub use commit::{build_menu, MenuDraft, MenuSelection};
pub use config::{load_config, AppConfig, ScraperConfig};
pub use consolidator::{ItemCollection, ItemId};
pub use error::MenuError;
pub use export::{ingredients_markdown, menu_markdown, Grouping};
pub use library::Library;
pub use model::{CanonicalItem, Link, Menu, MenuItem, Recipe};
pub use recipe_text::{parse_recipe_text, ParsedRecipe};
pub use scrape::{HttpScraper, RecipeScraper, ScrapeResult};
pub use season::Season;
pub use store::{persist_detached, DataStore, JsonFileStore};
