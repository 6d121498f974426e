use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use menumaker::browse::{
    browsable_recipes, group_by_section, menu_stats, recipe_image_path, recipe_source_url,
    site_name, sort_menus, ItemFilter, RecipeIndex,
};
use menumaker::export::{
    ingredients_file_name, ingredients_markdown, menu_file_name, menu_markdown, write_export,
    Grouping,
};
use menumaker::markdown::{parse_menu, parse_recipe};
use menumaker::model::RecipesFile;
use menumaker::rebuild::{build_canonical_items, carry_over_details};
use menumaker::season::{format_date, parse_iso_date, season_label};
use menumaker::store::RECIPES_FILE;
use menumaker::{
    parse_recipe_text, AppConfig, DataStore, HttpScraper, ItemId, JsonFileStore, Library,
    MenuDraft, MenuError, MenuSelection, Season,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "menumaker")]
#[command(about = "Browse weekly menus and recipes, build new menus and shopping lists")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menus, newest week first
    Menus,

    /// Show one menu grouped by section
    Menu {
        /// Menu file name, or part of it
        file: String,
    },

    /// List canonical menu items
    Items {
        /// Search link and item texts
        #[arg(short, long)]
        query: Option<String>,

        /// Winter, Spring, Summer or Fall
        #[arg(long)]
        season: Option<String>,

        /// Breakfast, Lunch, Dinner, ...
        #[arg(long)]
        meal: Option<String>,

        /// tofu, meat, vegetarian or unknown
        #[arg(long)]
        protein: Option<String>,

        /// Show at most this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a recipe's ingredients and instructions
    Recipe {
        /// Recipe title, or part of it
        title: String,
    },

    /// Write ingredient (and optionally menu) checklists for selected items
    Export {
        /// Comma separated item ids
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<usize>,

        /// Group ingredients by "category" or "item"
        #[arg(long, default_value = "category")]
        by: Grouping,

        /// Also write the menu checklist
        #[arg(long)]
        menu: bool,

        /// Date stamp as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Save selected items as a new menu
    Commit {
        /// Comma separated item ids
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<usize>,

        /// Week the menu is for, YYYY-MM-DD
        #[arg(long)]
        week: Option<String>,

        /// Menu title
        #[arg(long)]
        title: Option<String>,

        /// Menu file name
        #[arg(long)]
        file: Option<String>,
    },

    /// Add a recipe URL as a new item using the scrape service
    Scrape { url: String },

    /// Rebuild the bundled data files from markdown notes
    Rebuild {
        /// Directory of weekly menu notes
        #[arg(long)]
        menus_dir: PathBuf,

        /// Directory of recipe notes
        #[arg(long)]
        recipes_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let config = AppConfig::load()?;
    let store: Option<Arc<dyn DataStore>> = config
        .app_data_dir
        .clone()
        .map(|dir| Arc::new(JsonFileStore::new(dir)) as Arc<dyn DataStore>);

    if let Commands::Rebuild {
        menus_dir,
        recipes_dir,
    } = &cli.command
    {
        rebuild(&config, menus_dir, recipes_dir.as_deref()).await?;
        return Ok(());
    }

    let mut library = Library::load(&config, store.as_deref()).await?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Menus => list_menus(&library),
        Commands::Menu { file } => show_menu(&library, &file)?,
        Commands::Items {
            query,
            season,
            meal,
            protein,
            limit,
        } => {
            let season = match season {
                Some(name) => Some(Season::parse(&name).ok_or_else(|| {
                    MenuError::InvalidSelection(format!("Unknown season '{}'", name))
                })?),
                None => None,
            };
            let filter = ItemFilter {
                query,
                season,
                meal_type: meal,
                protein,
            };
            list_items(&library, &filter, limit);
        }
        Commands::Recipe { title } => show_recipe(&library, &title)?,
        Commands::Export {
            items,
            by,
            menu,
            date,
        } => {
            let date = match date {
                Some(iso) => parse_date(&iso)?,
                None => today,
            };
            let selection = MenuSelection::from_ids(items.into_iter().map(ItemId));
            let selected = selection.resolve(&library.items)?;

            let content = ingredients_markdown(&selected, by, date);
            let path =
                write_export(&config.export_dir, &ingredients_file_name(date), &content).await?;
            println!("{}", path.display());

            if menu {
                let content = menu_markdown(&selected, date);
                let path =
                    write_export(&config.export_dir, &menu_file_name(date), &content).await?;
                println!("{}", path.display());
            }
        }
        Commands::Commit {
            items,
            week,
            title,
            file,
        } => {
            let selection = MenuSelection::from_ids(items.into_iter().map(ItemId));
            let mut draft = MenuDraft::default();
            if let Some(week) = week {
                draft = draft.week_from_iso(&week)?;
            }
            if let Some(title) = title {
                draft = draft.with_title(title);
            }
            if let Some(file) = file {
                draft = draft.with_file(file);
            }

            let menu = match &store {
                Some(store) => {
                    let (menu, saved) =
                        library.commit_and_persist(&selection, &draft, today, Arc::clone(store))?;
                    // The save is best effort, but the process must not exit before it runs
                    saved.await?;
                    menu
                }
                None => {
                    warn!("No app_data_dir configured; the new menu will not be saved");
                    library.commit(&selection, &draft, today)?
                }
            };
            println!(
                "{}\t{}",
                menu.file,
                menu.title.as_deref().unwrap_or_default()
            );
        }
        Commands::Scrape { url } => {
            let scraper = HttpScraper::from_config(&config.scraper)?.ok_or_else(|| {
                MenuError::InvalidSelection("No scraper.endpoint configured".to_string())
            })?;
            let id = library.add_from_url(&scraper, &url).await?;

            match &store {
                Some(store) => {
                    store.save(&library.menus, library.items.items()).await?;
                }
                None => warn!("No app_data_dir configured; the new item will not be saved"),
            }

            let item = library.items.require(id)?;
            println!("{}\t{}", id, item.display_title());
        }
        Commands::Rebuild { .. } => {}
    }

    Ok(())
}

fn parse_date(iso: &str) -> Result<NaiveDate, MenuError> {
    parse_iso_date(iso).ok_or_else(|| MenuError::InvalidDate(iso.to_string()))
}

fn list_menus(library: &Library) {
    for menu in sort_menus(&library.menus) {
        let stats = menu_stats(menu);
        let week = menu.week_of_date.as_deref();
        println!(
            "{}\t{}\t{}\t{} items, {} linked",
            format_date(week),
            season_label(week),
            menu.title.as_deref().unwrap_or(&menu.file),
            stats.total,
            stats.linked
        );
    }
}

fn show_menu(library: &Library, file: &str) -> Result<(), MenuError> {
    let menu = library
        .menus
        .iter()
        .find(|m| m.file == file)
        .or_else(|| library.menus.iter().find(|m| m.file.contains(file)))
        .ok_or_else(|| MenuError::InvalidSelection(format!("No menu matching '{}'", file)))?;

    let week = menu.week_of_date.as_deref();
    println!("{}", menu.title.as_deref().unwrap_or(&menu.file));
    println!("{} ({})", format_date(week), season_label(week));

    let recipes = RecipeIndex::new(&library.recipes);
    for (section, items) in group_by_section(&menu.items) {
        println!("\n{}", section);
        for item in items {
            match recipes.find(&item.text) {
                Some(recipe) => println!(
                    "  - {}  [recipe: {}]",
                    item.text,
                    recipe.title.as_deref().unwrap_or_default()
                ),
                None => println!("  - {}", item.text),
            }
        }
    }
    Ok(())
}

fn list_items(library: &Library, filter: &ItemFilter, limit: Option<usize>) {
    let items = filter.apply(&library.items);
    let limit = limit.unwrap_or(items.len());
    for (id, item) in items.into_iter().take(limit) {
        let site = item.url.as_deref().map(site_name).unwrap_or_default();
        println!(
            "{}\t{}\t{}\t{}",
            id,
            item.count,
            item.display_title(),
            site
        );
    }
}

fn show_recipe(library: &Library, title: &str) -> Result<(), MenuError> {
    let needle = title.to_lowercase();
    let recipe = browsable_recipes(&library.recipes)
        .into_iter()
        .find(|r| {
            r.title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
        .ok_or_else(|| MenuError::InvalidSelection(format!("No recipe matching '{}'", title)))?;

    println!("{}", recipe.title.as_deref().unwrap_or_default());
    if let Some(url) = recipe_source_url(recipe) {
        println!("{} ({})", url, site_name(url));
    }
    if let Some(image) = recipe_image_path(recipe) {
        println!("{}", image);
    }

    let parsed = parse_recipe_text(&recipe.text);
    if parsed.is_empty() {
        println!("\n{}", recipe.text);
        return Ok(());
    }

    println!("\nIngredients");
    for ingredient in &parsed.ingredients {
        println!("  - {}", ingredient);
    }
    println!("\nInstructions");
    for (n, step) in parsed.instructions.iter().enumerate() {
        println!("  {}. {}", n + 1, step);
    }
    Ok(())
}

async fn read_notes(dir: &Path) -> Result<Vec<(String, String)>, MenuError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut notes = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let text = tokio::fs::read_to_string(&path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        notes.push((name, text));
    }
    notes.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(notes)
}

async fn rebuild(
    config: &AppConfig,
    menus_dir: &Path,
    recipes_dir: Option<&Path>,
) -> Result<(), MenuError> {
    let menus: Vec<_> = read_notes(menus_dir)
        .await?
        .iter()
        .map(|(name, text)| parse_menu(name, text))
        .collect();

    let mut items = build_canonical_items(&menus);
    // Ingredients only ever come from scraping, so keep what the old file had
    if let Ok(previous) = Library::load_bundled(&config.data_dir).await {
        carry_over_details(&mut items, previous.items.items());
    }

    let store = JsonFileStore::new(&config.data_dir);
    store.save(&menus, &items).await?;

    if let Some(recipes_dir) = recipes_dir {
        let recipes = read_notes(recipes_dir)
            .await?
            .iter()
            .map(|(name, text)| parse_recipe(name, text))
            .collect();
        let json = serde_json::to_string_pretty(&RecipesFile { recipes })?;
        tokio::fs::write(config.data_dir.join(RECIPES_FILE), json).await?;
    }

    info!(
        "Rebuilt {} menus and {} items into {}",
        menus.len(),
        items.len(),
        config.data_dir.display()
    );
    Ok(())
}
