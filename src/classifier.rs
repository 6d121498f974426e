//! Shopping-list ingredient bucketing.
//!
//! Keyword tables are matched as case-insensitive substrings, in category
//! priority order. The tables are hand-tuned and known to misfile a few
//! ambiguous terms ("cream" lands in packaged items); exports depend on the
//! exact behaviour so they are kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Produce,
    Proteins,
    Grains,
    PackagedItems,
    Staples,
}

impl Category {
    /// Export order
    pub const ALL: [Category; 5] = [
        Category::Produce,
        Category::Proteins,
        Category::Grains,
        Category::PackagedItems,
        Category::Staples,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Proteins => "Proteins",
            Category::Grains => "Grains",
            Category::PackagedItems => "Packaged Items",
            Category::Staples => "Staples",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Produce => PRODUCE_KEYWORDS,
            Category::Proteins => PROTEIN_KEYWORDS,
            Category::Grains => GRAIN_KEYWORDS,
            Category::PackagedItems => PACKAGED_KEYWORDS,
            Category::Staples => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PRODUCE_KEYWORDS: &[&str] = &[
    "apple",
    "arugula",
    "asparagus",
    "avocado",
    "banana",
    "basil",
    "beet",
    "bell pepper",
    "berries",
    "berry",
    "bok choy",
    "broccoli",
    "brussels",
    "cabbage",
    "carrot",
    "cauliflower",
    "celery",
    "chard",
    "cilantro",
    "corn",
    "cucumber",
    "dill",
    "eggplant",
    "fennel",
    "garlic",
    "ginger",
    "green bean",
    "green onion",
    "herbs",
    "jalapeno",
    "jalapeño",
    "kale",
    "leek",
    "lemon",
    "lettuce",
    "lime",
    "mango",
    "mint",
    "mushroom",
    "onion",
    "orange",
    "parsley",
    "peach",
    "pear",
    "potato",
    "radish",
    "rosemary",
    "scallion",
    "shallot",
    "spinach",
    "squash",
    "thyme",
    "tomato",
    "zucchini",
];

const PROTEIN_KEYWORDS: &[&str] = &[
    "bacon",
    "beans",
    "beef",
    "chicken",
    "chickpea",
    "chorizo",
    "cod",
    "crab",
    "egg",
    "fish",
    "ham hock",
    "ham steak",
    "lamb",
    "lentil",
    "pork",
    "prosciutto",
    "salmon",
    "sausage",
    "scallop",
    "seitan",
    "shrimp",
    "steak",
    "tempeh",
    "tilapia",
    "tofu",
    "tuna",
    "turkey",
];

const GRAIN_KEYWORDS: &[&str] = &[
    "barley",
    "bread",
    "bun",
    "couscous",
    "farro",
    "flour",
    "macaroni",
    "noodle",
    "oatmeal",
    "oats",
    "orzo",
    "panko",
    "pasta",
    "penne",
    "polenta",
    "quinoa",
    "rice",
    "roll",
    "spaghetti",
];

const PACKAGED_KEYWORDS: &[&str] = &[
    "broth",
    "butter",
    "canned",
    "cheese",
    "chips",
    "coconut milk",
    "crackers",
    "cream",
    "jar",
    "ketchup",
    "mayo",
    "milk",
    "mustard",
    "pesto",
    "salsa",
    "sauce",
    "stock",
    "tortilla",
    "yogurt",
];

static SPOONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(table|tea)spoons\b").expect("valid spoons regex"));

/// Key used to decide whether two ingredient strings are the same entry.
///
/// Lowercased, en/em dashes unified to '-', whitespace collapsed, and
/// "tablespoons"/"teaspoons" singularized. Normalizing a key again returns it
/// unchanged.
pub fn normalize_ingredient(ingredient: &str) -> String {
    let lowered = ingredient
        .to_lowercase()
        .replace(&['\u{2013}', '\u{2014}'][..], "-");
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    SPOONS_RE.replace_all(&collapsed, "${1}spoon").into_owned()
}

/// Bucket one ingredient string. Total: anything unmatched is a staple.
pub fn classify(ingredient: &str) -> Category {
    let lowered = ingredient.to_lowercase();
    Category::ALL
        .iter()
        .copied()
        .find(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .unwrap_or(Category::Staples)
}

/// Drop repeats by normalized key, keeping the first-seen spelling (trimmed).
pub fn dedupe_ingredients<'a, I>(ingredients: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for ingredient in ingredients {
        let key = normalize_ingredient(ingredient);
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        out.push(ingredient.trim().to_string());
    }
    out
}

/// Categorized, alphabetized shopping list. Empty categories are omitted.
pub fn group_by_category(ingredients: &[String]) -> Vec<(Category, Vec<String>)> {
    let mut groups: Vec<(Category, Vec<String>)> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

    for ingredient in ingredients {
        let category = classify(ingredient);
        if let Some((_, bucket)) = groups.iter_mut().find(|(c, _)| *c == category) {
            bucket.push(ingredient.clone());
        }
    }

    groups.retain(|(_, bucket)| !bucket.is_empty());
    for (_, bucket) in groups.iter_mut() {
        bucket.sort_by_key(|a| a.to_lowercase());
    }
    groups
}

/// Rough main-protein guess from an ingredient list.
pub fn detect_main_protein(ingredients: &[String]) -> &'static str {
    if ingredients.is_empty() {
        return "unknown";
    }
    let text = ingredients.join(" ").to_lowercase();
    let has = |terms: &[&str]| terms.iter().any(|t| text.contains(t));
    if has(&["tofu", "tempeh", "seitan"]) {
        return "tofu";
    }
    if has(&[
        "chicken", "beef", "pork", "turkey", "sausage", "bacon", "prosciutto", "salmon", "tuna",
        "shrimp", "scallop", "crab", "fish", "egg", "lamb",
    ]) {
        return "meat";
    }
    "vegetarian"
}
