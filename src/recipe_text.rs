//! Ingredient and instruction extraction from loosely structured recipe text.
//!
//! Parsing is a line-oriented state machine. [`step`] is the pure transition
//! function; [`parse_recipe_text`] folds it over a document.

use once_cell::sync::Lazy;
use regex::Regex;

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*•]\s*").expect("valid bullet regex"));
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[*•]\s").expect("valid list item regex"));
static NUMBERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid numbered regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Neutral,
    InIngredients,
    InInstructions,
}

/// What a single line contributes to the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ingredient(String),
    /// Start of a new instruction step
    Step(String),
    /// Text to append to the previous step, if there is one
    Continuation(String),
}

/// Ingredients and instructions recovered from a recipe body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecipe {
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl ParsedRecipe {
    /// No recognizable sections; callers show the raw text instead.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.instructions.is_empty()
    }
}

fn is_bullet(trimmed: &str) -> bool {
    trimmed.starts_with('*') || trimmed.starts_with('•')
}

/// A bullet or numbered entry. "**Ingredients**" is emphasis, not a bullet.
fn is_list_line(trimmed: &str) -> bool {
    LIST_ITEM_RE.is_match(trimmed) || NUMBERED_RE.is_match(trimmed)
}

/// Advance the parser by one line.
///
/// Section headers are only recognized on lines that are not list entries, so
/// a step such as "1. Mix dry ingredients." stays a step while a bold
/// "**Ingredients**" line still opens a section.
pub fn step(state: ParseState, line: &str) -> (ParseState, Option<Token>) {
    let trimmed = line.trim();
    let lower = line.to_lowercase();

    if !is_list_line(trimmed) {
        if lower.contains("ingredient") {
            return (ParseState::InIngredients, None);
        }
        if lower.contains("instruction") || lower.contains("direction") {
            return (ParseState::InInstructions, None);
        }
        if line.starts_with('#') {
            return (ParseState::Neutral, None);
        }
    }

    match state {
        ParseState::Neutral => (state, None),
        ParseState::InIngredients => {
            if is_bullet(trimmed) {
                let mut chars = trimmed.chars();
                chars.next();
                let ingredient = chars.as_str().trim().to_string();
                (state, Some(Token::Ingredient(ingredient)))
            } else {
                (state, None)
            }
        }
        ParseState::InInstructions => {
            if trimmed.is_empty() {
                (state, None)
            } else if is_bullet(trimmed) || NUMBERED_RE.is_match(trimmed) {
                let without_bullet = BULLET_RE.replace(trimmed, "");
                let text = NUMBERED_RE.replace(&without_bullet, "").into_owned();
                (state, Some(Token::Step(text)))
            } else {
                (state, Some(Token::Continuation(trimmed.to_string())))
            }
        }
    }
}

/// Extract ingredients and instructions from a recipe body.
pub fn parse_recipe_text(text: &str) -> ParsedRecipe {
    let mut parsed = ParsedRecipe::default();
    let mut state = ParseState::Neutral;

    for line in text.split('\n') {
        let (next, token) = step(state, line);
        state = next;
        match token {
            Some(Token::Ingredient(ingredient)) => parsed.ingredients.push(ingredient),
            Some(Token::Step(instruction)) => parsed.instructions.push(instruction),
            Some(Token::Continuation(extra)) => {
                if let Some(last) = parsed.instructions.last_mut() {
                    last.push(' ');
                    last.push_str(&extra);
                }
            }
            None => {}
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_recipe() {
        let text = "## Ingredients\n* 2 cups flour\n* 1 egg\n## Instructions\n1. Mix dry ingredients.\n2. Add egg and stir.\n";
        let parsed = parse_recipe_text(text);

        assert_eq!(parsed.ingredients, vec!["2 cups flour", "1 egg"]);
        assert_eq!(
            parsed.instructions,
            vec!["Mix dry ingredients.", "Add egg and stir."]
        );
    }

    #[test]
    fn test_parse_bold_headings() {
        let text = "**Ingredients**\n* 2 cups flour\n* 1 egg\n*Instructions*\n1. Mix.\n2. Bake.";
        let parsed = parse_recipe_text(text);

        assert_eq!(parsed.ingredients, vec!["2 cups flour", "1 egg"]);
        assert_eq!(parsed.instructions, vec!["Mix.", "Bake."]);
    }

    #[test]
    fn test_header_transitions() {
        assert_eq!(
            step(ParseState::Neutral, "## Ingredients"),
            (ParseState::InIngredients, None)
        );
        assert_eq!(
            step(ParseState::InIngredients, "Directions:"),
            (ParseState::InInstructions, None)
        );
        assert_eq!(
            step(ParseState::InInstructions, "INSTRUCTIONS"),
            (ParseState::InInstructions, None)
        );
        assert_eq!(
            step(ParseState::InInstructions, "## Notes"),
            (ParseState::Neutral, None)
        );
        assert_eq!(step(ParseState::Neutral, "# Title"), (ParseState::Neutral, None));
        assert_eq!(
            step(ParseState::InInstructions, "**Ingredients:**"),
            (ParseState::InIngredients, None)
        );
        // A real bullet mentioning ingredients is data, not a header
        assert_eq!(
            step(ParseState::InInstructions, "* Whisk the wet ingredients"),
            (
                ParseState::InInstructions,
                Some(Token::Step("Whisk the wet ingredients".to_string()))
            )
        );
    }

    #[test]
    fn test_ingredient_lines() {
        assert_eq!(
            step(ParseState::InIngredients, "  •  1 lemon, zested "),
            (
                ParseState::InIngredients,
                Some(Token::Ingredient("1 lemon, zested".to_string()))
            )
        );
        // Unbulleted lines are skipped
        assert_eq!(
            step(ParseState::InIngredients, "For the sauce:"),
            (ParseState::InIngredients, None)
        );
        // Bullets outside a section are ignored
        assert_eq!(step(ParseState::Neutral, "* 1 egg"), (ParseState::Neutral, None));
    }

    #[test]
    fn test_instruction_lines() {
        assert_eq!(
            step(ParseState::InInstructions, "12. Serve."),
            (
                ParseState::InInstructions,
                Some(Token::Step("Serve.".to_string()))
            )
        );
        assert_eq!(
            step(ParseState::InInstructions, "* Preheat oven"),
            (
                ParseState::InInstructions,
                Some(Token::Step("Preheat oven".to_string()))
            )
        );
        assert_eq!(
            step(ParseState::InInstructions, "until golden"),
            (
                ParseState::InInstructions,
                Some(Token::Continuation("until golden".to_string()))
            )
        );
        assert_eq!(
            step(ParseState::InInstructions, "   "),
            (ParseState::InInstructions, None)
        );
    }

    #[test]
    fn test_continuation_joins_previous_step() {
        let text = "Instructions\n1. Roast the squash\nuntil tender,\nabout 40 minutes.\n2. Blend.";
        let parsed = parse_recipe_text(text);

        assert_eq!(
            parsed.instructions,
            vec![
                "Roast the squash until tender, about 40 minutes.",
                "Blend."
            ]
        );
    }

    #[test]
    fn test_continuation_without_step_is_dropped() {
        let text = "Directions\nPreheat the grill.\n* Grill the corn.";
        let parsed = parse_recipe_text(text);
        assert_eq!(parsed.instructions, vec!["Grill the corn."]);
    }

    #[test]
    fn test_no_sections_yields_empty() {
        let parsed = parse_recipe_text("# Grandma's Stew\nThrow everything in a pot.\n* salt");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_heading_closes_section() {
        let text = "Ingredients\n* 1 onion\n### Notes\n* freezes well";
        let parsed = parse_recipe_text(text);
        assert_eq!(parsed.ingredients, vec!["1 onion"]);
    }
}
