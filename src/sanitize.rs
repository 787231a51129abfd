//! HTML escaping for user-supplied recipe text.

use serde_json::Value;

use crate::types::{NewRecipe, Recipe};

/// Escape `& < > " '` to their entity forms.
///
/// `&` goes first so entities introduced by later replacements are not
/// escaped twice.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape a JSON string; any other value is returned unchanged.
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(s)),
        other => other.clone(),
    }
}

/// Build the stored form of a validated recipe.
pub fn sanitize_recipe(recipe: &NewRecipe) -> Recipe {
    Recipe {
        title: escape_html(&recipe.title),
        ingredients: recipe.ingredients.iter().map(|s| escape_html(s)).collect(),
        steps: recipe.steps.iter().map(|s| escape_html(s)).collect(),
        prep_time: escape_html(&recipe.prep_time),
        category: recipe.category.as_ref().map(sanitize_value),
        difficulty: recipe.difficulty.as_ref().map(sanitize_value),
        servings: recipe.servings.as_ref().map(sanitize_value),
    }
}
