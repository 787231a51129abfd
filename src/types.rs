use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_RECIPES_FILE: &str = "recipes.json";
pub const DEFAULT_PORT: u16 = 3000;

/// A sanitized recipe as written by a create.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<Value>,
}

/// Body of a create request, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RecipePayload {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    #[serde(rename = "prepTime")]
    pub prep_time: Option<String>,
    pub category: Option<Value>,
    pub difficulty: Option<Value>,
    pub servings: Option<Value>,
}

/// A create request that passed the required-field checks.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub prep_time: String,
    pub category: Option<Value>,
    pub difficulty: Option<Value>,
    pub servings: Option<Value>,
}

impl RecipePayload {
    /// Returns `None` unless all four required fields are present and non-empty.
    pub fn validate(self) -> Option<NewRecipe> {
        let title = self.title.filter(|s| !s.is_empty())?;
        let ingredients = self.ingredients.filter(|v| !v.is_empty())?;
        let steps = self.steps.filter(|v| !v.is_empty())?;
        let prep_time = self.prep_time.filter(|s| !s.is_empty())?;

        Some(NewRecipe {
            title,
            ingredients,
            steps,
            prep_time,
            category: self.category.filter(is_truthy),
            difficulty: self.difficulty.filter(is_truthy),
            servings: self.servings.filter(is_truthy),
        })
    }
}

// null, false, 0 and "" count as "not supplied" for the optional fields.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody<'a> {
    pub message: &'static str,
    pub recipe: &'a Recipe,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RecipePayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn validate_accepts_complete_payload() {
        let recipe = payload(json!({
            "title": "Pasta",
            "ingredients": ["pasta", "water"],
            "steps": ["boil", "drain"],
            "prepTime": "20 min",
            "servings": 2
        }))
        .validate()
        .unwrap();

        assert_eq!(recipe.title, "Pasta");
        assert_eq!(recipe.ingredients, vec!["pasta", "water"]);
        assert_eq!(recipe.servings, Some(json!(2)));
        assert!(recipe.category.is_none());
    }

    #[test]
    fn validate_rejects_empty_required_fields() {
        let base = json!({
            "title": "Pasta",
            "ingredients": ["pasta"],
            "steps": ["boil"],
            "prepTime": "20 min"
        });

        for (key, empty) in [
            ("title", json!("")),
            ("ingredients", json!([])),
            ("steps", json!([])),
            ("prepTime", json!("")),
        ] {
            let mut body = base.clone();
            body[key] = empty;
            assert!(payload(body).validate().is_none(), "{key} should be required");

            let mut body = base.clone();
            body.as_object_mut().unwrap().remove(key);
            assert!(payload(body).validate().is_none(), "{key} should be required");
        }
    }

    #[test]
    fn falsy_optional_fields_are_dropped() {
        let recipe = payload(json!({
            "title": "Pasta",
            "ingredients": ["pasta"],
            "steps": ["boil"],
            "prepTime": "20 min",
            "category": "",
            "difficulty": null,
            "servings": 0
        }))
        .validate()
        .unwrap();

        assert!(recipe.category.is_none());
        assert!(recipe.difficulty.is_none());
        assert!(recipe.servings.is_none());
    }

    #[test]
    fn optional_fields_are_not_serialized_when_absent() {
        let recipe = Recipe {
            title: "Toast".to_string(),
            ingredients: vec!["bread".to_string()],
            steps: vec!["toast".to_string()],
            prep_time: "2 min".to_string(),
            category: None,
            difficulty: Some(json!("easy")),
            servings: None,
        };

        let text = serde_json::to_string(&recipe).unwrap();
        assert_eq!(
            text,
            r#"{"title":"Toast","ingredients":["bread"],"steps":["toast"],"prepTime":"2 min","difficulty":"easy"}"#
        );
    }
}
