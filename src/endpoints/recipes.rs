use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use warp::http::{Method, StatusCode};
use warp::{Filter, Rejection, Reply};

use crate::error::{ApiError, StoreError};
use crate::sanitize::{escape_html, sanitize_recipe};
use crate::store::RecipeStore;
use crate::types::{CreatedBody, NewRecipe, RecipePayload};

/// `/api/recipes`, any method. Method dispatch happens in the handler so
/// unsupported methods get the 405 body instead of a warp rejection.
pub fn recipes_route(
    store: Arc<RecipeStore>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
    warp::path!("api" / "recipes")
        .and(warp::method())
        .and(warp::body::bytes())
        .and(warp::any().map(move || store.clone()))
        .and_then(handle_recipes)
}

pub async fn handle_recipes(
    method: Method,
    body: Bytes,
    store: Arc<RecipeStore>,
) -> Result<warp::reply::Response, Infallible> {
    let result = match method {
        Method::GET => list_recipes(&store).await,
        Method::POST => create_recipe(&store, &body).await,
        _ => Err(ApiError::MethodNotAllowed),
    };

    Ok(result.unwrap_or_else(ApiError::into_response))
}

async fn list_recipes(store: &RecipeStore) -> Result<warp::reply::Response, ApiError> {
    let recipes = store.load_all().await?;

    Ok(warp::reply::with_status(warp::reply::json(&recipes), StatusCode::OK).into_response())
}

async fn create_recipe(store: &RecipeStore, body: &[u8]) -> Result<warp::reply::Response, ApiError> {
    let recipe = parse_payload(body).ok_or_else(|| {
        tracing::debug!("create rejected: missing required fields");
        ApiError::MissingFields
    })?;

    let _guard = store.write_guard().await;
    let mut recipes = store.load_all().await?;

    if title_taken(&recipes, &recipe.title) {
        tracing::info!(title = %recipe.title, "create rejected: recipe already exists");
        return Err(ApiError::AlreadyExists);
    }

    let stored = sanitize_recipe(&recipe);
    recipes.push(serde_json::to_value(&stored).map_err(StoreError::Encode)?);
    store.save_all(&recipes).await?;

    tracing::info!(title = %stored.title, total = recipes.len(), "recipe added");

    let body = CreatedBody {
        message: "Recipe added successfully",
        recipe: &stored,
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::CREATED).into_response())
}

/// Case-insensitive match against the raw title, and against its escaped
/// form since stored titles went through the sanitizer. Records without a
/// string title never match.
fn title_taken(recipes: &[Value], title: &str) -> bool {
    let raw = title.to_lowercase();
    let escaped = escape_html(title).to_lowercase();

    recipes
        .iter()
        .filter_map(|r| r.get("title").and_then(Value::as_str))
        .map(str::to_lowercase)
        .any(|existing| existing == raw || existing == escaped)
}

fn parse_payload(body: &[u8]) -> Option<NewRecipe> {
    let value: Value = serde_json::from_slice(body).ok()?;
    if !value.is_object() {
        return None;
    }
    let payload: RecipePayload = serde_json::from_value(value).ok()?;
    payload.validate()
}
