//! Recipe business logic.

use crate::{
    entities::{Recipe, recipe, recipe::Ingredients, recipe::RecipeIngredient},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input for creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Dish name
    pub name: String,
    /// Ingredients per unit produced
    pub ingredients: Vec<RecipeIngredient>,
}

/// A recipe with its derived per-unit cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    /// Recipe id
    pub id: i64,
    /// Dish name
    pub name: String,
    /// Ingredients per unit produced
    pub ingredients: Vec<RecipeIngredient>,
    /// Cost of one unit at current ingredient prices
    pub cost_per_unit: f64,
}

impl From<recipe::Model> for RecipeView {
    fn from(model: recipe::Model) -> Self {
        let cost_per_unit = model.cost_per_unit();
        Self {
            id: model.id,
            name: model.name,
            ingredients: model.ingredients.0,
            cost_per_unit,
        }
    }
}

/// Rejects an ingredient list that is empty or has a blank name, or a
/// negative or non-finite quantity or cost.
fn validate_ingredients(ingredients: &[RecipeIngredient]) -> Result<()> {
    if ingredients.is_empty() {
        return Err(Error::validation("A recipe needs at least one ingredient"));
    }
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    for ingredient in ingredients {
        if ingredient.name.trim().is_empty() {
            return Err(Error::validation("Ingredient name cannot be empty"));
        }
        if !valid(ingredient.quantity) || !valid(ingredient.unit_cost) {
            return Err(Error::validation(format!(
                "Invalid quantity or cost for ingredient {}",
                ingredient.name
            )));
        }
    }
    Ok(())
}

/// Creates a recipe after validating its name and ingredients.
pub async fn create_recipe(db: &DatabaseConnection, new: NewRecipe) -> Result<recipe::Model> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Recipe name cannot be empty"));
    }
    validate_ingredients(&new.ingredients)?;

    recipe::ActiveModel {
        name: Set(name.to_string()),
        ingredients: Set(Ingredients(new.ingredients)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| Error::from_insert(e, "name", name))
}

/// All recipes, alphabetically.
pub async fn list_recipes(db: &DatabaseConnection) -> Result<Vec<recipe::Model>> {
    Recipe::find()
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The recipes with the given ids, keyed by id. Unknown ids are absent.
pub async fn recipes_by_id(
    db: &DatabaseConnection,
    ids: &[i64],
) -> Result<HashMap<i64, recipe::Model>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let recipes = Recipe::find()
        .filter(recipe::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(recipes.into_iter().map(|r| (r.id, r)).collect())
}

/// Replaces the ingredients of a recipe. The new list is validated the same
/// way as on creation.
pub async fn update_ingredients(
    db: &DatabaseConnection,
    recipe_id: i64,
    ingredients: Vec<RecipeIngredient>,
) -> Result<recipe::Model> {
    validate_ingredients(&ingredients)?;
    let recipe = Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Recipe",
            id: recipe_id.to_string(),
        })?;
    let mut active: recipe::ActiveModel = recipe.into();
    active.ingredients = Set(Ingredients(ingredients));
    active.update(db).await.map_err(Into::into)
}
