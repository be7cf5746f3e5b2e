//! JSON envelopes returned by the remote source.
//!
//! Recipe endpoints answer `{"meals": [...]}` and use `{"meals": null}` for
//! "no rows", which decodes to an empty list. Ingredient pairs arrive as
//! numbered flat fields (`strIngredient1`..`strIngredient20`) and are collected
//! from the flattened remainder of each record.

use crate::domain::error::Result;
use crate::domain::{Category, Ingredient, Recipe};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const MAX_INGREDIENTS: usize = 20;

#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<RawMeal>>,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<RawCategory>>,
}

#[derive(Debug, Deserialize)]
struct RawMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    video: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(rename = "idCategory")]
    id: String,
    #[serde(rename = "strCategory")]
    name: String,
    #[serde(rename = "strCategoryThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl RawMeal {
    fn field(&self, key: &str) -> Option<&str> {
        self.rest
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|n| {
                let name = self.field(&format!("strIngredient{n}"))?;
                let measure = self.field(&format!("strMeasure{n}"))?;
                Some(Ingredient {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }

    fn into_recipe(self) -> Recipe {
        let ingredients = self.ingredients();
        let tags = self
            .tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Recipe {
            id: self.id,
            name: self.name,
            thumbnail: self.thumbnail.unwrap_or_default(),
            area: non_blank(self.area),
            category: non_blank(self.category),
            tags,
            instructions: non_blank(self.instructions),
            ingredients,
            video: non_blank(self.video),
        }
    }
}

/// Decodes a `{"meals": ...}` body into recipes; `null` is an empty list.
///
/// # Errors
///
/// Returns [`crate::MealdeckError::Decode`] when the body is not the expected
/// JSON shape.
pub fn decode_meals(body: &[u8]) -> Result<Vec<Recipe>> {
    let envelope: MealsEnvelope = serde_json::from_slice(body)?;
    Ok(envelope
        .meals
        .unwrap_or_default()
        .into_iter()
        .map(RawMeal::into_recipe)
        .collect())
}

/// Decodes a lookup body, returning the first record if any.
///
/// # Errors
///
/// Returns [`crate::MealdeckError::Decode`] on malformed JSON.
pub fn decode_lookup(body: &[u8]) -> Result<Option<Recipe>> {
    Ok(decode_meals(body)?.into_iter().next())
}

/// Decodes a `{"categories": [...]}` body.
///
/// # Errors
///
/// Returns [`crate::MealdeckError::Decode`] on malformed JSON.
pub fn decode_categories(body: &[u8]) -> Result<Vec<Category>> {
    let envelope: CategoriesEnvelope = serde_json::from_slice(body)?;
    Ok(envelope
        .categories
        .unwrap_or_default()
        .into_iter()
        .map(|raw| Category {
            id: raw.id,
            name: raw.name,
            thumbnail: raw.thumbnail.unwrap_or_default(),
            description: non_blank(raw.description),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealdeckError;

    const FULL_MEAL: &str = r#"{"meals":[{
        "idMeal":"52772",
        "strMeal":"Teriyaki Chicken Casserole",
        "strMealThumb":"https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "strArea":"Japanese",
        "strCategory":"Chicken",
        "strTags":"Meat,Casserole, ",
        "strInstructions":"Preheat oven to 350.\r\n\r\nCombine soy sauce.",
        "strYoutube":"https://www.youtube.com/watch?v=4aZr5hZXP_s",
        "strIngredient1":"soy sauce","strMeasure1":"3/4 cup",
        "strIngredient2":"water","strMeasure2":"1/2 cup",
        "strIngredient3":"","strMeasure3":"",
        "strIngredient4":"salt","strMeasure4":" ",
        "strIngredient5":null,"strMeasure5":null,
        "strSource":null,"dateModified":null
    }]}"#;

    #[test]
    fn full_record_keeps_complete_ingredient_pairs_only() {
        let meals = decode_meals(FULL_MEAL.as_bytes()).unwrap();
        assert_eq!(meals.len(), 1);

        let meal = &meals[0];
        assert_eq!(meal.id, "52772");
        assert_eq!(meal.area.as_deref(), Some("Japanese"));
        assert_eq!(meal.tags, vec!["Meat", "Casserole"]);
        assert_eq!(meal.ingredient_lines(), vec!["3/4 cup soy sauce", "1/2 cup water"]);
        assert_eq!(
            meal.instruction_steps(),
            vec!["Preheat oven to 350.", "Combine soy sauce."]
        );
        assert!(meal.is_detailed());
    }

    #[test]
    fn filter_rows_decode_as_partial_recipes() {
        let body = br#"{"meals":[{"strMeal":"Apam balik","strMealThumb":"t.jpg","idMeal":"53049"}]}"#;
        let meals = decode_meals(body).unwrap();
        assert_eq!(meals, vec![Recipe::summary("53049", "Apam balik", "t.jpg")]);
    }

    #[test]
    fn null_meals_is_empty_not_an_error() {
        assert!(decode_meals(br#"{"meals":null}"#).unwrap().is_empty());
        assert!(decode_lookup(br#"{"meals":null}"#).unwrap().is_none());
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let err = decode_meals(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, MealdeckError::Decode(_)));
    }

    #[test]
    fn categories_decode() {
        let body = br#"{"categories":[{"idCategory":"1","strCategory":"Beef",
            "strCategoryThumb":"beef.png","strCategoryDescription":"Beef is meat."}]}"#;
        let categories = decode_categories(body).unwrap();
        assert_eq!(categories[0].name, "Beef");
        assert_eq!(categories[0].description.as_deref(), Some("Beef is meat."));
    }
}
