//! Recipe and category domain models.
//!
//! Recipes are read-only projections of remote records. Filter endpoints only
//! return the id, name and thumbnail, so every other field is optional and a
//! partial recipe is simply one with those fields absent.

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

/// A recipe as returned by the remote source.
///
/// # Fields
///
/// - `id`: Numeric-looking string identifier, unique per recipe
/// - `tags`: Already split from the comma-delimited wire value
/// - `ingredients`: At most 20 pairs, only those with both parts present
/// - `video`: External video link, usually YouTube
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub area: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub video: Option<String>,
}

impl Recipe {
    /// Creates a partial recipe holding only the fields filter endpoints return.
    ///
    /// # Examples
    ///
    /// ```
    /// use mealdeck::domain::Recipe;
    ///
    /// let recipe = Recipe::summary("52772", "Teriyaki Chicken Casserole", "thumb.jpg");
    /// assert!(!recipe.is_detailed());
    /// ```
    #[must_use]
    pub fn summary(id: impl Into<String>, name: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: thumbnail.into(),
            area: None,
            category: None,
            tags: Vec::new(),
            instructions: None,
            ingredients: Vec::new(),
            video: None,
        }
    }

    /// Returns `true` when the record carries full details (instructions).
    #[must_use]
    pub const fn is_detailed(&self) -> bool {
        self.instructions.is_some()
    }

    /// Numeric value of the id, used for "newest" ordering.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    /// Splits the instructions into non-blank steps, one per line.
    ///
    /// # Examples
    ///
    /// ```
    /// use mealdeck::domain::Recipe;
    ///
    /// let mut recipe = Recipe::summary("1", "Soup", "");
    /// recipe.instructions = Some("Boil water.\r\n\r\nAdd salt.".to_string());
    /// assert_eq!(recipe.instruction_steps(), vec!["Boil water.", "Add salt."]);
    /// ```
    #[must_use]
    pub fn instruction_steps(&self) -> Vec<&str> {
        self.instructions
            .as_deref()
            .map(|text| {
                text.lines()
                    .map(str::trim)
                    .filter(|step| !step.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Formats each ingredient as `"{measure} {name}"`.
    #[must_use]
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|ingredient| format!("{} {}", ingredient.measure, ingredient.name))
            .collect()
    }
}

/// A recipe category from the categories listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_ignores_non_numbers() {
        assert_eq!(Recipe::summary("52772", "A", "").numeric_id(), Some(52772));
        assert_eq!(Recipe::summary("abc", "A", "").numeric_id(), None);
    }

    #[test]
    fn ingredient_lines_put_measure_first() {
        let mut recipe = Recipe::summary("1", "Toast", "");
        recipe.ingredients.push(Ingredient {
            name: "Bread".to_string(),
            measure: "2 slices".to_string(),
        });
        assert_eq!(recipe.ingredient_lines(), vec!["2 slices Bread"]);
    }

    #[test]
    fn steps_are_empty_without_instructions() {
        assert!(Recipe::summary("1", "Toast", "").instruction_steps().is_empty());
    }
}
