//! Domain layer for the Mealdeck plugin.
//!
//! Core types independent of Zellij APIs and of the remote wire format:
//!
//! - [`error`]: Error types and result aliases
//! - [`recipe`]: Recipe, ingredient and category models
//!
//! # Examples
//!
//! ```
//! use mealdeck::domain::{Recipe, Result};
//!
//! fn summary() -> Result<Recipe> {
//!     Ok(Recipe::summary("52772", "Teriyaki Chicken Casserole", ""))
//! }
//! ```

pub mod error;
pub mod recipe;

pub use error::{MealdeckError, Result};
pub use recipe::{Category, Ingredient, Recipe};
