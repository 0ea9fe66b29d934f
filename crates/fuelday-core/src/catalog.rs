//! External food and meal-template catalogs.
//!
//! Catalogs are supplied as JSON arrays; beyond serde's shape checking the
//! engine does not validate them. Per-100g macro values are taken at face
//! value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::slots::MealPurpose;

fn default_true() -> bool {
    true
}

/// A food with per-100g nutrition, keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub kcal_per_100g: f64,
    pub carbs_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
    /// Missing field means lactose-free.
    #[serde(default = "default_true")]
    pub lactose_free: bool,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Role of an item within a meal template; drives the default gram weight
/// when the template does not declare one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRole {
    #[default]
    Carb,
    Protein,
    Fat,
    Fruit,
    Dairy,
    Veg,
    Vegetable,
    Base,
    Grain,
    Drink,
    #[serde(other)]
    Other,
}

impl ItemRole {
    /// Default portion weight in grams for this role.
    pub fn default_grams(self) -> f64 {
        match self {
            ItemRole::Carb | ItemRole::Base | ItemRole::Grain => 180.0,
            ItemRole::Protein => 140.0,
            ItemRole::Fat => 20.0,
            ItemRole::Fruit => 150.0,
            ItemRole::Dairy => 170.0,
            ItemRole::Veg | ItemRole::Vegetable => 150.0,
            ItemRole::Drink => 500.0,
            ItemRole::Other => 120.0,
        }
    }
}

/// One line of a meal template, referencing a catalog food by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    pub name: String,
    #[serde(default)]
    pub role: ItemRole,
    #[serde(default)]
    pub grams: Option<f64>,
}

impl TemplateItem {
    /// Declared grams, or the role default.
    pub fn grams_or_default(&self) -> f64 {
        self.grams.unwrap_or_else(|| self.role.default_grams())
    }
}

/// A named meal template. Applies to a single `purpose` or to any purpose
/// in `purposes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTemplate {
    pub name: String,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub purposes: Vec<String>,
    pub items: Vec<TemplateItem>,
}

impl MealTemplate {
    /// Whether this template serves the given slot purpose.
    pub fn matches_purpose(&self, purpose: MealPurpose) -> bool {
        self.purpose.as_deref() == Some(purpose.as_str())
            || self.purposes.iter().any(|p| p == purpose.as_str())
    }
}

fn load_catalog<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a food catalog from a JSON file.
pub fn load_foods(path: &Path) -> Result<Vec<FoodItem>, CatalogError> {
    load_catalog(path)
}

/// Load a meal-template catalog from a JSON file.
pub fn load_templates(path: &Path) -> Result<Vec<MealTemplate>, CatalogError> {
    load_catalog(path)
}
