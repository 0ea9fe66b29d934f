//! Constraint- and purpose-aware food filtering and template selection.
//!
//! Selection state for one planning run lives in [`SelectionHistory`];
//! random choices go through an injected RNG so runs can be seeded.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::catalog::{FoodItem, MealTemplate};
use crate::profile::UserConstraints;
use crate::slots::MealPurpose;

/// Foods and templates already chosen during one planning run.
///
/// Fresh per `generate` call and shared across that call's slots, so the
/// day's meals diversify. Never persisted across runs.
#[derive(Debug, Default)]
pub struct SelectionHistory {
    foods: HashSet<String>,
    templates: HashSet<String>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn food_used(&self, name: &str) -> bool {
        self.foods.contains(name)
    }

    pub fn mark_food(&mut self, name: &str) {
        self.foods.insert(name.to_string());
    }

    pub fn template_used(&self, name: &str) -> bool {
        self.templates.contains(name)
    }

    pub fn mark_template(&mut self, name: &str) {
        self.templates.insert(name.to_string());
    }
}

/// Drop foods the user cannot or will not eat. Original relative order is
/// preserved.
pub fn filter_by_constraints<'a>(
    foods: &'a [FoodItem],
    constraints: &UserConstraints,
) -> Vec<&'a FoodItem> {
    let disliked: HashSet<&str> = constraints.disliked_foods.iter().map(String::as_str).collect();
    let allergies: HashSet<&str> = constraints.allergies.iter().map(String::as_str).collect();

    foods
        .iter()
        .filter(|f| {
            if constraints.lactose_intolerant && !f.lactose_free {
                return false;
            }
            if f.allergens.iter().any(|a| allergies.contains(a.as_str())) {
                return false;
            }
            !disliked.contains(f.name.as_str())
        })
        .collect()
}

fn purpose_tags(purpose: MealPurpose) -> &'static [&'static str] {
    match purpose {
        MealPurpose::Breakfast => &["breakfast"],
        MealPurpose::Lunch | MealPurpose::Dinner => &["lunch", "dinner", "snack", "recovery"],
        MealPurpose::PreEvent => &["pre-event", "easy_digest", "quick_sugar", "snack"],
        MealPurpose::PostWorkout => &["dinner", "recovery", "lunch", "snack"],
        MealPurpose::Snack => &["pre-event", "post-workout", "quick_sugar", "snack"],
    }
}

/// Keep foods tagged for the slot's purpose. Degrades to the full input
/// when nothing matches, so a composable meal always exists if any safe
/// food exists.
pub fn filter_by_purpose<'a>(foods: &[&'a FoodItem], purpose: MealPurpose) -> Vec<&'a FoodItem> {
    let wanted = purpose_tags(purpose);
    let matching: Vec<&FoodItem> = foods
        .iter()
        .copied()
        .filter(|f| f.tags.iter().any(|t| wanted.contains(&t.as_str())))
        .collect();
    if matching.is_empty() {
        foods.to_vec()
    } else {
        matching
    }
}

/// Pick a template for the purpose, preferring ones unused this run.
///
/// `exclude_name` (the swap exclusion) is honored whenever excluding it
/// leaves any candidate; `force_new` selects uniformly from the
/// exclude-filtered pool regardless of use history. Returns `None` only
/// when no template matches the purpose at all.
pub fn pick_template<'a, R: Rng>(
    templates: &'a [MealTemplate],
    purpose: MealPurpose,
    history: &SelectionHistory,
    force_new: bool,
    exclude_name: Option<&str>,
    rng: &mut R,
) -> Option<&'a MealTemplate> {
    let matching: Vec<&MealTemplate> = templates
        .iter()
        .filter(|t| t.matches_purpose(purpose))
        .collect();
    if matching.is_empty() {
        return None;
    }

    let excluded: Vec<&MealTemplate> = match exclude_name {
        Some(name) => {
            let kept: Vec<&MealTemplate> =
                matching.iter().copied().filter(|t| t.name != name).collect();
            if kept.is_empty() {
                matching
            } else {
                kept
            }
        }
        None => matching,
    };

    if force_new {
        return excluded.choose(rng).copied();
    }

    let unused: Vec<&MealTemplate> = excluded
        .iter()
        .copied()
        .filter(|t| !history.template_used(&t.name))
        .collect();
    let pool = if unused.is_empty() { &excluded } else { &unused };
    pool.choose(rng).copied()
}
