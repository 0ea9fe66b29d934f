//! Meal composition: choosing foods and portion sizes for one slot.
//!
//! Template-based composition scales a template's portions to the slot's
//! calorie target; when no template applies, a macro-split heuristic builds
//! the meal from the highest-carb/protein/fat candidates instead. Portions
//! land on 10 g steps with a 20 g floor.

use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::{FoodItem, MealTemplate};
use crate::profile::UserConstraints;
use crate::selector::{filter_by_constraints, filter_by_purpose, pick_template, SelectionHistory};
use crate::slots::{MealPurpose, MealSlot};
use serde::{Deserialize, Serialize};

/// One portioned food within a composed meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub name: String,
    pub grams: f64,
    pub kcal: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl PlannedItem {
    fn from_food(food: &FoodItem, grams: f64) -> Self {
        let factor = grams / 100.0;
        Self {
            name: food.name.clone(),
            grams: round1(grams),
            kcal: round1(food.kcal_per_100g * factor),
            carbs: round1(food.carbs_per_100g * factor),
            protein: round1(food.protein_per_100g * factor),
            fat: round1(food.fat_per_100g * factor),
        }
    }
}

/// Summed nutrition for a composed meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTotals {
    pub kcal: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Result of composing one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedMeal {
    pub items: Vec<PlannedItem>,
    pub totals: MealTotals,
    pub note: String,
    /// Name of the template used, if any; swap exclusion needs it later.
    #[serde(default)]
    pub template: Option<String>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Nearest 10 g, floored at 20 g.
fn round_portion(grams: f64) -> f64 {
    ((grams / 10.0).round() * 10.0).max(20.0)
}

fn sum_totals(items: &[PlannedItem]) -> MealTotals {
    MealTotals {
        kcal: round1(items.iter().map(|i| i.kcal).sum()),
        carbs: round1(items.iter().map(|i| i.carbs).sum()),
        protein: round1(items.iter().map(|i| i.protein).sum()),
        fat: round1(items.iter().map(|i| i.fat).sum()),
    }
}

fn heuristic_note(purpose: MealPurpose) -> &'static str {
    match purpose {
        MealPurpose::Breakfast => {
            "High-carb breakfast with some protein and fat to fuel the morning."
        }
        MealPurpose::Lunch => "Balanced lunch for sustained energy through the day.",
        MealPurpose::Dinner => "Evening meal with extra protein to support recovery.",
        MealPurpose::PreEvent => {
            "Mostly fast-digesting carbs before your session to give quick energy."
        }
        MealPurpose::PostWorkout => {
            "Post-workout recovery: carbs to refill glycogen + protein to support muscle repair."
        }
        MealPurpose::Snack => "Quick snack to top up energy between meals.",
    }
}

/// Compose a meal for one slot.
///
/// An empty constraint-filtered catalog yields an empty-items meal with an
/// explanatory note (a degraded state, not an error).
#[allow(clippy::too_many_arguments)]
pub fn compose<R: Rng>(
    slot: &MealSlot,
    foods: &[FoodItem],
    constraints: &UserConstraints,
    templates: &[MealTemplate],
    history: &mut SelectionHistory,
    force_new_template: bool,
    exclude_name: Option<&str>,
    rng: &mut R,
) -> ComposedMeal {
    let safe = filter_by_constraints(foods, constraints);
    if safe.is_empty() {
        debug!(slot = %slot.label, "no safe foods after constraint filtering");
        return ComposedMeal {
            items: vec![],
            totals: MealTotals::default(),
            note: "No foods available that match your constraints.".to_string(),
            template: None,
        };
    }

    let purpose_foods = filter_by_purpose(&safe, slot.purpose);

    if !templates.is_empty() {
        if let Some(meal) = compose_from_template(
            slot,
            &safe,
            templates,
            history,
            force_new_template,
            exclude_name,
            rng,
        ) {
            return meal;
        }
    }

    compose_heuristic(slot, &purpose_foods, history)
}

fn compose_from_template<R: Rng>(
    slot: &MealSlot,
    safe: &[&FoodItem],
    templates: &[MealTemplate],
    history: &mut SelectionHistory,
    force_new: bool,
    exclude_name: Option<&str>,
    rng: &mut R,
) -> Option<ComposedMeal> {
    let by_name: HashMap<&str, &FoodItem> =
        safe.iter().map(|f| (f.name.as_str(), *f)).collect();

    let template = pick_template(templates, slot.purpose, history, force_new, exclude_name, rng)?;

    // Any template item missing from the safe catalog abandons the whole
    // template; the heuristic path takes over and the template stays
    // unmarked.
    let mut base: Vec<(&FoodItem, f64)> = Vec::with_capacity(template.items.len());
    for item in &template.items {
        let food = by_name.get(item.name.as_str()).copied()?;
        base.push((food, item.grams_or_default()));
    }
    if base.is_empty() {
        return None;
    }

    let base_kcal: f64 = base
        .iter()
        .map(|(food, grams)| round1(food.kcal_per_100g * grams / 100.0))
        .sum();
    if base_kcal <= 0.0 {
        return None;
    }

    let scale = slot.kcal_target / base_kcal;
    let items: Vec<PlannedItem> = base
        .iter()
        .map(|(food, grams)| PlannedItem::from_food(food, round_portion(grams * scale)))
        .collect();
    let totals = sum_totals(&items);

    history.mark_template(&template.name);
    Some(ComposedMeal {
        items,
        totals,
        note: format!("{} (template).", template.name),
        template: Some(template.name.clone()),
    })
}

/// First candidate not yet used this run, else the list head; marks the
/// choice used either way. `candidates` must be non-empty.
fn pick_unused<'a>(candidates: &[&'a FoodItem], history: &mut SelectionHistory) -> &'a FoodItem {
    for &f in candidates {
        if !history.food_used(&f.name) {
            history.mark_food(&f.name);
            return f;
        }
    }
    let f = candidates[0];
    history.mark_food(&f.name);
    f
}

fn compose_heuristic(
    slot: &MealSlot,
    candidates: &[&FoodItem],
    history: &mut SelectionHistory,
) -> ComposedMeal {
    let mut by_carbs = candidates.to_vec();
    by_carbs.sort_by(|a, b| b.carbs_per_100g.total_cmp(&a.carbs_per_100g));
    let mut by_protein = candidates.to_vec();
    by_protein.sort_by(|a, b| b.protein_per_100g.total_cmp(&a.protein_per_100g));
    let mut by_fat = candidates.to_vec();
    by_fat.sort_by(|a, b| b.fat_per_100g.total_cmp(&a.fat_per_100g));

    let carb_base = pick_unused(&by_carbs[..by_carbs.len().min(10)], history);
    let protein_source = pick_unused(&by_protein[..by_protein.len().min(10)], history);
    let fat_source = pick_unused(&by_fat[..by_fat.len().min(10)], history);

    let target = slot.kcal_target;
    let mut items: Vec<PlannedItem> = Vec::new();

    match slot.purpose {
        MealPurpose::PreEvent | MealPurpose::Snack | MealPurpose::PostWorkout => {
            let second = if slot.purpose == MealPurpose::Snack {
                fat_source
            } else {
                protein_source
            };
            let carb_grams = round_portion(target * 0.8 / carb_base.kcal_per_100g * 100.0);
            let second_grams = round_portion(target * 0.2 / second.kcal_per_100g * 100.0);

            items.push(PlannedItem::from_food(carb_base, carb_grams));
            if second.name != carb_base.name {
                items.push(PlannedItem::from_food(second, second_grams));
            }
        }
        _ => {
            let carb_grams = round_portion(target * 0.6 / carb_base.kcal_per_100g * 100.0);
            let protein_grams =
                round_portion(target * 0.25 / protein_source.kcal_per_100g * 100.0);
            let fat_grams = round_portion(target * 0.15 / fat_source.kcal_per_100g * 100.0);

            items.push(PlannedItem::from_food(carb_base, carb_grams));
            if protein_source.name != carb_base.name {
                items.push(PlannedItem::from_food(protein_source, protein_grams));
            }
            if fat_source.name != carb_base.name && fat_source.name != protein_source.name {
                items.push(PlannedItem::from_food(fat_source, fat_grams));
            }
        }
    }

    let totals = sum_totals(&items);
    ComposedMeal {
        items,
        totals,
        note: heuristic_note(slot.purpose).to_string(),
        template: None,
    }
}
