//! Heuristic nutrition estimator, used when the AI provider is disabled or
//! fails. Keyword-to-macro table lookup over the lower-cased input, scaled
//! by a small random variance.
//!
//! Repeated calls with the same input intentionally vary by up to ±10%; the
//! Rng is a parameter so tests can pin it down.

use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NutritionEstimate {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

struct FoodRule {
    /// English and Arabic forms matched as substrings.
    keywords: &'static [&'static str],
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    /// Multiply the contribution by the first integer in the text (eggs).
    per_count: bool,
}

const FOOD_RULES: &[FoodRule] = &[
    // Protein sources
    FoodRule {
        keywords: &["chicken", "دجاج"],
        calories: 165.0,
        protein: 31.0,
        carbs: 0.0,
        fat: 3.6,
        per_count: false,
    },
    FoodRule {
        keywords: &["beef", "لحم"],
        calories: 250.0,
        protein: 26.0,
        carbs: 0.0,
        fat: 15.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["fish", "سمك"],
        calories: 206.0,
        protein: 22.0,
        carbs: 0.0,
        fat: 12.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["egg", "بيض"],
        calories: 78.0,
        protein: 6.0,
        carbs: 0.6,
        fat: 5.0,
        per_count: true,
    },
    // Carb sources
    FoodRule {
        keywords: &["rice", "أرز"],
        calories: 130.0,
        protein: 2.7,
        carbs: 28.0,
        fat: 0.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["bread", "خبز"],
        calories: 80.0,
        protein: 2.5,
        carbs: 15.0,
        fat: 0.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["pasta", "معكرونة"],
        calories: 200.0,
        protein: 7.0,
        carbs: 40.0,
        fat: 0.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["potato", "بطاطس"],
        calories: 163.0,
        protein: 4.3,
        carbs: 37.0,
        fat: 0.0,
        per_count: false,
    },
    // Vegetables
    FoodRule {
        keywords: &["salad", "سلطة"],
        calories: 50.0,
        protein: 2.0,
        carbs: 10.0,
        fat: 0.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["broccoli", "بروكلي"],
        calories: 55.0,
        protein: 3.7,
        carbs: 11.0,
        fat: 0.0,
        per_count: false,
    },
    // Fruits
    FoodRule {
        keywords: &["banana", "موز"],
        calories: 105.0,
        protein: 1.3,
        carbs: 27.0,
        fat: 0.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["apple", "تفاح"],
        calories: 95.0,
        protein: 0.0,
        carbs: 25.0,
        fat: 0.0,
        per_count: false,
    },
    // Fats
    FoodRule {
        keywords: &["oil", "زيت"],
        calories: 120.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 14.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["butter", "زبدة"],
        calories: 100.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 11.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["avocado", "أفوكادو"],
        calories: 160.0,
        protein: 2.0,
        carbs: 9.0,
        fat: 15.0,
        per_count: false,
    },
    // Dairy
    FoodRule {
        keywords: &["milk", "حليب"],
        calories: 150.0,
        protein: 8.0,
        carbs: 12.0,
        fat: 8.0,
        per_count: false,
    },
    FoodRule {
        keywords: &["yogurt", "زبادي"],
        calories: 100.0,
        protein: 6.0,
        carbs: 17.0,
        fat: 0.4,
        per_count: false,
    },
];

/// Estimate macros for a free-text food description.
///
/// Total over its input domain: unmatched or empty text yields all zeros.
pub fn estimate<R: Rng + ?Sized>(description: &str, rng: &mut R) -> NutritionEstimate {
    let text = description.to_lowercase();
    let count = leading_count(&text);

    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;

    for rule in FOOD_RULES {
        if !rule.keywords.iter().any(|kw| text.contains(kw)) {
            continue;
        }
        let factor = if rule.per_count { count as f64 } else { 1.0 };
        calories += rule.calories * factor;
        protein += rule.protein * factor;
        carbs += rule.carbs * factor;
        fat += rule.fat * factor;
    }

    let variance = rng.gen_range(0.9..1.1);
    NutritionEstimate {
        calories: (calories * variance).round() as u32,
        protein: (protein * variance).round() as u32,
        carbs: (carbs * variance).round() as u32,
        fat: (fat * variance).round() as u32,
    }
}

/// First integer appearing in the text, defaulting to 1.
fn leading_count(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(1)
}
