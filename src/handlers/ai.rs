use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ai::{nutrition_prompt, workout_prompt, AiGateway};
use crate::error::{AppError, Result};
use crate::estimator;
use crate::middleware::AuthUser;
use crate::models::{PlanRequest, Provider, WorkoutPlan};
use crate::program;

#[derive(Clone)]
pub struct AiState {
    pub gateway: AiGateway,
}

/// POST /api/ai/workout
///
/// Provider failures never surface to the caller: the response is always a
/// well-formed plan, tagged with where it came from.
pub async fn generate_workout(
    State(state): State<AiState>,
    _auth_user: AuthUser,
    Json(request): Json<PlanRequest>,
) -> Result<Json<serde_json::Value>> {
    if state.gateway.is_enabled() {
        let prompt = workout_prompt(&request);
        match state.gateway.request_json::<WorkoutPlan>(&prompt).await {
            Ok(plan) => {
                return Ok(Json(json!({ "provider": Provider::Openai, "plan": plan })));
            }
            Err(e) => {
                tracing::warn!("AI workout generation failed, using fallback: {}", e);
            }
        }
    }

    let plan = program::generate(&request);
    Ok(Json(json!({ "provider": Provider::Fallback, "plan": plan })))
}

#[derive(Debug, Deserialize)]
pub struct NutritionQuery {
    pub food: String,
}

/// Shape the provider must return for a nutrition analysis. Parsing into
/// this validates the response before anything trusts it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlan {
    pub target_calories: f64,
    pub macros: Macros,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionPlan {
    fn is_valid(&self) -> bool {
        self.target_calories >= 0.0
            && self.macros.protein >= 0.0
            && self.macros.carbs >= 0.0
            && self.macros.fat >= 0.0
    }
}

/// POST /api/ai/nutrition
pub async fn analyze_nutrition(
    State(state): State<AiState>,
    _auth_user: AuthUser,
    Json(query): Json<NutritionQuery>,
) -> Result<Json<serde_json::Value>> {
    if query.food.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Food description is required".to_string(),
        ));
    }

    if state.gateway.is_enabled() {
        let prompt = nutrition_prompt(&query.food);
        match state.gateway.request_json::<NutritionPlan>(&prompt).await {
            Ok(plan) if plan.is_valid() => {
                return Ok(Json(json!({ "provider": Provider::Openai, "plan": plan })));
            }
            Ok(_) => {
                tracing::warn!("AI nutrition response failed validation, using fallback");
            }
            Err(e) => {
                tracing::warn!("AI nutrition analysis failed, using fallback: {}", e);
            }
        }
    }

    let estimate = estimator::estimate(&query.food, &mut rand::thread_rng());
    Ok(Json(json!({
        "provider": Provider::Fallback,
        "plan": {
            "targetCalories": estimate.calories,
            "macros": {
                "protein": estimate.protein,
                "carbs": estimate.carbs,
                "fat": estimate.fat,
            },
        },
    })))
}
