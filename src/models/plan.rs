use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Hypertrophy,
    Strength,
    FatLoss,
    Endurance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekType {
    Build,
    Deload,
    Test,
}

/// Which backend produced a generated plan or estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Openai,
    Fallback,
}

/// Input for plan generation, shared by the AI prompt and the fallback
/// generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub goal: Goal,
    pub experience: Experience,
    pub days_per_week: u8,
    #[serde(default = "default_session_length")]
    pub session_length_minutes: u16,
}

fn default_session_length() -> u16 {
    60
}

/// All exercise fields are display strings ("3", "6-8", "2-3 min"); no
/// numeric validation happens at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub rpe: String,
    pub rest: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub name: String,
    pub exercises: Vec<PlanExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week_number: u32,
    #[serde(rename = "type")]
    pub week_type: WeekType,
    pub days: Vec<WorkoutDay>,
}

/// An 8-week periodized program. Immutable once generated; persisted
/// verbatim as an opaque document attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub split: String,
    pub split_reason: String,
    pub weeks: Vec<Week>,
    pub progression: Vec<String>,
    pub deload: Vec<String>,
    pub substitutions: BTreeMap<String, Vec<String>>,
    pub safety_notes: Vec<String>,
}
