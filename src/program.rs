//! Deterministic 8-week workout program generator. Serves as the fallback
//! when the AI provider is disabled or fails, and defines the plan shape the
//! provider is asked to produce.

use std::collections::BTreeMap;

use crate::models::{
    Experience, PlanExercise, PlanRequest, Week, WeekType, WorkoutDay, WorkoutPlan,
};

/// Generate a complete plan for the given request.
///
/// Total over its input domain: `days_per_week` outside 2-6 is not rejected
/// and takes the 6-day branch. Output always has exactly 8 weeks numbered
/// 1..=8; week 4 is a deload, week 8 is a deload for advanced lifters and a
/// test week otherwise.
pub fn generate(request: &PlanRequest) -> WorkoutPlan {
    let (split, split_reason) = select_split(request.days_per_week);
    let days = build_days(split, request.days_per_week);

    let weeks = (1..=8)
        .map(|week_number| Week {
            week_number,
            week_type: week_type(week_number, request.experience),
            days: days.clone(),
        })
        .collect();

    WorkoutPlan {
        split: split.to_string(),
        split_reason: split_reason.to_string(),
        weeks,
        progression: PROGRESSION.iter().map(|s| (*s).to_string()).collect(),
        deload: DELOAD.iter().map(|s| (*s).to_string()).collect(),
        substitutions: substitutions(),
        safety_notes: SAFETY_NOTES.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Split selection is a pure function of training days per week.
fn select_split(days_per_week: u8) -> (&'static str, &'static str) {
    match days_per_week {
        2 => (
            "Full Body",
            "With 2 days per week, Full Body training allows you to hit all major muscle groups twice per week for optimal frequency and recovery.",
        ),
        3 => (
            "Push-Pull-Legs (PPL)",
            "PPL rotating 3 days per week provides excellent balance between volume, frequency, and recovery for your schedule.",
        ),
        4 => (
            "Upper/Lower Split",
            "Upper/Lower 4 days per week gives ideal frequency (2x per muscle group) with manageable session length and recovery.",
        ),
        5 => (
            "Pro Split (Body-Part)",
            "5 days allows a classic body-part split: Chest, Back, Shoulders, Arms, Legs - perfect for focused volume per muscle group.",
        ),
        _ => (
            "Push-Pull-Legs (PPL)",
            "6 days per week suits PPL perfectly, hitting each muscle group twice with high frequency for advanced trainees.",
        ),
    }
}

fn week_type(week_number: u32, experience: Experience) -> WeekType {
    match week_number {
        4 => WeekType::Deload,
        8 if experience == Experience::Advanced => WeekType::Deload,
        8 => WeekType::Test,
        _ => WeekType::Build,
    }
}

/// Day names per split. The generated structure is reused across all 8
/// weeks; week-to-week exercise variation is left to the AI provider.
fn day_names(split: &str) -> &'static [&'static str] {
    match split {
        "Full Body" => &["Full Body A", "Full Body B"],
        "Upper/Lower Split" => &["Upper A", "Lower A", "Upper B", "Lower B"],
        "Pro Split (Body-Part)" => &["Chest", "Back", "Shoulders", "Arms", "Legs"],
        _ => &["Push A", "Pull A", "Legs A", "Push B", "Pull B", "Legs B"],
    }
}

fn build_days(split: &str, days_per_week: u8) -> Vec<WorkoutDay> {
    let names = day_names(split);
    let count = (days_per_week as usize).min(names.len());

    names[..count]
        .iter()
        .map(|name| WorkoutDay {
            name: (*name).to_string(),
            exercises: exercises_for(name),
        })
        .collect()
}

fn exercise(name: &str, sets: &str, reps: &str, rpe: &str, rest: &str) -> PlanExercise {
    PlanExercise {
        name: name.to_string(),
        sets: sets.to_string(),
        reps: reps.to_string(),
        rpe: rpe.to_string(),
        rest: rest.to_string(),
        notes: String::new(),
    }
}

fn exercises_for(day_name: &str) -> Vec<PlanExercise> {
    if day_name.starts_with("Push") || day_name == "Chest" || day_name == "Shoulders" {
        vec![
            exercise("Barbell Bench Press", "3", "6-8", "7-8", "2-3 min"),
            exercise("Overhead Press", "3", "8-10", "7-8", "2 min"),
            exercise("Incline Dumbbell Press", "3", "8-12", "7-8", "90 sec"),
            exercise("Lateral Raise", "3", "12-15", "7", "60-90 sec"),
            exercise("Triceps Pushdown", "2-3", "10-15", "7", "60-90 sec"),
        ]
    } else if day_name.starts_with("Pull") || day_name == "Back" || day_name == "Arms" {
        vec![
            exercise("Barbell Row", "3", "6-8", "7-8", "2-3 min"),
            exercise("Lat Pulldown", "3", "8-10", "7-8", "2 min"),
            exercise("Cable Row", "3", "8-12", "7-8", "90 sec"),
            exercise("Face Pull", "3", "12-15", "7", "60-90 sec"),
            exercise("Biceps Curl", "2-3", "10-15", "7", "60-90 sec"),
        ]
    } else if day_name.starts_with("Legs") || day_name == "Legs" || day_name.starts_with("Lower") {
        vec![
            exercise("Back Squat", "3", "6-8", "7-8", "2-3 min"),
            exercise("Romanian Deadlift", "3", "8-10", "7-8", "2-3 min"),
            exercise("Leg Press", "3", "8-12", "7-8", "2 min"),
            exercise("Leg Curl", "3", "10-15", "7", "90 sec"),
            exercise("Standing Calf Raise", "3", "10-15", "7", "60-90 sec"),
        ]
    } else if day_name.starts_with("Upper") {
        vec![
            exercise("Barbell Bench Press", "3", "6-8", "7-8", "2-3 min"),
            exercise("Barbell Row", "3", "6-8", "7-8", "2-3 min"),
            exercise("Overhead Press", "2-3", "8-12", "7-8", "90 sec"),
            exercise("Lat Pulldown", "3", "8-12", "7-8", "90 sec"),
            exercise("Biceps Curl", "2-3", "10-15", "7", "60-90 sec"),
        ]
    } else {
        // Full body days
        vec![
            exercise("Barbell Bench Press", "3", "6-8", "7-8", "2-3 min"),
            exercise("Barbell Row", "3", "8-10", "7-8", "2 min"),
            exercise("Back Squat", "3", "8-10", "7-8", "2-3 min"),
            exercise("Overhead Press", "2-3", "8-12", "7-8", "90 sec"),
            exercise("Plank", "3", "30-60 sec", "7", "60 sec"),
        ]
    }
}

const PROGRESSION: &[&str] = &[
    "Use double-progression: when you hit the top of the rep range for all sets with >=2 RIR, increase load by 2.5-5% next session.",
    "Track all workouts in a journal or app to monitor progress.",
    "If you fail to progress for 2 consecutive sessions on a lift, reduce load by 10% and rebuild.",
    "Progress accessories when you can complete all sets at RPE 7-8 comfortably.",
];

const DELOAD: &[&str] = &[
    "Every 4th week (or when feeling overtrained), reduce volume by 40-50%.",
    "Keep RPE <=6 during deload weeks.",
    "Maintain movement patterns but with lighter loads.",
    "Use deload week for mobility work and recovery.",
];

const SAFETY_NOTES: &[&str] = &[
    "Always warm up with 5-8 minutes of light cardio and 2 ramp sets before main lifts.",
    "Maintain proper form - reduce weight if form breaks down.",
    "Listen to your body - if pain (not fatigue) occurs, stop the exercise and substitute.",
];

fn substitutions() -> BTreeMap<String, Vec<String>> {
    let table: &[(&str, &[&str])] = &[
        (
            "Barbell Bench Press",
            &["Dumbbell Bench Press", "Push-ups (weighted)", "Machine Chest Press"],
        ),
        (
            "Back Squat",
            &["Front Squat", "Goblet Squat", "Leg Press", "Bulgarian Split Squat"],
        ),
        (
            "Deadlift",
            &["Trap Bar Deadlift", "Romanian Deadlift", "Rack Pulls"],
        ),
        (
            "Overhead Press",
            &["Dumbbell Shoulder Press", "Landmine Press", "Push Press"],
        ),
        (
            "Barbell Row",
            &["Dumbbell Row", "Cable Row", "Chest-Supported Row", "Inverted Row"],
        ),
    ];

    table
        .iter()
        .map(|(name, subs)| {
            (
                (*name).to_string(),
                subs.iter().map(|s| (*s).to_string()).collect(),
            )
        })
        .collect()
}
