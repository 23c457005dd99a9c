//! Profile models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Gender chosen on the first onboarding screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Stable key used in storage.
    pub fn as_key(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Parse a stored key or user input.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Primary fitness goal chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessGoal {
    LoseWeight,
    BuildMuscle,
    StayFit,
    ImproveEndurance,
}

impl FitnessGoal {
    /// Every goal, in the order the picker shows them.
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::LoseWeight,
        FitnessGoal::BuildMuscle,
        FitnessGoal::StayFit,
        FitnessGoal::ImproveEndurance,
    ];

    /// Stable key used in storage.
    pub fn as_key(&self) -> &'static str {
        match self {
            FitnessGoal::LoseWeight => "lose-weight",
            FitnessGoal::BuildMuscle => "build-muscle",
            FitnessGoal::StayFit => "stay-fit",
            FitnessGoal::ImproveEndurance => "improve-endurance",
        }
    }

    /// Parse a stored key, or a label typed by a user.
    pub fn from_key(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '_' { '-' } else { c })
            .collect();

        Self::ALL.into_iter().find(|goal| goal.as_key() == normalized)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::LoseWeight => "Lose Weight",
            FitnessGoal::BuildMuscle => "Build Muscle",
            FitnessGoal::StayFit => "Stay Fit",
            FitnessGoal::ImproveEndurance => "Improve Endurance",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The onboarding-collected user attributes.
///
/// `Default` is the signed-out state: empty text, everything else unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    /// Years, 1-120 once validated.
    pub age: Option<u8>,
    /// Centimetres, 50-300 once validated.
    pub height_cm: Option<f64>,
    /// Kilograms, 20-500 once validated.
    pub weight_kg: Option<f64>,
    pub fitness_goal: Option<FitnessGoal>,
}

/// Everything the client persists: the profile plus the auth flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileState {
    pub profile: ProfileRecord,
    /// Mirrors the identity provider's session state.
    pub is_authenticated: bool,
}

/// Raw `profile_state` row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StoredProfile {
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub fitness_goal: Option<String>,
    pub is_authenticated: bool,
    pub updated_at: String,
}

impl From<StoredProfile> for ProfileState {
    fn from(row: StoredProfile) -> Self {
        // Unknown keys and out-of-range ages read back as unset.
        let profile = ProfileRecord {
            name: row.name,
            email: row.email,
            gender: row.gender.as_deref().and_then(Gender::from_key),
            age: row.age.and_then(|age| u8::try_from(age).ok()),
            height_cm: row.height_cm,
            weight_kg: row.weight_kg,
            fitness_goal: row.fitness_goal.as_deref().and_then(FitnessGoal::from_key),
        };

        Self {
            profile,
            is_authenticated: row.is_authenticated,
        }
    }
}
