//! The closed set of screens and the typed transition table between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every navigable view in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// Landing screen; also where sign-out lands.
    Display,
    AuthSelection,
    SignIn,
    SignUp,
    Verification,
    Gender,
    PersonalInfo,
    FitnessGoal,
    Dashboard,
    Settings,
    FormAnalysis,
    WorkoutSchedule,
    Progress,
    Chat,
}

impl Screen {
    /// The screen shown at start-up and after sign-out.
    pub const ENTRY: Screen = Screen::Display;

    pub const ALL: [Screen; 14] = [
        Screen::Display,
        Screen::AuthSelection,
        Screen::SignIn,
        Screen::SignUp,
        Screen::Verification,
        Screen::Gender,
        Screen::PersonalInfo,
        Screen::FitnessGoal,
        Screen::Dashboard,
        Screen::Settings,
        Screen::FormAnalysis,
        Screen::WorkoutSchedule,
        Screen::Progress,
        Screen::Chat,
    ];

    /// Route name, as a UI shell or log line would use it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Display => "display",
            Screen::AuthSelection => "authSelection",
            Screen::SignIn => "signin",
            Screen::SignUp => "signup",
            Screen::Verification => "verification",
            Screen::Gender => "gender",
            Screen::PersonalInfo => "personalinfo",
            Screen::FitnessGoal => "fitnessgoal",
            Screen::Dashboard => "dashboard",
            Screen::Settings => "settings",
            Screen::FormAnalysis => "formAnalysis",
            Screen::WorkoutSchedule => "workoutSchedule",
            Screen::Progress => "progress",
            Screen::Chat => "chat",
        }
    }

    /// Parse a route name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User intents and flow outcomes that move between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavEvent {
    Back,
    GetStarted,
    ChooseSignIn,
    ChooseSignUp,
    GenderChosen,
    PersonalInfoAccepted,
    GoalAccepted,
    VerificationSent,
    SignedIn,
    SignedOut,
    OpenSettings,
    OpenWorkoutSchedule,
    OpenProgress,
    OpenFormAnalysis,
    OpenChat,
}

/// The transition table: where `event` leads from `from`, if anywhere.
pub fn transition(from: Screen, event: NavEvent) -> Option<Screen> {
    use NavEvent::*;
    use Screen::*;

    let to = match (from, event) {
        (Display, GetStarted) => AuthSelection,

        (AuthSelection, ChooseSignIn) => SignIn,
        (AuthSelection, ChooseSignUp) => Gender,

        (SignIn, Back) => Display,
        (SignIn, SignedIn) => Dashboard,

        (Gender, Back) => Display,
        (Gender, GenderChosen) => PersonalInfo,

        (PersonalInfo, Back) => Gender,
        (PersonalInfo, PersonalInfoAccepted) => FitnessGoal,

        (FitnessGoal, Back) => PersonalInfo,
        (FitnessGoal, GoalAccepted) => SignUp,

        (SignUp, Back) => FitnessGoal,
        (SignUp, VerificationSent) => Verification,

        (Verification, Back) => SignUp,
        (Verification, SignedIn) => Dashboard,

        (Dashboard, OpenSettings) => Settings,
        (Dashboard, OpenWorkoutSchedule) => WorkoutSchedule,
        (Dashboard, OpenProgress) => Progress,
        (Dashboard, OpenFormAnalysis) => FormAnalysis,
        (Dashboard, OpenChat) => Chat,

        (Settings, SignedOut) => Display,
        (Settings | WorkoutSchedule | Progress | FormAnalysis | Chat, Back) => Dashboard,

        _ => return None,
    };

    Some(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_name(screen.as_str()), Some(screen));
        }
        assert_eq!(Screen::from_name("diet"), None);
    }

    #[test]
    fn test_onboarding_path() {
        let path = [
            (Screen::Display, NavEvent::GetStarted, Screen::AuthSelection),
            (Screen::AuthSelection, NavEvent::ChooseSignUp, Screen::Gender),
            (Screen::Gender, NavEvent::GenderChosen, Screen::PersonalInfo),
            (Screen::PersonalInfo, NavEvent::PersonalInfoAccepted, Screen::FitnessGoal),
            (Screen::FitnessGoal, NavEvent::GoalAccepted, Screen::SignUp),
            (Screen::SignUp, NavEvent::VerificationSent, Screen::Verification),
            (Screen::Verification, NavEvent::SignedIn, Screen::Dashboard),
        ];

        for (from, event, to) in path {
            assert_eq!(transition(from, event), Some(to), "{from} --{event:?}-->");
        }
    }

    #[test]
    fn test_back_edges() {
        assert_eq!(transition(Screen::SignIn, NavEvent::Back), Some(Screen::Display));
        assert_eq!(transition(Screen::Gender, NavEvent::Back), Some(Screen::Display));
        assert_eq!(transition(Screen::PersonalInfo, NavEvent::Back), Some(Screen::Gender));
        assert_eq!(transition(Screen::FitnessGoal, NavEvent::Back), Some(Screen::PersonalInfo));
        assert_eq!(transition(Screen::SignUp, NavEvent::Back), Some(Screen::FitnessGoal));
        assert_eq!(transition(Screen::Verification, NavEvent::Back), Some(Screen::SignUp));

        for screen in [
            Screen::Settings,
            Screen::WorkoutSchedule,
            Screen::Progress,
            Screen::FormAnalysis,
            Screen::Chat,
        ] {
            assert_eq!(transition(screen, NavEvent::Back), Some(Screen::Dashboard));
        }
    }

    #[test]
    fn test_undefined_pairs_rejected() {
        assert_eq!(transition(Screen::Display, NavEvent::Back), None);
        assert_eq!(transition(Screen::Dashboard, NavEvent::Back), None);
        assert_eq!(transition(Screen::Gender, NavEvent::OpenChat), None);
        assert_eq!(transition(Screen::Chat, NavEvent::SignedOut), None);
        assert_eq!(transition(Screen::PersonalInfo, NavEvent::SignedIn), None);
    }
}
