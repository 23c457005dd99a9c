//! Plain view models for every screen.
//!
//! [`render`] turns a [`Screen`] plus the current app data into a
//! [`ScreenView`]: a title, some labelled rows, and the actions the user can
//! take. A UI shell draws these however it likes.

use chrono::NaiveDate;
use coach_core::{ChatMessage, Role};
use profile_store::{FitnessGoal, Gender, ProfileRecord};
use serde::Serialize;

use crate::onboarding::split_name;
use crate::progress::{self, WEEKLY_WORKOUTS};
use crate::schedule::{plan_for, ScheduleState, WEEKLY_SCHEDULE};
use crate::screen::{NavEvent, Screen};

const BRAND: &str = "Athletix";
const TAGLINE: &str = "A Fitness Intelligence Technology";
const NOT_SET: &str = "Not set";

/// What the app shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    /// Store not rehydrated or identity provider still loading.
    Loading,
    Ready(ScreenView),
}

impl View {
    pub fn screen(&self) -> Option<Screen> {
        match self {
            View::Loading => None,
            View::Ready(view) => Some(view.screen),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub screen: Screen,
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: Option<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub label: String,
    pub intent: Intent,
}

/// What an action asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Intent {
    Navigate(NavEvent),
    ChooseGender(Gender),
    SubmitPersonalInfo,
    ChooseGoal(FitnessGoal),
    SubmitSignUp,
    SubmitSignIn,
    SubmitVerificationCode,
    ResendCode,
    SignOut,
    ToggleDay(usize),
    SendMessage,
    RequestCameraPermission,
}

/// Camera permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CameraPermission {
    /// The platform has not answered yet.
    #[default]
    Unknown,
    Denied,
    Granted,
}

/// Everything a screen may draw from.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub profile: &'a ProfileRecord,
    pub today: NaiveDate,
    pub schedule: ScheduleState,
    pub camera: CameraPermission,
    pub chat: &'a [ChatMessage],
    pub chat_loading: bool,
    /// Goal highlighted on the goal screen but not yet submitted.
    pub goal_selection: Option<FitnessGoal>,
}

impl<'a> RenderContext<'a> {
    pub fn new(profile: &'a ProfileRecord, today: NaiveDate) -> Self {
        Self {
            profile,
            today,
            schedule: ScheduleState::default(),
            camera: CameraPermission::default(),
            chat: &[],
            chat_loading: false,
            goal_selection: None,
        }
    }
}

impl Section {
    fn new(heading: Option<&str>, rows: Vec<Row>) -> Self {
        Self {
            heading: heading.map(str::to_string),
            rows,
        }
    }
}

fn row(label: impl Into<String>, value: impl Into<String>) -> Row {
    Row {
        label: label.into(),
        value: value.into(),
    }
}

fn action(label: &str, intent: Intent) -> Action {
    Action {
        label: label.to_string(),
        intent,
    }
}

fn back() -> Action {
    action("Back", Intent::Navigate(NavEvent::Back))
}

fn or_not_set<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map(format).unwrap_or_else(|| NOT_SET.to_string())
}

fn text_or_not_set(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_SET.to_string()
    } else {
        value.to_string()
    }
}

/// Date as shown on the dashboard, e.g. "02 Dec 2025".
pub fn format_dashboard_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Dashboard greeting, e.g. "Hello Sam,".
pub fn greeting(profile: &ProfileRecord) -> String {
    let (first, _) = split_name(&profile.name);
    let first = if first.is_empty() { "User" } else { first.as_str() };
    format!("Hello {},", first)
}

pub fn render(screen: Screen, ctx: &RenderContext<'_>) -> ScreenView {
    let mut view = ScreenView {
        screen,
        title: String::new(),
        subtitle: None,
        sections: Vec::new(),
        actions: Vec::new(),
    };

    match screen {
        Screen::Display => {
            view.title = BRAND.to_string();
            view.subtitle = Some(TAGLINE.to_string());
            view.actions = vec![action("Start Now", Intent::Navigate(NavEvent::GetStarted))];
        }
        Screen::AuthSelection => {
            view.title = BRAND.to_string();
            view.subtitle = Some(TAGLINE.to_string());
            view.actions = vec![
                action("Sign In", Intent::Navigate(NavEvent::ChooseSignIn)),
                action("Sign Up", Intent::Navigate(NavEvent::ChooseSignUp)),
            ];
        }
        Screen::SignIn => {
            view.title = "Sign In".to_string();
            view.actions = vec![back(), action("Sign In", Intent::SubmitSignIn)];
        }
        Screen::SignUp => {
            view.title = "Sign Up".to_string();
            view.actions = vec![back(), action("Sign Up", Intent::SubmitSignUp)];
        }
        Screen::Verification => {
            view.title = "Verify Email".to_string();
            view.subtitle = Some(format!(
                "Enter the verification code sent to {}",
                text_or_not_set(&ctx.profile.email)
            ));
            view.actions = vec![
                back(),
                action("Verify", Intent::SubmitVerificationCode),
                action("Didn't receive code? Resend", Intent::ResendCode),
            ];
        }
        Screen::Gender => {
            view.title = "Select Gender".to_string();
            view.actions = vec![
                back(),
                action(Gender::Male.label(), Intent::ChooseGender(Gender::Male)),
                action(Gender::Female.label(), Intent::ChooseGender(Gender::Female)),
            ];
        }
        Screen::PersonalInfo => {
            view.title = "Personal Information".to_string();
            view.subtitle = Some("Tell us a bit about yourself".to_string());
            view.actions = vec![back(), action("Continue", Intent::SubmitPersonalInfo)];
        }
        Screen::FitnessGoal => {
            view.title = "Fitness Goal".to_string();
            view.subtitle = Some("What's your primary fitness goal?".to_string());
            view.actions.push(back());
            view.actions.extend(
                FitnessGoal::ALL
                    .into_iter()
                    .map(|goal| action(goal.label(), Intent::ChooseGoal(goal))),
            );
            if let Some(goal) = ctx.goal_selection.or(ctx.profile.fitness_goal) {
                view.sections.push(Section::new(None, vec![row("Selected", goal.label())]));
            }
        }
        Screen::Dashboard => render_dashboard(&mut view, ctx),
        Screen::Settings => render_settings(&mut view, ctx.profile),
        Screen::FormAnalysis => render_form_analysis(&mut view, ctx.camera),
        Screen::WorkoutSchedule => render_schedule(&mut view, ctx.schedule),
        Screen::Progress => render_progress(&mut view),
        Screen::Chat => render_chat(&mut view, ctx),
    }

    view
}

fn render_dashboard(view: &mut ScreenView, ctx: &RenderContext<'_>) {
    let plan = plan_for(ctx.today);

    view.title = greeting(ctx.profile);
    view.subtitle = Some("Good morning".to_string());
    view.sections = vec![
        Section::new(
            Some("Today’s Workout Plan"),
            vec![
                row("Date", format_dashboard_date(ctx.today)),
                row(plan.day, plan.title),
            ],
        ),
        Section::new(
            Some("Progress Tracker"),
            vec![row("", "Review Your Stats. & Stay On Track.")],
        ),
        Section::new(
            Some("Form Analysis"),
            vec![row("", "Improve your Form & Reduce Injury")],
        ),
    ];
    view.actions = vec![
        action("Settings", Intent::Navigate(NavEvent::OpenSettings)),
        action("Today’s Workout Plan", Intent::Navigate(NavEvent::OpenWorkoutSchedule)),
        action("Progress Tracker", Intent::Navigate(NavEvent::OpenProgress)),
        action("Form Analysis", Intent::Navigate(NavEvent::OpenFormAnalysis)),
        action("Chat now", Intent::Navigate(NavEvent::OpenChat)),
    ];
}

fn render_settings(view: &mut ScreenView, profile: &ProfileRecord) {
    view.title = "Settings".to_string();
    view.sections = vec![
        Section::new(
            Some("Account Information"),
            vec![
                row("Name", text_or_not_set(&profile.name)),
                row("Email", text_or_not_set(&profile.email)),
            ],
        ),
        Section::new(
            Some("Personal Details"),
            vec![
                row("Gender", or_not_set(profile.gender, |g| g.label().to_string())),
                row("Age", or_not_set(profile.age, |a| format!("{} years", a))),
                row("Height", or_not_set(profile.height_cm, |h| format!("{} cm", h))),
                row("Weight", or_not_set(profile.weight_kg, |w| format!("{} kg", w))),
            ],
        ),
        Section::new(
            Some("Fitness"),
            vec![row(
                "Fitness Goal",
                or_not_set(profile.fitness_goal, |g| g.label().to_string()),
            )],
        ),
    ];
    view.actions = vec![back(), action("Log Out", Intent::SignOut)];
}

fn render_form_analysis(view: &mut ScreenView, camera: CameraPermission) {
    view.title = "Form Analysis".to_string();
    match camera {
        CameraPermission::Unknown => {}
        CameraPermission::Denied => {
            view.sections = vec![Section::new(
                None,
                vec![row("", "We need your permission to show the camera")],
            )];
            view.actions = vec![
                action("Grant Permission", Intent::RequestCameraPermission),
                action("Back to Dashboard", Intent::Navigate(NavEvent::Back)),
            ];
        }
        CameraPermission::Granted => {
            view.subtitle = Some("Improve your Form & Reduce Injury".to_string());
            view.actions = vec![back()];
        }
    }
}

fn render_schedule(view: &mut ScreenView, schedule: ScheduleState) {
    view.title = "Weekly Training Schedule".to_string();
    view.sections = WEEKLY_SCHEDULE
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let rows = if schedule.expanded() == Some(index) {
                day.exercises.iter().map(|e| row(e.name, e.reps)).collect()
            } else {
                Vec::new()
            };
            let heading = format!("{} - {}", day.day, day.title);
            Section::new(Some(heading.as_str()), rows)
        })
        .collect();

    view.actions.push(back());
    view.actions.extend(
        WEEKLY_SCHEDULE
            .iter()
            .enumerate()
            .filter(|(_, day)| !day.is_rest)
            .map(|(index, day)| action(day.day, Intent::ToggleDay(index))),
    );
}

fn render_progress(view: &mut ScreenView) {
    view.title = "Weekly Progress".to_string();

    let mut activity: Vec<Row> = WEEKLY_WORKOUTS
        .iter()
        .map(|p| row(p.label, p.value.to_string()))
        .collect();
    if let Some(i) = progress::busiest_day() {
        activity.push(row("Busiest", WEEKLY_WORKOUTS[i].label));
    }
    activity.push(row("Total", progress::weekly_total().to_string()));

    let macros = progress::MACRO_SPLIT
        .iter()
        .filter_map(|p| progress::macro_share(p.label).map(|s| row(p.label, format!("{}%", s))))
        .collect();

    view.sections = vec![
        Section::new(Some("Activity"), activity),
        Section::new(Some("Macros"), macros),
    ];
    view.actions = vec![back()];
}

fn render_chat(view: &mut ScreenView, ctx: &RenderContext<'_>) {
    view.title = "Arixa AI Chat".to_string();

    let mut rows: Vec<Row> = ctx
        .chat
        .iter()
        .filter(|m| m.is_visible())
        .map(|m| {
            let speaker = match m.role {
                Role::User => "You",
                _ => "Arixa",
            };
            row(speaker, m.text.as_str())
        })
        .collect();
    if ctx.chat_loading {
        rows.push(row("Arixa", "Arixa is typing..."));
    }

    view.sections = vec![Section::new(None, rows)];
    view.actions = vec![back(), action("Send", Intent::SendMessage)];
}
