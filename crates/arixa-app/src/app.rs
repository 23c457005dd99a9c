//! The composed client: navigation, profile store, auth flows and chat.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use coach_core::{ChatMessage, CompletionBackend};
use profile_store::{FitnessGoal, Gender};
use tracing::{debug, info};

use crate::auth::{AuthFlow, AuthOutcome, AuthSnapshot, IdentityProvider, SessionExistsPolicy};
use crate::chat::ChatSession;
use crate::error::{AppError, NavigationError};
use crate::navigation::Navigator;
use crate::onboarding::{validate_goal_selection, validate_personal_info, SignUpForm};
use crate::schedule::ScheduleState;
use crate::screen::{transition, NavEvent, Screen};
use crate::store::AppStore;
use crate::views::{render, CameraPermission, RenderContext, View};

pub struct App<P: IdentityProvider, C: CompletionBackend> {
    navigator: Navigator,
    store: Arc<AppStore>,
    auth: AuthFlow<P>,
    coach: Arc<C>,
    chat: Option<ChatSession<C>>,
    schedule: ScheduleState,
    camera: CameraPermission,
    goal_selection: Option<FitnessGoal>,
    /// Provider state the navigator last reconciled against.
    last_auth: Option<AuthSnapshot>,
}

impl<P: IdentityProvider, C: CompletionBackend> App<P, C> {
    pub fn new(
        provider: Arc<P>,
        coach: Arc<C>,
        store: Arc<AppStore>,
        policy: SessionExistsPolicy,
    ) -> Self {
        Self {
            navigator: Navigator::new(),
            auth: AuthFlow::new(provider, store.clone(), policy),
            store,
            coach,
            chat: None,
            schedule: ScheduleState::default(),
            camera: CameraPermission::default(),
            goal_selection: None,
            last_auth: None,
        }
    }

    /// Rehydrate the store if needed, then reconcile with the provider.
    pub async fn start(&mut self) -> Screen {
        if !self.store.is_ready() {
            self.store.rehydrate().await;
        }
        let screen = self.refresh_auth().await;
        info!("App started on {}", screen);
        screen
    }

    /// Mirror the provider's session state into the store and navigator.
    ///
    /// Call whenever the provider's state may have changed. Screens are only
    /// forced when the loaded or signed-in flag differs from the last
    /// reconciled state.
    pub async fn refresh_auth(&mut self) -> Screen {
        let snapshot = self.auth.provider().snapshot().await;
        if !snapshot.is_loaded {
            return self.navigator.current();
        }

        if self.store.is_authenticated().await != snapshot.is_signed_in {
            self.store.set_authenticated(snapshot.is_signed_in).await;
        }

        if self.last_auth == Some(snapshot) {
            return self.navigator.current();
        }
        self.last_auth = Some(snapshot);

        let from = self.navigator.current();
        let to = self.navigator.sync_auth(snapshot);
        self.entered(from, to);
        to
    }

    pub fn current_screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn provider(&self) -> &Arc<P> {
        self.auth.provider()
    }

    /// The open chat, present only while on the chat screen.
    pub fn chat(&self) -> Option<&ChatSession<C>> {
        self.chat.as_ref()
    }

    /// Render the current screen, or `Loading` while not ready.
    pub async fn view(&self) -> View {
        self.view_on(Local::now().date_naive()).await
    }

    /// Render as if today were `today`.
    pub async fn view_on(&self, today: NaiveDate) -> View {
        if !self.store.is_ready() || !self.auth.provider().is_loaded().await {
            return View::Loading;
        }

        let profile = self.store.profile().await;
        let (chat, chat_loading) = match &self.chat {
            Some(session) => (session.messages().await, session.is_loading()),
            None => (Vec::new(), false),
        };

        let ctx = RenderContext {
            profile: &profile,
            today,
            schedule: self.schedule,
            camera: self.camera,
            chat: &chat,
            chat_loading,
            goal_selection: self.goal_selection,
        };
        View::Ready(render(self.navigator.current(), &ctx))
    }

    /// Apply a navigation event.
    pub fn dispatch(&mut self, event: NavEvent) -> Result<Screen, AppError> {
        let from = self.navigator.current();
        let to = self.navigator.dispatch(event)?;
        self.entered(from, to);
        Ok(to)
    }

    /// Show `screen` without consulting the transition table.
    pub fn jump_to(&mut self, screen: Screen) -> Screen {
        let from = self.navigator.current();
        let to = self.navigator.jump_to(screen);
        self.entered(from, to);
        to
    }

    pub async fn choose_gender(&mut self, gender: Gender) -> Result<Screen, AppError> {
        self.ensure(NavEvent::GenderChosen)?;
        self.store.set_gender(gender).await;
        self.dispatch(NavEvent::GenderChosen)
    }

    pub async fn submit_personal_info(
        &mut self,
        age: &str,
        height_cm: &str,
        weight_kg: &str,
    ) -> Result<Screen, AppError> {
        self.ensure(NavEvent::PersonalInfoAccepted)?;
        let info = validate_personal_info(age, height_cm, weight_kg)?;
        self.store.set_personal_info(info).await;
        self.dispatch(NavEvent::PersonalInfoAccepted)
    }

    /// Highlight a goal. Picking again replaces the previous pick.
    pub fn select_goal(&mut self, goal: FitnessGoal) {
        self.goal_selection = Some(goal);
    }

    pub async fn submit_goal(&mut self) -> Result<Screen, AppError> {
        self.ensure(NavEvent::GoalAccepted)?;
        let goal = validate_goal_selection(self.goal_selection)?;
        self.store.set_fitness_goal(goal).await;
        self.dispatch(NavEvent::GoalAccepted)
    }

    pub async fn sign_up(&mut self, form: &SignUpForm) -> Result<Screen, AppError> {
        self.ensure(NavEvent::VerificationSent)?;
        let outcome = self.auth.sign_up(form).await?;
        self.apply(outcome).await
    }

    pub async fn verify(&mut self, code: &str) -> Result<Screen, AppError> {
        self.ensure_on(Screen::Verification)?;
        let outcome = self.auth.verify(code).await?;
        self.apply(outcome).await
    }

    pub async fn resend_code(&self) -> Result<(), AppError> {
        self.ensure_on(Screen::Verification)?;
        self.auth.resend_code().await
    }

    pub async fn sign_in(&mut self, identifier: &str, secret: &str) -> Result<Screen, AppError> {
        self.ensure_on(Screen::SignIn)?;
        let outcome = self.auth.sign_in(identifier, secret).await?;
        self.apply(outcome).await
    }

    pub async fn sign_out(&mut self) -> Result<Screen, AppError> {
        self.ensure(NavEvent::SignedOut)?;
        let outcome = self.auth.sign_out().await?;
        self.goal_selection = None;
        self.camera = CameraPermission::default();
        self.apply(outcome).await
    }

    /// Send a chat message from the chat screen.
    pub async fn send_chat(&self, text: &str) -> Result<ChatMessage, AppError> {
        let session = self.chat.as_ref().ok_or(NavigationError::NotOnScreen {
            expected: Screen::Chat,
            current: self.navigator.current(),
        })?;
        Ok(session.send(text).await?)
    }

    /// Expand or collapse a day on the schedule screen.
    pub fn toggle_day(&mut self, index: usize) -> Option<usize> {
        self.schedule.toggle(index)
    }

    /// Record the platform's answer to the camera permission request.
    pub fn set_camera_permission(&mut self, permission: CameraPermission) {
        self.camera = permission;
    }

    /// Move for an auth outcome and remember the provider state it left behind.
    async fn apply(&mut self, outcome: AuthOutcome) -> Result<Screen, AppError> {
        let snapshot = self.auth.provider().snapshot().await;
        if snapshot.is_loaded {
            self.last_auth = Some(snapshot);
        }
        self.dispatch(outcome.event)
    }

    fn ensure(&self, event: NavEvent) -> Result<(), NavigationError> {
        let from = self.navigator.current();
        transition(from, event)
            .map(|_| ())
            .ok_or(NavigationError::InvalidTransition { from, event })
    }

    fn ensure_on(&self, expected: Screen) -> Result<(), NavigationError> {
        let current = self.navigator.current();
        if current == expected {
            Ok(())
        } else {
            Err(NavigationError::NotOnScreen { expected, current })
        }
    }

    /// Open or drop per-screen state after a move.
    fn entered(&mut self, from: Screen, to: Screen) {
        if from == to {
            return;
        }
        if to == Screen::Chat {
            debug!("Opening chat session via {}", self.coach.name());
            self.chat = Some(ChatSession::new(self.coach.clone()));
        }
        if from == Screen::Chat {
            self.chat = None;
        }
        if from == Screen::WorkoutSchedule {
            self.schedule.collapse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryIdentityProvider;
    use mock_coach::EchoCoach;

    fn app() -> App<InMemoryIdentityProvider, EchoCoach> {
        App::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(EchoCoach::new()),
            Arc::new(AppStore::new()),
            SessionExistsPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_loading_until_started() {
        let mut app = app();
        assert_eq!(app.view().await, View::Loading);

        app.start().await;
        assert_eq!(app.view().await.screen(), Some(Screen::Display));
    }

    #[tokio::test]
    async fn test_loading_while_provider_not_loaded() {
        let mut app = app();
        app.provider().set_loaded(false).await;

        assert_eq!(app.start().await, Screen::Display);
        assert_eq!(app.view().await, View::Loading);
    }

    #[tokio::test]
    async fn test_failed_validation_writes_nothing() {
        let mut app = app();
        app.start().await;
        app.jump_to(Screen::PersonalInfo);

        let err = app.submit_personal_info("0", "180", "80").await.unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid age (1-120)");
        assert_eq!(app.current_screen(), Screen::PersonalInfo);
        assert_eq!(app.store().profile().await.age, None);
    }

    #[tokio::test]
    async fn test_form_on_wrong_screen_is_rejected() {
        let mut app = app();
        app.start().await;

        let err = app.choose_gender(Gender::Male).await.unwrap_err();
        assert!(matches!(err, AppError::Navigation(_)));
        assert_eq!(app.store().profile().await.gender, None);
    }

    #[tokio::test]
    async fn test_goal_requires_selection() {
        let mut app = app();
        app.start().await;
        app.jump_to(Screen::FitnessGoal);

        let err = app.submit_goal().await.unwrap_err();
        assert_eq!(err.user_message(), "Please select a fitness goal");

        app.select_goal(FitnessGoal::LoseWeight);
        app.select_goal(FitnessGoal::ImproveEndurance);
        assert_eq!(app.submit_goal().await.unwrap(), Screen::SignUp);
        assert_eq!(
            app.store().profile().await.fitness_goal,
            Some(FitnessGoal::ImproveEndurance)
        );
    }

    #[tokio::test]
    async fn test_pending_goal_is_shown_before_submit() {
        let mut app = app();
        app.start().await;
        app.jump_to(Screen::FitnessGoal);
        app.select_goal(FitnessGoal::StayFit);

        let View::Ready(view) = app.view().await else {
            panic!("app should be ready");
        };
        let selected: Vec<_> = view
            .sections
            .iter()
            .flat_map(|s| &s.rows)
            .filter(|r| r.label == "Selected")
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(selected, ["Stay Fit"]);
        assert_eq!(app.store().profile().await.fitness_goal, None);
    }

    #[tokio::test]
    async fn test_unchanged_auth_keeps_current_screen() {
        let mut app = app();
        app.provider()
            .register_verified("kai@example.com", "long-password", "Kai")
            .await;
        app.start().await;
        app.jump_to(Screen::SignIn);
        app.sign_in("kai@example.com", "long-password").await.unwrap();

        app.dispatch(NavEvent::OpenChat).unwrap();
        app.send_chat("hi").await.unwrap();

        assert_eq!(app.refresh_auth().await, Screen::Chat);
        assert_eq!(app.chat().unwrap().messages().await.len(), 2);
    }

    #[tokio::test]
    async fn test_chat_session_lives_with_chat_screen() {
        let mut app = app();
        app.start().await;
        app.jump_to(Screen::Dashboard);
        assert!(app.send_chat("hi").await.is_err());

        app.dispatch(NavEvent::OpenChat).unwrap();
        app.send_chat("hi").await.unwrap();
        assert_eq!(app.chat().unwrap().messages().await.len(), 2);

        app.dispatch(NavEvent::Back).unwrap();
        assert!(app.chat().is_none());

        app.dispatch(NavEvent::OpenChat).unwrap();
        assert!(app.chat().unwrap().messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_leaving_schedule_collapses_day() {
        let mut app = app();
        app.start().await;
        app.jump_to(Screen::Dashboard);
        app.dispatch(NavEvent::OpenWorkoutSchedule).unwrap();

        assert_eq!(app.toggle_day(0), Some(0));
        app.dispatch(NavEvent::Back).unwrap();
        assert_eq!(app.toggle_day(3), None);
    }
}
