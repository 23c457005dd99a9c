//! Process-wide profile store.
//!
//! Holds the one [`ProfileState`] for the running app. Optionally backed by
//! SQLite: every write is persisted, and [`AppStore::rehydrate`] loads the
//! saved state at start-up. Until rehydration has run the store reports
//! itself as not ready and the app renders a loading view.

use std::sync::atomic::{AtomicBool, Ordering};

use profile_store::{profile, Database, FitnessGoal, Gender, ProfileRecord, ProfileState};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::onboarding::PersonalInfo;

pub struct AppStore {
    state: RwLock<ProfileState>,
    hydrated: AtomicBool,
    database: Option<Database>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    /// A store with no persistence.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ProfileState::default()),
            hydrated: AtomicBool::new(false),
            database: None,
        }
    }

    /// A store persisted to `database`. Migrations must already have run.
    pub fn with_database(database: Database) -> Self {
        Self {
            database: Some(database),
            ..Self::new()
        }
    }

    /// Whether [`rehydrate`](Self::rehydrate) has completed.
    pub fn is_ready(&self) -> bool {
        self.hydrated.load(Ordering::Acquire)
    }

    /// Load the persisted state, if any.
    ///
    /// A read failure is logged and the store starts from defaults. Either
    /// way the store is ready afterwards.
    pub async fn rehydrate(&self) {
        if let Some(database) = &self.database {
            match profile::load_state(database.pool()).await {
                Ok(Some(saved)) => {
                    info!(
                        "Rehydrated profile (authenticated: {})",
                        saved.is_authenticated
                    );
                    *self.state.write().await = saved;
                }
                Ok(None) => info!("No saved profile, starting fresh"),
                Err(err) => warn!("Failed to rehydrate profile: {}", err),
            }
        }

        self.hydrated.store(true, Ordering::Release);
    }

    pub async fn snapshot(&self) -> ProfileState {
        self.state.read().await.clone()
    }

    pub async fn profile(&self) -> ProfileRecord {
        self.state.read().await.profile.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn set_gender(&self, gender: Gender) {
        self.update(|state| state.profile.gender = Some(gender)).await;
    }

    pub async fn set_personal_info(&self, info: PersonalInfo) {
        self.update(|state| {
            state.profile.age = Some(info.age);
            state.profile.height_cm = Some(info.height_cm);
            state.profile.weight_kg = Some(info.weight_kg);
        })
        .await;
    }

    pub async fn set_fitness_goal(&self, goal: FitnessGoal) {
        self.update(|state| state.profile.fitness_goal = Some(goal)).await;
    }

    /// Record the account name and email.
    pub async fn set_account(&self, name: &str, email: &str) {
        self.update(|state| {
            state.profile.name = name.to_string();
            state.profile.email = email.to_string();
        })
        .await;
    }

    pub async fn set_authenticated(&self, is_authenticated: bool) {
        self.update(|state| state.is_authenticated = is_authenticated).await;
    }

    /// Return to the signed-out defaults and delete the persisted row.
    pub async fn reset(&self) {
        *self.state.write().await = ProfileState::default();

        if let Some(database) = &self.database {
            if let Err(err) = profile::clear_state(database.pool()).await {
                warn!("Failed to clear saved profile: {}", err);
            }
        }
        info!("Profile reset");
    }

    async fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut ProfileState),
    {
        let state = {
            let mut guard = self.state.write().await;
            apply(&mut guard);
            guard.clone()
        };

        if let Some(database) = &self.database {
            if let Err(err) = profile::save_state(database.pool(), &state).await {
                warn!("Failed to persist profile: {}", err);
            }
        }
    }
}
