//! Persistence for the single profile row.

use sqlx::SqlitePool;

use crate::models::{ProfileState, StoredProfile};
use crate::Result;

/// Load the persisted profile state, if one was ever saved.
pub async fn load_state(pool: &SqlitePool) -> Result<Option<ProfileState>> {
    let record = sqlx::query_as::<_, StoredProfile>(
        r#"
        SELECT name, email, gender, age, height_cm, weight_kg, fitness_goal,
               is_authenticated, updated_at
        FROM profile_state
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(record.map(ProfileState::from))
}

/// Write the whole profile state, replacing whatever was stored.
pub async fn save_state(pool: &SqlitePool, state: &ProfileState) -> Result<()> {
    let profile = &state.profile;

    sqlx::query(
        r#"
        INSERT INTO profile_state
            (id, name, email, gender, age, height_cm, weight_kg, fitness_goal, is_authenticated)
        VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            email = excluded.email,
            gender = excluded.gender,
            age = excluded.age,
            height_cm = excluded.height_cm,
            weight_kg = excluded.weight_kg,
            fitness_goal = excluded.fitness_goal,
            is_authenticated = excluded.is_authenticated,
            updated_at = datetime('now')
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(profile.gender.map(|g| g.as_key()))
    .bind(profile.age.map(i64::from))
    .bind(profile.height_cm)
    .bind(profile.weight_kg)
    .bind(profile.fitness_goal.map(|g| g.as_key()))
    .bind(state.is_authenticated)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete the persisted profile state.
///
/// Returns true if a row was deleted, false if none existed.
pub async fn clear_state(pool: &SqlitePool) -> Result<bool> {
    let result = sqlx::query("DELETE FROM profile_state WHERE id = 1")
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FitnessGoal, Gender, ProfileRecord};
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn sample_state() -> ProfileState {
        ProfileState {
            profile: ProfileRecord {
                name: "Lina Haddad".to_string(),
                email: "lina@example.com".to_string(),
                gender: Some(Gender::Female),
                age: Some(29),
                height_cm: Some(168.5),
                weight_kg: Some(61.0),
                fitness_goal: Some(FitnessGoal::ImproveEndurance),
            },
            is_authenticated: true,
        }
    }

    #[tokio::test]
    async fn test_load_state_empty() {
        let db = test_db().await;
        assert!(load_state(db.pool()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_state() {
        let db = test_db().await;
        let state = sample_state();

        save_state(db.pool(), &state).await.unwrap();

        let loaded = load_state(db.pool()).await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let db = test_db().await;
        save_state(db.pool(), &sample_state()).await.unwrap();

        let mut updated = sample_state();
        updated.profile.weight_kg = Some(59.5);
        updated.profile.fitness_goal = Some(FitnessGoal::StayFit);
        save_state(db.pool(), &updated).await.unwrap();

        let loaded = load_state(db.pool()).await.unwrap().unwrap();
        assert_eq!(loaded.profile.weight_kg, Some(59.5));
        assert_eq!(loaded.profile.fitness_goal, Some(FitnessGoal::StayFit));
    }

    #[tokio::test]
    async fn test_clear_state() {
        let db = test_db().await;
        save_state(db.pool(), &sample_state()).await.unwrap();

        assert!(clear_state(db.pool()).await.unwrap());
        assert!(load_state(db.pool()).await.unwrap().is_none());

        // Clearing again reports nothing removed
        assert!(!clear_state(db.pool()).await.unwrap());
    }
}
