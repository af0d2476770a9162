//! Dosha classification
//!
//! Derives the constitution category from BMI and owns the profile-update
//! flow, so the stored dosha always reflects the latest anthropometrics.
//! The mapping is fixed:
//!
//! - BMI below 18.5 -> Vata
//! - BMI from 18.5 to just under 25 -> Pitta
//! - BMI 25 and above -> Kapha
//! - unset height (0) -> Vata, without computing a BMI

use std::sync::Arc;

use uuid::Uuid;

use super::error::{EngineError, EngineResult};
use crate::store::{normalize_tags, Dosha, ProfileUpdate, Store, User};

/// Body mass index from height in centimeters and weight in kilograms
///
/// Returns None when height is 0 (unset), so callers never divide by zero.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm == 0.0 {
        return None;
    }
    let meters = height_cm / 100.0;
    Some(weight_kg / (meters * meters))
}

/// Classify a profile into its dosha
///
/// Total over all inputs: an unset height falls back to Vata.
pub fn classify(height_cm: f64, weight_kg: f64) -> Dosha {
    match bmi(height_cm, weight_kg) {
        None => Dosha::Vata,
        Some(bmi) if bmi < 18.5 => Dosha::Vata,
        Some(bmi) if bmi < 25.0 => Dosha::Pitta,
        Some(_) => Dosha::Kapha,
    }
}

/// Applies profile updates and keeps the derived dosha in sync
pub struct ClassificationEngine {
    store: Arc<dyn Store>,
}

impl ClassificationEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Merge a partial profile update into the user and reclassify
    ///
    /// Present fields overwrite, condition tags are normalized, and the
    /// dosha is re-derived unconditionally; it is never editable on its own.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> EngineResult<User> {
        validate_measure("height_cm", update.height_cm)?;
        validate_measure("weight_kg", update.weight_kg)?;

        let mut user = self
            .store
            .user(user_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("user {user_id}")))?;

        if let Some(cm) = update.height_cm {
            user.height_cm = cm;
        }
        if let Some(kg) = update.weight_kg {
            user.weight_kg = kg;
        }
        if let Some(level) = update.activity_level {
            user.activity_level = level;
        }
        if let Some(tags) = update.conditions {
            user.conditions = normalize_tags(tags);
        }

        let dosha = classify(user.height_cm, user.weight_kg);
        user.dosha = Some(dosha);
        self.store.put_user(user.clone()).await?;

        tracing::info!(user_id = %user_id, dosha = %dosha, "profile updated and reclassified");
        Ok(user)
    }
}

fn validate_measure(field: &str, value: Option<f64>) -> EngineResult<()> {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            return Err(EngineError::Validation(format!(
                "{field} must be finite and non-negative, got {v}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Gender, MemoryStore};

    #[test]
    fn test_classify_thresholds() {
        // 180cm / 55kg -> BMI 17.0
        assert_eq!(classify(180.0, 55.0), Dosha::Vata);
        // 170cm / 65kg -> BMI 22.5
        assert_eq!(classify(170.0, 65.0), Dosha::Pitta);
        // 160cm / 80kg -> BMI 31.2
        assert_eq!(classify(160.0, 80.0), Dosha::Kapha);
    }

    #[test]
    fn test_classify_boundaries_round_up() {
        // 200cm / 74kg -> BMI exactly 18.5
        assert_eq!(classify(200.0, 74.0), Dosha::Pitta);
        // 200cm / 100kg -> BMI exactly 25.0
        assert_eq!(classify(200.0, 100.0), Dosha::Kapha);
    }

    #[test]
    fn test_zero_height_defaults_to_vata() {
        assert_eq!(bmi(0.0, 70.0), None);
        assert_eq!(classify(0.0, 70.0), Dosha::Vata);
        assert_eq!(classify(0.0, 0.0), Dosha::Vata);
    }

    #[tokio::test]
    async fn test_update_profile_merges_and_reclassifies() {
        let store = Arc::new(MemoryStore::new());
        let engine = ClassificationEngine::new(store.clone());

        let user = User::new("Ravi", 45, Gender::Male);
        let id = user.id;
        store.put_user(user).await.unwrap();

        let updated = engine
            .update_profile(
                id,
                ProfileUpdate::new()
                    .height(160.0)
                    .weight(80.0)
                    .conditions(vec!["  Diabetes ".to_string()]),
            )
            .await
            .unwrap();

        assert_eq!(updated.dosha, Some(Dosha::Kapha));
        assert_eq!(updated.conditions, vec!["diabetes".to_string()]);
        // Untouched fields survive the merge
        assert_eq!(updated.age, 45);

        // The change is persisted, not just returned
        let stored = store.user(id).await.unwrap().unwrap();
        assert_eq!(stored.dosha, Some(Dosha::Kapha));

        // A later weight-only update reclassifies again
        let updated = engine
            .update_profile(id, ProfileUpdate::new().weight(60.0))
            .await
            .unwrap();
        assert_eq!(updated.dosha, Some(Dosha::Pitta));
        assert_eq!(updated.conditions, vec!["diabetes".to_string()]);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_bad_measures() {
        let store = Arc::new(MemoryStore::new());
        let engine = ClassificationEngine::new(store.clone());

        let user = User::new("Mira", 28, Gender::Female);
        let id = user.id;
        store.put_user(user).await.unwrap();

        let err = engine
            .update_profile(id, ProfileUpdate::new().height(-170.0))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = engine
            .update_profile(id, ProfileUpdate::new().weight(f64::NAN))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_profile_unknown_user() {
        let store = Arc::new(MemoryStore::new());
        let engine = ClassificationEngine::new(store);

        let err = engine
            .update_profile(Uuid::new_v4(), ProfileUpdate::new().height(170.0))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }
}
