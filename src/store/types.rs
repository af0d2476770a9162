//! Core record types for the Ojas store
//!
//! This module defines the records the store persists and the partial-update
//! types the engines apply to them:
//! - `User`: profile, derived dosha, and wellness score
//! - `LogEntry`: one day's health metrics, keyed by (user, date)
//! - `MetricUpdate` / `ProfileUpdate`: explicit-presence partial updates
//! - `CorpusItem`: one entry of the remedy catalog

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wellness score assigned to users before any logs exist.
pub const DEFAULT_WELLNESS_SCORE: u8 = 75;

/// A registered user with profile data and derived state
///
/// `dosha` and `wellness_score` are derived: the classification engine
/// rewrites `dosha` on every profile change, the score engine rewrites
/// `wellness_score` after every log upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u8,
    pub gender: Gender,
    /// Standing height in centimeters; 0.0 means not yet provided
    #[serde(default)]
    pub height_cm: f64,
    /// Body weight in kilograms; 0.0 means not yet provided
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Lowercase free-form condition tags ("diabetes", "hypertension", ...)
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Constitutional classification; None until the first profile update
    #[serde(default)]
    pub dosha: Option<Dosha>,
    /// Bounded 0-100 wellness score
    pub wellness_score: u8,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an unset profile and the default score
    pub fn new(name: impl Into<String>, age: u8, gender: Gender) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            gender,
            height_cm: 0.0,
            weight_kg: 0.0,
            activity_level: ActivityLevel::default(),
            conditions: Vec::new(),
            dosha: None,
            wellness_score: DEFAULT_WELLNESS_SCORE,
            created_at: Utc::now(),
        }
    }

    /// Builder: set height in centimeters
    pub fn height(mut self, cm: f64) -> Self {
        self.height_cm = cm;
        self
    }

    /// Builder: set weight in kilograms
    pub fn weight(mut self, kg: f64) -> Self {
        self.weight_kg = kg;
        self
    }

    /// Builder: set activity level
    pub fn activity(mut self, level: ActivityLevel) -> Self {
        self.activity_level = level;
        self
    }

    /// Builder: set condition tags (normalized)
    pub fn conditions(mut self, tags: Vec<String>) -> Self {
        self.conditions = normalize_tags(tags);
        self
    }

    /// Whether this user has any condition tags
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}

/// User gender as recorded at registration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Self-reported habitual activity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::Light => write!(f, "light"),
            ActivityLevel::Moderate => write!(f, "moderate"),
            ActivityLevel::Active => write!(f, "active"),
            ActivityLevel::VeryActive => write!(f, "very-active"),
        }
    }
}

/// Ayurvedic constitution category derived from BMI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dosha {
    /// Underweight range (BMI below 18.5)
    Vata,
    /// Normal range (BMI 18.5 to just under 25)
    Pitta,
    /// Overweight range (BMI 25 and above)
    Kapha,
}

impl Dosha {
    /// Get all doshas for iteration
    pub fn all() -> &'static [Dosha] {
        &[Dosha::Vata, Dosha::Pitta, Dosha::Kapha]
    }
}

impl std::fmt::Display for Dosha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dosha::Vata => write!(f, "vata"),
            Dosha::Pitta => write!(f, "pitta"),
            Dosha::Kapha => write!(f, "kapha"),
        }
    }
}

/// Self-reported mood for a logged day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

/// One day's health metrics for one user
///
/// At most one entry exists per (user_id, date); the store's
/// `create_or_fetch_log` enforces the uniqueness, the aggregator merges
/// partial updates into the existing entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub user_id: Uuid,
    /// Calendar day this entry covers (UTC)
    pub date: NaiveDate,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub calories: u32,
    /// Glasses of water drunk
    #[serde(default)]
    pub water_glasses: u32,
    #[serde(default)]
    pub sleep_hours: f64,
    #[serde(default)]
    pub steps: u32,
    #[serde(default)]
    pub mood: Mood,
    pub updated_at: DateTime<Utc>,
}

impl LogEntry {
    /// Create an empty entry for a user and day (all metrics zero)
    pub fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            weight_kg: 0.0,
            calories: 0,
            water_glasses: 0,
            sleep_hours: 0.0,
            steps: 0,
            mood: Mood::default(),
            updated_at: Utc::now(),
        }
    }

    /// Merge a partial update into this entry
    ///
    /// Only fields present in the update overwrite; `Some(0)` is a real
    /// value and does overwrite. Refreshes `updated_at`.
    pub fn apply(&mut self, update: &MetricUpdate) {
        if let Some(kg) = update.weight_kg {
            self.weight_kg = kg;
        }
        if let Some(kcal) = update.calories {
            self.calories = kcal;
        }
        if let Some(glasses) = update.water_glasses {
            self.water_glasses = glasses;
        }
        if let Some(hours) = update.sleep_hours {
            self.sleep_hours = hours;
        }
        if let Some(steps) = update.steps {
            self.steps = steps;
        }
        if let Some(mood) = update.mood {
            self.mood = mood;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of one day's metrics
///
/// Presence is explicit: `None` leaves the stored value untouched, any
/// `Some` value overwrites, including zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricUpdate {
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub water_glasses: Option<u32>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub mood: Option<Mood>,
}

impl MetricUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(mut self, kg: f64) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    pub fn calories(mut self, kcal: u32) -> Self {
        self.calories = Some(kcal);
        self
    }

    pub fn water(mut self, glasses: u32) -> Self {
        self.water_glasses = Some(glasses);
        self
    }

    pub fn sleep(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }

    pub fn steps(mut self, count: u32) -> Self {
        self.steps = Some(count);
        self
    }

    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none()
            && self.calories.is_none()
            && self.water_glasses.is_none()
            && self.sleep_hours.is_none()
            && self.steps.is_none()
            && self.mood.is_none()
    }
}

/// Partial update of a user's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Replaces the full condition tag list when present
    #[serde(default)]
    pub conditions: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, cm: f64) -> Self {
        self.height_cm = Some(cm);
        self
    }

    pub fn weight(mut self, kg: f64) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    pub fn activity(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    pub fn conditions(mut self, tags: Vec<String>) -> Self {
        self.conditions = Some(tags);
        self
    }
}

/// Lowercase and trim tag strings, dropping empties
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Food group of a corpus item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Grain,
    Vegetable,
    Fruit,
    Spice,
    Herb,
    Legume,
    Dairy,
    Nut,
    Seed,
}

/// Ayurvedic taste of a corpus item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Taste {
    Sweet,
    Sour,
    Salty,
    Bitter,
    Pungent,
    Astringent,
}

/// Nutrition facts per 100 g
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Nutrients {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

/// One entry of the remedy catalog
///
/// Immutable once seeded; the recommenders filter but never mutate items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusItem {
    pub name: String,
    pub description: String,
    pub category: FoodCategory,
    /// Benefit tags ("digestion", "immunity", ...)
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Condition tags this item is recommended for
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Doshas this item suits; empty means suitable for none
    #[serde(default)]
    pub doshas: Vec<Dosha>,
    pub taste: Taste,
    #[serde(default)]
    pub nutrients: Option<Nutrients>,
    #[serde(default)]
    pub featured: bool,
}

impl CorpusItem {
    /// Create a new item with required fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: FoodCategory,
        taste: Taste,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            benefits: Vec::new(),
            conditions: Vec::new(),
            doshas: Vec::new(),
            taste,
            nutrients: None,
            featured: false,
        }
    }

    /// Builder: add a benefit tag
    pub fn benefit(mut self, tag: impl Into<String>) -> Self {
        self.benefits.push(tag.into());
        self
    }

    /// Builder: add a condition tag
    pub fn condition(mut self, tag: impl Into<String>) -> Self {
        self.conditions.push(tag.into());
        self
    }

    /// Builder: add a suitable dosha
    pub fn dosha(mut self, dosha: Dosha) -> Self {
        self.doshas.push(dosha);
        self
    }

    /// Builder: set nutrition facts
    pub fn nutrients(mut self, n: Nutrients) -> Self {
        self.nutrients = Some(n);
        self
    }

    /// Builder: mark as featured
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Whether this item suits the given dosha
    pub fn suits_dosha(&self, dosha: Dosha) -> bool {
        self.doshas.contains(&dosha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("Asha", 31, Gender::Female);

        assert_eq!(user.wellness_score, DEFAULT_WELLNESS_SCORE);
        assert_eq!(user.dosha, None);
        assert_eq!(user.activity_level, ActivityLevel::Moderate);
        assert_eq!(user.height_cm, 0.0);
        assert!(user.conditions.is_empty());
    }

    #[test]
    fn test_log_entry_apply_merges_present_fields() {
        let mut entry = LogEntry::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        entry.apply(&MetricUpdate::new().water(8).sleep(7.5));

        assert_eq!(entry.water_glasses, 8);
        assert_eq!(entry.sleep_hours, 7.5);
        assert_eq!(entry.steps, 0);

        // A second update with disjoint fields leaves earlier values alone
        entry.apply(&MetricUpdate::new().steps(9000));
        assert_eq!(entry.water_glasses, 8);
        assert_eq!(entry.steps, 9000);
    }

    #[test]
    fn test_log_entry_apply_zero_overwrites() {
        let mut entry = LogEntry::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        entry.apply(&MetricUpdate::new().water(8));
        entry.apply(&MetricUpdate::new().water(0));

        assert_eq!(entry.water_glasses, 0);
    }

    #[test]
    fn test_metric_update_is_empty() {
        assert!(MetricUpdate::new().is_empty());
        assert!(!MetricUpdate::new().calories(0).is_empty());
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec![
            "  Diabetes ".to_string(),
            "HYPERTENSION".to_string(),
            "   ".to_string(),
        ]);
        assert_eq!(tags, vec!["diabetes".to_string(), "hypertension".to_string()]);
    }

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_string(&Dosha::Vata).unwrap(), "\"vata\"");
        assert_eq!(
            serde_json::to_string(&ActivityLevel::VeryActive).unwrap(),
            "\"very-active\""
        );
        assert_eq!(serde_json::to_string(&Mood::Good).unwrap(), "\"good\"");

        let mood: Mood = serde_json::from_str("\"poor\"").unwrap();
        assert_eq!(mood, Mood::Poor);
    }

    #[test]
    fn test_metric_update_deserializes_missing_fields_as_none() {
        let update: MetricUpdate = serde_json::from_str(r#"{"water_glasses": 8}"#).unwrap();

        assert_eq!(update.water_glasses, Some(8));
        assert_eq!(update.calories, None);
        assert_eq!(update.mood, None);
    }

    #[test]
    fn test_corpus_item_builder() {
        let item = CorpusItem::new("Turmeric", "Golden spice", FoodCategory::Spice, Taste::Bitter)
            .benefit("immunity")
            .condition("diabetes")
            .dosha(Dosha::Vata)
            .dosha(Dosha::Kapha)
            .featured();

        assert!(item.featured);
        assert!(item.suits_dosha(Dosha::Kapha));
        assert!(!item.suits_dosha(Dosha::Pitta));
    }
}
