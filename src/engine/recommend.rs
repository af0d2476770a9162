//! Corpus recommenders
//!
//! Pure filters over the remedy catalog. None of these rank: corpus order is
//! preserved and results are truncated to the caller's limit, so identical
//! inputs always produce identical output. The one exception is
//! [`remedy_of_day`], which is explicitly random.

use rand::Rng;

use crate::store::{CorpusItem, User};

/// Default limit for personalized recommendations
pub const PERSONALIZED_LIMIT: usize = 12;
/// Default limit for by-condition lookups
pub const CONDITION_LIMIT: usize = 10;
/// Default limit for the featured shelf
pub const FEATURED_LIMIT: usize = 6;
/// Items interpolated into a chat reply
pub const CHAT_SUGGESTION_LIMIT: usize = 3;

/// Personalized recommendations for a user
///
/// An item matches when the user has no condition tags or shares at least
/// one with the item, and, once the user is classified, when the item suits
/// the user's dosha. An unclassified user with no conditions matches
/// everything.
pub fn recommend(user: &User, corpus: &[CorpusItem], limit: usize) -> Vec<CorpusItem> {
    corpus
        .iter()
        .filter(|item| matches_user(user, item))
        .take(limit)
        .cloned()
        .collect()
}

fn matches_user(user: &User, item: &CorpusItem) -> bool {
    if user.has_conditions() {
        let shares_condition = item
            .conditions
            .iter()
            .any(|tag| user.conditions.iter().any(|c| c == tag));
        if !shares_condition {
            return false;
        }
    }
    if let Some(dosha) = user.dosha {
        if !item.suits_dosha(dosha) {
            return false;
        }
    }
    true
}

/// Items whose condition tags contain `condition` as a substring
///
/// Case-insensitive; an unknown condition yields an empty vec.
pub fn filter_by_condition(corpus: &[CorpusItem], condition: &str, limit: usize) -> Vec<CorpusItem> {
    let needle = condition.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    corpus
        .iter()
        .filter(|item| {
            item.conditions
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .take(limit)
        .cloned()
        .collect()
}

/// Items whose benefit tags contain `benefit` as a substring, case-insensitive
pub fn filter_by_benefit(corpus: &[CorpusItem], benefit: &str, limit: usize) -> Vec<CorpusItem> {
    let needle = benefit.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    corpus
        .iter()
        .filter(|item| {
            item.benefits
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .take(limit)
        .cloned()
        .collect()
}

/// The featured shelf, in corpus order
pub fn featured(corpus: &[CorpusItem], limit: usize) -> Vec<CorpusItem> {
    corpus
        .iter()
        .filter(|item| item.featured)
        .take(limit)
        .cloned()
        .collect()
}

/// Uniform random pick over the whole corpus; None when it is empty
pub fn remedy_of_day(corpus: &[CorpusItem]) -> Option<&CorpusItem> {
    if corpus.is_empty() {
        return None;
    }
    let idx = rand::thread_rng().gen_range(0..corpus.len());
    corpus.get(idx)
}
