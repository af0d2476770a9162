//! Intent dispatcher
//!
//! Routes a free-text message to the first rule whose keyword triggers match
//! and renders that rule's reply. Matching is plain substring testing over
//! the lowercased message; there is no tokenization, so "this" greets back
//! (it contains "hi"). No rule matching falls through to the fallback
//! template. Fully deterministic for identical inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rules::{self, IntentRule};
use crate::store::{CorpusItem, User};

/// A rendered chat reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    /// Name of the rule that fired ("fallback" when none did)
    pub rule: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Walks the rule table, first match wins
pub struct Dispatcher {
    rules: Vec<IntentRule>,
}

impl Dispatcher {
    /// Build the dispatcher with the built-in rule table
    pub fn new() -> Self {
        Self {
            rules: rules::builtin(),
        }
    }

    /// Route a message to its reply
    pub fn route(&self, message: &str, user: &User, corpus: &[CorpusItem]) -> Reply {
        let lower = message.to_lowercase();

        for rule in &self.rules {
            if rule.matches(&lower) {
                tracing::debug!(rule = rule.name, "chat rule fired");
                return Reply {
                    rule: rule.name.to_string(),
                    text: rule.render(user, corpus),
                    timestamp: Utc::now(),
                };
            }
        }

        tracing::debug!("no chat rule fired, falling back");
        Reply {
            rule: "fallback".to_string(),
            text: rules::fallback(message, user),
            timestamp: Utc::now(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus;
    use crate::store::{Dosha, Gender};

    fn user() -> User {
        let mut user = User::new("Asha", 31, Gender::Female);
        user.dosha = Some(Dosha::Pitta);
        user
    }

    #[test]
    fn test_diabetes_question_names_corpus_items() {
        let dispatcher = Dispatcher::new();
        let catalog = corpus::defaults();

        let reply = dispatcher.route("What foods help with diabetes?", &user(), &catalog);
        assert_eq!(reply.rule, "diabetes");
        assert!(reply.text.contains("Turmeric"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let dispatcher = Dispatcher::new();

        let reply = dispatcher.route("MY BLOOD SUGAR is high", &user(), &[]);
        assert_eq!(reply.rule, "diabetes");

        let reply = dispatcher.route("InSoMnIa again", &user(), &[]);
        assert_eq!(reply.rule, "sleep");
    }

    #[test]
    fn test_first_match_wins_across_rules() {
        let dispatcher = Dispatcher::new();
        let catalog = corpus::defaults();

        // Both the stress and weight rules trigger; stress sits earlier
        let reply = dispatcher.route("I'm stressed about my weight", &user(), &catalog);
        assert_eq!(reply.rule, "stress");

        // Both diabetes and digestion trigger; diabetes sits earlier
        let reply = dispatcher.route("diabetes and digestion", &user(), &catalog);
        assert_eq!(reply.rule, "diabetes");
    }

    #[test]
    fn test_substring_greeting_quirk() {
        let dispatcher = Dispatcher::new();

        // "this" contains "hi"
        let reply = dispatcher.route("this is nothing", &user(), &[]);
        assert_eq!(reply.rule, "greeting");
        assert!(reply.text.starts_with("Namaste!"));
    }

    #[test]
    fn test_fallback_reports_itself() {
        let dispatcher = Dispatcher::new();

        let reply = dispatcher.route("quantum flux capacitors", &user(), &[]);
        assert_eq!(reply.rule, "fallback");
        assert!(reply.text.contains("\"quantum flux capacitors\""));
        assert!(reply.text.contains("pitta"));
    }

    #[test]
    fn test_identical_input_identical_reply_text() {
        let dispatcher = Dispatcher::new();
        let catalog = corpus::defaults();

        let first = dispatcher.route("boost my immunity", &user(), &catalog);
        let second = dispatcher.route("boost my immunity", &user(), &catalog);
        assert_eq!(first.rule, "immunity");
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_empty_corpus_still_replies() {
        let dispatcher = Dispatcher::new();

        let reply = dispatcher.route("help with digestion", &user(), &[]);
        assert_eq!(reply.rule, "digestion");
        assert!(reply.text.contains("digestive fire"));
    }
}
