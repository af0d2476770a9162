//! Rule-based chat
//!
//! A fixed, ordered table of keyword-triggered response templates. This is
//! deliberately not natural-language understanding: matching is substring
//! testing, templates are hand-written, and the whole exchange is
//! reproducible.

pub mod dispatcher;
pub mod rules;

pub use dispatcher::{Dispatcher, Reply};
pub use rules::IntentRule;
