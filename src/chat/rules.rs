//! Intent rules and response templates
//!
//! The fixed rule table the dispatcher walks in order. Each rule pairs its
//! trigger keywords with a responder; responders are either static text or
//! templates interpolating user state and corpus lookups. Rule order is part
//! of the behavior: "I'm stressed about my weight" is a stress question, not
//! a weight question.

use crate::engine::{filter_by_benefit, filter_by_condition, CHAT_SUGGESTION_LIMIT};
use crate::store::{CorpusItem, User};

/// One keyword-triggered rule
pub struct IntentRule {
    /// Stable rule name, reported on every reply
    pub name: &'static str,
    triggers: &'static [&'static str],
    responder: Responder,
}

enum Responder {
    /// Fixed text
    Static(&'static str),
    /// Corpus items matched by condition tag, rendered as bullet lines
    ConditionFoods {
        tag: &'static str,
        intro: &'static str,
        outro: &'static str,
    },
    /// Corpus items matched by benefit tag, rendered as bullet lines
    BenefitFoods {
        tag: &'static str,
        intro: &'static str,
        outro: &'static str,
    },
    /// Weight-management advice, closing with the user's dosha
    WeightAdvice,
    /// The user's dosha profile and the three-dosha explainer
    DoshaProfile,
}

impl IntentRule {
    /// Case-insensitive substring match over an already-lowercased message
    pub fn matches(&self, lower_message: &str) -> bool {
        self.triggers.iter().any(|t| lower_message.contains(t))
    }

    /// Render this rule's reply
    pub fn render(&self, user: &User, corpus: &[CorpusItem]) -> String {
        match &self.responder {
            Responder::Static(text) => (*text).to_string(),
            Responder::ConditionFoods { tag, intro, outro } => {
                let items = filter_by_condition(corpus, tag, CHAT_SUGGESTION_LIMIT);
                format!("{intro}\n\n{}\n\n{outro}", bullet_lines(&items))
            }
            Responder::BenefitFoods { tag, intro, outro } => {
                let items = filter_by_benefit(corpus, tag, CHAT_SUGGESTION_LIMIT);
                format!("{intro}\n\n{}\n\n{outro}", bullet_lines(&items))
            }
            Responder::WeightAdvice => format!(
                "For healthy weight management according to Ayurveda:\n\n\
                 • Drink warm water with lemon in the morning\n\
                 • Eat Triphala before bed\n\
                 • Include ginger and cumin in your meals\n\
                 • Practice mindful eating\n\
                 • Balance your Kapha dosha\n\n\
                 Your current dosha is {}. Would you like personalized recommendations?",
                dosha_name(user)
            ),
            Responder::DoshaProfile => {
                let headline = match user.dosha {
                    Some(dosha) => {
                        format!("Your current dosha type is: {}", dosha.to_string().to_uppercase())
                    }
                    None => "Your dosha has not been determined yet. Update your height \
                             and weight to get classified."
                        .to_string(),
                };
                format!(
                    "{headline}\n\n\
                     Doshas are the three fundamental energies in Ayurveda:\n\n\
                     • Vata: Air & Space (movement, creativity)\n\
                     • Pitta: Fire & Water (transformation, metabolism)\n\
                     • Kapha: Earth & Water (structure, stability)\n\n\
                     Would you like food recommendations for your dosha?"
                )
            }
        }
    }
}

/// The ordered rule table
pub fn builtin() -> Vec<IntentRule> {
    vec![
        IntentRule {
            name: "diabetes",
            triggers: &["diabetes", "blood sugar"],
            responder: Responder::ConditionFoods {
                tag: "diabetes",
                intro: "For diabetes management, I recommend these Ayurvedic foods:",
                outro: "These foods help regulate blood sugar naturally.",
            },
        },
        IntentRule {
            name: "digestion",
            triggers: &["digestion", "stomach"],
            responder: Responder::BenefitFoods {
                tag: "digestion",
                intro: "For better digestion, try these:",
                outro: "These aid in digestive fire (Agni) according to Ayurveda.",
            },
        },
        IntentRule {
            name: "stress",
            triggers: &["stress", "anxiety"],
            responder: Responder::Static(
                "For stress relief, Ayurveda recommends:\n\n\
                 • Ashwagandha: An adaptogenic herb that reduces cortisol\n\
                 • Tulsi (Holy Basil): Calms the mind and reduces anxiety\n\
                 • Brahmi: Enhances mental clarity\n\n\
                 Also practice deep breathing (Pranayama) and meditation daily.",
            ),
        },
        IntentRule {
            name: "immunity",
            triggers: &["immunity", "immune"],
            responder: Responder::BenefitFoods {
                tag: "immunity",
                intro: "To boost immunity naturally:",
                outro: "These strengthen your Ojas (vital energy) in Ayurveda.",
            },
        },
        IntentRule {
            name: "weight",
            triggers: &["weight", "lose weight"],
            responder: Responder::WeightAdvice,
        },
        IntentRule {
            name: "dosha",
            triggers: &["dosha"],
            responder: Responder::DoshaProfile,
        },
        IntentRule {
            name: "sleep",
            triggers: &["sleep", "insomnia"],
            responder: Responder::Static(
                "For better sleep according to Ayurveda:\n\n\
                 • Drink warm milk with nutmeg before bed\n\
                 • Apply sesame oil to your feet\n\
                 • Avoid screens 1 hour before sleep\n\
                 • Practice Shirodhara (oil therapy)\n\
                 • Go to bed before 10 PM (Kapha time)\n\n\
                 Consistent sleep routine balances Vata dosha.",
            ),
        },
        IntentRule {
            name: "greeting",
            triggers: &["hello", "hi"],
            responder: Responder::Static(
                "Namaste! I'm your Ayurvedic health guide. I can help you with:\n\n\
                 • Food recommendations for specific diseases\n\
                 • Understanding your dosha\n\
                 • Natural remedies for common ailments\n\
                 • Health tips based on ancient wisdom\n\n\
                 What would you like to know?",
            ),
        },
    ]
}

/// Fallback reply when no rule fires, echoing the original message
pub fn fallback(message: &str, user: &User) -> String {
    format!(
        "I understand you're asking about \"{message}\". Here are some general \
         Ayurvedic principles:\n\n\
         • Eat according to your dosha type (yours is {})\n\
         • Follow daily routines (Dinacharya)\n\
         • Use food as medicine\n\
         • Balance the six tastes in each meal\n\n\
         Could you be more specific about your health concern? I can provide \
         better recommendations for conditions like diabetes, digestion, \
         stress, immunity, or weight management.",
        dosha_name(user)
    )
}

fn dosha_name(user: &User) -> String {
    match user.dosha {
        Some(dosha) => dosha.to_string(),
        None => "not yet determined".to_string(),
    }
}

fn bullet_lines(items: &[CorpusItem]) -> String {
    items
        .iter()
        .map(|i| format!("• {}: {}", i.name, i.description))
        .collect::<Vec<_>>()
        .join("\n")
}
