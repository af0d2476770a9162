//! Built-in remedy catalog
//!
//! The seed catalog loaded on first start and by the reseed endpoint.
//! Condition tags are lowercase (they are matched against normalized user
//! conditions); benefit tags keep their display casing and are matched
//! case-insensitively.

use crate::store::{CorpusItem, Dosha, FoodCategory, Nutrients, Taste};

/// The built-in catalog, in its canonical order
pub fn defaults() -> Vec<CorpusItem> {
    vec![
        CorpusItem::new(
            "Turmeric",
            "Golden spice with powerful anti-inflammatory properties",
            FoodCategory::Spice,
            Taste::Bitter,
        )
        .benefit("Anti-inflammatory")
        .benefit("Boosts immunity")
        .benefit("Improves digestion")
        .condition("arthritis")
        .condition("diabetes")
        .condition("inflammation")
        .dosha(Dosha::Kapha)
        .dosha(Dosha::Vata)
        .nutrients(Nutrients {
            calories: 29.0,
            protein_g: 0.9,
            carbs_g: 6.3,
            fat_g: 0.3,
            fiber_g: 2.1,
        })
        .featured(),
        CorpusItem::new(
            "Ginger",
            "Warming root that aids digestion and reduces nausea",
            FoodCategory::Spice,
            Taste::Pungent,
        )
        .benefit("Aids digestion")
        .benefit("Reduces nausea")
        .benefit("Anti-inflammatory")
        .condition("cold")
        .condition("nausea")
        .condition("inflammation")
        .dosha(Dosha::Kapha)
        .dosha(Dosha::Vata)
        .nutrients(Nutrients {
            calories: 80.0,
            protein_g: 1.8,
            carbs_g: 17.8,
            fat_g: 0.8,
            fiber_g: 2.0,
        })
        .featured(),
        CorpusItem::new(
            "Ashwagandha",
            "Ancient adaptogenic herb for stress and vitality",
            FoodCategory::Herb,
            Taste::Bitter,
        )
        .benefit("Reduces stress")
        .benefit("Improves energy")
        .benefit("Enhances immunity")
        .condition("stress")
        .condition("anxiety")
        .condition("fatigue")
        .dosha(Dosha::Vata)
        .dosha(Dosha::Kapha)
        .nutrients(Nutrients {
            calories: 245.0,
            protein_g: 3.3,
            carbs_g: 49.9,
            fat_g: 0.3,
            fiber_g: 32.3,
        })
        .featured(),
        CorpusItem::new(
            "Tulsi (Holy Basil)",
            "Sacred herb that purifies mind and body",
            FoodCategory::Herb,
            Taste::Pungent,
        )
        .benefit("Reduces stress")
        .benefit("Boosts immunity")
        .benefit("Purifies blood")
        .condition("cold")
        .condition("fever")
        .condition("stress")
        .dosha(Dosha::Kapha)
        .dosha(Dosha::Vata)
        .nutrients(Nutrients {
            calories: 23.0,
            protein_g: 3.2,
            carbs_g: 2.7,
            fat_g: 0.6,
            fiber_g: 1.6,
        })
        .featured(),
        CorpusItem::new(
            "Amla",
            "Indian gooseberry rich in Vitamin C",
            FoodCategory::Fruit,
            Taste::Sour,
        )
        .benefit("Rich in Vitamin C")
        .benefit("Improves hair health")
        .benefit("Boosts immunity")
        .condition("cold")
        .condition("diabetes")
        .condition("hair loss")
        .dosha(Dosha::Pitta)
        .dosha(Dosha::Kapha)
        .nutrients(Nutrients {
            calories: 44.0,
            protein_g: 0.9,
            carbs_g: 10.2,
            fat_g: 0.6,
            fiber_g: 4.3,
        })
        .featured(),
        CorpusItem::new(
            "Ghee",
            "Clarified butter that nourishes body tissues",
            FoodCategory::Dairy,
            Taste::Sweet,
        )
        .benefit("Nourishes tissues")
        .benefit("Improves digestion")
        .benefit("Enhances memory")
        .condition("weak digestion")
        .condition("dry skin")
        .condition("constipation")
        .dosha(Dosha::Vata)
        .dosha(Dosha::Pitta)
        .nutrients(Nutrients {
            calories: 900.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 100.0,
            fiber_g: 0.0,
        })
        .featured(),
        CorpusItem::new(
            "Cumin",
            "Digestive spice that balances all doshas",
            FoodCategory::Spice,
            Taste::Pungent,
        )
        .benefit("Aids digestion")
        .benefit("Reduces bloating")
        .benefit("Improves iron absorption")
        .condition("indigestion")
        .condition("bloating")
        .condition("anemia")
        .dosha(Dosha::Vata)
        .dosha(Dosha::Pitta)
        .dosha(Dosha::Kapha)
        .nutrients(Nutrients {
            calories: 375.0,
            protein_g: 17.8,
            carbs_g: 44.2,
            fat_g: 22.3,
            fiber_g: 10.5,
        }),
        CorpusItem::new(
            "Triphala",
            "Three-fruit blend for digestive wellness",
            FoodCategory::Herb,
            Taste::Astringent,
        )
        .benefit("Detoxifies body")
        .benefit("Improves digestion")
        .benefit("Supports weight loss")
        .condition("constipation")
        .condition("obesity")
        .condition("digestive issues")
        .dosha(Dosha::Vata)
        .dosha(Dosha::Pitta)
        .dosha(Dosha::Kapha)
        .nutrients(Nutrients {
            calories: 30.0,
            protein_g: 0.5,
            carbs_g: 7.0,
            fat_g: 0.1,
            fiber_g: 3.0,
        }),
    ]
}
