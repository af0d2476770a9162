//! Ojas Demo
//!
//! End-to-end walkthrough of the wellness engine against an in-memory
//! store: register, classify, log a week, score, recommend, chat.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ojas::chat::Dispatcher;
use ojas::engine::{
    recommend, ClassificationEngine, EngineResult, LogAggregator, ScoreEngine, PERSONALIZED_LIMIT,
};
use ojas::store::{Gender, MemoryStore, MetricUpdate, ProfileUpdate, Store, User};
use ojas::{corpus, Dosha};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ojas=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Ojas Wellness Engine v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

    let seeded = store.seed_foods(corpus::defaults()).await?;
    tracing::info!("Seeded {} corpus items", seeded);

    // Register a user and classify from measurements
    let user = User::new("Asha", 34, Gender::Female).conditions(vec!["diabetes".into()]);
    let user_id = user.id;
    store.put_user(user).await?;

    let classifier = ClassificationEngine::new(Arc::clone(&store));
    let user = classifier
        .update_profile(
            user_id,
            ProfileUpdate::new().height(172.0).weight(65.0),
        )
        .await?;
    tracing::info!(
        "Classified {} as {}",
        user.name,
        user.dosha.map(|d| d.to_string()).unwrap_or_default()
    );

    // Log a week of on-target days
    demo_log_week(&store, user_id).await?;

    // Recompute the wellness score over that week
    let scores = ScoreEngine::new(Arc::clone(&store));
    let score = scores.recompute(user_id).await?;
    tracing::info!("Wellness score after a strong week: {}", score);

    // Personalized picks
    demo_recommendations(&store, user_id).await?;

    // A few chat exchanges
    demo_chat(&store, user_id).await?;

    tracing::info!("Ojas demo complete");
    Ok(())
}

/// Log seven consecutive on-target days ending today
async fn demo_log_week(store: &Arc<dyn Store>, user_id: uuid::Uuid) -> EngineResult<()> {
    tracing::info!("Logging a week of demo data...");

    let aggregator = LogAggregator::new(Arc::clone(store));
    let now = Utc::now();

    for days_ago in 0..7 {
        let at = now - Duration::days(days_ago);
        let update = MetricUpdate::new()
            .water(8 + (days_ago % 3) as u32)
            .sleep(7.5)
            .steps(8000 + 500 * days_ago as u32)
            .calories(2000)
            .weight(65.0);

        aggregator.upsert_daily_log(user_id, at, update).await?;
    }

    tracing::info!("Demo week written");
    Ok(())
}

/// Print the personalized corpus picks
async fn demo_recommendations(store: &Arc<dyn Store>, user_id: uuid::Uuid) -> EngineResult<()> {
    let user = match store.user(user_id).await? {
        Some(user) => user,
        None => return Ok(()),
    };
    let foods = store.foods().await?;

    let picks = recommend(&user, &foods, PERSONALIZED_LIMIT);
    tracing::info!(
        "Recommendations for a {} profile with {:?}: {}",
        user.dosha.unwrap_or(Dosha::Vata),
        user.conditions,
        picks
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}

/// Route a few representative messages through the rule book
async fn demo_chat(store: &Arc<dyn Store>, user_id: uuid::Uuid) -> EngineResult<()> {
    let user = match store.user(user_id).await? {
        Some(user) => user,
        None => return Ok(()),
    };
    let foods = store.foods().await?;
    let dispatcher = Dispatcher::new();

    for message in [
        "hello",
        "what should I eat for my blood sugar?",
        "tell me about my dosha",
        "I can't sleep",
    ] {
        let reply = dispatcher.route(message, &user, &foods);
        tracing::info!("[{}] {} -> {}", reply.rule, message, reply.text);
    }

    Ok(())
}
