//! Benchmarks for the Ojas wellness engine
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use uuid::Uuid;

use ojas::chat::Dispatcher;
use ojas::engine::{recommend, score_window, LogAggregator, ScoreEngine, PERSONALIZED_LIMIT};
use ojas::store::{Gender, LogEntry, MemoryStore, MetricUpdate, Store, User};
use ojas::{corpus, Dosha};

fn create_test_window(count: usize) -> Vec<LogEntry> {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    (0..count)
        .map(|i| {
            let mut entry = LogEntry::new(Uuid::nil(), start + Duration::days(i as i64));
            entry.water_glasses = 8;
            entry.sleep_hours = 7.5;
            entry.steps = 8500;
            entry.calories = 2000;
            entry
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for size in [7, 30, 365] {
        let window = create_test_window(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("score_window_{}", size), |b| {
            b.iter(|| score_window(black_box(&window)))
        });
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    let foods = corpus::defaults();
    let user = User::new("bench", 34, Gender::Other)
        .height(172.0)
        .weight(65.0)
        .conditions(vec!["diabetes".to_string(), "stress".to_string()]);

    group.bench_function("personalized", |b| {
        b.iter(|| recommend(black_box(&user), black_box(&foods), PERSONALIZED_LIMIT))
    });

    let mut classified = user.clone();
    classified.dosha = Some(Dosha::Pitta);

    group.bench_function("personalized_with_dosha", |b| {
        b.iter(|| recommend(black_box(&classified), black_box(&foods), PERSONALIZED_LIMIT))
    });

    group.finish();
}

fn bench_chat(c: &mut Criterion) {
    let mut group = c.benchmark_group("chat");

    let dispatcher = Dispatcher::new();
    let foods = corpus::defaults();
    let user = User::new("bench", 34, Gender::Other);

    let messages = [
        "hello",
        "what helps with blood sugar?",
        "tell me about my dosha",
        "something entirely unrelated to the rule book",
    ];

    group.bench_function("route_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let _ = dispatcher.route(black_box(message), &user, &foods);
            }
        })
    });

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("engine");

    group.bench_function("upsert_daily_log", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
                let user = User::new("bench", 34, Gender::Other);
                let user_id = user.id;
                store.put_user(user).await.unwrap();

                let aggregator = LogAggregator::new(Arc::clone(&store));
                let update = MetricUpdate::new().water(8).sleep(7.5).steps(8500);

                let start = std::time::Instant::now();

                for _ in 0..iters {
                    aggregator
                        .upsert_daily_log(user_id, Utc::now(), update.clone())
                        .await
                        .unwrap();
                }

                start.elapsed()
            })
        });
    });

    group.bench_function("recompute_week", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
                let user = User::new("bench", 34, Gender::Other);
                let user_id = user.id;
                store.put_user(user).await.unwrap();

                // Setup: a full week of entries
                let aggregator = LogAggregator::new(Arc::clone(&store));
                for days_ago in 0..7 {
                    let at = Utc::now() - Duration::days(days_ago);
                    let update = MetricUpdate::new().water(8).sleep(7.5).steps(8500);
                    aggregator.upsert_daily_log(user_id, at, update).await.unwrap();
                }

                let scores = ScoreEngine::new(Arc::clone(&store));

                let start = std::time::Instant::now();

                for _ in 0..iters {
                    let _ = scores.recompute(black_box(user_id)).await.unwrap();
                }

                start.elapsed()
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_score, bench_recommend, bench_chat, bench_engine);
criterion_main!(benches);
