//! Ojas CLI
//!
//! Command-line interface for Ojas operations:
//! - Register users and update profiles
//! - Log daily metrics
//! - View dashboards and history
//! - Browse the remedy corpus and chat

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ojas")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ayurvedic wellness tracking from the terminal")]
#[command(long_about = "Ojas tracks daily health metrics and turns them into a wellness\nscore, a dosha profile, and food guidance.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new user
    Register {
        /// Display name
        name: String,
        /// Age in years
        #[arg(short, long)]
        age: u8,
        /// Gender (male, female, other)
        #[arg(short, long, default_value = "other")]
        gender: String,
    },

    /// Update measurements and conditions, reclassifying the dosha
    Profile {
        /// User id
        user_id: String,
        /// Height in centimeters
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Activity level (sedentary, light, moderate, active, very-active)
        #[arg(long)]
        activity: Option<String>,
        /// Health conditions (comma-separated)
        #[arg(long)]
        conditions: Option<String>,
    },

    /// Log metrics for a day (merges into any existing entry)
    Log {
        /// User id
        user_id: String,
        /// Calendar day (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Glasses of water
        #[arg(long)]
        water: Option<u32>,
        /// Hours of sleep
        #[arg(long)]
        sleep: Option<f64>,
        /// Steps walked
        #[arg(long)]
        steps: Option<u32>,
        /// Calories consumed
        #[arg(long)]
        calories: Option<u32>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Mood (excellent, good, fair, poor)
        #[arg(long)]
        mood: Option<String>,
    },

    /// Show today's entry
    Today {
        /// User id
        user_id: String,
    },

    /// Show the log history window
    History {
        /// User id
        user_id: String,
        /// Days back from today
        #[arg(short, long, default_value = "30")]
        days: i64,
    },

    /// Show the dashboard (today, weekly averages, wellness score)
    Dashboard {
        /// User id
        user_id: String,
    },

    /// Export the log history as CSV
    Export {
        /// User id
        user_id: String,
        /// Days back from today
        #[arg(short, long, default_value = "30")]
        days: i64,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse the food corpus
    Foods {
        /// Only featured items
        #[arg(long)]
        featured: bool,
        /// Filter by condition tag
        #[arg(long)]
        condition: Option<String>,
        /// Maximum number of items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the remedy of the day
    Remedy,

    /// Personalized food picks for a user
    Recommend {
        /// User id
        user_id: String,
        /// Maximum number of items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Ask the guidance chat a question
    Chat {
        /// User id
        user_id: String,
        /// The question
        message: Vec<String>,
    },

    /// Seed the built-in food corpus
    Seed,

    /// Show system status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Register { name, age, gender } => {
            let body = serde_json::json!({
                "name": name,
                "age": age,
                "gender": gender.to_lowercase(),
            });

            let response = client
                .post(format!("{}/api/v1/users", cli.api_url))
                .json(&body)
                .send()
                .await?;

            let user = expect_json(response).await?;
            println!(
                "Registered {} (id: {})",
                user["name"].as_str().unwrap_or("-"),
                user["id"].as_str().unwrap_or("-")
            );
            println!("Keep the id, every other command needs it.");
        }

        Commands::Profile {
            user_id,
            height,
            weight,
            activity,
            conditions,
        } => {
            let mut body = serde_json::Map::new();
            if let Some(cm) = height {
                body.insert("height_cm".to_string(), cm.into());
            }
            if let Some(kg) = weight {
                body.insert("weight_kg".to_string(), kg.into());
            }
            if let Some(level) = activity {
                body.insert("activity_level".to_string(), level.to_lowercase().into());
            }
            if let Some(tags) = conditions {
                let tags: Vec<String> = tags.split(',').map(|s| s.trim().to_string()).collect();
                body.insert("conditions".to_string(), tags.into());
            }

            let response = client
                .put(format!("{}/api/v1/users/{}/profile", cli.api_url, user_id))
                .json(&body)
                .send()
                .await?;

            let user = expect_json(response).await?;
            println!(
                "Profile updated. Dosha: {}",
                user["dosha"].as_str().unwrap_or("not determined")
            );
        }

        Commands::Log {
            user_id,
            date,
            water,
            sleep,
            steps,
            calories,
            weight,
            mood,
        } => {
            let mut body = serde_json::Map::new();
            if let Some(s) = date {
                // Validate locally for a readable error
                match s.parse::<NaiveDate>() {
                    Ok(date) => {
                        body.insert("date".to_string(), date.to_string().into());
                    }
                    Err(_) => {
                        eprintln!("Invalid date: {} (expected YYYY-MM-DD)", s);
                        std::process::exit(1);
                    }
                }
            }
            if let Some(glasses) = water {
                body.insert("water_glasses".to_string(), glasses.into());
            }
            if let Some(hours) = sleep {
                body.insert("sleep_hours".to_string(), hours.into());
            }
            if let Some(count) = steps {
                body.insert("steps".to_string(), count.into());
            }
            if let Some(kcal) = calories {
                body.insert("calories".to_string(), kcal.into());
            }
            if let Some(kg) = weight {
                body.insert("weight_kg".to_string(), kg.into());
            }
            if let Some(m) = mood {
                body.insert("mood".to_string(), m.to_lowercase().into());
            }

            let response = client
                .post(format!("{}/api/v1/users/{}/logs", cli.api_url, user_id))
                .json(&body)
                .send()
                .await?;

            let result = expect_json(response).await?;
            println!(
                "Logged {}. Wellness score: {}",
                result["log"]["date"].as_str().unwrap_or("-"),
                result["wellness_score"]
            );
        }

        Commands::Today { user_id } => {
            let response = client
                .get(format!("{}/api/v1/users/{}/logs/today", cli.api_url, user_id))
                .send()
                .await?;

            let log = expect_json(response).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&log)?);
            } else {
                print_log(&log);
            }
        }

        Commands::History { user_id, days } => {
            let response = client
                .get(format!(
                    "{}/api/v1/users/{}/logs?days={}",
                    cli.api_url, user_id, days
                ))
                .send()
                .await?;

            let logs = expect_json(response).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&logs)?);
            } else {
                print_history(&logs);
            }
        }

        Commands::Dashboard { user_id } => {
            let response = client
                .get(format!("{}/api/v1/users/{}/dashboard", cli.api_url, user_id))
                .send()
                .await?;

            let dashboard = expect_json(response).await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
                return Ok(());
            }

            println!("Today:");
            print_log(&dashboard["today"]);

            let avg = &dashboard["weekly_average"];
            println!();
            println!("Weekly averages:");
            println!("  Calories: {} kcal", avg["calories"]);
            println!("  Water: {} glasses", avg["water_glasses"]);
            println!("  Sleep: {} h", avg["sleep_hours"]);

            println!();
            println!("Wellness score: {}", dashboard["wellness_score"]);
            println!(
                "Days logged this week: {}",
                dashboard["week"].as_array().map(|w| w.len()).unwrap_or(0)
            );
        }

        Commands::Export {
            user_id,
            days,
            output,
        } => {
            let response = client
                .get(format!(
                    "{}/api/v1/users/{}/logs/export?days={}",
                    cli.api_url, user_id, days
                ))
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Export failed: {}", response.status());
                std::process::exit(1);
            }

            let data = response.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Foods {
            featured,
            condition,
            limit,
        } => {
            let mut url = match condition {
                Some(tag) => format!(
                    "{}/api/v1/foods/condition/{}",
                    cli.api_url,
                    urlencoding::encode(&tag)
                ),
                None if featured => format!("{}/api/v1/foods/featured", cli.api_url),
                None => format!("{}/api/v1/foods", cli.api_url),
            };
            if let Some(n) = limit {
                url.push_str(&format!("?limit={}", n));
            }

            let response = client.get(&url).send().await?;
            let foods = expect_json(response).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&foods)?);
            } else {
                print_foods(&foods);
            }
        }

        Commands::Remedy => {
            let response = client
                .get(format!("{}/api/v1/foods/remedy-of-day", cli.api_url))
                .send()
                .await?;

            let food = expect_json(response).await?;
            println!(
                "Remedy of the day: {}",
                food["name"].as_str().unwrap_or("-")
            );
            println!("  {}", food["description"].as_str().unwrap_or(""));
        }

        Commands::Recommend { user_id, limit } => {
            let mut url = format!("{}/api/v1/users/{}/recommendations", cli.api_url, user_id);
            if let Some(n) = limit {
                url.push_str(&format!("?limit={}", n));
            }

            let response = client.get(&url).send().await?;
            let foods = expect_json(response).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&foods)?);
            } else {
                print_foods(&foods);
            }
        }

        Commands::Chat { user_id, message } => {
            let message = message.join(" ");
            if message.trim().is_empty() {
                eprintln!("Nothing to ask. Try: ojas chat <user-id> what is my dosha");
                std::process::exit(1);
            }

            let response = client
                .post(format!("{}/api/v1/users/{}/chat", cli.api_url, user_id))
                .json(&serde_json::json!({ "message": message }))
                .send()
                .await?;

            let reply = expect_json(response).await?;
            println!("{}", reply["text"].as_str().unwrap_or(""));
        }

        Commands::Seed => {
            let response = client
                .post(format!("{}/api/v1/foods/seed", cli.api_url))
                .send()
                .await?;

            let result = expect_json(response).await?;
            println!(
                "{} ({} items)",
                result["message"].as_str().unwrap_or("Seeded"),
                result["count"]
            );
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Ojas v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );

                    if let Some(store) = health.get("store") {
                        println!();
                        println!("Store:");
                        if let Some(users) = store["users"].as_u64() {
                            println!("  Users: {}", users);
                        }
                        if let Some(logs) = store["log_entries"].as_u64() {
                            println!("  Log entries: {}", logs);
                        }
                        if let Some(foods) = store["corpus_items"].as_u64() {
                            println!("  Corpus items: {}", foods);
                        }
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Ojas API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Ojas API server is running:");
                    eprintln!("  cargo run --bin ojas-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = ojas::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Read a JSON body, exiting with the server's error text on failure
async fn expect_json(response: reqwest::Response) -> anyhow::Result<serde_json::Value> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(text);
        eprintln!("Failed ({}): {}", status, message);
        std::process::exit(1);
    }

    Ok(response.json().await?)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_log(log: &serde_json::Value) {
    println!("  Date: {}", log["date"].as_str().unwrap_or("-"));
    println!("  Weight: {} kg", log["weight_kg"]);
    println!("  Calories: {} kcal", log["calories"]);
    println!("  Water: {} glasses", log["water_glasses"]);
    println!("  Sleep: {} h", log["sleep_hours"]);
    println!("  Steps: {}", log["steps"]);
    println!("  Mood: {}", log["mood"].as_str().unwrap_or("-"));
}

fn print_history(logs: &serde_json::Value) {
    let rows = match logs.as_array() {
        Some(r) => r,
        None => {
            println!("No data");
            return;
        }
    };

    if rows.is_empty() {
        println!("No entries in the selected window");
        return;
    }

    println!(
        "{:<12} {:>8} {:>8} {:>6} {:>6} {:>7} {:<10}",
        "Date", "Weight", "Cal", "Water", "Sleep", "Steps", "Mood"
    );
    println!("{}", "-".repeat(64));

    for row in rows {
        println!(
            "{:<12} {:>8.1} {:>8} {:>6} {:>6.1} {:>7} {:<10}",
            row["date"].as_str().unwrap_or("-"),
            row["weight_kg"].as_f64().unwrap_or(0.0),
            row["calories"].as_u64().unwrap_or(0),
            row["water_glasses"].as_u64().unwrap_or(0),
            row["sleep_hours"].as_f64().unwrap_or(0.0),
            row["steps"].as_u64().unwrap_or(0),
            row["mood"].as_str().unwrap_or("-")
        );
    }
}

fn print_foods(foods: &serde_json::Value) {
    let items = match foods.as_array() {
        Some(items) => items,
        None => {
            println!("No data");
            return;
        }
    };

    if items.is_empty() {
        println!("No matching foods. Seed the corpus with: ojas seed");
        return;
    }

    for item in items {
        let doshas: Vec<&str> = item["doshas"]
            .as_array()
            .map(|list| list.iter().filter_map(|d| d.as_str()).collect())
            .unwrap_or_default();

        println!(
            "{} [{}]",
            item["name"].as_str().unwrap_or("-"),
            doshas.join(", ")
        );
        println!("  {}", item["description"].as_str().unwrap_or(""));
    }
}
