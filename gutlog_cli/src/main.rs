use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use gutlog_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gutlog")]
#[command(about = "Gut health tracking and food trigger correlation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User the entry belongs to
    #[arg(long, global = true, default_value = "default")]
    user: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a meal
    Meal {
        /// Comma-separated food names
        #[arg(long)]
        foods: String,

        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long, default_value = "snack")]
        meal_type: String,

        /// Timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Skip food name normalization
        #[arg(long)]
        raw: bool,
    },

    /// Log a gut moment and run trigger attribution
    Moment {
        /// Bristol stool type (1-7)
        #[arg(long)]
        bristol: Option<u8>,

        #[arg(long)]
        bloating: bool,

        #[arg(long)]
        gas: bool,

        #[arg(long)]
        cramping: bool,

        #[arg(long)]
        nausea: bool,

        /// Urgency (none, mild, severe)
        #[arg(long)]
        urgency: Option<String>,

        /// Pain score (0-10)
        #[arg(long)]
        pain: Option<u8>,

        /// Observational tags (strain, blood, mucus, urgency)
        #[arg(long)]
        tag: Vec<String>,

        /// Timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List evidenced trigger foods
    Triggers,

    /// Confirm a trigger verdict (freezes automatic updates)
    Confirm { food: String },

    /// Dismiss a trigger (deletes its evidence)
    Dismiss { food: String },

    /// Compute the blended health score
    Score,

    /// Export the moment journal to CSV and archive it
    Export,
}

fn main() -> Result<()> {
    gutlog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let journal = Journal::new(&data_dir);
    let store = FileTriggerStore::new(&data_dir);
    let user = cli.user;

    match cli.command {
        Commands::Meal {
            foods,
            meal_type,
            at,
            raw,
        } => cmd_meal(&journal, &user, &foods, &meal_type, at.as_deref(), raw),
        Commands::Moment {
            bristol,
            bloating,
            gas,
            cramping,
            nausea,
            urgency,
            pain,
            tag,
            at,
            notes,
        } => {
            let mut moment = GutMoment::new(parse_at(at.as_deref())?);
            moment.bristol = bristol.map(BristolType::new).transpose()?;
            moment.symptoms = Symptoms {
                bloating,
                gas,
                cramping,
                nausea,
            };
            moment.urgency = urgency.as_deref().map(Urgency::parse_lenient);
            moment.pain = pain.map(PainScore::new).transpose()?;
            moment.tags = tag.iter().filter_map(|t| parse_tag(t)).collect();
            moment.notes = notes;

            cmd_moment(&journal, &store, &user, moment)
        }
        Commands::Triggers => cmd_triggers(&store, &user),
        Commands::Confirm { food } => {
            if confirm_trigger(&store, &user, &food)? {
                println!("✓ Confirmed trigger: {}", food);
            } else {
                println!("No trigger record for {:?}", food);
            }
            Ok(())
        }
        Commands::Dismiss { food } => {
            if dismiss_trigger(&store, &user, &food)? {
                println!("✓ Dismissed trigger: {}", food);
            } else {
                println!("No trigger record for {:?}", food);
            }
            Ok(())
        }
        Commands::Score => cmd_score(&journal, &data_dir, &user, &config),
        Commands::Export => {
            let csv_path = data_dir.join("users").join(&user).join("moments.csv");
            let count = export_moments_csv(&journal, &user, &csv_path)?;
            println!("✓ Exported {} moments to {}", count, csv_path.display());
            Ok(())
        }
    }
}

fn parse_at(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::Validation(format!("Invalid timestamp {:?}: {}", s, e))),
    }
}

fn parse_meal_type(s: &str) -> MealType {
    match s.to_lowercase().as_str() {
        "breakfast" => MealType::Breakfast,
        "lunch" => MealType::Lunch,
        "dinner" => MealType::Dinner,
        _ => MealType::Snack,
    }
}

fn parse_tag(s: &str) -> Option<MomentTag> {
    match s.to_lowercase().as_str() {
        "strain" => Some(MomentTag::Strain),
        "blood" => Some(MomentTag::Blood),
        "mucus" => Some(MomentTag::Mucus),
        "urgency" => Some(MomentTag::Urgency),
        other => {
            eprintln!("Unknown tag {:?}, ignoring", other);
            None
        }
    }
}

fn cmd_meal(
    journal: &Journal,
    user: &str,
    foods: &str,
    meal_type: &str,
    at: Option<&str>,
    raw: bool,
) -> Result<()> {
    let foods: Vec<String> = foods
        .split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if foods.is_empty() {
        return Err(Error::Validation("Meal must contain at least one food".into()));
    }

    let mut meal = Meal::new(parse_at(at)?, parse_meal_type(meal_type), foods);

    if !raw {
        let assessments = LocalNormalizer.analyze(&meal.foods)?;
        meal.normalized_foods = Some(
            assessments
                .into_iter()
                .map(|a| a.normalized_name)
                .collect(),
        );
    }

    journal.append_meal(user, &meal)?;

    println!("✓ Meal logged ({} foods)", meal.foods.len());
    Ok(())
}

fn cmd_moment(
    journal: &Journal,
    store: &FileTriggerStore,
    user: &str,
    moment: GutMoment,
) -> Result<()> {
    // Primary write first; attribution is best-effort and never blocks it
    journal.append_moment(user, &moment)?;
    println!("✓ Gut moment logged");

    if let Err(e) = attribute_moment(store, journal, user, &moment) {
        tracing::warn!("Trigger attribution failed: {}", e);
    }

    Ok(())
}

fn cmd_triggers(store: &FileTriggerStore, user: &str) -> Result<()> {
    let records = list_triggers(store, user)?;

    if records.is_empty() {
        println!("No trigger foods identified yet.");
        return Ok(());
    }

    println!("{:<10} {:<24} {:>4} {:>5}  {}", "TIER", "FOOD", "BAD", "GOOD", "SYMPTOMS");
    for record in records {
        let tier = match record.confidence {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::None => "-",
        };
        let confirmed = if record.user_confirmed == Some(true) {
            " (confirmed)"
        } else {
            ""
        };
        let symptoms: Vec<&str> = record.symptoms.iter().map(|s| s.as_str()).collect();
        println!(
            "{:<10} {:<24} {:>4} {:>5}  {}{}",
            tier,
            record.food_name,
            record.bad_occurrences,
            record.good_occurrences,
            symptoms.join(", "),
            confirmed
        );
    }

    Ok(())
}

fn cmd_score(journal: &Journal, data_dir: &Path, user: &str, config: &Config) -> Result<()> {
    let profile_path = data_dir.join("users").join(user).join("profile.json");
    let profile = load_profile(&profile_path)?;

    let score = compute_health_score(
        journal,
        profile.as_ref(),
        user,
        Utc::now(),
        config.scoring.default_baseline_score,
    )?;

    println!("Gut health score: {} ({:?})", score.value, score.grade);
    if score.is_baseline {
        println!("  (baseline only - no logs in the last {} days)", SCORE_WINDOW_DAYS);
    }
    if let Some(b) = score.breakdown {
        println!("  Bristol:    {:>2}/40", b.bristol);
        println!("  Symptoms:   {:>2}/30", b.symptoms);
        println!("  Regularity: {:>2}/20", b.regularity);
        println!("  Medical:    {:>2}/10", b.medical);
    }

    Ok(())
}
