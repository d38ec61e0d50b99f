use anyhow::{Context, Result, bail};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

use pulse::db::models::{Exercise, NewUser};
use pulse::db::{self, DEFAULT_DATABASE_URL};
use pulse::logging::{init_logger, parse_level};
use pulse::seed::{self, SeedDocument};
use pulse::{SqliteStorage, Storage};

#[derive(Parser, Debug)]
#[command(version, about = "Pulse - fitness catalog admin CLI", long_about = None)]
struct Args {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    database_url: String,

    #[arg(long, env = "PULSE_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending migrations
    Migrate,
    /// Load categories, equipment, exercises and plans from a JSON file
    Seed { file: PathBuf },
    /// Delete every row from every table
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// List exercises
    Exercises {
        #[arg(short, long, conflicts_with = "equipment")]
        category: Option<i32>,
        #[arg(short, long)]
        equipment: Option<i32>,
    },
    /// List workout plans
    Plans {
        #[arg(short, long, conflicts_with = "specialized")]
        goal: Option<String>,
        #[arg(short, long)]
        specialized: bool,
    },
    /// Show a plan with its exercises in order
    Plan { id: i32 },
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user, or update the given fields of an existing one
    Upsert {
        #[arg(long)]
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        goal: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Issue a session id for an existing user
    Create {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = 24 * 7)]
        ttl_hours: i64,
    },
    /// Remove expired sessions
    Prune,
}

fn print_exercises(exercises: &[Exercise]) {
    if exercises.is_empty() {
        println!("No exercises found");
    }
    for exercise in exercises {
        println!("{}", exercise);
    }
}

fn migrate(database_url: &str) -> Result<()> {
    let pool = db::establish_pool(database_url, 1)?;
    let applied = db::run_migrations(&mut *pool.get()?)?;
    if applied.is_empty() {
        println!("Database {} is already up to date", database_url);
    }
    for name in applied {
        println!("Applied {}", name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    init_logger(parse_level(&args.log_level).unwrap_or(LevelFilter::Warn));

    if let Commands::Migrate = args.command {
        return migrate(&args.database_url);
    }
    let storage = SqliteStorage::open(&args.database_url, 1)
        .with_context(|| format!("Failed to open database {}", args.database_url))?;
    run(storage, args.command).await
}

async fn run(storage: SqliteStorage, command: Commands) -> Result<()> {
    match command {
        Commands::Migrate => {}
        Commands::Seed { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let doc = SeedDocument::from_json(&text)?;
            let pool = storage.pool().clone();
            let report = tokio::task::spawn_blocking(move || {
                let mut conn = pool.get()?;
                anyhow::Ok(seed::apply(&mut conn, &doc)?)
            })
            .await??;
            println!(
                "Seeded {} categories, {} equipment types, {} exercises, {} plans, {} plan exercises",
                report.categories, report.equipment, report.exercises, report.plans, report.slots
            );
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to delete all data without --yes");
            }
            let pool = storage.pool().clone();
            tokio::task::spawn_blocking(move || {
                let mut conn = pool.get()?;
                anyhow::Ok(db::clear_all_tables(&mut conn)?)
            })
            .await??;
            println!("All tables cleared");
        }
        Commands::Exercises {
            category,
            equipment,
        } => {
            let exercises = match (category, equipment) {
                (Some(id), _) => storage.get_exercises_by_category(id).await?,
                (None, Some(id)) => storage.get_exercises_by_equipment(id).await?,
                (None, None) => storage.get_exercises().await?,
            };
            print_exercises(&exercises);
        }
        Commands::Plans { goal, specialized } => {
            let plans = match goal {
                Some(goal) => storage.get_workout_plans_by_goal(&goal).await?,
                None if specialized => storage.get_specialized_workouts().await?,
                None => storage.get_workout_plans().await?,
            };
            if plans.is_empty() {
                println!("No workout plans found");
            }
            for plan in plans {
                println!("{}", plan);
            }
        }
        Commands::Plan { id } => {
            let Some(detail) = storage.get_workout_plan_detail(id).await? else {
                bail!("Workout plan {} not found", id);
            };
            println!("{}", detail.plan);
            println!("\t{}", detail.plan.description);
            for slot in &detail.exercises {
                println!("\t{}", slot);
            }
        }
        Commands::User(UserCommand::Upsert {
            id,
            email,
            first_name,
            last_name,
            goal,
        }) => {
            let user = storage
                .upsert_user(NewUser {
                    email,
                    first_name,
                    last_name,
                    goal,
                    ..NewUser::new(id)
                })
                .await?;
            println!(
                "{} {} <{}> goal: {}",
                user.id,
                [user.first_name, user.last_name]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" "),
                user.email.unwrap_or_default(),
                user.goal.unwrap_or_default()
            );
        }
        Commands::Session(SessionCommand::Create { user, ttl_hours }) => {
            if ttl_hours <= 0 {
                bail!("--ttl-hours must be positive");
            }
            if storage.get_user(&user).await?.is_none() {
                bail!("User {} not found; create it with `pulse user upsert`", user);
            }
            let session = storage
                .create_session(&user, TimeDelta::hours(ttl_hours))
                .await?;
            println!("{}", session.sid);
            log::info!("Session for {} expires at {}", user, session.expires_at);
        }
        Commands::Session(SessionCommand::Prune) => {
            let removed = storage.prune_expired_sessions().await?;
            println!("Removed {} expired sessions", removed);
        }
    }

    Ok(())
}
