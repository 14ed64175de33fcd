use std::path::PathBuf;

use clap::{Parser, Subcommand};
use devcamper_cli::seeder;
use devcamper_db::{PgDocumentStore, connect};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "devcamper-cli")]
#[command(about = "DevCamper CLI - Administrative tools for DevCamper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Load or remove seed data
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Import users.json, bootcamps.json, courses.json and reviews.json from a directory
    Import {
        /// Directory holding the seed files
        #[arg(default_value = "_data")]
        dir: PathBuf,
    },
    /// Delete all users, bootcamps, courses and reviews
    Destroy {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let store = match connect(&database_url).await {
        Ok(pool) => PgDocumentStore::new(pool),
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = store.migrate().await {
        eprintln!("❌ Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&store, name, email, password).await,
        Commands::Seed {
            action: SeedAction::Import { dir },
        } => handle_import(&store, dir).await,
        Commands::Seed {
            action: SeedAction::Destroy { yes },
        } => handle_destroy(&store, yes).await,
    }
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        })
}

async fn handle_create_admin(
    store: &PgDocumentStore,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| prompt("Name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            })
    });

    match seeder::create_admin(store, &name, &email, &password).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_import(store: &PgDocumentStore, dir: PathBuf) {
    match seeder::import_dir(store, &dir).await {
        Ok(summary) => {
            for (collection, count) in &summary.counts {
                println!("   {}: {}", collection, count);
            }
            println!("✅ Imported {} documents", summary.total());
        }
        Err(e) => {
            eprintln!("\n❌ Error importing seed data: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_destroy(store: &PgDocumentStore, yes: bool) {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete all users, bootcamps, courses and reviews?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted");
            return;
        }
    }

    match seeder::destroy(store).await {
        Ok(removed) => println!("✅ Removed {} documents", removed),
        Err(e) => {
            eprintln!("\n❌ Error destroying data: {}", e);
            std::process::exit(1);
        }
    }
}
