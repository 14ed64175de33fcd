//! # DevCamper CLI
//!
//! Seeding and administration utilities for DevCamper deployments.
//!
//! This library crate provides the functionality used by the `devcamper-cli`
//! binary.
//!
//! ## Usage
//!
//! ```ignore
//! use devcamper_cli::seeder;
//!
//! let summary = seeder::import_dir(&store, Path::new("_data")).await?;
//! println!("Imported {} documents", summary.total());
//! ```

pub mod seeder;
