//! # CLI Module
//!
//! Command-line access to a route table described in a TOML manifest.
//!
//! ## Manifest
//!
//! ```toml
//! [[route]]
//! method = "GET"
//! path = "/users/:id"
//! handler = "get_user"
//! ```
//!
//! Entries must be in lexicographic path order unless `--sort` is given.
//!
//! ## Commands
//!
//! ### `match`
//!
//! Resolve one request and print the handler and its bindings:
//!
//! ```bash
//! fastrouter --routes routes.toml match GET /users/42
//! fastrouter --routes routes.toml match GET /users/42 --matcher fast --json
//! ```
//!
//! Exits with a failure status when nothing matches.
//!
//! ### `stats`
//!
//! ```bash
//! fastrouter --routes routes.toml stats --json
//! ```
//!
//! ### `routes`
//!
//! List every registered method, pattern and handler in build order.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use fastrouter::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let status = run_cli(&cli, &mut std::io::stdout())?;
//! ```

mod commands;
mod manifest;

pub use commands::{load_router, run_cli, Cli, Commands, Matcher};
pub use manifest::{RouteEntry, RouteManifest};
