use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use super::manifest::RouteManifest;
use crate::router::{RouteMatch, Router};
use crate::runtime_config::RouterConfig;

/// Command-line interface for fastrouter
///
/// Loads a TOML route manifest, builds a router from it and inspects it.
#[derive(Parser, Debug)]
#[command(name = "fastrouter")]
#[command(about = "fastrouter CLI", long_about = None)]
pub struct Cli {
    /// Path to the route manifest (TOML, `[[route]]` tables)
    #[arg(short, long, env = "FASTROUTER_ROUTES")]
    pub routes: PathBuf,

    /// Sort manifest entries by path before building
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Human-readable debug logging on stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match one request against the route table
    ///
    /// Exits non-zero when no route matches.
    Match {
        /// HTTP method (case-insensitive)
        method: String,

        /// Request path, e.g. /users/42
        path: String,

        /// Matching strategy to use
        #[arg(long, value_enum, default_value_t = Matcher::Indexed)]
        matcher: Matcher,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print node count, route count and depth of the route trie
    Stats {
        /// Print the stats as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List registered routes with their handlers
    Routes,
}

/// Matcher variant selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Matcher {
    Segments,
    Indexed,
    Static,
    Fast,
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    method: &'a str,
    path: &'a str,
    handler: Option<&'a str>,
    params: Vec<(&'a str, &'a str)>,
}

/// Load the manifest named by `cli` and build its router
pub fn load_router(cli: &Cli) -> Result<Router<String>> {
    let mut manifest = RouteManifest::load(&cli.routes)?;
    if cli.sort {
        manifest.sort();
    }
    let router = manifest.build_router(RouterConfig::from_env())?;
    info!(routes = %cli.routes.display(), stats = %router.stats(), "Router built");
    Ok(router)
}

/// Execute a parsed command line, writing results to `out`
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> Result<ExitCode> {
    let router = load_router(cli)?;

    match &cli.command {
        Commands::Match {
            method,
            path,
            matcher,
            json,
        } => {
            let parsed = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method '{method}'"))?;
            let found = match matcher {
                Matcher::Segments => router.match_segments(&parsed, path),
                Matcher::Indexed => router.route(&parsed, path),
                Matcher::Static => router.match_static(&parsed, path),
                Matcher::Fast => router.fast_match(&parsed, path),
            };
            let matched = found.is_some();
            write_match(out, parsed.as_str(), path, found.as_ref(), *json)?;
            if let Some(route_match) = found {
                router.release(route_match);
            }
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Stats { json } => {
            let stats = router.stats();
            if *json {
                serde_json::to_writer_pretty(&mut *out, &stats)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{stats}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes => {
            for (method, pattern) in router.routes() {
                let handler = router
                    .handler_for(method, pattern)
                    .map_or("<none>", String::as_str);
                writeln!(out, "{:<8} {:<40} {}", method, pattern, handler)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn write_match(
    out: &mut dyn Write,
    method: &str,
    path: &str,
    found: Option<&RouteMatch<'_, String>>,
    json: bool,
) -> Result<()> {
    if json {
        let output = MatchOutput {
            method,
            path,
            handler: found.map(|m| m.handler.as_str()),
            params: found.map(|m| m.params.iter().collect()).unwrap_or_default(),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(());
    }

    match found {
        Some(route_match) => {
            writeln!(out, "{method} {path} -> {}", route_match.handler)?;
            for (name, value) in route_match.params.iter() {
                writeln!(out, "  {name} = {value}")?;
            }
        }
        None => writeln!(out, "{method} {path} -> no match")?,
    }
    Ok(())
}
