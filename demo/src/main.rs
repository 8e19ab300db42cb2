//! keyward demo CLI
//!
//! Walks through the container variants: attribute/key duality on the base
//! container, sentinel reads on the nullable container, and policy
//! enforcement plus dirty tracking on the tracking container.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- nullable
//!   cargo run -p demo -- tracking
//!   cargo run -p demo -- policy policies/checklist.toml

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyward_contracts::{
    error::{ContainerError, ContainerResult},
    policy::{AccessPolicy, KeyAccess},
};
use keyward_core::{traits::EntryStore, Container, NullableContainer};
use keyward_tracking::{PolicyConfig, TrackingContainer};

// ── CLI definition ────────────────────────────────────────────────────────────

/// keyward: attribute-addressable containers with access tracking.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "keyward container walkthrough",
    long_about = "Runs keyward walkthroughs showing attribute/key access,\n\
                  null-sentinel reads, access policies, and dirty-key tracking."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every walkthrough in sequence.
    RunAll,
    /// Base and nullable containers: chained reads on absent paths.
    Nullable,
    /// Tracking container: policy installation, denials, dirty keys.
    Tracking,
    /// Load a TOML access policy and apply it to a sample tracking container.
    Policy {
        /// Path to the TOML policy file.
        path: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Nullable => run_nullable(),
        Command::Tracking => run_tracking(),
        Command::Policy { path } => run_policy(&path),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Walkthroughs ──────────────────────────────────────────────────────────────

fn run_all() -> ContainerResult<()> {
    run_nullable()?;
    run_tracking()?;
    Ok(())
}

fn run_nullable() -> ContainerResult<()> {
    println!("── Container / NullableContainer ──");

    let mut c: Container = [("Value", json!("hello")), ("v2", json!("test"))]
        .into_iter()
        .collect();
    c.set_attr("Value", "bye");
    println!("c = {c}");
    println!("c.Value = {}", c.attr("Value")?);
    println!("plain json = {}", c.to_json());

    let mut y: NullableContainer = [("brett", json!("cohen")), ("gabe", json!("schaffer"))]
        .into_iter()
        .collect();
    println!("y (initial) = {y}");
    y.update([("jeff", json!({ "j1": "robbins", "j2": "scott" }))]);
    println!("y (post update) = {y}");
    println!("y.jeff.j1 = {}", y.attr("jeff")?.attr("j1")?);
    println!("y.wendy.carson = '{}'", y.attr("wendy")?.attr("carson")?);
    println!("'wendy' in y = {}", y.contains("wendy"));
    println!();
    Ok(())
}

fn run_tracking() -> ContainerResult<()> {
    println!("── TrackingContainer ──");

    let mut tc: TrackingContainer = [("test", json!(17))].into_iter().collect();
    println!("tc.test = {}", tc.attr("test")?);
    if let Err(e) = tc.attr("foo") {
        println!("ignoring attribute error on tc.foo: {e}");
    }

    println!("pre-mod dirty = {:?}", tc.dirty_keys());
    if !tc.contains("checklistDefinitions")? {
        tc.set_attr("checklistDefinitions", json!({}))?;
    }
    println!("post-mod dirty = {:?}", tc.dirty_keys());

    let saved = serde_json::to_string(&tc).map_err(|e| ContainerError::Serialization {
        reason: format!("failed to serialize container: {e}"),
    })?;
    println!("native record = {saved}");

    tc.set_allowed_accesses(
        KeyAccess::only(["checklistDefinitions"]),
        KeyAccess::only(["checklistDefinitions"]),
    );
    println!("post-policy keys = {:?}", tc.keys().collect::<Vec<_>>());

    match tc.set_item("test", 18) {
        Ok(()) => println!("unexpected: write to 'test' allowed"),
        Err(e) => println!("write to 'test' rejected: {e}"),
    }
    if let Err(e) = tc.update([("checklistDefinitions", json!({})), ("other", json!(1))]) {
        println!("update rejected: {e}");
    }
    if let Err(e) = tc.popitem() {
        println!("popitem rejected: {e}");
    }

    if let Some(defs) = tc.notify_changed("checklistDefinitions")?.as_object_mut() {
        defs.insert("a".to_string(), json!(null));
    }
    println!("after notify_changed dirty = {:?}", tc.dirty_keys());

    let copy = tc.clone();
    println!("copy = {copy} (dirty = {:?})", copy.dirty_keys());
    println!("plain json = {}", tc.to_json());
    println!();
    Ok(())
}

fn run_policy(path: &Path) -> ContainerResult<()> {
    println!("── Policy file {} ──", path.display());

    let policy: AccessPolicy = PolicyConfig::from_file(path)?.into();
    info!(path = %path.display(), "applying policy file");

    let mut tc: TrackingContainer = [("test", json!(17)), ("checklistDefinitions", json!({}))]
        .into_iter()
        .collect();
    tc.set_policy(policy);

    for key in ["test", "checklistDefinitions"] {
        match tc.item(key) {
            Ok(value) => println!("read  {key:<22} ok     {value}"),
            Err(e) => println!("read  {key:<22} denied ({e})"),
        }
        match tc.set_item(key, json!(null)) {
            Ok(()) => println!("write {key:<22} ok"),
            Err(e) => println!("write {key:<22} denied ({e})"),
        }
    }
    println!("dirty = {:?}", tc.dirty_keys());
    println!();
    Ok(())
}
