//! Expand a JSON rule declaration for the locales stored in a SQLite database.
//!
//! Usage:
//!   translatable-rules <rules.json> [en,fr,...]
//!
//! Required environment variables:
//! - TRANSLATABLE_LOCALES_TABLE
//! - TRANSLATABLE_LOCALES_TABLE_COLUMN
//! - TRANSLATABLE_LOCALES_LANG_ID_COLUMN
//!
//! Optional:
//! - DATABASE_PATH (defaults to data/locales.db)
//! - TRANSLATABLE_RULE_FORMAT, TRANSLATABLE_RULE_PREFIX, TRANSLATABLE_RULE_SUFFIX

use anyhow::{bail, Context, Result};
use std::fs;
use tracing::info;
use translatable_rules::config::Config;
use translatable_rules::i18n::{LocaleRegistry, SqliteSource};
use translatable_rules::validation::{RuleDeclaration, RuleFactory, RuleOptions};

fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translatable_rules=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(rules_path) = args.next() else {
        bail!("usage: translatable-rules <rules.json> [locale,...]");
    };
    let requested: Option<Vec<String>> = args
        .next()
        .map(|list| list.split(',').map(|l| l.trim().to_string()).collect());

    let config = Config::from_env()?;
    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/locales.db".to_string());

    let source = SqliteSource::open(&database_path)
        .with_context(|| format!("Failed to open locale database {}", database_path))?;
    let locales = LocaleRegistry::from_source(config.locales.clone(), source)
        .context("Failed to load locales")?;
    info!("Loaded {} locales from {}", locales.len(), database_path);

    let raw = fs::read_to_string(&rules_path)
        .with_context(|| format!("Failed to read {}", rules_path))?;
    let rules: RuleDeclaration = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON object of rules", rules_path))?;

    let requested_refs: Option<Vec<&str>> = requested
        .as_ref()
        .map(|list| list.iter().map(String::as_str).collect());

    let expanded = RuleFactory::make(
        &locales,
        &config.rule_factory,
        &rules,
        RuleOptions::default(),
        requested_refs.as_deref(),
    )
    .context("Failed to expand rules")?;

    info!("Expanded {} rules into {}", rules.len(), expanded.len());
    println!("{}", serde_json::to_string_pretty(&expanded)?);
    Ok(())
}
