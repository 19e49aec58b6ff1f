// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! nodeframe-dump - Inspect nodeframe archives
//!
//! Lists registered classes, writes demo ledger archives and dumps archive
//! records through a format string.

mod demo;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nodeframe::archive::{load_nodes, save_nodes};
use nodeframe::sort::sort_boxed;
use nodeframe::{ClassDescriptor, ClassRegistry, ExportSink, NodeExt, WriteSink};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nodeframe-dump")]
#[command(about = "Inspect nodeframe archives")]
#[command(version)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered classes with schema, base and fields
    Classes {
        /// Proto schema document (JSON) to load first
        #[arg(long, value_name = "PROTO")]
        schema: Option<PathBuf>,
    },

    /// Write a demo ledger archive
    Demo {
        /// Output archive file
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Number of generated transactions
        #[arg(short, long, default_value = "12")]
        count: usize,
    },

    /// Print every record of an archive
    Dump {
        /// Input archive file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Format string; empty prints canonical JSON
        #[arg(short, long, default_value = "")]
        fmt: String,

        /// Sort keys: K1 or K1,K2
        #[arg(short, long, value_name = "K1[,K2]")]
        sort: Option<String>,

        /// Proto schema document (JSON) for classes not built in
        #[arg(long, value_name = "PROTO")]
        schema: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    nodeframe_ledger::register_classes();

    match cli.command {
        Commands::Classes { schema } => {
            load_schema(schema.as_deref())?;
            cmd_classes()?;
        }
        Commands::Demo { output, count } => {
            cmd_demo(&output, count)?;
        }
        Commands::Dump {
            input,
            fmt,
            sort,
            schema,
        } => {
            load_schema(schema.as_deref())?;
            cmd_dump(&input, &fmt, sort.as_deref())?;
        }
    }

    Ok(())
}

fn load_schema(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading proto schema {}", path.display()))?;
    let classes = ClassRegistry::global()
        .load_protos(&json)
        .with_context(|| format!("loading proto schema {}", path.display()))?;
    log::info!("loaded {} proto classes from {}", classes.len(), path.display());
    Ok(())
}

fn describe(class: &ClassDescriptor) -> String {
    let base = class.base().map_or("-", |b| b.name());
    let kind = if class.is_proto() { "proto" } else { "builtin" };
    format!(
        "{:<16} schema={:<6} base={:<12} {:<8} [{}]",
        class.name(),
        class.schema(),
        base,
        kind,
        class.list_fields(", ")
    )
}

fn cmd_classes() -> anyhow::Result<()> {
    let registry = ClassRegistry::global();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for name in registry.class_names() {
        if let Some(class) = registry.lookup(&name) {
            writeln!(out, "{}", describe(&class))?;
        }
    }
    Ok(())
}

fn cmd_demo(output: &Path, count: usize) -> anyhow::Result<()> {
    let nodes = demo::ledger(count);
    let written = save_nodes(output, nodes.iter().map(|n| n.as_ref()))
        .with_context(|| format!("writing {}", output.display()))?;
    println!("wrote {} records to {}", written, output.display());
    Ok(())
}

fn parse_sort_keys(keys: &str) -> anyhow::Result<(&str, Option<&str>)> {
    let (k1, k2) = match keys.split_once(',') {
        Some((k1, k2)) => (k1.trim(), Some(k2.trim())),
        None => (keys.trim(), None),
    };
    if k1.is_empty() || k2.is_some_and(str::is_empty) {
        anyhow::bail!("invalid sort keys '{}': expected K1 or K1,K2", keys);
    }
    Ok((k1, k2))
}

fn cmd_dump(input: &Path, fmt: &str, sort: Option<&str>) -> anyhow::Result<()> {
    let mut loaded = load_nodes(input, ClassRegistry::global())
        .with_context(|| format!("reading {}", input.display()))?;

    for skipped in &loaded.skipped {
        log::warn!("skipped record: {}", skipped);
    }

    if let Some(keys) = sort {
        let (k1, k2) = parse_sort_keys(keys)?;
        sort_boxed(&mut loaded.nodes, k1, k2);
    }

    let stdout = std::io::stdout();
    let mut sink = WriteSink::new(stdout.lock());
    for node in &loaded.nodes {
        node.format(&mut sink, fmt);
        sink.push_str("\n");
    }
    let mut out = sink.finish()?;
    out.flush()?;

    if !loaded.skipped.is_empty() {
        eprintln!(
            "{} records, {} skipped",
            loaded.nodes.len(),
            loaded.skipped.len()
        );
    }
    Ok(())
}
