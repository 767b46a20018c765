#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! `pbs`: load, export and check Pokémon Essentials PBS files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{error, info};
use pbs_data::{RecordSet, validate_record_set};
use pbs_format::Schema;
use pbs_project::{discover_schemas, export, lint_forms, load, open_project, strip_forms};

#[derive(Parser)]
#[command(author, version, about = "Read and write Pokémon Essentials PBS files.")]
struct Cli {
    /// Project root holding `pbs.toml` and the PBS directory.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,
    /// Export directory, overriding `output_dir` from `pbs.toml`.
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the schemas that have files in the input directory.
    Schemas,
    /// Print a schema's merged records as JSON.
    Dump { schema: Schema },
    /// Write a JSON record set out as PBS text.
    Export {
        schema: Schema,
        /// JSON file holding the record set.
        #[arg(long)]
        from: PathBuf,
    },
    /// Load a schema and write it straight back out in canonical form.
    Normalize { schema: Schema },
    /// Report species-only keys on form records.
    LintForms {
        /// Also export forms with those keys removed.
        #[arg(long)]
        strip: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let store = open_project(&cli.project, cli.output.as_deref())?;
    info!(
        "pbs {}: input '{}', output '{}'",
        pbs_project::PBS_VERSION,
        store.paths().input.display(),
        store.paths().output.display()
    );

    match cli.command {
        Commands::Schemas => {
            for schema in discover_schemas(&store.paths().input)? {
                println!("{schema}");
            }
        },
        Commands::Dump { schema } => {
            let set = load(&store, schema)?;
            println!("{}", serde_json::to_string_pretty(&set)?);
        },
        Commands::Export { schema, from } => {
            let text = fs::read_to_string(&from).with_context(|| format!("reading '{}'", from.display()))?;
            let set: RecordSet =
                serde_json::from_str(&text).with_context(|| format!("parsing record set from '{}'", from.display()))?;
            let problems = validate_record_set(&set);
            if !problems.is_empty() {
                for problem in &problems {
                    error!("{problem}");
                }
                bail!("{} problem(s) in '{}'; nothing written", problems.len(), from.display());
            }
            print_paths(&export(&store, &store, schema, &set)?);
        },
        Commands::Normalize { schema } => {
            let set = load(&store, schema)?;
            print_paths(&export(&store, &store, schema, &set)?);
        },
        Commands::LintForms { strip } => {
            let warnings = lint_forms(&store)?;
            for w in &warnings {
                println!("{}: {}", w.form_id, w.key);
            }
            if strip && !warnings.is_empty() {
                let (set, removed) = strip_forms(&store)?;
                info!("removed {removed} species-only field(s)");
                print_paths(&export(&store, &store, Schema::Forms, &set)?);
            }
        },
    }
    Ok(())
}

fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}
