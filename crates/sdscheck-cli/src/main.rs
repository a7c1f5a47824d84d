//! sdscheck: validate and score SDS extraction output.
//!
//! `check` runs the warn-only format guardrails over already-extracted
//! documents and attaches the warnings to `meta.validation_warnings`;
//! `eval` scores an extracted document against a ground-truth reference.
//! Neither subcommand performs extraction itself.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sdscheck_core::{apply_guardrails, attach_warnings, document, evaluate, shape_warnings};

#[derive(Parser)]
#[command(
    name = "sdscheck",
    version,
    about = "Warn-only validation and accuracy scoring for SDS extraction output"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate extracted documents and attach warnings to meta.validation_warnings
    Check {
        /// Extracted SDS documents (JSON)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Leave CAS values untouched (validation still runs on the normalized form)
        #[arg(long)]
        no_normalize: bool,

        /// Also check the document against the SDS shape schema
        #[arg(long)]
        schema_check: bool,

        /// Write annotated copies into this directory as <stem>.json
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Score an extracted document against a ground-truth document
    Eval {
        /// Extracted SDS document (JSON or YAML)
        #[arg(long, value_name = "FILE")]
        extracted: PathBuf,

        /// Hand-curated ground-truth document (JSON or YAML)
        #[arg(long, value_name = "FILE")]
        truth: PathBuf,

        /// Print the full report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            files,
            no_normalize,
            schema_check,
            out_dir,
        } => run_check(&files, !no_normalize, schema_check, out_dir.as_deref()),
        Commands::Eval {
            extracted,
            truth,
            json,
        } => run_eval(&extracted, &truth, json),
    }
}

fn run_check(
    files: &[PathBuf],
    normalize: bool,
    schema_check: bool,
    out_dir: Option<&Path>,
) -> Result<()> {
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    // Each document is processed independently; a warning in one never
    // affects another.
    for file in files {
        let annotated = check_one(file, normalize, schema_check)
            .with_context(|| format!("checking {}", file.display()))?;

        let pretty = serde_json::to_string_pretty(&annotated)?;
        println!("{pretty}");

        if let Some(dir) = out_dir {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            let target = dir.join(format!("{stem}.json"));
            fs::write(&target, &pretty)
                .with_context(|| format!("writing {}", target.display()))?;
            info!(target = %target.display(), "wrote annotated document");
        }
    }

    Ok(())
}

fn check_one(file: &Path, normalize: bool, schema_check: bool) -> Result<Value> {
    let mut doc = document::from_json_file(file)?;

    let mut warnings = apply_guardrails(&mut doc, normalize);
    if schema_check {
        warnings.extend(shape_warnings(&doc));
    }

    info!(
        file = %file.display(),
        warnings = warnings.len(),
        "checked document"
    );
    attach_warnings(&mut doc, &warnings);
    Ok(doc)
}

fn run_eval(extracted_path: &Path, truth_path: &Path, json: bool) -> Result<()> {
    let extracted = document::from_file(extracted_path)
        .with_context(|| format!("loading extracted document {}", extracted_path.display()))?;
    let truth = document::from_file(truth_path)
        .with_context(|| format!("loading ground truth {}", truth_path.display()))?;

    let report = evaluate(&extracted, &truth);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Fields compared: {}", report.fields_compared);
        println!("Correct:         {}", report.correct);
        println!("Accuracy:        {:.2}%", report.accuracy);
        if report.missing.is_empty() {
            println!("Missing:         none");
        } else {
            println!("Missing ({}):", report.missing.len());
            for path in &report.missing {
                println!("  - {path}");
            }
        }
    }

    Ok(())
}
