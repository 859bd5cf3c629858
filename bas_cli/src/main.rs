//! # BAS Toolkit CLI
//!
//! Terminal front end for the `bas_core` calculators. It collects raw text
//! (from `name=value` arguments or interactive prompts), runs a calculator,
//! and renders the formatted outputs with a placeholder for blanks.
//!
//! Commands:
//! - list: Show registered calculators, optionally for one category
//! - describe: Show a calculator's inputs, outputs, formula and example
//! - run: Evaluate one calculator
//! - sheet: Create, edit and evaluate worksheet files
//!
//! Logging goes to stderr. Set `BAS_LOG` (e.g. `BAS_LOG=bas_core=trace`) or
//! pass `--verbose` for debug output.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use bas_core::calculators::{self, Calculator, Category};
use bas_core::file_io::{load_worksheet, save_worksheet};
use bas_core::input::RawInputs;
use bas_core::output::CalculatorResult;
use bas_core::worksheet::{DisplaySettings, Worksheet};
use bas_core::CalcError;

/// BAS Toolkit - field calculators for building automation
#[derive(Parser)]
#[command(name = "bas")]
#[command(version)]
#[command(about = "Building automation engineering calculators", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List calculators
    List {
        /// Only this category (key or display name, e.g. "psychrometrics")
        #[arg(short, long)]
        category: Option<Category>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a calculator's fields, formula and worked example
    Describe {
        /// Calculator id (e.g. "valve-cv")
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a calculator
    Run {
        /// Calculator id
        id: String,

        /// Inputs as name=value
        assignments: Vec<String>,

        /// Prompt for every field
        #[arg(short, long)]
        interactive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Work with worksheet files
    Sheet {
        #[command(subcommand)]
        command: SheetCommand,
    },
}

#[derive(Subcommand)]
enum SheetCommand {
    /// Create an empty worksheet
    Init {
        path: PathBuf,

        #[arg(short, long, default_value = "Untitled")]
        title: String,

        #[arg(short, long, default_value = "")]
        author: String,
    },

    /// Append a calculator entry
    Add {
        path: PathBuf,

        /// Calculator id
        id: String,

        /// Inputs as name=value
        assignments: Vec<String>,

        #[arg(short, long, default_value = "")]
        label: String,
    },

    /// Remove an entry by its UUID
    Remove { path: PathBuf, entry: String },

    /// Overwrite inputs of one entry in place
    Set {
        path: PathBuf,

        /// Entry UUID
        entry: String,

        /// Inputs as name=value
        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// Evaluate every entry
    Eval {
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = ErrorReport::from(e);
            eprintln!("Error [{}]: {}", report.code, report.message);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("BAS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::List { category, json } => cmd_list(category, json),
        Commands::Describe { id, json } => cmd_describe(&id, json),
        Commands::Run {
            id,
            assignments,
            interactive,
            json,
        } => cmd_run(&id, &assignments, interactive, json),
        Commands::Sheet { command } => match command {
            SheetCommand::Init { path, title, author } => cmd_sheet_init(&path, title, author),
            SheetCommand::Add {
                path,
                id,
                assignments,
                label,
            } => cmd_sheet_add(&path, &id, &assignments, label),
            SheetCommand::Remove { path, entry } => cmd_sheet_remove(&path, &entry),
            SheetCommand::Set {
                path,
                entry,
                assignments,
            } => cmd_sheet_set(&path, &entry, &assignments),
            SheetCommand::Eval { path, json } => cmd_sheet_eval(&path, json),
        },
    }
}

// ============================================================================
// Calculators
// ============================================================================

fn cmd_list(category: Option<Category>, json: bool) -> Result<(), CliError> {
    let calcs: Vec<&Calculator> = match category {
        Some(category) => calculators::by_category(category).collect(),
        None => calculators::all().to_vec(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&calcs)?);
        return Ok(());
    }

    let mut current = None;
    for calc in calcs {
        if current != Some(calc.category) {
            if current.is_some() {
                println!();
            }
            println!("{} [{}]", calc.category, calc.category.key());
            current = Some(calc.category);
        }
        println!("  {:<24} {}", calc.id, calc.name);
    }
    Ok(())
}

fn cmd_describe(id: &str, json: bool) -> Result<(), CliError> {
    let calc = calculators::find(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(calc)?);
        return Ok(());
    }

    println!("{} ({})", calc.name, calc.id);
    println!("Category: {}", calc.category);
    println!("Formula:  {}", calc.formula);
    println!();
    println!("Inputs:");
    for field in calc.inputs {
        println!("  {:<16} {}{}", field.name, field.label, unit_suffix(field.unit));
    }
    if let Some(selector) = calc.selector {
        println!(
            "  {:<16} {} [{}] (default {})",
            selector.name,
            selector.label,
            selector.options.join(", "),
            selector.default
        );
    }
    println!();
    println!("Outputs:");
    for field in calc.outputs {
        println!("  {:<16} {}{}", field.key, field.label, unit_suffix(field.unit));
    }
    println!();
    let example: Vec<String> = calc
        .example
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    println!("Example:  bas run {} {}", calc.id, example.join(" "));
    Ok(())
}

fn cmd_run(id: &str, assignments: &[String], interactive: bool, json: bool) -> Result<(), CliError> {
    let calc = calculators::find(id)?;
    let mut inputs = RawInputs::from_assignments(assignments)?;
    if interactive {
        prompt_inputs(calc, &mut inputs);
    }

    let result = calc.evaluate(&inputs);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", calc.name);
        print_result(&result, &DisplaySettings::default(), "  ");
    }
    Ok(())
}

fn prompt_inputs(calc: &Calculator, inputs: &mut RawInputs) {
    for field in calc.inputs {
        let current = inputs.raw(field.name).to_string();
        let text = prompt(
            &format!("{}{} [{}]: ", field.label, unit_suffix(field.unit), current),
            &current,
        );
        inputs.set(field.name, text);
    }
    if let Some(selector) = calc.selector {
        let current = inputs.selection(&selector);
        let text = prompt(
            &format!("{} ({}) [{}]: ", selector.label, selector.options.join("/"), current),
            &current,
        );
        inputs.set(selector.name, text);
    }
}

/// Read one line; an empty answer or a read failure keeps `default`.
fn prompt(message: &str, default: &str) -> String {
    print!("{}", message);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn print_result(result: &CalculatorResult, settings: &DisplaySettings, indent: &str) {
    let width = result.outputs.iter().map(|o| o.label.len()).max().unwrap_or(0);
    for output in &result.outputs {
        println!("{}{:<width$}  {}", indent, output.label, settings.render(output), width = width);
    }
}

fn unit_suffix(unit: &str) -> String {
    if unit.is_empty() {
        String::new()
    } else {
        format!(" ({})", unit)
    }
}

// ============================================================================
// Worksheets
// ============================================================================

fn cmd_sheet_init(path: &Path, title: String, author: String) -> Result<(), CliError> {
    let sheet = Worksheet::new(title, author);
    save_worksheet(&sheet, path)?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_sheet_add(path: &Path, id: &str, assignments: &[String], label: String) -> Result<(), CliError> {
    let mut sheet = load_worksheet(path)?;
    let inputs = RawInputs::from_assignments(assignments)?;
    let label = if label.is_empty() { id.to_string() } else { label };
    let entry = sheet.add_entry(label, id, inputs)?;
    save_worksheet(&sheet, path)?;
    debug!(%entry, calculator = id, "entry added");
    println!("{}", entry);
    Ok(())
}

fn parse_entry_id(entry: &str) -> Result<Uuid, CalcError> {
    Uuid::parse_str(entry.trim()).map_err(|_| CalcError::entry_not_found(entry))
}

fn cmd_sheet_remove(path: &Path, entry: &str) -> Result<(), CliError> {
    let id = parse_entry_id(entry)?;
    let mut sheet = load_worksheet(path)?;
    let removed = sheet.remove_entry(&id)?;
    save_worksheet(&sheet, path)?;
    println!("Removed {} ({})", removed.label, removed.calculator);
    Ok(())
}

fn cmd_sheet_set(path: &Path, entry: &str, assignments: &[String]) -> Result<(), CliError> {
    let id = parse_entry_id(entry)?;
    let updates = RawInputs::from_assignments(assignments)?;
    let mut sheet = load_worksheet(path)?;
    let target = sheet
        .get_entry_mut(&id)
        .ok_or_else(|| CalcError::entry_not_found(entry))?;
    for (name, value) in updates.iter() {
        target.inputs.set(name, value);
    }
    let summary = format!("{} ({}): {}", target.label, target.calculator, inputs_line(&target.inputs));
    save_worksheet(&sheet, path)?;
    debug!(%id, "entry inputs updated");
    println!("Updated {}", summary);
    Ok(())
}

/// `name=value` pairs in key order, space separated.
fn inputs_line(inputs: &RawInputs) -> String {
    inputs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Serialize)]
struct EntryReport<'a> {
    id: Uuid,
    label: &'a str,
    calculator: &'a str,
    inputs: &'a RawInputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<CalculatorResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CalcError>,
}

fn cmd_sheet_eval(path: &Path, json: bool) -> Result<(), CliError> {
    let sheet = load_worksheet(path)?;
    let reports: Vec<EntryReport> = sheet
        .evaluate()
        .into_iter()
        .map(|(entry, outcome)| {
            let (result, error) = match outcome {
                Ok(result) => (Some(result), None),
                Err(err) => (None, Some(err)),
            };
            EntryReport {
                id: entry.id,
                label: &entry.label,
                calculator: &entry.calculator,
                inputs: &entry.inputs,
                result,
                error,
            }
        })
        .collect();
    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", sheet.meta.title);
        if !sheet.meta.author.is_empty() {
            println!("by {}", sheet.meta.author);
        }
        for report in &reports {
            println!();
            println!("{} [{}]  {}", report.label, report.calculator, report.id);
            if !report.inputs.is_empty() {
                println!("  inputs: {}", inputs_line(report.inputs));
            }
            if let Some(result) = &report.result {
                print_result(result, &sheet.settings, "  ");
            }
            if let Some(error) = &report.error {
                println!("  {}", error);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::EntriesFailed(failed));
    }
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

enum CliError {
    Calc(CalcError),
    Json(serde_json::Error),
    EntriesFailed(usize),
}

impl From<CalcError> for CliError {
    fn from(e: CalcError) -> Self {
        CliError::Calc(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

struct ErrorReport {
    code: &'static str,
    message: String,
}

impl From<CliError> for ErrorReport {
    fn from(e: CliError) -> Self {
        match e {
            CliError::Calc(e) => ErrorReport {
                code: e.error_code(),
                message: match &e {
                    CalcError::UnknownCalculator { .. } => format!("{} (try 'bas list')", e),
                    _ => e.to_string(),
                },
            },
            CliError::Json(e) => ErrorReport {
                code: "JSON_ERROR",
                message: e.to_string(),
            },
            CliError::EntriesFailed(count) => ErrorReport {
                code: "ENTRIES_FAILED",
                message: format!("{} worksheet entr{} could not be evaluated", count, if count == 1 { "y" } else { "ies" }),
            },
        }
    }
}
