use anyhow::{Context, Result, bail};
use cellcheck_sheet::{Snapshot, extract_lines};
use cellcheck_spec::sheet_url::embed_url;
use cellcheck_spec::{
    ConfigError, ConfigStore, RecordField, VerificationCollection, VerificationKind,
};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config-example.yaml";

#[derive(Parser, Debug)]
#[command(
    name = "cellcheck",
    version,
    about = "Inspect spreadsheet snapshots and edit cell verification configs"
)]
struct Cli {
    /// Config file read and written by the `config` commands.
    #[arg(long, global = true, env = "CONFIG_FILE", default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the contents of cells from a snapshot file.
    Extract(ExtractArgs),
    /// Convert a Sheets API response (includeGridData=true) into a snapshot.
    Snapshot(SnapshotArgs),
    /// Print the embeddable preview URL for a spreadsheet URL.
    EmbedUrl {
        url: String,
    },
    /// Read or edit the verification config.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Snapshot JSON produced by `cellcheck snapshot`.
    snapshot: PathBuf,

    /// Cell references in A1 notation, e.g. C1 C20 E40.
    #[arg(required = true)]
    cells: Vec<String>,

    /// Sheet to read instead of the first one.
    #[arg(long)]
    sheet: Option<String>,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Saved Sheets API v4 spreadsheet response.
    response: PathBuf,

    /// Write the snapshot to this path instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the canonical document.
    Show {
        /// Print JSON instead of YAML.
        #[arg(long)]
        json: bool,
    },
    /// Set the spreadsheet URL.
    Url { url: String },
    /// Append a verification record and print its index.
    Add(AddArgs),
    /// Overwrite one field of a record.
    Set {
        index: usize,
        /// cellName, expectedValue or expectedFunction.
        field: RecordField,
        value: String,
    },
    /// Switch what a record checks.
    Kind {
        index: usize,
        /// value or function.
        kind: VerificationKind,
        /// Text for the newly active expectation.
        #[arg(long)]
        expect: Option<String>,
    },
    /// Remove a record; later records shift down by one.
    Remove { index: usize },
    /// Report validation issues, failing when any exist.
    Lint {
        /// Print issues as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the JSON Schema of the config document.
    Schema,
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Cell to check, e.g. B7.
    #[arg(long)]
    cell: Option<String>,

    /// Expected displayed value.
    #[arg(long, conflicts_with = "function")]
    value: Option<String>,

    /// Expected formula, e.g. =SUM(A1:A10).
    #[arg(long)]
    function: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Snapshot(args) => run_snapshot(args),
        Command::EmbedUrl { url } => {
            println!("{}", embed_url(&url));
            Ok(())
        }
        Command::Config(cmd) => run_config(ConfigStore::new(cli.config), cmd),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("failed to load snapshot: {}", args.snapshot.display()))?;
    let (name, grid) = snapshot.select(args.sheet.as_deref())?;

    if args.sheet.is_none() && snapshot.len() > 1 {
        println!("Using sheet: \"{name}\" ({} sheets available)", snapshot.len());
        println!();
    }
    for line in extract_lines(grid, &args.cells) {
        println!("{line}");
    }
    Ok(())
}

fn run_snapshot(args: SnapshotArgs) -> Result<()> {
    let body = fs::read_to_string(&args.response)
        .with_context(|| format!("failed to read {}", args.response.display()))?;
    let snapshot = Snapshot::from_sheets_api_json(&body)
        .with_context(|| format!("failed to convert {}", args.response.display()))?;
    let json = snapshot.to_json_pretty()?;

    match args.out {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write snapshot: {}", path.display()))?;
            tracing::info!(path = %path.display(), sheets = snapshot.len(), "snapshot written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_config(store: ConfigStore, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let doc = store.load()?;
            if json {
                println!("{}", doc.to_json_pretty()?);
            } else {
                print!("{}", doc.to_yaml()?);
            }
        }
        ConfigCommand::Url { url } => {
            store.update(|doc| {
                doc.spreadsheet_url = url;
                Ok(())
            })?;
        }
        ConfigCommand::Add(args) => {
            let index = store.update(|doc| {
                let cells = &mut doc.cells_to_verify;
                let index = cells.append();
                if let Some(cell) = args.cell {
                    cells.edit_field(index, RecordField::CellName, cell)?;
                }
                if let Some(function) = args.function {
                    cells.set_kind(index, VerificationKind::Function)?;
                    cells.edit_field(index, RecordField::ExpectedFunction, function)?;
                } else if let Some(value) = args.value {
                    cells.edit_field(index, RecordField::ExpectedValue, value)?;
                }
                ensure_survives_reload(cells, index)?;
                Ok(index)
            })?;
            println!("{index}");
        }
        ConfigCommand::Set {
            index,
            field,
            value,
        } => {
            store.update(|doc| {
                let cells = &mut doc.cells_to_verify;
                cells.edit_field(index, field, value)?;
                let record = &cells.as_slice()[index];
                if field != RecordField::CellName && record.active_field() != field {
                    return Err(ConfigError::EditRejected {
                        index,
                        reason: format!(
                            "`{field}` is inactive for a {} check and would not be saved; \
                             run `config kind` first",
                            record.kind
                        ),
                    });
                }
                ensure_survives_reload(cells, index)
            })?;
        }
        ConfigCommand::Kind {
            index,
            kind,
            expect,
        } => {
            store.update(|doc| {
                let cells = &mut doc.cells_to_verify;
                let previous = cells.get(index).map(|record| record.kind);
                cells.set_kind(index, kind)?;
                let field = cells.as_slice()[index].active_field();
                match expect {
                    Some(text) => cells.edit_field(index, field, text)?,
                    None => {
                        let switched = previous != Some(kind);
                        if switched && cells.as_slice()[index].active_payload().is_empty() {
                            return Err(ConfigError::EditRejected {
                                index,
                                reason: format!(
                                    "`{field}` is empty and saving would drop the current \
                                     expectation; pass --expect"
                                ),
                            });
                        }
                    }
                }
                ensure_survives_reload(cells, index)
            })?;
        }
        ConfigCommand::Remove { index } => {
            let removed = store.update(|doc| Ok(doc.cells_to_verify.remove_at(index)?))?;
            tracing::info!(index, cell = %removed.cell_name, "removed record");
        }
        ConfigCommand::Lint { json } => {
            let doc = store.load()?;
            match doc.validate() {
                Ok(()) => println!("{}: no issues found", store.path().display()),
                Err(err) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(err.issues())?);
                    } else {
                        for issue in err.issues() {
                            println!("{issue}");
                        }
                    }
                    bail!("{}: {err}", store.path().display());
                }
            }
        }
        ConfigCommand::Schema => {
            println!("{}", cellcheck_spec::generate_schema_json_pretty());
        }
    }
    Ok(())
}

/// Reject edits whose saved form would reload as a different check.
fn ensure_survives_reload(cells: &VerificationCollection, index: usize) -> Result<(), ConfigError> {
    match cells.get(index) {
        Some(record) if !record.survives_reload() => Err(ConfigError::EditRejected {
            index,
            reason: "a function check needs a non-empty expectedFunction".to_string(),
        }),
        _ => Ok(()),
    }
}
