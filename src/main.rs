//! permsheet CLI
//!
//! Entry point for the `permsheet` command-line tool.

use clap::Parser;
use permsheet::{run, EffectiveConfig};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "permsheet")]
#[command(
    about = "Process permission files (Permission Sets or Profiles) and generate an Excel report",
    version
)]
struct Cli {
    /// Path to permission files [default: ./permissionsets]
    #[arg(short = 'p', long)]
    path: Option<PathBuf>,

    /// Glob pattern to select permission files [default: **/*-meta.xml]
    #[arg(short = 'g', long)]
    glob: Option<String>,

    /// Output Excel file [default: ./sfdocs/permissions.xlsx]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Icon representing true value [default: ✔]
    #[arg(short = 't', long)]
    true_icon: Option<String>,

    /// Icon representing false value [default: ✖]
    #[arg(short = 'f', long)]
    false_icon: Option<String>,

    /// Configuration file in JSON (or TOML) format
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Use labels instead of API names
    #[arg(short = 'l', long)]
    use_labels: bool,

    /// Path to custom object metadata files [default: ./objects]
    #[arg(long)]
    object_meta_path: Option<PathBuf>,

    /// Type of permission files to process (permissionsets or profiles)
    #[arg(long = "type")]
    entity_type: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Flags the user actually passed, keyed like the config file.
    fn overrides(&self) -> Value {
        let mut map = Map::new();
        let mut set = |key: &str, value: Option<Value>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };

        set("path", self.path.as_ref().map(|p| path_value(p)));
        set("glob", self.glob.clone().map(Value::String));
        set("output", self.output.as_ref().map(|p| path_value(p)));
        set("trueIcon", self.true_icon.clone().map(Value::String));
        set("falseIcon", self.false_icon.clone().map(Value::String));
        set("useLabels", self.use_labels.then_some(Value::Bool(true)));
        set("objectMetaPath", self.object_meta_path.as_ref().map(|p| path_value(p)));
        set("type", self.entity_type.clone().map(Value::String));

        Value::Object(map)
    }
}

fn path_value(path: &std::path::Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let effective = match EffectiveConfig::build(cli.config.as_deref(), Some(cli.overrides())) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    for source in &effective.sources {
        debug!(origin = ?source.origin, path = ?source.path, digest = ?source.digest, "Config source");
    }

    if cli.print_config {
        match effective.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Error serializing configuration: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    match run(&effective.report) {
        Ok(summary) => {
            info!(
                files = summary.files_found,
                sheets = summary.sheets.len(),
                skipped = summary.skipped.len(),
                output = %summary.output.display(),
                elapsed_ms = summary.duration.as_millis() as u64,
                "Report complete"
            );
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
