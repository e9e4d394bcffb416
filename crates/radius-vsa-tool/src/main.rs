use clap::{Parser, Subcommand};
use radius_vsa_tool::{Config, ToolError, commands};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Encode, decode and inspect RADIUS Vendor-Specific attributes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "radius-vsa")]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Extra FreeRADIUS dictionary file (repeatable)
    #[arg(short, long = "dictionary", value_name = "FILE")]
    dictionaries: Vec<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Only report values that cannot be decoded as their declared type
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known vendors
    Vendors,
    /// List the attributes of one vendor
    Attributes {
        /// Vendor name or numeric id
        vendor: String,
    },
    /// Encode a vendor attribute as Attribute 26 hex
    Encode {
        /// Vendor name or numeric id
        vendor: String,
        /// Attribute name; `Name:tag` sets the tag of a tagged attribute
        attribute: String,
        /// Value text; integer attributes also take VALUE names
        value: String,
    },
    /// Decode one Attribute 26 given as hex
    Decode {
        hex: String,
    },
    /// Decode a whole RADIUS packet given as hex
    Inspect {
        hex: String,
    },
    /// Write an example configuration file
    InitConfig {
        #[arg(default_value = "radius-vsa.json")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ToolError> {
    if let Command::InitConfig { path } = &cli.command {
        Config::example().to_file(path)?;
        println!("Wrote example configuration to {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.dictionaries.extend(cli.dictionaries.iter().cloned());
    if cli.lenient {
        config.strict = false;
    }
    config.validate()?;

    // stdout carries command output, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &cli.config {
        info!("Loaded configuration from: {}", path.display());
    }

    let dictionary = config.load_dictionary()?;
    let mode = config.validation_mode();
    debug!(vendors = dictionary.len(), ?mode, "Dictionary ready");

    match cli.command {
        Command::Vendors => emit_all(&commands::list_vendors(&dictionary), cli.json),
        Command::Attributes { vendor } => {
            emit_all(&commands::list_attributes(&dictionary, &vendor)?, cli.json)
        }
        Command::Encode {
            vendor,
            attribute,
            value,
        } => emit(
            &commands::encode(&dictionary, &vendor, &attribute, &value)?,
            cli.json,
        ),
        Command::Decode { hex } => emit_all(&commands::decode(&dictionary, &hex, mode)?, cli.json),
        Command::Inspect { hex } => emit(&commands::inspect(&dictionary, &hex, mode)?, cli.json),
        Command::InitConfig { .. } => Ok(()),
    }
}

fn emit<T: Serialize + Display>(report: &T, json: bool) -> Result<(), ToolError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn emit_all<T: Serialize + Display>(reports: &[T], json: bool) -> Result<(), ToolError> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        for report in reports {
            println!("{}", report);
        }
    }
    Ok(())
}
