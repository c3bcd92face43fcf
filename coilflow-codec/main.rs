use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use coilflow::{hex, CoilDefinition, CoilTable, CoilValue, Result};

#[derive(Parser, Debug)]
#[command(name = "coilflow")]
#[command(about = "Decode and encode register values against a coil table")]
struct Args {
    #[arg(short, long, help = "Register table (JSON object keyed by address)")]
    table: PathBuf,

    #[arg(
        short,
        long,
        help = "Enable verbose logging (shows every decode/encode step)"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode register bytes (hex, 1, 2 or 4 bytes) into a logical value
    Decode { address: u32, bytes: String },

    /// Encode a logical value (number or label) into a 4-byte register buffer
    Encode { address: u32, value: String },

    /// Print the definition of a coil
    Show { address: u32 },
}

fn describe(definition: &CoilDefinition) -> String {
    let mut lines = vec![
        format!("{} {}", definition.address(), definition.name()),
        format!("  title:     {}", definition.title()),
        format!("  size:      {}", definition.width()),
        format!("  factor:    {}", definition.factor()),
    ];

    if definition.raw_min().is_some() || definition.raw_max().is_some() {
        let show = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        lines.push(format!(
            "  range:     {} .. {}",
            show(definition.min()),
            show(definition.max())
        ));
    }
    if let Some(unit) = definition.unit() {
        lines.push(format!("  unit:      {unit}"));
    }
    if let Some(mapping) = definition.mappings() {
        let entries: Vec<String> = mapping
            .iter()
            .map(|(raw, label)| format!("{raw}={label}"))
            .collect();
        lines.push(format!("  mappings:  {}", entries.join(", ")));
    }
    lines.push(format!("  writable:  {}", definition.is_writable()));
    lines.push(format!("  boolean:   {}", definition.is_boolean()));
    if definition.width().is_32bit() {
        lines.push(format!("  word swap: {}", definition.word_swap()));
    }
    if let Some(info) = definition.info() {
        lines.push(format!("  info:      {info}"));
    }

    lines.join("\n")
}

fn run(args: Args) -> Result<()> {
    let table = CoilTable::from_path(&args.table)?;

    match args.command {
        Command::Decode { address, bytes } => {
            let mut coil = table.coil(address)?;
            coil.set_raw_value(&hex::decode(&bytes)?)?;
            if let Some(value) = coil.value() {
                match coil.definition().unit() {
                    Some(unit) if value.as_f64().is_some() => println!("{value} {unit}"),
                    _ => println!("{value}"),
                }
            }
        }
        Command::Encode { address, value } => {
            let mut coil = table.coil(address)?;
            if !coil.is_writable() {
                tracing::warn!("Coil {} ({}) is not writable", address, coil.name());
            }
            coil.set_value(CoilValue::parse(&value))?;
            println!("{}", hex::encode(&coil.raw_value()?));
        }
        Command::Show { address } => {
            let definition = table
                .get(address)
                .ok_or(coilflow::CoilflowError::UnknownAddress(address))?;
            println!("{}", describe(definition));
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Setup logging based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
