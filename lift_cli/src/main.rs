use clap::{Parser, Subcommand};
use lift_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Group a workout log into sets, drop sets and supersets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List every group in the entry log (default)
    Group {
        /// Entry log to read (.jsonl or .csv); defaults to the configured log
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Show the group that starts with the given exercise
    Find {
        /// Exercise name (case-insensitive)
        name: String,

        /// Entry log to read (.jsonl or .csv); defaults to the configured log
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose == 0 {
        lift_core::logging::init();
    } else {
        lift_core::logging::init_with_level(lift_core::logging::level_for_verbosity(cli.verbose));
    }

    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    match cli.command {
        Some(Commands::Group { input, format }) => cmd_group(&config, input, format),
        Some(Commands::Find {
            name,
            input,
            format,
        }) => cmd_find(&config, &name, input, format),
        None => {
            // Default to "group" command
            cmd_group(&config, None, None)
        }
    }
}

fn cmd_group(
    config: &Config,
    input: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let entries = read_log(config, input)?;
    let groups = group_entries(&entries);
    tracing::info!("{} entries form {} groups", entries.len(), groups.len());

    match format.unwrap_or(config.output.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
        OutputFormat::Text => {
            if groups.is_empty() {
                println!("No entries logged.");
            }
            for group in &groups {
                display_group(group);
            }
        }
    }

    Ok(())
}

fn cmd_find(
    config: &Config,
    name: &str,
    input: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let entries = read_log(config, input)?;
    let groups = group_entries(&entries);

    let group =
        find_group(&groups, name).ok_or_else(|| Error::GroupNotFound(name.trim().to_string()))?;

    match format.unwrap_or(config.output.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(group)?),
        OutputFormat::Text => display_group(group),
    }

    Ok(())
}

fn read_log(config: &Config, input: Option<PathBuf>) -> Result<Vec<Entry>> {
    let path = input.unwrap_or_else(|| config.data.log_path());
    load_entries(&path)
}

fn display_group(group: &Group<'_>) {
    let title = match group {
        Group::Set { .. } => "Set".to_string(),
        Group::DropSet { .. } => "Drop set".to_string(),
        Group::Superset { cycle_length, .. } => format!("Superset ({} exercises)", cycle_length),
    };
    let id = group.id().map(|name| name.to_string()).unwrap_or_default();

    println!("── {}: {} ×{}", title, id, group.len());
    for (index, entry) in group.entries().iter().enumerate() {
        println!("   {}. {}", index + 1, describe_entry(entry));
    }
}

fn describe_entry(entry: &Entry) -> String {
    let mut parts = vec![entry.name.to_string()];

    if let Some(reps) = entry.reps {
        parts.push(format!("{} reps", reps));
    }
    if let Some(weight) = entry.weight {
        parts.push(format!("@ {} {}", weight.value, weight.unit.symbol()));
    }
    if let Some(distance) = entry.distance {
        parts.push(format!("{} {}", distance.value, distance.unit.symbol()));
    }
    if let Some(duration) = entry.duration {
        parts.push(format!("for {} {}", duration.value, duration.unit.symbol()));
    }
    if let Some(rest) = entry.rest {
        parts.push(format!("(rest {} {})", rest.value, rest.unit.symbol()));
    }

    parts.join(" ")
}
