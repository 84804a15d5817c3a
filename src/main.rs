mod script;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use canvas::config::EraserConfig;
use clap::{Args, Parser, Subcommand};

use crate::script::{OnReject, ReplayError, Script};

#[derive(Parser, Debug)]
#[command(name = "maskboard", about = "Replay erase-by-group gestures against an in-memory board")]
struct Cli {
    /// Prefix for synthesized group names; overrides `ERASER_GROUP_PREFIX`.
    #[arg(long, env = "MASKBOARD_GROUP_PREFIX")]
    group_prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON script and print the actions it produced.
    Replay(ReplayArgs),
    /// Print the effective eraser configuration.
    Config,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Script path, or `-` for stdin.
    input: PathBuf,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Record rejected erase requests instead of stopping.
    #[arg(long)]
    keep_going: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "maskboard failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ReplayError> {
    let mut config = EraserConfig::from_env()?;
    if let Some(prefix) = cli.group_prefix.filter(|p| !p.trim().is_empty()) {
        config.group_prefix = prefix;
    }

    match cli.command {
        Command::Replay(args) => run_replay(config, &args),
        Command::Config => {
            println!("group_prefix: {}", config.group_prefix);
            println!("stroke: {:?}", config.stroke);
            println!("outside_range: {:?}", config.outside_range);
            Ok(())
        }
    }
}

fn run_replay(config: EraserConfig, args: &ReplayArgs) -> Result<(), ReplayError> {
    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.input)?
    };

    let script = Script::parse(&text)?;
    let on_reject = if args.keep_going { OnReject::Continue } else { OnReject::Abort };
    let report = script::replay(&script, config, None, on_reject)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", script::render_text(&report));
    }
    Ok(())
}
