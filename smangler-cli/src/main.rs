use std::io::Write;

use clap::{Parser, Subcommand, error::ErrorKind};
use log::{Level, LevelFilter};
use smangler_cli::{error::EXIT_ARGUMENTS, run_copy_command, run_delete_command};

#[derive(Parser, Debug)]
#[command(name = "smangler", author, version, about, long_about = None)]
struct Args {
    /// Print per-string progress
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print warnings, errors and the final summary
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy strings from one resource directory into another.
    ///
    /// Each string is appended to `<dest_dir>/<values dir>/strings.xml`,
    /// mirroring the `values*` directory it came from.
    Copy {
        /// The resource directory to copy strings from
        source_dir: String,
        /// The resource directory to copy strings into
        dest_dir: String,
        /// Regular expression the string names must match (default: all)
        name_pattern: Option<String>,
    },

    /// Delete strings from every resource file under a directory.
    Delete {
        /// The resource directory to delete strings from
        resource_dir: String,
        /// Regular expression the string names must match
        name_pattern: String,
    },
}

fn init_logger(verbose: bool, quiet: bool) {
    // Debug builds narrate every string by default.
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(LevelFilter::Warn);
    }

    builder
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Error | Level::Warn => writeln!(buf, "{}: {}", record.level(), record.args()),
            _ => writeln!(buf, "{}", record.args()),
        })
        .init();
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_ARGUMENTS,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logger(args.verbose, args.quiet);

    let result = match args.commands {
        Commands::Copy {
            source_dir,
            dest_dir,
            name_pattern,
        } => run_copy_command(source_dir, dest_dir, name_pattern),
        Commands::Delete {
            resource_dir,
            name_pattern,
        } => run_delete_command(resource_dir, name_pattern),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
