use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use kconf::{
    commands::{self, ListFormat},
    error::KconfError,
    operation::{Operation, OperationFlags},
    paths::{LIBRARY_PATH_VAR, Paths},
    shell::Shell,
    ui::{ColorMode, Ui},
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "KCONF_LOG";

#[derive(Parser)]
#[command(name = "kconf")]
#[command(about = "Kubeconfig library manager - keep named kubeconfigs and switch between them")]
#[command(long_about = "Kubeconfig library manager - keep named kubeconfigs and switch between them.

Without a switch the operation follows the number of arguments:
  kconf                  list the library
  kconf <index|alias>    print the export line for an entry
  kconf <file> <alias>   add a kubeconfig

Activate an entry with:  eval \"$(kconf <index|alias>)\"

Indices are positions in the alias-sorted listing. They are recomputed on every
run, so adding or removing an entry shifts the indices that follow it.")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Add a kubeconfig to the library: <file> [alias]
    #[arg(short = 'a', long = "add")]
    add: bool,

    /// Print the export line for an entry: <index|alias>
    #[arg(short = 's', long = "set")]
    set: bool,

    /// List all kubeconfigs in the library
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Remove a kubeconfig from the library: <index|alias>
    #[arg(short = 'r', long = "remove")]
    remove: bool,

    /// List with targets and link status
    #[arg(short = 't', long, conflicts_with_all = ["json", "add", "set", "remove"])]
    targets: bool,

    /// List as JSON
    #[arg(long, conflicts_with_all = ["add", "set", "remove"])]
    json: bool,

    /// Syntax of the export line: posix, fish
    #[arg(long, value_name = "SHELL", default_value = "posix")]
    shell: Shell,

    /// Library directory (default: ~/.kconf)
    #[arg(long, value_name = "DIR", env = LIBRARY_PATH_VAR)]
    library: Option<String>,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// File and alias, or an index/alias selector
    args: Vec<String>,
}

impl Cli {
    fn flags(&self) -> OperationFlags {
        OperationFlags {
            add: self.add,
            set: self.set,
            list: self.list,
            remove: self.remove,
        }
    }

    fn list_format(&self) -> ListFormat {
        if self.json {
            ListFormat::Json
        } else if self.targets {
            ListFormat::Targets
        } else {
            ListFormat::Plain
        }
    }
}

fn init_tracing() {
    // stderr only: stdout of `kconf <selector>` is meant for eval
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, ui: &Ui) -> Result<()> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "kconf", &mut std::io::stdout());
        return Ok(());
    }

    let op = Operation::select(cli.flags(), cli.args.len())?;
    let format = cli.list_format();
    // clap only sees explicit switches; an inferred Set/Add lands here
    if op != Operation::List && format != ListFormat::Plain {
        return Err(KconfError::usage("--targets and --json only apply to listing").into());
    }

    let paths = Paths::resolve(cli.library.as_deref())?;
    paths.ensure_library_dir()?;

    commands::dispatch(op, &paths, &cli.args, format, cli.shell, ui)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();
    let ui = Ui::new(cli.color, cli.no_color);

    match run(cli, &ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.err(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
