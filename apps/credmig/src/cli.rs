use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

pub(crate) const ABOUT: &str = "migrate a dumped credentials file to a new credential service instance. \
the dump file location is the first argument, host:port (or service name) is the second";

#[derive(Debug, Parser)]
#[command(name = "credmig", version, about = ABOUT)]
pub(crate) struct Cli {
    /// Path to the dumped credentials JSON file.
    pub(crate) dump_file: String,
    /// Host and port (or resolvable service name) of the target service.
    pub(crate) host_port: String,
    /// Optional outbound proxy for requests to the target.
    #[arg(long)]
    pub(crate) proxy: Option<String>,
}

/// The bare-word and single-dash help spellings clap does not understand.
pub(crate) fn is_help_word(arg: &str) -> bool {
    matches!(arg, "help" | "--help" | "-help" | "-h")
}

/// Parse the full argv (program name first).
///
/// `Err` carries the exit code once help, version or a usage error has been
/// printed.
pub(crate) fn parse_args<I>(args: I) -> Result<Cli, ExitCode>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.get(1).is_some_and(|arg| is_help_word(arg)) {
        let _ = Cli::command().print_help();
        return Err(ExitCode::SUCCESS);
    }

    match Cli::try_parse_from(&args) {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            Err(ExitCode::SUCCESS)
        }
        Err(err) => {
            let _ = err.print();
            eprintln!(
                "must provide the dumped credentials location and host:port as positional arguments"
            );
            Err(ExitCode::FAILURE)
        }
    }
}
