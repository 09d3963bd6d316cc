use anyhow::Result;
use clap::Parser;

use psmod_cli::cli::{self, Command};
use psmod_cli::commands::{self, CommandSetup};
use psmod_cli::logging::{self, Logger};
use psmod_cli::platform::Platform;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let name = args.command.name();
    let platform = Platform::detect();
    let log_file = platform.log_file(name);
    logging::init_subscriber(args.verbose, name, log_file.as_deref());
    let log = Logger::new(log_file);
    let setup = CommandSetup::new(&args.global, platform);

    let result = match &args.command {
        Command::SetCodePath(opts) => commands::code_path::set(&setup, opts, &log),
        Command::GetCodePath => commands::code_path::run_get(&setup),
        Command::Install(opts) => commands::install::run(&setup, opts, &log),
        Command::Save(opts) | Command::Show(opts) => commands::stubs::run(name, opts),
        Command::Test(opts) => commands::test::run(&setup, opts, &log),
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    };
    log.print_log_location();
    result
}
