use std::process::ExitCode;

use trailhound::prelude::*;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    if let Some(shell) = args.completions {
        Cli::print_completions(shell);
        return Ok(ExitCode::SUCCESS);
    }

    let level = if args.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // diagnostics stay on stderr; stdout only ever carries results
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let opts = RunOptions::try_from(args)?;
    let outcome = run(opts).await?;

    Ok(outcome.exit_code())
}
