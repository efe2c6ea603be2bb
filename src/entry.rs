use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::DriverArgs;
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<(DriverArgs, ArgMatches)> {
    let cmd = DriverArgs::command();
    let matches = cmd.get_matches();
    let args = DriverArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(mut args: DriverArgs, matches: &ArgMatches) -> AppResult<()> {
    apply_config(&mut args, matches)?;

    let report = crate::app::run_local(args).await?;
    tracing::debug!(
        "Run finished after {} iterations.",
        report.summary.iterations
    );
    Ok(())
}

fn apply_config(args: &mut DriverArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
