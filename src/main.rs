use anyhow::Result;
use clap::Parser;
use plagcheck::cli::{AppContext, Cli, Commands};
use plagcheck::infra::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        verbose: cli.verbose,
    };

    logging::init(ctx.verbose, ctx.no_color);

    match cli.command {
        Commands::Compare(args) => plagcheck::compare_run(args, &ctx),
        Commands::Batch(args) => plagcheck::batch_run(args, &ctx),
        Commands::Init(args) => plagcheck::infra::config::init(args, &ctx),
        Commands::Completions(args) => plagcheck::completion::run(args, &ctx),
    }
}
