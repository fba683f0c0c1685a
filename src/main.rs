use clap::Parser;
use less_sprites::cli::{build, completions, Cli};
use less_sprites::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        completions::run(shell);
        return Ok(());
    }

    if let Some(spec) = &cli.spec {
        build::run(spec, &Printer::new())?;
    }

    Ok(())
}
