use day_03::part1::process;
use miette::{Context, IntoDiagnostic};

#[tracing::instrument]
fn main() -> miette::Result<()> {
    tracing_subscriber::fmt::init();

    let file = std::fs::read_to_string("input.txt")
        .into_diagnostic()
        .context("read input.txt")?;
    let result = process(&file).context("process part 1")?;
    tracing::info!(%result, "(PART 1) mul result");
    println!("{}", result);
    Ok(())
}
