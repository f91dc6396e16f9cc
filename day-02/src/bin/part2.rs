use day_02::part2::process;
use miette::{Context, IntoDiagnostic};

#[tracing::instrument]
fn main() -> miette::Result<()> {
    tracing_subscriber::fmt::init();

    let file = std::fs::read_to_string("input.txt")
        .into_diagnostic()
        .context("read input.txt")?;
    let result = process(&file).context("process part 2")?;
    tracing::info!(%result, "(PART 2) safe reports with problem dampener");
    println!("{}", result);
    Ok(())
}
