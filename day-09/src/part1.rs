use crate::disk::Disk;

/// Checksum after moving blocks one at a time into the leftmost gap.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let mut disk = Disk::parse(input)?;
    disk.compact_blocks();

    Ok(disk.checksum()?.to_string())
}
