use crate::disk::Disk;

/// Checksum after moving whole files into the leftmost gap that fits.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let mut disk = Disk::parse(input)?;
    disk.compact_files();

    Ok(disk.checksum()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "2333133121414131402";
        assert_eq!("2858", process(input)?);
        Ok(())
    }
}
