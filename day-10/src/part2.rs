use crate::topography::TopographicMap;

/// Sum of the ratings of every trailhead.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let map = TopographicMap::parse(input)?;

    Ok(map.total_rating().to_string())
}
