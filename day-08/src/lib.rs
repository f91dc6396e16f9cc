pub mod antennas;
pub mod part1;
pub mod part2;
