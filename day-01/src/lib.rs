pub mod locations;
pub mod part1;
pub mod part2;
