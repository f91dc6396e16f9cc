pub mod instructions;
pub mod part1;
pub mod part2;
