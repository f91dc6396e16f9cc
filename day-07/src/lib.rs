pub mod calibration;
pub mod part1;
pub mod part2;
