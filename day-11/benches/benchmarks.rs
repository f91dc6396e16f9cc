use day_11::*;

fn main() {
    divan::main();
}

const SAMPLE_INPUT: &str = "125 17";

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn part2() {
    part2::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}
