use day_02::*;

fn main() {
    divan::main();
}

const SAMPLE_INPUT: &str = "7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9";

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn part2() {
    part2::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}
