use day_04::*;

fn main() {
    divan::main();
}

const SAMPLE_INPUT: &str = "MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX";

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn part2() {
    part2::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn build_patterns() -> word_search::Word {
    word_search::Word::flat(divan::black_box("XMAS"))
}
