use day_09::disk::Disk;
use day_09::*;

fn main() {
    divan::main();
}

const SAMPLE_INPUT: &str = "2333133121414131402";

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn part2() {
    part2::process(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn parse_sample() {
    Disk::parse(divan::black_box(SAMPLE_INPUT)).unwrap();
}

#[divan::bench]
fn compact_files_sample() {
    let mut disk = Disk::parse(SAMPLE_INPUT).unwrap();
    divan::black_box(&mut disk).compact_files();
}
