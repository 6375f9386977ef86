//! Benchmark for highscore file parsing and writing.

use criterion::{Criterion, Throughput};
use sco_rs::{
    sco::{model::HiscoreEntry, parse_sco, unparse_sco},
    store::SongHiscore,
};

fn full_table() -> Vec<HiscoreEntry> {
    let mut hiscore = SongHiscore::in_song_dir("unused");
    for i in 0..10u32 {
        hiscore.add_new_hiscore(format!("Singer number {i}"), 500 + i * 937);
    }
    hiscore.entries().to_vec()
}

fn bench_parse_sco(c: &mut Criterion) {
    let source = unparse_sco(&full_table());
    let mut group = c.benchmark_group("parse_sco");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("full_table", |b| {
        b.iter(|| parse_sco(std::hint::black_box(&source)));
    });
    group.finish();
}

fn bench_unparse_sco(c: &mut Criterion) {
    let entries = full_table();
    c.bench_function("unparse_sco/full_table", |b| {
        b.iter(|| unparse_sco(std::hint::black_box(&entries)));
    });
}

fn bench_add_new_hiscore(c: &mut Criterion) {
    c.bench_function("add_new_hiscore/100_inserts", |b| {
        b.iter(|| {
            let mut hiscore = SongHiscore::in_song_dir("unused");
            for i in 0..100u32 {
                hiscore.add_new_hiscore("Mika", std::hint::black_box(i * 97 % 10000));
            }
            hiscore
        });
    });
}

fn main() {
    let mut criterion = Criterion::default();
    bench_parse_sco(&mut criterion);
    bench_unparse_sco(&mut criterion);
    bench_add_new_hiscore(&mut criterion);
    criterion.final_summary();
}
