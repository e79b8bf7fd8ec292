//! Benchmarks for cipherlab engines and tracers.
//!
//! Measures grille and Vigenère throughput on a classroom-sized text and the
//! overhead of building a full step trace for the same input.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cipherlab::alphabet::{normalize, CYRILLIC, LATIN};
use cipherlab::grille::{Grille, GrilleCipher};
use cipherlab::trace::{trace_grille_encrypt, trace_vigenere_encrypt};
use cipherlab::vigenere::VigenereCipher;

/// Latin sample, repeated to build longer inputs.
const LATIN_SAMPLE: &str = "The quick brown fox jumps over the lazy dog while the grille turns";

/// Cyrillic sample, repeated to build longer inputs.
const CYRILLIC_SAMPLE: &str = "Съешь же ещё этих мягких французских булок да выпей чаю";

const BENCH_KEY: &str = "КЛЮЧ";

/// Input lengths in repetitions of the sample.
const REPEATS: &[usize] = &[1, 16, 256];

fn bench_grille(c: &mut Criterion) {
    let cipher = GrilleCipher::new(&Grille::METHODOLOGY);

    let mut group = c.benchmark_group("grille_encrypt");
    for &repeats in REPEATS {
        let text = normalize(&LATIN_SAMPLE.repeat(repeats), &LATIN);
        group.throughput(Throughput::Elements(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| cipher.encrypt(black_box(text)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("grille_decrypt");
    for &repeats in REPEATS {
        let ct = cipher.encrypt(&normalize(&LATIN_SAMPLE.repeat(repeats), &LATIN));
        group.throughput(Throughput::Elements(ct.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &ct, |b, ct| {
            b.iter(|| cipher.decrypt(black_box(ct)));
        });
    }
    group.finish();
}

fn bench_vigenere(c: &mut Criterion) {
    let cipher = VigenereCipher::new(BENCH_KEY, CYRILLIC).unwrap();

    let mut group = c.benchmark_group("vigenere_encrypt");
    for &repeats in REPEATS {
        let text = normalize(&CYRILLIC_SAMPLE.repeat(repeats), &CYRILLIC);
        group.throughput(Throughput::Elements(text.chars().count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| cipher.encrypt(black_box(text)));
        });
    }
    group.finish();
}

/// Full traces materialize a grid snapshot per letter; compare with the
/// plain engine numbers above.
fn bench_traces(c: &mut Criterion) {
    let latin = LATIN_SAMPLE.repeat(16);
    let cyrillic = CYRILLIC_SAMPLE.repeat(16);

    let mut group = c.benchmark_group("trace");
    group.bench_function("grille_encrypt", |b| {
        b.iter(|| trace_grille_encrypt(black_box(&latin)));
    });
    group.bench_function("vigenere_encrypt", |b| {
        b.iter(|| trace_vigenere_encrypt(black_box(&cyrillic), BENCH_KEY, &CYRILLIC));
    });
    group.finish();
}

criterion_group!(benches, bench_grille, bench_vigenere, bench_traces);
criterion_main!(benches);
