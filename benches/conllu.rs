use divan::{Bencher, black_box};
use std::fmt::Write;
use treescore::ConlluReader;

fn main() {
    divan::main();
}

/// Synthesize a corpus of `n` ten-token sentences
fn synthetic_corpus(n: usize) -> String {
    let mut text = String::new();
    for _ in 0..n {
        for id in 1..=10 {
            let head = if id == 1 { 0 } else { id - 1 };
            writeln!(
                text,
                "{}\tword{}\tword{}\tNOUN\tNN\tNumber=Sing\t{}\tnmod\t_\t_",
                id, id, id, head
            )
            .unwrap();
        }
        text.push('\n');
    }
    text
}

#[divan::bench]
fn parse_10k_sentences(bencher: Bencher) {
    let corpus = synthetic_corpus(10_000);
    bencher.bench_local(|| {
        for result in ConlluReader::from_str(black_box(&corpus)) {
            black_box(result.unwrap());
        }
    });
}
