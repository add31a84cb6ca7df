//! Parser throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fmlc_lex::tokenize;
use fmlc_par::parse;
use fmlc_util::Handler;

fn synthetic_source(width: usize, depth: usize) -> Vec<u8> {
    fn emit(out: &mut String, width: usize, depth: usize) {
        if depth == 0 {
            out.push_str("leaf value=1;\n");
            return;
        }
        out.push_str("branch.deep #n size=0.5\n{\n");
        for _ in 0..width {
            emit(out, width, depth - 1);
        }
        out.push_str("}\n");
    }
    let mut out = String::new();
    emit(&mut out, width, depth);
    out.into_bytes()
}

fn bench_parser(c: &mut Criterion) {
    let source = synthetic_source(4, 6);

    c.bench_function("parse_tree", |b| {
        b.iter(|| {
            let mut handler = Handler::new();
            let tokens = tokenize(black_box(&source), &mut handler);
            black_box(parse(tokens, &mut handler))
        })
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
