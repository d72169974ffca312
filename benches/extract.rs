use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

use mailpager::mime::walker::{walk_literal, BodyContent};
use mailpager::page::seq_window;

fn bench_walk_literal(c: &mut Criterion) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("mixed.eml");
    let raw = std::fs::read(&fixture_path).expect("read fixture");

    c.bench_function("walk_mixed_literal", |b| {
        b.iter(|| {
            let mut content = BodyContent::default();
            walk_literal(&raw, &mut content);
            content.attachments.len()
        })
    });
}

fn bench_seq_window(c: &mut Criterion) {
    c.bench_function("seq_window_large_mailbox", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for page in 1..=200u32 {
                if seq_window(100_000, page, 50).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
}

criterion_group!(benches, bench_walk_literal, bench_seq_window);
criterion_main!(benches);
