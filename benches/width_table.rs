/// Benchmarks for /W decoding and width lookups
///
/// Run with: cargo bench --bench width_table
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdf_cidfont::fonts::WidthTable;
use pdf_cidfont::{FontOptions, Object, PdfDocument};

/// A CJK-style /W array: `ranges` uniform ranges interleaved with short lists.
fn cjk_w_array(ranges: u16) -> Vec<Object> {
    let mut w = Vec::new();
    for i in 0..ranges {
        let first = i * 100;
        w.push(Object::Integer(i64::from(first)));
        w.push(Object::Integer(i64::from(first + 89)));
        w.push(Object::Integer(1000));
        w.push(Object::Integer(i64::from(first + 90)));
        w.push(Object::Array(
            (0..10).map(|j| Object::Integer(250 + j * 25)).collect(),
        ));
    }
    w
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("w_decode");
    let doc = PdfDocument::new();
    let options = FontOptions::default();

    for ranges in [10u16, 100, 600] {
        let w = cjk_w_array(ranges);
        group.throughput(Throughput::Elements(w.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ranges), &w, |b, w| {
            b.iter(|| WidthTable::from_w_array(black_box(w), 1000, &doc, &options));
        });
    }

    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let doc = PdfDocument::new();
    let table = WidthTable::from_w_array(&cjk_w_array(600), 1000, &doc, &FontOptions::default())
        .unwrap_or_else(|_| WidthTable::new(1000));

    c.bench_function("width_of_sweep", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for code in (0..=u16::MAX).step_by(7) {
                total += table.width_of(black_box(code));
            }
            total
        });
    });
}

criterion_group!(benches, benchmark_decode, benchmark_lookup);
criterion_main!(benches);
