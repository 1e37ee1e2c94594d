use criterion::{Criterion, black_box, criterion_group, criterion_main};

use finvoice_payments::core::*;
use finvoice_payments::finvoice::{self, ExtractionStrategy, Extractor};

const FIXTURE: &str = include_str!("../tests/fixtures/finvoice_3_0.xml");

fn build_100_invoices() -> InvoiceCollection {
    let mut payments = InvoiceCollection::new();
    for n in 1..=100u32 {
        let invoice = InvoiceBuilder::new()
            .supplier("1234567-8", "Benchmark Oy")
            .invoice_number(&n.to_string())
            .bank_account("FI2112345600000785")
            .bank_reference("13")
            .amount("123,45", None)
            .due_date(&format!("2024{:02}{:02}", n % 12 + 1, n % 28 + 1))
            .build()
            .unwrap();
        payments.add(invoice);
    }
    payments
}

fn bench_extract(c: &mut Criterion) {
    for strategy in [ExtractionStrategy::Tree, ExtractionStrategy::Stream] {
        c.bench_function(&format!("extract_{strategy}"), |b| {
            b.iter(|| black_box(strategy.extract(black_box(FIXTURE))));
        });
    }
}

fn bench_parse_invoice_bytes(c: &mut Criterion) {
    let bytes = FIXTURE.as_bytes();
    c.bench_function("parse_invoice_bytes_tree", |b| {
        b.iter(|| black_box(finvoice::parse_invoice_bytes(black_box(bytes), &ExtractionStrategy::Tree)));
    });
}

#[cfg(feature = "export")]
fn bench_sort_and_render(c: &mut Criterion) {
    use finvoice_payments::export::{CsvOptions, render_csv};

    let payments = build_100_invoices();
    let options = CsvOptions::default();
    c.bench_function("sort_and_render_100", |b| {
        b.iter(|| {
            let mut p = payments.clone();
            p.sort_by_due_date_descending();
            black_box(render_csv(&p, &options))
        });
    });
}

#[cfg(not(feature = "export"))]
fn bench_sort_and_render(c: &mut Criterion) {
    let payments = build_100_invoices();
    c.bench_function("sort_100", |b| {
        b.iter(|| {
            let mut p = payments.clone();
            p.sort_by_due_date_descending();
            black_box(p)
        });
    });
}

criterion_group!(benches, bench_extract, bench_parse_invoice_bytes, bench_sort_and_render);
criterion_main!(benches);
