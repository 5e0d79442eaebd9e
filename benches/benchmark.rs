//! Benchmarks for card_entry keystroke handling.
//!
//! Run with: cargo bench

use card_entry::clock::FixedClock;
use card_entry::number::CardNumberValidator;
use card_entry::{detect, luhn, CardEntryForm, FieldKind, FormConfig, Validator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

// Test card numbers
const VISA_16: &str = "4111111111111111";
const VISA_16_FORMATTED: &str = "4111-1111-1111-1111";
const AMEX: &str = "378282246310005";
const DISCOVER_RANGE: &str = "6221260000000000";

fn form() -> CardEntryForm {
    CardEntryForm::with_clock(FormConfig::all_fields(), Arc::new(FixedClock::new(2024, 1)))
}

/// Benchmark brand classification on partial and full input
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for input in ["4", "37", "6011", DISCOVER_RANGE, VISA_16] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, s| {
            b.iter(|| detect::classify(black_box(s)))
        });
    }

    group.finish();
}

/// Benchmark Luhn on text with and without separators
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("visa_16_raw", |b| b.iter(|| luhn::passes(black_box(VISA_16))));
    group.bench_function("visa_16_formatted", |b| {
        b.iter(|| luhn::passes(black_box(VISA_16_FORMATTED)))
    });

    group.finish();
}

/// Benchmark a single validator update
fn bench_number_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("number_update");

    group.bench_function("visa_16", |b| {
        let mut v = CardNumberValidator::new();
        b.iter(|| {
            v.update(black_box(VISA_16));
            v.is_valid()
        })
    });

    group.bench_function("amex_15", |b| {
        let mut v = CardNumberValidator::new();
        b.iter(|| {
            v.update(black_box(AMEX));
            v.is_valid()
        })
    });

    group.finish();
}

/// Benchmark the dispatcher over a whole typed field
fn bench_keystrokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("keystrokes");

    for number in [VISA_16, AMEX] {
        let prefixes: Vec<&str> = (1..=number.len()).map(|end| &number[..end]).collect();
        group.throughput(Throughput::Elements(prefixes.len() as u64));
        group.bench_with_input(BenchmarkId::new("number", number.len()), &prefixes, |b, p| {
            b.iter(|| {
                let mut f = form();
                for text in p {
                    black_box(f.on_field_changed(FieldKind::Number, text));
                }
                f.is_form_ready()
            })
        });
    }

    group.bench_function("full_form", |b| {
        b.iter(|| {
            let mut f = form();
            f.on_field_changed(FieldKind::Number, black_box(VISA_16));
            f.on_field_changed(FieldKind::Expiry, black_box("12/30"));
            f.on_field_changed(FieldKind::Cvv, black_box("123"));
            f.on_field_changed(FieldKind::PostalCode, black_box("94103"));
            f.on_field_changed(FieldKind::CardholderName, black_box("Ada Lovelace"));
            f.submit().is_ok()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_luhn,
    bench_number_update,
    bench_keystrokes,
);

criterion_main!(benches);
