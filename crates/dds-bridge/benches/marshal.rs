// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Marshaling Benchmark
//!
//! Measures the cost of crossing the native boundary with collection-valued
//! data:
//! - fixed-width sequences (`i16`, policy counters)
//! - text sequences (partition names)
//! - a full writer QoS to_native/release cycle

#![allow(clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dds_bridge::memory::AllocationLedger;
use dds_bridge::qos::{DataRepresentation, Partition, UserData};
use dds_bridge::sequence;
use dds_bridge::status::QosPolicyCount;
use dds_bridge::{DataWriterQos, NativeConvert, PublisherQos};

fn bench_fixed_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_sequence");
    for len in [0usize, 16, 256, 4096] {
        let counts: Vec<QosPolicyCount> = (0..len)
            .map(|i| QosPolicyCount::new(i as i32, 1))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &counts, |b, counts| {
            b.iter(|| {
                let mut ledger = AllocationLedger::new();
                let ptr = ledger.absorb(sequence::to_native(black_box(counts)));
                // SAFETY: `ptr` is a block owned by `ledger`.
                let back: Vec<QosPolicyCount> = unsafe { sequence::from_native(ptr) };
                ledger.release();
                back
            });
        });
    }
    group.finish();
}

fn bench_text_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_sequence");
    for len in [1usize, 8, 64] {
        let names: Vec<String> = (0..len).map(|i| format!("sensors/partition_{i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &names, |b, names| {
            b.iter(|| {
                let mut ledger = AllocationLedger::new();
                let ptr = ledger.absorb(sequence::strings_to_native(black_box(names)));
                // SAFETY: `ptr` is a text block owned by `ledger`.
                let back = unsafe { sequence::strings_from_native(ptr) };
                ledger.release();
                back
            });
        });
    }
    group.finish();
}

fn bench_qos_cycle(c: &mut Criterion) {
    let writer_qos = DataWriterQos {
        user_data: UserData::new(vec![7u8; 128]),
        representation: DataRepresentation::new(vec![
            DataRepresentation::XCDR,
            DataRepresentation::XCDR2,
        ]),
        ..DataWriterQos::default()
    };
    c.bench_function("writer_qos_to_native_release", |b| {
        b.iter(|| {
            let mut qos = writer_qos.clone();
            let native = qos.to_native();
            black_box(&native);
            qos.release();
        });
    });

    let publisher_qos = PublisherQos {
        partition: Partition::new(["a", "b/c", "d.*"]),
        ..PublisherQos::default()
    };
    c.bench_function("publisher_qos_to_native_release", |b| {
        b.iter(|| {
            let mut qos = publisher_qos.clone();
            let native = qos.to_native();
            black_box(&native);
            qos.release();
        });
    });
}

criterion_group!(
    benches,
    bench_fixed_sequences,
    bench_text_sequences,
    bench_qos_cycle
);
criterion_main!(benches);
