//! Performance benchmarks for GridWatch
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridwatch::core::pretty_duration;
use gridwatch::scheduler::{QueueSnapshot, SubmissionAck};

/// Render a qstat-style listing with the given number of job rows
fn fake_listing(jobs: u64) -> String {
    let mut out = String::from(
        "job-ID  prior   name       user         state submit/start at     queue                          slots ja-task-ID\n\
         -----------------------------------------------------------------------------------------------------------------\n",
    );
    for n in 0..jobs {
        out.push_str(&format!(
            "{:>7} 0.55500 job_{:04}   jdoe         r     08/25/2026 10:30:02 all.q@node001                      1\n",
            1000 + n,
            n
        ));
    }
    out
}

fn bench_ack_parsing(c: &mut Criterion) {
    let plain = r#"your job 4821 ("alignment") has been submitted"#;
    let array = r#"your job-array 4821.1-100:1 ("sweep") has been submitted"#;

    c.bench_function("parse_plain_ack", |b| {
        b.iter(|| SubmissionAck::parse(black_box(plain)).unwrap())
    });
    c.bench_function("parse_array_ack", |b| {
        b.iter(|| SubmissionAck::parse(black_box(array)).unwrap())
    });
}

fn bench_snapshot_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_parse");

    for jobs in [10u64, 100, 1000].iter() {
        let listing = fake_listing(*jobs);
        group.throughput(Throughput::Bytes(listing.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(jobs), &listing, |b, listing| {
            b.iter(|| QueueSnapshot::parse(black_box(listing)))
        });
    }

    group.finish();
}

fn bench_membership_checks(c: &mut Criterion) {
    let snapshot = QueueSnapshot::parse(&fake_listing(1000));
    let mut group = c.benchmark_group("membership");

    // Identifier near the end of the listing, worst case for the scan
    group.bench_function("exact", |b| {
        b.iter(|| black_box(snapshot.contains_id(black_box(1999))))
    });
    group.bench_function("substring", |b| {
        b.iter(|| black_box(snapshot.contains_substring(black_box(1999))))
    });

    group.finish();
}

fn bench_duration_formatting(c: &mut Criterion) {
    c.bench_function("pretty_duration", |b| {
        b.iter(|| {
            for secs in [59u64, 3661, 90060] {
                black_box(pretty_duration(black_box(secs)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_ack_parsing,
    bench_snapshot_parsing,
    bench_membership_checks,
    bench_duration_formatting
);

criterion_main!(benches);
