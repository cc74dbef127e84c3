//! Performance benchmarks for the payroll summary engine.
//!
//! Covers the pure aggregation path over synthetic workforces of growing
//! size, CSV ingest, and the HTTP summary/report endpoints.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_summary::aggregation::aggregate;
use payroll_summary::api::{AppState, create_router};
use payroll_summary::config::{AggregationPolicy, ConfigLoader};
use payroll_summary::ingest::{DEFAULT_TABLE, RecordStore, read_csv};
use payroll_summary::models::PayRecord;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const STORES: [&str; 4] = ["main st", "ELM ST", "oak ave", "harbour  view"];

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Builds `employees` employees with `paychecks` fortnightly records each.
///
/// Every fifth employee stopped being paid two years ago, every seventh has
/// a duplicated final row.
fn synthetic_workforce(employees: usize, paychecks: usize) -> Vec<PayRecord> {
    let mut records = Vec::with_capacity(employees * (paychecks + 1));
    for e in 0..employees {
        let last = if e % 5 == 0 {
            as_of() - Duration::days(730)
        } else {
            as_of() - Duration::days((e % 14) as i64)
        };
        for p in 0..paychecks {
            records.push(PayRecord {
                employee_name: format!("Employee {:05}", e),
                pay_date: last - Duration::days(14 * p as i64),
                week1_hours: Decimal::new(3800 + (p as i64 % 7) * 25, 2),
                week2_hours: Decimal::new(3650, 2),
                store_name: STORES[(e + p) % STORES.len()].to_string(),
            });
        }
        if e % 7 == 0 {
            records.push(PayRecord {
                employee_name: format!("Employee {:05}", e),
                pay_date: last,
                week1_hours: Decimal::new(200, 2),
                week2_hours: Decimal::ZERO,
                store_name: STORES[e % STORES.len()].to_string(),
            });
        }
    }
    records
}

fn to_csv(records: &[PayRecord]) -> String {
    let mut csv = String::from("Employee_Name,Pay_Date,Week_1,Week_2,Store_Name\n");
    for r in records {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            r.employee_name, r.pay_date, r.week1_hours, r.week2_hours, r.store_name
        ));
    }
    csv
}

fn create_test_state(records: Vec<PayRecord>) -> AppState {
    let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
    let mut store = RecordStore::new();
    store.replace_table(DEFAULT_TABLE, records);
    AppState::with_store(config, store)
}

/// Benchmark: aggregation scaling with workforce size.
fn bench_aggregate_scaling(c: &mut Criterion) {
    let policy = AggregationPolicy::default();
    let mut group = c.benchmark_group("aggregate");

    for employees in [10usize, 100, 1000].iter() {
        let records = synthetic_workforce(*employees, 52);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employees),
            &records,
            |b, records| b.iter(|| black_box(aggregate(records, as_of(), &policy).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark: parsing a CSV export of 100 employees.
fn bench_csv_ingest(c: &mut Criterion) {
    let csv = to_csv(&synthetic_workforce(100, 52));

    let mut group = c.benchmark_group("ingest");
    group.throughput(Throughput::Bytes(csv.len() as u64));
    group.bench_function("read_csv_100_employees", |b| {
        b.iter(|| black_box(read_csv(csv.as_bytes()).unwrap()))
    });
    group.finish();
}

/// Benchmark: summary and report endpoints over a stored table.
fn bench_http_endpoints(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state(synthetic_workforce(100, 52)));

    let mut group = c.benchmark_group("http");
    group.sample_size(20);

    for endpoint in ["summary", "report"] {
        let uri = format!("/{}?as_of=2026-10-18", endpoint);
        group.bench_function(endpoint, |b| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_aggregate_scaling,
    bench_csv_ingest,
    bench_http_endpoints,
);
criterion_main!(benches);
