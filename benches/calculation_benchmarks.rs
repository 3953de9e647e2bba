//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure computation path and the full HTTP round trip:
//! - Single payroll computation: < 20μs mean
//! - Preview request through the router: < 200μs mean
//! - Batch of 1000 computations: < 20ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;
use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use payroll_engine::api::{AppState, PreviewRequest, create_router};
use payroll_engine::calculation::compute_payroll;
use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{PayrollInput, SalaryInput, TaxBracket};
use payroll_engine::repository::{
    TaxBracketRepository, YamlSalaryRepository, YamlTaxBracketRepository,
};

const CONFIG_DIR: &str = "./config/kenya";

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn load_config() -> ConfigLoader {
    ConfigLoader::load(CONFIG_DIR).expect("Failed to load config")
}

fn load_brackets(config: &ConfigLoader) -> Vec<TaxBracket> {
    YamlTaxBracketRepository::new(config.tax_brackets_dir())
        .active_tax_brackets(as_of())
        .expect("Failed to load tax brackets")
}

fn create_test_state() -> AppState {
    let config = load_config();
    let tax_brackets = YamlTaxBracketRepository::new(config.tax_brackets_dir());
    let salaries = YamlSalaryRepository::new(format!("{}/salaries.yaml", CONFIG_DIR));
    AppState::new(PayrollEngine::new(
        config,
        Arc::new(salaries),
        Arc::new(tax_brackets),
    ))
}

/// Builds inputs spread across every PAYE band and NHIF band.
fn create_inputs(count: usize) -> Vec<PayrollInput> {
    (0..count)
        .map(|i| {
            let basic = Decimal::from(5_000 + (i as i64 * 997) % 995_000);
            let days_worked = 22 - (i % 5) as i32;
            PayrollInput::new(SalaryInput::new(basic, 22, days_worked))
        })
        .collect()
}

/// Benchmark: one computation at the reference salary.
///
/// Target: < 20μs mean
fn bench_single_computation(c: &mut Criterion) {
    let config = load_config();
    let brackets = load_brackets(&config);
    let nhif = config.nhif_schedule(as_of()).expect("No NHIF schedule");
    let input = PayrollInput::new(SalaryInput::new(
        Decimal::from_str("50000").unwrap(),
        22,
        22,
    ));

    c.bench_function("single_computation", |b| {
        b.iter(|| {
            black_box(
                compute_payroll(
                    black_box(&input),
                    as_of(),
                    &brackets,
                    config.statutory(),
                    nhif,
                )
                .unwrap(),
            )
        })
    });
}

/// Benchmark: preview request through the router.
///
/// Target: < 200μs mean
fn bench_preview_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let request = PreviewRequest {
        basic_salary: Decimal::from(50_000),
        working_days: 22,
        days_worked: 20,
        allowances: Decimal::from(2_500),
        other_deductions: Decimal::ZERO,
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("preview_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/preview")
                        .header("Content-Type", "application/json")
                        .header("x-user-role", "hr_manager")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batches of computations sharing one bracket fetch.
///
/// Target: < 20ms mean for 1000
fn bench_batch(c: &mut Criterion) {
    let config = load_config();
    let brackets = load_brackets(&config);
    let nhif = config.nhif_schedule(as_of()).expect("No NHIF schedule");

    let mut group = c.benchmark_group("batch");

    for count in [10usize, 100, 1000] {
        let inputs = create_inputs(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &inputs, |b, inputs| {
            b.iter(|| {
                for input in inputs {
                    black_box(
                        compute_payroll(input, as_of(), &brackets, config.statutory(), nhif)
                            .unwrap(),
                    );
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_computation,
    bench_preview_request,
    bench_batch,
);
criterion_main!(benches);
