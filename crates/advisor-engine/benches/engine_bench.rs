use advisor_core::{Assumptions, Project, Scenario};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

fn build_portfolio(n_projects: usize) -> Vec<Project> {
    let mut projects = Vec::with_capacity(n_projects);
    for i in 0..n_projects {
        projects.push(Project {
            name: format!("P{i}"),
            expected_annual_revenue: Decimal::new(500_000 + (i as i64 * 13_337) % 900_000, 0),
            annual_cost: Decimal::new(200_000 + (i as i64 * 7_919) % 400_000, 0),
            initial_investment: Decimal::new(1_000_000 + (i as i64 * 104_729) % 3_000_000, 0),
            duration_years: 1 + (i as u32 % 15),
            risk_score: (i % 10) as f32 / 10.0,
            strategic_weight: 0.5 + (i % 5) as f32 / 10.0,
        });
    }
    projects
}

fn bench_evaluate(c: &mut Criterion) {
    let projects = build_portfolio(1_000);
    let assumptions = Assumptions {
        discount_rate: 0.10,
        total_budget: Decimal::new(500_000_000, 0),
        scenario: Scenario::BaseCase,
    };
    c.bench_function("evaluate 1000 projects", |b| {
        b.iter(|| {
            let report =
                advisor_engine::evaluate_portfolio(black_box(&projects), black_box(&assumptions))
                    .unwrap();
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
