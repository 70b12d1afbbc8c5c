use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecolog::models::{AccountType, User};
use ecolog::services::{impact, leaderboard};
use rust_decimal::Decimal;

fn make_user(index: u32) -> User {
    User {
        id: format!("user-{:05}", index),
        email: Some(format!("user{}@example.com", index)),
        first_name: Some("Bench".to_string()),
        last_name: Some(format!("User{}", index)),
        profile_image_url: None,
        account_type: AccountType::Individual,
        company_name: None,
        eco_points: (index as i64) * 3,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn benchmark_calculate_impact(c: &mut Criterion) {
    let mut group = c.benchmark_group("impact");

    group.bench_function("known_categories", |b| {
        b.iter(|| {
            for category in [
                "energy_saving",
                "recycling",
                "upcycling",
                "sustainable_commute",
            ] {
                black_box(impact::calculate_impact(black_box(category), Some("12.5")));
            }
        })
    });

    group.bench_function("unknown_category", |b| {
        b.iter(|| {
            black_box(impact::calculate_impact(
                black_box("composting"),
                Some("12.5"),
            ))
        })
    });

    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    // Many ties (modulus) so the tie-break path is exercised
    let rows: Vec<(User, Decimal)> = (0..10_000)
        .map(|i| (make_user(i), Decimal::from(i % 997)))
        .collect();

    c.bench_function("rank_10k_users_top_10", |b| {
        b.iter(|| black_box(leaderboard::rank(rows.clone(), 10)))
    });
}

criterion_group!(benches, benchmark_calculate_impact, benchmark_rank);
criterion_main!(benches);
