// Criterion benchmarks for Talent Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use talent_match::core::{
    compute_skill_coverage, filter_by_score_range, filter_by_skills, sort_matches, MatchPipeline,
    ViewOptions,
};
use talent_match::models::{MatchRecord, SortKey};

const SKILLS: [&str; 8] = [
    "SQL",
    "Python (semantic)",
    "Rust",
    "Docker (partial)",
    "AWS",
    "React.js (semantic)",
    "Kubernetes",
    "Java (partial)",
];

fn create_record(id: usize) -> MatchRecord {
    MatchRecord {
        candidate_id: id.to_string(),
        candidate_name: format!("Candidate {}", id),
        candidate_email: format!("candidate{}@example.com", id),
        match_score: (id * 37 % 101) as f64,
        skills_score: (id * 53 % 101) as f64,
        experience_score: (id * 71 % 101) as f64,
        education_score: (id * 13 % 101) as f64,
        matched_skills: SKILLS
            .iter()
            .enumerate()
            .filter(|(i, _)| (id + i) % 3 != 0)
            .map(|(_, s)| s.to_string())
            .collect(),
        missing_skills: vec!["Go".to_string()],
        analysis: None,
        cv_url: None,
    }
}

fn create_records(count: usize) -> Vec<MatchRecord> {
    (0..count).map(create_record).collect()
}

fn bench_filters(c: &mut Criterion) {
    let records = create_records(1000);

    c.bench_function("filter_by_score_range_1000", |b| {
        b.iter(|| filter_by_score_range(black_box(&records), black_box(40.0), black_box(90.0)));
    });

    c.bench_function("filter_by_skills_1000", |b| {
        b.iter(|| filter_by_skills(black_box(&records), black_box(&["python", "docker"])));
    });
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_matches");

    for count in [10, 100, 1000, 5000].iter() {
        let records = create_records(*count);
        group.bench_with_input(BenchmarkId::new("skills", count), count, |b, _| {
            b.iter(|| sort_matches(black_box(&records), SortKey::Skills));
        });
    }

    group.finish();
}

fn bench_coverage(c: &mut Criterion) {
    let required = ["SQL", "Python", "Rust", "Docker", "AWS", "React", "Go", "Terraform"];
    let mut group = c.benchmark_group("skill_coverage");

    for count in [100, 1000, 5000].iter() {
        let records = create_records(*count);
        group.bench_with_input(BenchmarkId::new("compute", count), count, |b, _| {
            b.iter(|| compute_skill_coverage(black_box(&records), black_box(&required)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = MatchPipeline::default();
    let records = create_records(1000);
    let options = ViewOptions {
        min_score: 30.0,
        max_score: 100.0,
        skills: vec!["sql".to_string(), "aws".to_string()],
        sort_by: SortKey::Experience,
        limit: Some(20),
    };

    c.bench_function("pipeline_1000_records", |b| {
        b.iter(|| pipeline.apply(black_box(&records), black_box(&options)));
    });
}

criterion_group!(benches, bench_filters, bench_sorting, bench_coverage, bench_pipeline);

criterion_main!(benches);
