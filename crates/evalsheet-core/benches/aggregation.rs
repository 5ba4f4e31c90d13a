use criterion::{black_box, criterion_group, criterion_main, Criterion};

use evalsheet_core::filter::FilterSelection;
use evalsheet_core::model::{EvaluationRecord, Judgment, TraineeKey};
use evalsheet_core::statistics::{aggregate, summarize_by_trainee};

const JUDGMENTS: [&str; 4] = ["APROBADO", "POR EVALUAR", "NO APROBADO", "APLAZADO"];

fn make_records(trainees: usize, competencies: usize) -> Vec<EvaluationRecord> {
    let mut records = Vec::with_capacity(trainees * competencies);
    for t in 0..trainees {
        for c in 0..competencies {
            records.push(EvaluationRecord::new(
                format!("Trainee{t}"),
                format!("Surname{t}"),
                format!("Competency {c}"),
                format!("RA {c}"),
                Judgment::parse(JUDGMENTS[(t + c) % JUDGMENTS.len()]),
            ));
        }
    }
    records
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for (trainees, competencies) in [(30, 20), (300, 40)] {
        let records = make_records(trainees, competencies);
        group.bench_function(format!("n={}", records.len()), |b| {
            b.iter(|| aggregate(black_box(&records)))
        });
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_by_trainee");

    for (trainees, competencies) in [(30, 20), (300, 40)] {
        let records = make_records(trainees, competencies);
        group.bench_function(format!("n={}", records.len()), |b| {
            b.iter(|| summarize_by_trainee(black_box(&records)))
        });
    }

    group.finish();
}

fn bench_filter_then_aggregate(c: &mut Criterion) {
    let records = make_records(300, 40);
    let selection = FilterSelection::all()
        .with_trainee(TraineeKey::new("Trainee42", "Surname42"))
        .with_competency("Competency 7");

    c.bench_function("filter_then_aggregate", |b| {
        b.iter(|| aggregate(&black_box(&selection).apply(black_box(&records))))
    });
}

criterion_group!(benches, bench_aggregate, bench_summarize, bench_filter_then_aggregate);
criterion_main!(benches);
