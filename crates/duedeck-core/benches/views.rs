#![allow(missing_docs)]

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use duedeck_core::date::shift_days;
use duedeck_core::views::{category_stats, filter_tasks, group_by_completion, split_due};
use duedeck_core::{Category, CategoryFilter, Task, TaskDraft, TaskFilter, TaskId};
use time::Date;
use time::macros::date;

const TODAY: Date = date!(2025 - 04 - 15);

fn build_tasks(count: usize) -> Vec<Task> {
    (0..count)
        .map(|idx| {
            let offset = i64::try_from(idx % 30).unwrap_or(0) - 15;
            let mut draft = TaskDraft::new(format!("Task {idx} invoice"), shift_days(TODAY, offset));
            draft.category = Category::ALL[idx % Category::ALL.len()];
            draft.description = format!("Account ending in {idx:04}");
            let mut task = Task::from_draft(TaskId::generate(), draft, 0);
            task.completed = idx % 3 == 0;
            task
        })
        .collect()
}

fn derived_views_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_views");
    for &count in &[10usize, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || build_tasks(count),
                |tasks| {
                    let filter = TaskFilter {
                        category: CategoryFilter::Only(Category::Bills),
                        search: "INVOICE".into(),
                    };
                    black_box(split_due(&tasks, TODAY));
                    black_box(category_stats(&tasks));
                    black_box(group_by_completion(filter_tasks(&tasks, &filter)));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, derived_views_benchmark);
criterion_main!(benches);
