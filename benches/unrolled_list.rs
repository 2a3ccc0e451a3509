use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::{LinkedList, VecDeque};
use unrolled_list::UnrolledList;

fn bench_unrolled_list(c: &mut Criterion) {
    let n = 1_000;
    {
        let mut group = c.benchmark_group("PushBack 1000");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i));
                }
                d
            })
        });

        group.bench_function("std::collections::LinkedList", |b| {
            b.iter(|| {
                let mut d = LinkedList::new();
                for i in 0..n {
                    d.push_back(black_box(i));
                }
                d
            })
        });

        group.bench_function("UnrolledList<i32, 10>", |b| {
            b.iter(|| {
                let mut d: UnrolledList<i32, 10> = UnrolledList::new();
                for i in 0..n {
                    d.push_back(black_box(i));
                }
                d
            })
        });

        group.bench_function("UnrolledList<i32, 64>", |b| {
            b.iter(|| {
                let mut d: UnrolledList<i32, 64> = UnrolledList::new();
                for i in 0..n {
                    d.push_back(black_box(i));
                }
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Iterate 1000");
        let d_std: VecDeque<i32> = (0..n).collect();
        let d_linked: LinkedList<i32> = (0..n).collect();
        let d_unrolled: UnrolledList<i32, 10> = (0..n).collect();

        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| black_box(d_std.iter().sum::<i32>()))
        });
        group.bench_function("std::collections::LinkedList", |b| {
            b.iter(|| black_box(d_linked.iter().sum::<i32>()))
        });
        group.bench_function("UnrolledList<i32, 10>", |b| {
            b.iter(|| black_box(d_unrolled.iter().sum::<i32>()))
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Insert middle 1000");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.insert(d.len() / 2, black_box(i));
                }
                d
            })
        });

        group.bench_function("UnrolledList<i32, 10> cursor", |b| {
            b.iter(|| {
                let mut d: UnrolledList<i32, 10> = UnrolledList::new();
                let mut cursor = d.cursor_front_mut();
                for i in 0..n {
                    cursor.insert(black_box(i));
                    if i % 2 == 0 {
                        cursor.move_next();
                    }
                }
                drop(cursor);
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Erase front half 1000");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d: VecDeque<i32> = (0..n).collect();
                d.drain(..d.len() / 2);
                d
            })
        });

        group.bench_function("UnrolledList<i32, 10>", |b| {
            b.iter(|| {
                let mut d: UnrolledList<i32, 10> = (0..n).collect();
                let half = d.len() / 2;
                d.erase(..half).expect("range within the list");
                d
            })
        });
        group.finish();
    }
}

criterion_group!(benches, bench_unrolled_list);
criterion_main!(benches);
