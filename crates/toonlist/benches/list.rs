use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use toonlist::{LinkedList, Queue};

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_churn");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_remove_first", |b| {
        let mut list = LinkedList::from_values(0..1000u64);

        let mut counter = 1000u64;
        b.iter(|| {
            list.add(counter);
            black_box(list.remove_first());
            counter += 1;
        });
    });

    group.bench_function("remove_by_middle", |b| {
        let mut list = LinkedList::from_values(0..1000u64);

        b.iter(|| {
            let value = list.remove_by(|v| *v % 1000 == 500);
            if let Some(v) = value {
                list.add(v);
            }
            black_box(list.len());
        });
    });

    group.finish();
}

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("enqueue_dequeue", |b| {
        let mut queue = Queue::new();
        for i in 0..100u64 {
            queue.enqueue(i);
        }

        b.iter(|| {
            let item = queue.dequeue();
            if let Some(item) = item {
                queue.enqueue(black_box(item));
            }
        });
    });

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.sample_size(50);

    let list = LinkedList::from_values(0..1000u64);

    group.bench_function("filter_1k", |b| {
        b.iter(|| black_box(list.filter(|v| v % 2 == 0)));
    });

    group.bench_function("tail_1k", |b| {
        b.iter(|| black_box(list.tail()));
    });

    group.finish();
}

criterion_group!(benches, bench_add_remove, bench_queue, bench_transform);
criterion_main!(benches);
