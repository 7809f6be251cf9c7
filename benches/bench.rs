use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rbmap::{Keys, TreeMap};
use std::hint::black_box;

const SIZES: [usize; 2] = [100, 10_000];

fn rng() -> StdRng { StdRng::seed_from_u64(0x5eed) }

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("rand", n), &n, |b, &n| {
            let mut rng = rng();
            let mut map = TreeMap::new();
            for _ in 0..n { let i = rng.gen_range(0..n); map.insert(i, i); }

            b.iter(|| {
                let k = rng.gen_range(0..n);
                map.insert(k, k);
            });
            black_box(map);
        });

        group.bench_with_input(BenchmarkId::new("seq", n), &n, |b, &n| {
            let mut map = TreeMap::new();
            for i in 0..n { map.insert(i * 2, i * 2); }

            let mut i = 1;
            b.iter(|| {
                map.insert(i, i);
                i = (i + 2) % n;
            });
            black_box(map);
        });
    }

    group.finish();
}

fn find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("rand", n), &n, |b, &n| {
            let mut rng = rng();
            let mut keys: Vec<_> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let map: TreeMap<_, _> = keys.iter().map(|&k| (k, k)).collect();
            keys.shuffle(&mut rng);

            let mut i = 0;
            b.iter(|| {
                black_box(map.get(&keys[i]));
                i = (i + 1) % n;
            });
        });

        group.bench_with_input(BenchmarkId::new("seq", n), &n, |b, &n| {
            let map: TreeMap<_, _> = (0..n).map(|i| (i, i)).collect();

            let mut i = 0;
            b.iter(|| {
                black_box(map.get(&i));
                i = (i + 1) % n;
            });
        });
    }

    group.finish();
}

fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_insert");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = rng();
            let mut map: TreeMap<_, _> = (0..n).map(|i| (i, i)).collect();

            b.iter(|| {
                let k = rng.gen_range(0..n);
                black_box(map.remove(&k));
                map.insert(k, k);
            });
        });
    }

    group.finish();
}

fn iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");

    for n in [100, 1000, 100_000] {
        let mut rng = rng();
        let map: TreeMap<u32, u32> = (0..n).map(|_| (rng.gen(), rng.gen())).collect();

        group.bench_with_input(BenchmarkId::new("iter", n), &map, |b, map| {
            b.iter(|| for entry in map.iter() { black_box(entry); });
        });

        group.bench_with_input(BenchmarkId::new("cursor", n), &map, |b, map| {
            b.iter(|| {
                let mut cursor = map.cursor::<Keys>();
                while let Ok(Some(key)) = cursor.next(map) { black_box(key); }
            });
        });
    }

    group.finish();
}

fn bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("from_sorted_iter", n), &n, |b, &n| {
            b.iter(|| {
                TreeMap::from_sorted_iter(compare::natural(), n, (0..n).map(|i| (i, i))).unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("collect", n), &n, |b, &n| {
            b.iter(|| (0..n).map(|i| (i, i)).collect::<TreeMap<_, _>>());
        });
    }

    group.finish();
}

criterion_group!(benches, insert, find, remove, iterate, bulk);
criterion_main!(benches);
