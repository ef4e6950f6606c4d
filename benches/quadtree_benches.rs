use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pr_quadtree::{Point, Quadtree, Square};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const SIZE: f64 = 7800.0;

fn get_rand() -> impl rand::Rng {
    SmallRng::seed_from_u64(0xdeadbeef)
}

fn make_tree(rng: &mut impl Rng, len: usize, size: f64) -> Quadtree {
    let mut tree = Quadtree::new(Square::from_coords(0.0, 0.0, size, size)).unwrap();
    let mut inserted = 0;
    while inserted < len {
        let p = Point::new(rng.gen_range(0.0, size), rng.gen_range(0.0, size));
        if tree.insert(p).is_ok() {
            inserted += 1;
        }
    }
    tree
}

fn random_rect(rng: &mut impl Rng, size: f64, side: f64) -> Square {
    let x = rng.gen_range(0.0, size - side);
    let y = rng.gen_range(0.0, size - side);
    Square::from_coords(x, y, x + side, y + side)
}

fn contains_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree contains_rand");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, move |b, &size| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, size, SIZE);

            b.iter(|| {
                let p = Point::new(rng.gen_range(0.0, SIZE), rng.gen_range(0.0, SIZE));
                tree.contains(&p)
            })
        });
    }
    group.finish();
}

fn contains_in_tree_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree contains, all queried points are in the tree");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &len| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, len, SIZE);
            let points = tree
                .query_range(tree.boundary())
                .expect("the outer square to be a valid query");

            b.iter(|| {
                let i = rng.gen_range(0, points.len());
                tree.contains(&points[i])
            });
        });
    }
    group.finish();
}

fn find_in_range_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree find_in_range sparse");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, size, SIZE);

            let mut res = Vec::new();
            b.iter(|| {
                let rect = random_rect(&mut rng, SIZE, 1024.0);
                res.clear();
                tree.find_in_range(&rect, &mut res).unwrap();
                black_box(&res);
            });
        });
    }
    group.finish();
}

fn find_in_range_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree find_in_range dense");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, size, 400.0);

            let mut res = Vec::new();
            b.iter(|| {
                let rect = random_rect(&mut rng, 400.0, 100.0);
                res.clear();
                tree.find_in_range(&rect, &mut res).unwrap();
                black_box(&res);
            });
        });
    }
    group.finish();
}

fn find_in_range_serial_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree find_in_range large rect");
    for size in [1 << 12, 1 << 16].iter() {
        let mut rng = get_rand();
        let tree = make_tree(&mut rng, *size, SIZE);

        group.bench_with_input(BenchmarkId::new("serial", size), size, |b, _| {
            let mut rng = get_rand();
            let mut res = Vec::new();
            b.iter(|| {
                let rect = random_rect(&mut rng, SIZE, SIZE / 2.0);
                res.clear();
                tree.find_in_range(&rect, &mut res).unwrap();
                black_box(&res);
            });
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            let mut rng = get_rand();
            let mut res = Vec::new();
            b.iter(|| {
                let rect = random_rect(&mut rng, SIZE, SIZE / 2.0);
                res.clear();
                tree.par_find_in_range(&rect, &mut res).unwrap();
                black_box(&res);
            });
        });
    }
    group.finish();
}

fn build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree make_tree");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();

            b.iter(|| make_tree(&mut rng, size, SIZE));
        });
    }
    group.finish();
}

fn random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree random_insert");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let mut tree = make_tree(&mut rng, size, 29000.0);

            b.iter(|| {
                let p = Point::new(rng.gen_range(0.0, 29000.0), rng.gen_range(0.0, 29000.0));
                // random f64 duplicates are vanishingly rare, ignore them
                let _ = tree.insert(p);
            });
        });
    }
    group.finish();
}

criterion_group!(
    quadtree_benches,
    contains_rand,
    contains_in_tree_rand,
    find_in_range_sparse,
    find_in_range_dense,
    find_in_range_serial_vs_parallel,
    build_tree,
    random_insert,
);

criterion_main!(quadtree_benches);
