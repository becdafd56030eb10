use criterion::Criterion;
use criterion::{black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256Plus;

use vista_cc::{ColType, View};

fn gen_rows<R: Rng>(n: usize, n_cols: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let gauss = Normal::new(0.0, 1.0).unwrap();
    (0..n)
        .map(|_| (0..n_cols).map(|_| gauss.sample(rng)).collect())
        .collect()
}

fn filled_view<R: Rng>(rows: &[Vec<f64>], n_clusters: usize, rng: &mut R) -> View {
    let mut view = View::new(rows[0].len(), 1.0).unwrap();
    for (row_ix, x) in rows.iter().enumerate() {
        let k = rng.gen_range(0..=view.n_clusters().min(n_clusters - 1));
        view.insert_row(x, k, row_ix);
    }
    view
}

fn bench_vector_logps(c: &mut Criterion) {
    c.bench_function("continuous vector logps (10 cols, 20 clusters)", |b| {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let rows = gen_rows(500, 10, &mut rng);
        let view = filled_view(&rows, 20, &mut rng);
        let x = &rows[0];
        b.iter(|| {
            let logps = view.calc_cluster_vector_logps(black_box(x));
            black_box(logps);
        })
    });
}

fn bench_categorical_vector_logps(c: &mut Criterion) {
    c.bench_function("categorical vector logps (10 cols, 20 clusters)", |b| {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let rows: Vec<Vec<f64>> = (0..500)
            .map(|_| (0..10).map(|_| rng.gen_range(0..4) as f64).collect())
            .collect();
        let mut view =
            vista_cc::view::Builder::from_col_types(vec![ColType::categorical(4); 10])
                .build()
                .unwrap();
        for (row_ix, x) in rows.iter().enumerate() {
            let k = rng.gen_range(0..=view.n_clusters().min(19));
            view.insert_row(x, k, row_ix);
        }
        let x = &rows[0];
        b.iter(|| {
            let logps = view.calc_cluster_vector_logps(black_box(x));
            black_box(logps);
        })
    });
}

fn bench_insert_remove(c: &mut Criterion) {
    c.bench_function("insert and remove row", |b| {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let rows = gen_rows(501, 10, &mut rng);
        let mut view = filled_view(&rows[..500], 20, &mut rng);
        let x = &rows[500];
        b.iter(|| {
            view.insert_row(x, 0, 500);
            view.remove_row(x, 0, 500);
        })
    });
}

criterion_group!(
    vector_logps_benches,
    bench_vector_logps,
    bench_categorical_vector_logps,
    bench_insert_remove,
);
criterion_main!(vector_logps_benches);
