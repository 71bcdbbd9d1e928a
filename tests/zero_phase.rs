use ndarray::{s, Array1, Array2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};
use zerophase::{butterworth, call, filtfilt, filtfilt_1d, resonator, Band};

fn noise(rng: &mut StdRng, n: usize, amplitude: f64) -> Array1<f64> {
    (0..n).map(|_| rng.random_range(-amplitude..amplitude)).collect()
}

fn mean_abs(x: &Array1<f64>) -> f64 {
    x.iter().map(|v| v.abs()).sum::<f64>() / x.len() as f64
}

fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
    }
    sxy / (sxx * syy).sqrt()
}

// butter(3, 0.1)
const B: [f64; 4] = [
    0.0028981946337214063,
    0.008694583901164219,
    0.008694583901164219,
    0.0028981946337214063,
];
const A: [f64; 4] = [
    1.0,
    -2.3740947437093502,
    1.9293556690912176,
    -0.5320753683120915,
];

// filtfilt(B, A, x) for x[i] = sin(0.7 i) + 0.05 i, i in 0..30, computed
// independently from the reflection and steady-state seed formulas.
const PINNED: [f64; 30] = [
    -0.007604200554574187,
    0.04205628695296964,
    0.09369108251040463,
    0.14545801009051937,
    0.19683628988099816,
    0.24849379476071062,
    0.30155040178779446,
    0.356605893089671,
    0.4130108131233187,
    0.4687452251388093,
    0.5209869310349001,
    0.5671304066317382,
    0.6058103978706989,
    0.637486249428188,
    0.6643522366601726,
    0.6896555199306206,
    0.716776490156602,
    0.748526352277459,
    0.7869957023479,
    0.8340021456178647,
    0.8918695486755057,
    0.9640763437686601,
    1.0553302653041596,
    1.1708572502596706,
    1.3150309345076387,
    1.4897648222832516,
    1.6932120061538485,
    1.9192197063806056,
    2.1577242800941927,
    2.395979737130482,
];

fn pinned_input() -> Array1<f64> {
    (0..30).map(|i| (0.7 * i as f64).sin() + 0.05 * i as f64).collect()
}

fn assert_pinned(y: &Array1<f64>, tolerance: f64) {
    assert_eq!(y.len(), PINNED.len());
    for (i, (got, want)) in y.iter().zip(PINNED.iter()).enumerate() {
        assert!(
            (got - want).abs() < tolerance,
            "sample {i}: {got} vs {want}"
        );
    }
}

#[test]
fn short_signal_matches_pinned_values() {
    let y = filtfilt_1d(&B, &A, &pinned_input()).expect("filter");
    assert_pinned(&y, 1e-9);
}

#[test]
fn designed_coefficients_match_pinned_values() {
    let (b, a) = butterworth(3, &[0.1], Band::LowPass, 2.0).expect("design");
    assert_eq!((b.len(), a.len()), (4, 4));
    let y = filtfilt_1d(&b, &a, &pinned_input()).expect("filter");
    assert_pinned(&y, 1e-8);

    // 12 samples exceed the 9-sample reflection of a third-order design.
    let x = pinned_input().slice(s![..12]).to_owned();
    let designed = filtfilt_1d(&b, &a, &x).expect("designed");
    let constant = filtfilt_1d(&B, &A, &x).expect("constant");
    for (d, c) in designed.iter().zip(constant.iter()) {
        assert!((d - c).abs() < 1e-8, "{d} vs {c}");
    }
}

#[test]
fn output_shape_matches_input() {
    let (b, a) = butterworth(2, &[0.2], Band::HighPass, 2.0).expect("design");
    let mut rng = StdRng::seed_from_u64(1);
    for shape in [(50, 1), (1, 50), (64, 3)] {
        let x = Array2::from_shape_fn(shape, |_| rng.random_range(-1.0..1.0));
        let y = filtfilt(&b, &a, &x).expect("filter");
        assert_eq!(y.dim(), shape);
    }
}

#[test]
fn columns_are_filtered_independently() {
    let (b, a) = butterworth(4, &[0.3], Band::LowPass, 2.0).expect("design");
    let mut rng = StdRng::seed_from_u64(2);
    let col1 = noise(&mut rng, 120, 1.0);
    let col2 = noise(&mut rng, 120, 5.0);

    let mut x = Array2::zeros((120, 2));
    x.column_mut(0).assign(&col1);
    x.column_mut(1).assign(&col2);
    let y = filtfilt(&b, &a, &x).expect("matrix");

    let y1 = filtfilt_1d(&b, &a, &col1).expect("col1");
    let y2 = filtfilt_1d(&b, &a, &col2).expect("col2");
    assert_eq!(y.index_axis(Axis(1), 0), y1);
    assert_eq!(y.index_axis(Axis(1), 1), y2);
}

#[test]
fn row_and_column_coefficients_agree() {
    let (b, a) = butterworth(3, &[0.1], Band::LowPass, 2.0).expect("design");
    let mut rng = StdRng::seed_from_u64(3);
    let x = Array2::from_shape_fn((80, 2), |_| rng.random_range(-1.0..1.0));

    let b_row = Array2::from_shape_vec((1, b.len()), b.clone()).expect("row");
    let a_row = Array2::from_shape_vec((1, a.len()), a.clone()).expect("row");
    let b_col = b_row.t().to_owned();
    let a_col = a_row.t().to_owned();

    let from_rows = call(&[b_row, a_row, x.clone()]).expect("rows");
    let from_cols = call(&[b_col, a_col, x.clone()]).expect("cols");
    assert_eq!(from_rows, from_cols);
    assert_eq!(from_rows, filtfilt(&b, &a, &x).expect("direct"));
}

#[test]
fn butterworth_lowpass_smooths_random_signal() {
    let (b, a) = butterworth(3, &[0.1], Band::LowPass, 2.0).expect("design");
    let mut rng = StdRng::seed_from_u64(4);
    let r = noise(&mut rng, 200, 1.0);

    let y = filtfilt_1d(&b, &a, &r).expect("filter");
    assert_eq!(y.len(), r.len());
    assert!(
        mean_abs(&y) < mean_abs(&r),
        "filtered {} >= raw {}",
        mean_abs(&y),
        mean_abs(&r)
    );

    // Forward-backward on the reversed signal, reversed again, agrees
    // with the direct result away from the edges.
    let reversed = r.slice(s![..;-1]).to_owned();
    let y_rev = filtfilt_1d(&b, &a, &reversed).expect("filter");
    let y_rev = y_rev.slice(s![..;-1]);
    for i in 70..130 {
        assert!(
            (y[i] - y_rev[i]).abs() < 1e-3,
            "sample {i}: {} vs {}",
            y[i],
            y_rev[i]
        );
    }
}

#[test]
fn similar_bandpass_filters_agree() {
    let n = 600;
    let mut rng = StdRng::seed_from_u64(5);
    let jitter = noise(&mut rng, n, 0.2);
    let x: Array1<f64> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * 0.05 * i as f64).sin() + jitter[i])
        .collect();

    // No Chebyshev designer is available, so a resonator at the same
    // centre stands in as the second band-pass.
    let (b1, a1) = butterworth(2, &[0.08, 0.12], Band::BandPass, 2.0).expect("butterworth");
    let (b2, a2) = resonator(0.05, 2.5, 1.0).expect("resonator");
    let y1 = filtfilt_1d(&b1, &a1, &x).expect("filter");
    let y2 = filtfilt_1d(&b2, &a2, &x).expect("filter");

    let y1 = y1.slice(s![150..450]).to_vec();
    let y2 = y2.slice(s![150..450]).to_vec();
    let rho = correlation(&y1, &y2);
    assert!(rho > 0.99, "correlation {rho}");
}

#[test]
fn arity_is_checked_before_anything_else() {
    let x = Array2::<f64>::zeros((10, 1));
    for count in [0, 1, 2, 4, 5] {
        let args = vec![x.clone(); count];
        assert_eq!(
            call(&args).err(),
            Some(zerophase::FiltFiltError::Arguments(count))
        );
    }
}
