//! End-to-end scenarios with analytically derived expectations.

mod common;

use common::matrix;
use slicefinder::data::DenseMatrix;
use slicefinder::enumeration::{
    PriorRun, LatticeStats, SliceFinder, SliceFinderError, SliceFinderParams, SliceStats,
    Verbosity,
};

#[test]
fn uniform_data_never_scores_positive() {
    // Every row identical with identical error: no slice can stand out.
    let x = matrix(vec![vec![1, 1]; 4]);
    let errors = vec![1.0; 4];
    let params = SliceFinderParams {
        k: 2,
        min_sup: 2,
        alpha: 0.5,
        ..Default::default()
    };

    let out = SliceFinder::new(params).run(&x, &errors, None).unwrap();

    assert!(out.top_k_stats.iter().all(|s| s.score <= 0.0));
    assert!(out
        .lattice_stats
        .stats()
        .iter()
        .all(|s| s.score <= 1e-12));
}

#[test]
fn single_outlier_row_is_isolated() {
    let x = matrix(vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
    let errors = vec![10.0, 1.0, 1.0, 1.0];
    let params = SliceFinderParams {
        k: 1,
        min_sup: 1,
        alpha: 1.0,
        ..Default::default()
    };

    let out = SliceFinder::new(params).run(&x, &errors, None).unwrap();

    assert_eq!(out.top_k.num_rows(), 1);
    assert_eq!(out.top_k.row_slice(0), &[1, 1]);
    assert_eq!(out.top_k_stats[0].size, 1.0);
    assert_eq!(out.top_k_stats[0].total_error, 10.0);
    assert_eq!(out.top_k_stats[0].max_error, 10.0);
}

/// Dataset for the unchanged-slice pruning scenario: {f0=1, f1=1} holds on
/// exactly two rows (below the support of 3) while both of its parents meet
/// support comfortably.
fn unchanged_pruning_dataset() -> (DenseMatrix<u32>, Vec<f64>) {
    let x = matrix(vec![
        vec![1, 1],
        vec![1, 1],
        vec![1, 2],
        vec![1, 2],
        vec![2, 1],
        vec![2, 1],
        vec![2, 2],
        vec![2, 2],
    ]);
    let errors = vec![20.0, 20.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    (x, errors)
}

#[test]
fn unchanged_small_slices_skip_reenumeration() {
    let (x, errors) = unchanged_pruning_dataset();
    let params = SliceFinderParams {
        k: 2,
        min_sup: 3,
        alpha: 1.0,
        verbosity: Verbosity::Info,
        ..Default::default()
    };

    // First run enumerates {f0=1, f1=1} (upper-bound size 4) and records its
    // measured size 2 in the lattice.
    let first = SliceFinder::new(params.clone()).run(&x, &errors, None).unwrap();
    let level2 = first.lattice_stats.level_rows(2);
    assert_eq!(level2.len(), 1);
    assert_eq!(first.lattice_stats.stats()[level2.start].size, 2.0);

    // Added rows never touch {f0=1, f1=1}.
    let added = matrix(vec![vec![2, 2], vec![2, 2]]);
    let added_e = vec![1.0, 1.0];

    let incremental = SliceFinder::new(params.clone())
        .run(&added, &added_e, Some(&first.into_prior()))
        .unwrap();

    // A monolithic run over the combined data re-enumerates the slice ...
    let combined = matrix(vec![
        vec![1, 1],
        vec![1, 1],
        vec![1, 2],
        vec![1, 2],
        vec![2, 1],
        vec![2, 1],
        vec![2, 2],
        vec![2, 2],
        vec![2, 2],
        vec![2, 2],
    ]);
    let combined_e = vec![20.0, 20.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    let monolithic = SliceFinder::new(params).run(&combined, &combined_e, None).unwrap();

    let mono_level2 = monolithic
        .debug
        .iter()
        .find(|d| d.level == 2)
        .expect("monolithic run reaches level 2");
    assert_eq!(mono_level2.enumerated, 1);

    // ... while the incremental run prunes it before evaluation: its prior
    // size was below support and no added row changed that.
    assert!(incremental.debug.iter().all(|d| d.level != 2));

    // The pruning is lossless: both runs retain the same top slices.
    assert_eq!(incremental.top_k, monolithic.top_k);
    for (a, b) in incremental
        .top_k_stats
        .iter()
        .zip(monolithic.top_k_stats.iter())
    {
        slicefinder::assert_approx_eq_f64!(a.score, b.score, 1e-12);
    }
}

#[test]
fn prior_lattice_without_params_is_rejected() {
    let added = matrix(vec![vec![1, 1]]);
    let prior = PriorRun {
        lattice: matrix(vec![vec![1, 0]]),
        lattice_stats: {
            let mut rl = LatticeStats::new();
            rl.push_level(&[SliceStats {
                score: 0.5,
                total_error: 2.0,
                max_error: 1.0,
                size: 2.0,
            }]);
            rl
        },
        top_k: DenseMatrix::empty(2),
        top_k_stats: Vec::new(),
        old_x: matrix(vec![vec![1, 1], vec![1, 2]]),
        old_e: vec![1.0, 1.0],
        params: None,
    };

    let result = SliceFinder::new(SliceFinderParams::default()).run(&added, &[1.0], Some(&prior));
    assert!(matches!(
        result,
        Err(SliceFinderError::MissingPriorParams)
    ));
}

#[test]
fn max_level_caps_the_lattice() {
    // All eight combinations of three binary features, with the error mass
    // on the single row {f0=1, f1=1, f2=1}.
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for a in 1..=2u32 {
        for b in 1..=2u32 {
            for c in 1..=2u32 {
                rows.push(vec![a, b, c]);
                errors.push(if (a, b, c) == (1, 1, 1) { 30.0 } else { 1.0 });
            }
        }
    }
    let x = matrix(rows);

    let unlimited = SliceFinderParams {
        k: 4,
        min_sup: 1,
        alpha: 1.0,
        max_level: 0,
        ..Default::default()
    };
    let capped = SliceFinderParams {
        max_level: 2,
        ..unlimited.clone()
    };

    let deep = SliceFinder::new(unlimited).run(&x, &errors, None).unwrap();
    assert_eq!(deep.lattice_stats.num_levels(), 3);
    assert_eq!(deep.top_k.row_slice(0), &[1, 1, 1]);

    let shallow = SliceFinder::new(capped).run(&x, &errors, None).unwrap();
    assert_eq!(shallow.lattice_stats.num_levels(), 2);
    for i in 0..shallow.lattice.num_rows() {
        let predicates = shallow
            .lattice
            .row_slice(i)
            .iter()
            .filter(|&&v| v > 0)
            .count();
        assert!(predicates <= 2, "lattice row {} has {} predicates", i, predicates);
    }
}
