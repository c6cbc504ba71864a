//! End-to-end checks of the K-best search against brute-force enumeration.

use proptest::prelude::*;
use std::collections::HashSet;
use u_tour::heldkarp::{
    extract_top_k, solve, KBestConfig, KBestRunner, RankedTour, TieBreak, TourStatus,
};
use u_tour::matrix::{CostMatrix, LocationMatrix};
use u_tour::report::{path_total, TourReport};

/// Every finite tour from `start`, cheapest first.
fn brute_force(m: &CostMatrix, start: usize) -> Vec<(f64, Vec<usize>)> {
    let mut others: Vec<usize> = (0..m.size()).filter(|&i| i != start).collect();
    let mut tours = Vec::new();
    permute(&mut others, 0, &mut |perm: &[usize]| {
        let mut nodes = Vec::with_capacity(perm.len() + 2);
        nodes.push(start);
        nodes.extend_from_slice(perm);
        nodes.push(start);
        let cost = m.path_cost(&nodes);
        if cost.is_finite() {
            tours.push((cost, nodes));
        }
    });
    tours.sort_by(|a, b| a.0.total_cmp(&b.0));
    tours
}

fn permute<F: FnMut(&[usize])>(items: &mut [usize], i: usize, visit: &mut F) {
    if i == items.len() {
        visit(items);
        return;
    }
    for j in i..items.len() {
        items.swap(i, j);
        permute(items, i + 1, visit);
        items.swap(i, j);
    }
}

fn check_tour(m: &CostMatrix, start: usize, tour: &RankedTour) {
    let n = m.size();
    assert_eq!(tour.nodes.len(), n + 1);
    assert_eq!(tour.nodes[0], start);
    assert_eq!(tour.nodes[n], start);
    assert_eq!(tour.nodes.iter().filter(|&&v| v == start).count(), 2);
    let inner: HashSet<usize> = tour.nodes[1..n].iter().copied().collect();
    assert_eq!(inner.len(), n - 1);
    assert!((path_total(m, &tour.nodes) - tour.total_cost).abs() < 1e-9);
}

fn stations() -> LocationMatrix {
    let names = ["A", "B", "C", "D"].map(String::from).to_vec();
    let w = [
        [0.0, 1.0, 2.0, 3.0],
        [1.0, 0.0, 1.0, 2.0],
        [2.0, 1.0, 0.0, 1.0],
        [3.0, 2.0, 1.0, 0.0],
    ];
    let rows: Vec<Vec<Option<f64>>> = w
        .iter()
        .map(|r| r.iter().map(|&v| Some(v)).collect())
        .collect();
    LocationMatrix::new(names, rows).with_metadata("metric", "weighted")
}

#[test]
fn test_four_station_scenario_matches_brute_force() {
    let locations = stations();
    let m = locations.cost_matrix().unwrap();
    let config = KBestConfig::default().with_k(3);
    let result = KBestRunner::run_named(&locations, "A", &config).unwrap();

    let expected = brute_force(&m, 0);
    assert_eq!(expected.len(), 6);
    assert_eq!(result.status, TourStatus::Complete);
    let costs: Vec<f64> = result.tours.iter().map(|t| t.total_cost).collect();
    let expected_costs: Vec<f64> = expected.iter().take(3).map(|t| t.0).collect();
    assert_eq!(costs, expected_costs);

    let all: HashSet<Vec<usize>> = expected.into_iter().map(|t| t.1).collect();
    for tour in &result.tours {
        check_tour(&m, 0, tour);
        assert!(all.contains(&tour.nodes));
    }
}

#[test]
fn test_k_beyond_tour_count() {
    let m = stations().cost_matrix().unwrap();
    let result = KBestRunner::run(&m, 2, &KBestConfig::default().with_k(100)).unwrap();
    assert_eq!(result.status, TourStatus::Partial);
    assert_eq!(result.tours.len(), brute_force(&m, 2).len());
}

#[test]
fn test_missing_edge_makes_instance_infeasible() {
    // Star around A: B, C, D only connect to A, so no tour can pass through all.
    let mut rows = vec![vec![None; 4]; 4];
    for j in 1..4 {
        rows[0][j] = Some(1.0);
        rows[j][0] = Some(1.0);
    }
    let m = CostMatrix::from_optional_rows(&rows).unwrap();
    assert!(brute_force(&m, 0).is_empty());

    let result = KBestRunner::run(&m, 0, &KBestConfig::default()).unwrap();
    assert_eq!(result.status, TourStatus::Infeasible);
    assert!(result.tours.is_empty());
}

#[test]
fn test_two_locations() {
    let m = CostMatrix::from_rows(&[[0.0, 7.0], [3.0, 0.0]]).unwrap();
    for k in [1, 3] {
        let result = KBestRunner::run(&m, 0, &KBestConfig::default().with_k(k)).unwrap();
        assert_eq!(result.tours.len(), 1);
        assert_eq!(result.tours[0].nodes, vec![0, 1, 0]);
        assert_eq!(result.tours[0].total_cost, 10.0);
    }
}

#[test]
fn test_reports_for_auxiliary_matrices() {
    let objective = stations();
    let mut time = stations();
    time.matrix = (0..4)
        .map(|i| (0..4).map(|j| Some(10.0 * (i + j) as f64)).collect())
        .collect();

    let result = KBestRunner::run_named(&objective, "A", &KBestConfig::default()).unwrap();
    let reports = TourReport::build_all(&objective, &result, &[("time", &time)]).unwrap();
    let time_matrix = time.cost_matrix().unwrap();
    for (report, tour) in reports.iter().zip(&result.tours) {
        assert_eq!(report.rank, tour.rank);
        assert_eq!(report.total("time"), Some(path_total(&time_matrix, &tour.nodes)));
        assert!(report.route.starts_with("A -> "));
    }
}

fn instance() -> impl Strategy<Value = (Vec<Vec<Option<f64>>>, usize, usize)> {
    (2usize..=6).prop_flat_map(|n| {
        let cell = prop::option::weighted(0.85, (-5i32..20).prop_map(f64::from));
        (
            prop::collection::vec(prop::collection::vec(cell, n), n),
            0..n,
            1usize..=8,
        )
    })
}

/// Few distinct costs, so equal-cost tours are common.
fn tied_instance() -> impl Strategy<Value = (Vec<Vec<Option<f64>>>, usize, usize)> {
    (2usize..=6).prop_flat_map(|n| {
        let cell = prop::option::weighted(0.9, (0i32..3).prop_map(f64::from));
        (
            prop::collection::vec(prop::collection::vec(cell, n), n),
            0..n,
            1usize..=8,
        )
    })
}

proptest! {
    #[test]
    fn prop_top_k_costs_match_brute_force((rows, start, k) in instance()) {
        let m = CostMatrix::from_optional_rows(&rows).unwrap();
        let expected = brute_force(&m, start);
        let config = KBestConfig::default().with_k(k);
        let result = KBestRunner::run(&m, start, &config).unwrap();

        let want: Vec<f64> = expected.iter().take(k).map(|t| t.0).collect();
        let got: Vec<f64> = result.tours.iter().map(|t| t.total_cost).collect();
        prop_assert_eq!(got, want);

        let status = if expected.is_empty() {
            TourStatus::Infeasible
        } else if expected.len() < k {
            TourStatus::Partial
        } else {
            TourStatus::Complete
        };
        prop_assert_eq!(result.status, status);

        let mut seen = HashSet::new();
        for (i, tour) in result.tours.iter().enumerate() {
            check_tour(&m, start, tour);
            prop_assert_eq!(tour.rank, i + 1);
            prop_assert!(seen.insert(tour.nodes.clone()));
        }
        for w in result.tours.windows(2) {
            prop_assert!(w[0].total_cost <= w[1].total_cost);
        }
    }

    #[test]
    fn prop_lexicographic_ties_are_reproducible((rows, start, k) in instance()) {
        let m = CostMatrix::from_optional_rows(&rows).unwrap();
        let a = solve(&m, start, k, TieBreak::Lexicographic).unwrap();
        let b = solve(&m, start, k, TieBreak::Lexicographic).unwrap();
        let first = extract_top_k(&a);
        let second = extract_top_k(&b);
        prop_assert_eq!(&first, &second);
        for w in first.windows(2) {
            prop_assert!(
                w[0].cost() < w[1].cost() || w[0].nodes() < w[1].nodes(),
                "ties must be ordered by node sequence"
            );
        }
    }

    #[test]
    fn prop_lexicographic_matches_sorted_enumeration((rows, start, k) in tied_instance()) {
        let m = CostMatrix::from_optional_rows(&rows).unwrap();
        let mut expected = brute_force(&m, start);
        expected.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        expected.truncate(k);

        let config = KBestConfig::default()
            .with_k(k)
            .with_tie_break(TieBreak::Lexicographic);
        let result = KBestRunner::run(&m, start, &config).unwrap();
        let got: Vec<(f64, Vec<usize>)> = result
            .tours
            .into_iter()
            .map(|t| (t.total_cost, t.nodes))
            .collect();
        prop_assert_eq!(got, expected);
    }
}
