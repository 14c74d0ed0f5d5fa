// Host-side tests for proximity links between particles.

use app_core::{Link, LinkBuilder, LinkStrategy, LINK_DISTANCE};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn colors_for(positions: &[Vec3]) -> Vec<Vec3> {
    (0..positions.len())
        .map(|i| Vec3::splat(i as f32 / positions.len() as f32))
        .collect()
}

fn random_cloud(n: usize, extent: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

#[test]
fn only_close_pairs_are_linked() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.5, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 5.0, 0.0),
    ];
    let colors = colors_for(&positions);
    let mut builder = LinkBuilder::default();
    let links = builder.rebuild(&positions, &colors).to_vec();
    assert_eq!(links, vec![Link { a: 0, b: 1 }]);

    assert_eq!(builder.segment_positions(), &[positions[0], positions[1]]);
    assert_eq!(builder.segment_colors(), &[colors[0], colors[1]]);
}

#[test]
fn threshold_is_strict() {
    let positions = vec![Vec3::ZERO, Vec3::new(LINK_DISTANCE, 0.0, 0.0)];
    let colors = colors_for(&positions);
    let mut builder = LinkBuilder::default();
    assert!(builder.rebuild(&positions, &colors).is_empty());
    assert!(builder.segment_positions().is_empty());
}

#[test]
fn distance_is_three_dimensional() {
    // close in x/y, far apart in depth
    let positions = vec![Vec3::ZERO, Vec3::new(0.5, 0.5, 3.0)];
    let colors = colors_for(&positions);
    let mut builder = LinkBuilder::default();
    assert!(builder.rebuild(&positions, &colors).is_empty());
}

#[test]
fn every_close_pair_is_considered() {
    // a tight cluster links all 6 pairs, none skipped by index
    let positions = vec![
        Vec3::ZERO,
        Vec3::new(0.3, 0.0, 0.0),
        Vec3::new(0.0, 0.3, 0.0),
        Vec3::new(0.0, 0.0, 0.3),
    ];
    let colors = colors_for(&positions);
    let mut builder = LinkBuilder::default();
    assert_eq!(builder.rebuild(&positions, &colors).len(), 6);
    assert_eq!(builder.segment_positions().len(), 12);
}

#[test]
fn rebuild_replaces_previous_links() {
    let mut builder = LinkBuilder::default();
    let close = vec![Vec3::ZERO, Vec3::X];
    let apart = vec![Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0)];
    assert_eq!(builder.rebuild(&close, &colors_for(&close)).len(), 1);
    assert!(builder.rebuild(&apart, &colors_for(&apart)).is_empty());
    assert!(builder.segment_colors().is_empty());
}

#[test]
fn grid_scan_matches_pairwise_scan() {
    for (n, seed) in [(120, 1), (600, 2), (1500, 3)] {
        let positions = random_cloud(n, 12.0, seed);
        let colors = colors_for(&positions);
        let mut pairwise = LinkBuilder::with_strategy(LINK_DISTANCE, LinkStrategy::Pairwise);
        let mut grid = LinkBuilder::with_strategy(LINK_DISTANCE, LinkStrategy::Grid);
        let expected = pairwise.rebuild(&positions, &colors).to_vec();
        let actual = grid.rebuild(&positions, &colors).to_vec();
        assert!(!expected.is_empty(), "n={n}");
        assert_eq!(actual, expected, "n={n}");
        assert_eq!(grid.segment_positions(), pairwise.segment_positions());
    }
}

#[test]
fn grid_handles_negative_coordinates_at_cell_edges() {
    let positions = vec![Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0)];
    let colors = colors_for(&positions);
    let mut grid = LinkBuilder::with_strategy(LINK_DISTANCE, LinkStrategy::Grid);
    assert_eq!(grid.rebuild(&positions, &colors), &[Link { a: 0, b: 1 }]);
}

#[test]
fn zero_threshold_links_nothing() {
    let positions = vec![Vec3::ZERO, Vec3::ZERO];
    let mut builder = LinkBuilder::new(0.0);
    assert!(builder.rebuild(&positions, &colors_for(&positions)).is_empty());
}
