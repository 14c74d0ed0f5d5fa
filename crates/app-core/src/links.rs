//! Line segments between nearby particles, rebuilt from scratch every frame.

use crate::constants::{GRID_MIN_POINTS, LINK_DISTANCE};
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

/// Unordered pair of point indices, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link {
    pub a: usize,
    pub b: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Pick by point count.
    Auto,
    Pairwise,
    Grid,
}

type Cell = (i32, i32, i32);

pub struct LinkBuilder {
    threshold: f32,
    strategy: LinkStrategy,
    links: Vec<Link>,
    // flat endpoint buffers: two entries per link
    segment_positions: Vec<Vec3>,
    segment_colors: Vec<Vec3>,
    grid: FnvHashMap<Cell, SmallVec<[usize; 8]>>,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(LINK_DISTANCE)
    }
}

impl LinkBuilder {
    pub fn new(threshold: f32) -> Self {
        Self::with_strategy(threshold, LinkStrategy::Auto)
    }

    pub fn with_strategy(threshold: f32, strategy: LinkStrategy) -> Self {
        Self {
            threshold,
            strategy,
            links: Vec::new(),
            segment_positions: Vec::new(),
            segment_colors: Vec::new(),
            grid: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[inline]
    pub fn segment_positions(&self) -> &[Vec3] {
        &self.segment_positions
    }

    #[inline]
    pub fn segment_colors(&self) -> &[Vec3] {
        &self.segment_colors
    }

    /// Recompute every pair closer than the threshold (strict, 3D Euclidean).
    /// Links come out sorted by `(a, b)` whichever strategy runs.
    pub fn rebuild(&mut self, positions: &[Vec3], colors: &[Vec3]) -> &[Link] {
        debug_assert_eq!(positions.len(), colors.len());
        self.links.clear();
        let use_grid = match self.strategy {
            LinkStrategy::Pairwise => false,
            LinkStrategy::Grid => true,
            LinkStrategy::Auto => positions.len() > GRID_MIN_POINTS,
        };
        if self.threshold > 0.0 {
            if use_grid {
                self.scan_grid(positions);
            } else {
                self.scan_pairwise(positions);
            }
        }

        self.segment_positions.clear();
        self.segment_colors.clear();
        for link in &self.links {
            self.segment_positions.push(positions[link.a]);
            self.segment_positions.push(positions[link.b]);
            self.segment_colors.push(colors[link.a]);
            self.segment_colors.push(colors[link.b]);
        }
        &self.links
    }

    fn scan_pairwise(&mut self, positions: &[Vec3]) {
        for (i, pi) in positions.iter().enumerate() {
            for (j, pj) in positions.iter().enumerate().skip(i + 1) {
                if pi.distance(*pj) < self.threshold {
                    self.links.push(Link { a: i, b: j });
                }
            }
        }
    }

    fn scan_grid(&mut self, positions: &[Vec3]) {
        self.grid.clear();
        let cell_size = self.threshold;
        for (i, p) in positions.iter().enumerate() {
            self.grid.entry(cell_of(*p, cell_size)).or_default().push(i);
        }
        for (i, pi) in positions.iter().enumerate() {
            let (cx, cy, cz) = cell_of(*pi, cell_size);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(bucket) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                            continue;
                        };
                        for &j in bucket {
                            if j > i && pi.distance(positions[j]) < self.threshold {
                                self.links.push(Link { a: i, b: j });
                            }
                        }
                    }
                }
            }
        }
        self.links.sort_unstable();
    }
}

#[inline]
fn cell_of(p: Vec3, cell_size: f32) -> Cell {
    (
        (p.x / cell_size).floor() as i32,
        (p.y / cell_size).floor() as i32,
        (p.z / cell_size).floor() as i32,
    )
}
