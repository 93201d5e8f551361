//! Path joining - stitch recorded paths into continuous contours.
//!
//! Every tile draws its own short paths, and neighbouring tiles meet at
//! shared points. Stroking those pieces one at a time leaves visible seams
//! (and round caps pile up at every joint), so before rendering we join any
//! paths whose endpoints coincide into one longer path.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

use crate::geometry::{EPSILON, Line, Point};
use crate::tiler::Path;

/// Configuration for path joining.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Per-axis distance below which two endpoints are the same point.
    /// Default: [`EPSILON`], the same test as `Point::is_close`.
    pub tolerance: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { tolerance: EPSILON }
    }
}

impl ChainConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

/// Which end of a path an index entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum End {
    Start,
    Finish,
}

/// A matching endpoint found during a walk.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    end: End,
    exact: bool,
    distance: f64,
}

impl Candidate {
    /// Exact matches first, then nearest, then input order.
    fn cmp_preference(&self, other: &Candidate) -> Ordering {
        other
            .exact
            .cmp(&self.exact)
            .then_with(|| self.distance.total_cmp(&other.distance))
            .then_with(|| self.index.cmp(&other.index))
            .then_with(|| self.end.cmp(&other.end))
    }
}

/// Spatial hash of every path endpoint, in cells one tolerance wide.
struct EndpointIndex {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<(usize, End)>>,
}

impl EndpointIndex {
    fn build(paths: &[Path], cell_size: f64) -> Self {
        let mut cells: HashMap<(i64, i64), Vec<(usize, End)>> = HashMap::new();
        for (i, path) in paths.iter().enumerate() {
            cells.entry(path.start().cell(cell_size)).or_default().push((i, End::Start));
            cells.entry(path.end().cell(cell_size)).or_default().push((i, End::Finish));
        }
        Self { cell_size, cells }
    }

    /// The preferred unused endpoint near `at`, if any.
    ///
    /// Points within tolerance on both axes can only be one cell apart, so
    /// the 3x3 block around `at` holds every candidate.
    fn best_match(&self, at: Point, paths: &[Path], used: &[bool], tolerance: f64) -> Option<Candidate> {
        let (cx, cy) = at.cell(self.cell_size);
        let mut best: Option<Candidate> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                // Cells saturate at the i64 range for huge coordinates.
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                let Some(entries) = self.cells.get(&key) else {
                    continue;
                };
                for &(index, end) in entries {
                    if used[index] {
                        continue;
                    }
                    let p = match end {
                        End::Start => paths[index].start(),
                        End::Finish => paths[index].end(),
                    };
                    if (p.x - at.x).abs() >= tolerance || (p.y - at.y).abs() >= tolerance {
                        continue;
                    }
                    let candidate = Candidate {
                        index,
                        end,
                        exact: p.x.to_bits() == at.x.to_bits() && p.y.to_bits() == at.y.to_bits(),
                        distance: p.distance(at),
                    };
                    best = match best {
                        Some(b) if b.cmp_preference(&candidate) != Ordering::Greater => Some(b),
                        _ => Some(candidate),
                    };
                }
            }
        }

        best
    }
}

fn is_closed(chain: &[Point], tolerance: f64) -> bool {
    match (chain.first(), chain.last()) {
        (Some(first), Some(last)) if chain.len() > 2 => {
            (first.x - last.x).abs() < tolerance && (first.y - last.y).abs() < tolerance
        }
        _ => false,
    }
}

/// Join paths that meet end to end, using the default tolerance.
pub fn combine_paths(paths: Vec<Path>) -> Vec<Path> {
    combine_paths_with(paths, &ChainConfig::default())
}

/// Join paths that meet end to end.
///
/// # Algorithm
///
/// 1. Hash every path endpoint into a grid of tolerance-sized cells
/// 2. Take the first unused path as the start of a new chain
/// 3. Extend the chain's end with any unused path that has an endpoint
///    there, reversing that path if it meets us at its end
/// 4. Reverse the chain and do the same from its other end
/// 5. Stop early if the chain closes on itself
///
/// Matched joints keep the chain's coordinate; the other path's copy of
/// the point is dropped. Every input path ends up in exactly one output
/// path, and paths with no neighbours come out unchanged.
///
/// # Performance
///
/// O(n) average case with spatial hashing, O(n²) worst case if all
/// endpoints hash to the same cell.
pub fn combine_paths_with(paths: Vec<Path>, config: &ChainConfig) -> Vec<Path> {
    if paths.is_empty() {
        return Vec::new();
    }

    let tolerance = config.tolerance;
    let index = EndpointIndex::build(&paths, tolerance.max(1e-12));
    let mut used = vec![false; paths.len()];
    let mut combined = Vec::new();

    for seed in 0..paths.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;

        let mut chain = paths[seed].points().to_vec();
        extend_chain(&mut chain, &index, &paths, &mut used, tolerance);
        if !is_closed(&chain, tolerance) {
            chain.reverse();
            extend_chain(&mut chain, &index, &paths, &mut used, tolerance);
            chain.reverse();
        }

        combined.push(Path::new(chain));
    }

    debug!("combined {} paths into {}", paths.len(), combined.len());
    combined
}

/// Grow `chain` from its last point until nothing more connects.
fn extend_chain(chain: &mut Vec<Point>, index: &EndpointIndex, paths: &[Path], used: &mut [bool], tolerance: f64) {
    while !is_closed(chain, tolerance) {
        let Some(&end) = chain.last() else { break };
        let Some(next) = index.best_match(end, paths, used, tolerance) else {
            break;
        };
        used[next.index] = true;

        let points = paths[next.index].points();
        match next.end {
            End::Start => chain.extend_from_slice(&points[1..]),
            End::Finish => chain.extend(points[..points.len() - 1].iter().rev()),
        }
    }
}

/// Flatten paths back into individual segments, skipping zero-length ones.
pub fn paths_to_lines(paths: &[Path]) -> Vec<Line> {
    paths
        .iter()
        .flat_map(|path| path.segments())
        .filter(|(a, b)| a != b)
        .map(|(a, b)| Line::new(a, b))
        .collect()
}

/// Statistics about a joining pass.
#[derive(Debug, Clone)]
pub struct ChainStats {
    /// Number of input paths
    pub input_paths: usize,
    /// Number of output paths
    pub output_paths: usize,
    /// Output paths that close on themselves
    pub closed_paths: usize,
    /// Average points per output path
    pub avg_path_length: f64,
    /// Longest output path (points)
    pub max_path_length: usize,
    /// Reduction ratio (1.0 - outputs/inputs)
    pub reduction_ratio: f64,
}

impl ChainStats {
    pub fn from_paths(input_count: usize, paths: &[Path]) -> Self {
        let output_paths = paths.len();
        let total_points: usize = paths.iter().map(|p| p.len()).sum();
        let max_path_length = paths.iter().map(|p| p.len()).max().unwrap_or(0);

        Self {
            input_paths: input_count,
            output_paths,
            closed_paths: paths.iter().filter(|p| p.is_closed()).count(),
            avg_path_length: if output_paths > 0 {
                total_points as f64 / output_paths as f64
            } else {
                0.0
            },
            max_path_length,
            reduction_ratio: if input_count > 0 {
                1.0 - (output_paths as f64 / input_count as f64)
            } else {
                0.0
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
