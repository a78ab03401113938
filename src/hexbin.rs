//! # Spatial Hexbin Aggregator
//!
//! Partitions the latitude/longitude plane into a hexagonal grid and counts
//! geolocated subset rows per cell. The grid is sized so `resolution`
//! hexagons span the longitude extent of the current subset; the extent is
//! recomputed from the subset's bounding box on every call, so cell geometry
//! follows the filter.
//!
//! Hexagon centers form a triangular lattice, decomposed here into two
//! rectangular sublattices offset by half a cell in each axis. A point is
//! assigned to whichever sublattice center is nearer under the lattice
//! metric `du^2 + 3 dv^2` (the factor 3 accounts for the sqrt(3) vertical
//! spacing).

use crate::dataset::Dataset;
use crate::filter::Subset;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one hexagonal cell.
///
/// Stable across calls with identical inputs: the same subset and
/// resolution always produce the same ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellId {
    /// 0 for the base sublattice, 1 for the half-offset sublattice.
    pub lattice: u8,
    /// Cell column within the sublattice.
    pub ix: i32,
    /// Cell row within the sublattice.
    pub iy: i32,
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}:{}:{}", self.lattice, self.ix, self.iy)
    }
}

/// One occupied hexagonal cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    pub id: CellId,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub count: u64,
}

/// Aggregate geolocated subset rows into hexagonal cells.
///
/// Cells occupied by fewer than `min_count` rows are dropped. Rows without
/// both coordinates are skipped. An empty or non-geolocated subset returns
/// an empty collection, never an error. Output is sorted by cell id; the
/// renderer consumes it as an unordered point cloud, the ordering exists
/// for reproducibility.
pub fn hexbin(dataset: &Dataset, subset: &Subset, resolution: u32, min_count: u64) -> Vec<HexCell> {
    let points: Vec<(f64, f64)> = subset
        .iter()
        .filter_map(|id| dataset.row(*id).geolocated())
        .collect();
    if points.is_empty() {
        return Vec::new();
    }

    let mut lon_min = f64::INFINITY;
    let mut lon_max = f64::NEG_INFINITY;
    let mut lat_min = f64::INFINITY;
    for (lat, lon) in &points {
        lon_min = lon_min.min(*lon);
        lon_max = lon_max.max(*lon);
        lat_min = lat_min.min(*lat);
    }

    let dx = (lon_max - lon_min) / resolution.max(1) as f64;
    if dx <= 0.0 {
        // Zero longitude extent: every point shares one column, so the grid
        // degenerates to a single cell at the points' mean position.
        return single_cell(&points, min_count);
    }
    let dy = dx * 3f64.sqrt();

    let mut cells: FxHashMap<CellId, u64> = FxHashMap::default();
    for (lat, lon) in &points {
        let u = (lon - lon_min) / dx;
        let v = (lat - lat_min) / dy;

        let base_ix = u.round();
        let base_iy = v.round();
        let base_dist = (u - base_ix).powi(2) + 3.0 * (v - base_iy).powi(2);

        let off_ix = (u - 0.5).round();
        let off_iy = (v - 0.5).round();
        let off_dist = (u - 0.5 - off_ix).powi(2) + 3.0 * (v - 0.5 - off_iy).powi(2);

        let id = if base_dist <= off_dist {
            CellId {
                lattice: 0,
                ix: base_ix as i32,
                iy: base_iy as i32,
            }
        } else {
            CellId {
                lattice: 1,
                ix: off_ix as i32,
                iy: off_iy as i32,
            }
        };
        *cells.entry(id).or_insert(0) += 1;
    }

    let mut out: Vec<HexCell> = cells
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(id, count)| {
            let (centroid_lon, centroid_lat) = match id.lattice {
                0 => (
                    lon_min + id.ix as f64 * dx,
                    lat_min + id.iy as f64 * dy,
                ),
                _ => (
                    lon_min + (id.ix as f64 + 0.5) * dx,
                    lat_min + (id.iy as f64 + 0.5) * dy,
                ),
            };
            HexCell {
                id,
                centroid_lat,
                centroid_lon,
                count,
            }
        })
        .collect();
    out.sort_by_key(|cell| cell.id);
    out
}

fn single_cell(points: &[(f64, f64)], min_count: u64) -> Vec<HexCell> {
    let count = points.len() as u64;
    if count < min_count {
        return Vec::new();
    }
    let n = points.len() as f64;
    let centroid_lat = points.iter().map(|(lat, _)| lat).sum::<f64>() / n;
    let centroid_lon = points.iter().map(|(_, lon)| lon).sum::<f64>() / n;
    vec![HexCell {
        id: CellId {
            lattice: 0,
            ix: 0,
            iy: 0,
        },
        centroid_lat,
        centroid_lon,
        count,
    }]
}
