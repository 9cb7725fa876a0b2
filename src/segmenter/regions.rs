use itertools::Itertools;

use super::labeling::LabelGrid;

/// One maximal 4-connected group of same-cluster cells
pub(crate) struct Region {
    cells: Vec<(u32, u32)>,
}

impl Region {
    pub(crate) fn cells(&self) -> &[(u32, u32)] {
        &self.cells
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Topmost cell of the region, leftmost on ties; defines reading order
    pub(crate) fn anchor(&self) -> (u32, u32) {
        self.cells
            .iter()
            .copied()
            .min_by_key(|&(x, y)| (y, x))
            .unwrap_or((0, 0))
    }
}

/// Find every 4-connected region of cells carrying the given cluster id
/// with at least `min_size` cells
pub(crate) fn find_regions(grid: &LabelGrid, cluster_id: usize, min_size: usize) -> Vec<Region> {
    let mut visited = vec![false; grid.width() as usize * grid.height() as usize];
    let mut regions = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if visited[y as usize * grid.width() as usize + x as usize]
                || grid.get(x, y) != Some(cluster_id)
            {
                continue;
            }
            let region = flood_fill(grid, cluster_id, x, y, &mut visited);
            // Specks below the minimum size are dropped whole
            if region.len() >= min_size {
                regions.push(region);
            }
        }
    }
    regions
}

/// Collect one maximal region by walking 4-connected neighbors
///
/// Uses an explicit work stack: a region may span the entire grid, which
/// would overflow the call stack with recursive descent
fn flood_fill(
    grid: &LabelGrid,
    cluster_id: usize,
    x: u32,
    y: u32,
    visited: &mut [bool],
) -> Region {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut cells = Vec::new();
    let mut stack = vec![(x as i32, y as i32)];
    while let Some((cx, cy)) = stack.pop() {
        if cx < 0 || cx >= width || cy < 0 || cy >= height {
            continue;
        }
        let index = cy as usize * width as usize + cx as usize;
        if visited[index] || grid.get(cx as u32, cy as u32) != Some(cluster_id) {
            continue;
        }

        visited[index] = true;
        cells.push((cx as u32, cy as u32));

        let directions = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        for (dx, dy) in directions {
            stack.push((cx + dx, cy + dy));
        }
    }
    Region { cells }
}

/// Sort regions into reading order (top to bottom, then left to right)
pub(crate) fn sort_regions(regions: Vec<Region>) -> Vec<Region> {
    regions
        .into_iter()
        .sorted_by_key(|region| {
            let (x, y) = region.anchor();
            (y, x)
        })
        .collect()
}
