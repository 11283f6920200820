use std::collections::{BTreeSet, VecDeque};

use eframe_pixel_sheet::{CellRenderer, Grid, GridError, PixelColor, ToolType};

const RED: PixelColor = PixelColor::rgb(0xFF, 0, 0);
const GREEN: PixelColor = PixelColor::rgb(0, 0xFF, 0);
const BLUE: PixelColor = PixelColor::rgb(0, 0, 0xFF);

// Small deterministic generator so the property checks are reproducible.
fn pseudo_random_grid(width: usize, seed: u64) -> Grid {
    let palette = [PixelColor::Transparent, RED, GREEN];
    let mut state = seed;
    let colors = (0..width * width)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            palette[((state >> 33) % palette.len() as u64) as usize]
        })
        .collect();
    Grid::from_colors(width, width as f32 * 4.0, colors).unwrap()
}

// Counts cells handed to the renderer.
#[derive(Default)]
struct DrawCount(usize);

impl CellRenderer for DrawCount {
    fn render_cell(&mut self, _rect: egui::Rect, _color: PixelColor) {
        self.0 += 1;
    }
}

// Reference component computed breadth-first on a copy of the grid.
fn component(grid: &Grid, seed: usize) -> BTreeSet<usize> {
    let width = grid.width();
    let target = grid.color_at(seed).unwrap();
    let mut seen = BTreeSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    while let Some(index) = queue.pop_front() {
        let (row, col) = (index / width, index % width);
        let mut candidates = Vec::new();
        if col > 0 {
            candidates.push(index - 1);
        }
        if col + 1 < width {
            candidates.push(index + 1);
        }
        if row > 0 {
            candidates.push(index - width);
        }
        if row + 1 < width {
            candidates.push(index + width);
        }
        for next in candidates {
            if grid.color_at(next) == Some(target) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn test_fill_uniform_grid() {
    let mut grid = Grid::new(4, 64.0).unwrap();
    let changed = grid.flood_fill(0, RED).unwrap();

    assert_eq!(changed.len(), 16);
    assert!(grid.colors().all(|c| c == RED));
}

#[test]
fn test_fill_stops_at_different_color() {
    let mut grid = Grid::new(4, 64.0).unwrap();
    let island = grid.index_of(1, 1).unwrap();
    grid.paint(island, GREEN).unwrap();

    let seed = grid.index_of(0, 0).unwrap();
    let changed = grid.flood_fill(seed, RED).unwrap();

    assert_eq!(changed.len(), 15);
    assert_eq!(grid.color_at(island), Some(GREEN));
    assert_eq!(grid.colors().filter(|&c| c == RED).count(), 15);
}

#[test]
fn test_fill_does_not_cross_diagonals() {
    // R . .
    // . R .
    // . . R
    let mut grid = Grid::new(3, 3.0).unwrap();
    for i in [0, 4, 8] {
        grid.paint(i, RED).unwrap();
    }
    let changed = grid.flood_fill(0, BLUE).unwrap();
    assert_eq!(changed, vec![0]);
    assert_eq!(grid.color_at(4), Some(RED));
}

#[test]
fn test_fill_does_not_wrap_rows() {
    // Column 2 is a wall; the left region must not leak past it or wrap into the next row.
    let mut grid = Grid::new(4, 4.0).unwrap();
    for row in 0..4 {
        grid.paint(grid.index_of(row, 2).unwrap(), GREEN).unwrap();
    }
    grid.flood_fill(0, RED).unwrap();
    for row in 0..4 {
        assert_eq!(grid.color_at(grid.index_of(row, 0).unwrap()), Some(RED));
        assert_eq!(grid.color_at(grid.index_of(row, 1).unwrap()), Some(RED));
        assert_eq!(grid.color_at(grid.index_of(row, 3).unwrap()), Some(PixelColor::Transparent));
    }
}

#[test]
fn test_fill_with_same_color_is_noop() {
    let mut grid = Grid::new(4, 4.0).unwrap();
    grid.render_all(&mut DrawCount::default());
    let changed = grid.flood_fill(5, PixelColor::Transparent).unwrap();
    assert!(changed.is_empty());
    assert!(!grid.has_dirty());

    let mut redraws = DrawCount::default();
    grid.render_dirty(&mut redraws);
    assert_eq!(redraws.0, 0);
}

#[test]
fn test_fill_out_of_bounds_is_an_error() {
    let mut grid = Grid::new(4, 4.0).unwrap();
    assert_eq!(
        grid.flood_fill(16, RED),
        Err(GridError::OutOfBounds { index: 16, len: 16 })
    );
}

#[test]
fn test_fill_is_idempotent() {
    for seed in 0..20u64 {
        let mut grid = pseudo_random_grid(9, seed);
        let start = (seed as usize * 7) % grid.len();
        grid.flood_fill(start, BLUE).unwrap();
        let after_first = grid.clone();
        let second = grid.flood_fill(start, BLUE).unwrap();

        assert!(second.is_empty());
        assert!(grid.colors().eq(after_first.colors()));
    }
}

#[test]
fn test_fill_matches_connected_component() {
    for seed in 0..20u64 {
        let original = pseudo_random_grid(10, seed);
        let start = (seed as usize * 13) % original.len();
        let expected = component(&original, start);

        let mut grid = original.clone();
        let changed = grid.flood_fill(start, BLUE).unwrap();
        let changed_set: BTreeSet<usize> = changed.iter().copied().collect();

        assert_eq!(changed.len(), changed_set.len(), "an index was visited twice");
        assert_eq!(changed_set, expected);
        for index in 0..grid.len() {
            if !expected.contains(&index) {
                assert_eq!(grid.color_at(index), original.color_at(index));
            }
        }
    }
}

#[test]
fn test_fill_large_grid_without_recursion() {
    let mut grid = Grid::new(512, 512.0).unwrap();
    let changed = grid.flood_fill(0, RED).unwrap();
    assert_eq!(changed.len(), 512 * 512);
}

#[test]
fn test_apply_tool_bucket_through_coordinates() {
    let mut grid = Grid::new(4, 40.0).unwrap();
    grid.apply_tool(15.0, 15.0, ToolType::Pencil, GREEN).unwrap();
    let changed = grid.apply_tool(0.0, 0.0, ToolType::Bucket, RED).unwrap();
    assert_eq!(changed.len(), 15);
    assert!(matches!(
        grid.apply_tool(40.0, 0.0, ToolType::Bucket, RED),
        Err(GridError::PointOutside { .. })
    ));
}
