use crate::day::Day;
use ratatui::layout::{Position, Rect};

/// Number of columns in the calendar grid
pub(crate) const GRID_COLUMNS: u16 = 5;

/// Blank columns left between horizontally adjacent cells
const COLUMN_GAP: u16 = 1;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum GridItem {
    Logo,
    Day(Day),
}

/// An entry of the designer-authored layout table: what goes in the cell and
/// how many columns & rows it spans
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LayoutEntry {
    pub(crate) item: GridItem,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
}

impl LayoutEntry {
    const fn logo(cols: u16, rows: u16) -> LayoutEntry {
        LayoutEntry {
            item: GridItem::Logo,
            cols,
            rows,
        }
    }

    // Used in `static` context, so a bad day number fails the build
    const fn day(n: u8, cols: u16, rows: u16) -> LayoutEntry {
        match Day::new(n) {
            Some(d) => LayoutEntry {
                item: GridItem::Day(d),
                cols,
                rows,
            },
            None => panic!("layout table day out of range"),
        }
    }
}

/// The calendar's arrangement, in placement order
pub(crate) static DEFAULT_LAYOUT: &[LayoutEntry] = &[
    LayoutEntry::logo(2, 1),
    LayoutEntry::day(7, 1, 2),
    LayoutEntry::day(13, 1, 1),
    LayoutEntry::day(12, 1, 1),
    LayoutEntry::day(21, 2, 2),
    LayoutEntry::day(10, 1, 1),
    LayoutEntry::day(17, 1, 1),
    LayoutEntry::day(8, 2, 1),
    LayoutEntry::day(3, 1, 2),
    LayoutEntry::day(15, 2, 2),
    LayoutEntry::day(23, 1, 1),
    LayoutEntry::day(2, 1, 1),
    LayoutEntry::day(11, 2, 1),
    LayoutEntry::day(24, 1, 2),
    LayoutEntry::day(4, 2, 1),
    LayoutEntry::day(16, 2, 1),
    LayoutEntry::day(5, 3, 1),
    LayoutEntry::day(14, 2, 2),
    LayoutEntry::day(9, 2, 1),
    LayoutEntry::day(18, 1, 1),
    LayoutEntry::day(20, 2, 1),
    LayoutEntry::day(1, 1, 2),
    LayoutEntry::day(22, 2, 1),
    LayoutEntry::day(19, 2, 1),
    LayoutEntry::day(6, 2, 1),
];

/// A layout entry pinned to a grid position
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Placement {
    pub(crate) item: GridItem,
    pub(crate) col: u16,
    pub(crate) row: u16,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
}

impl Placement {
    fn col_end(&self) -> u16 {
        self.col + self.cols
    }

    fn row_end(&self) -> u16 {
        self.row + self.rows
    }

    fn overlaps_columns(&self, other: &Placement) -> bool {
        self.col < other.col_end() && other.col < self.col_end()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    placements: Vec<Placement>,
    rows: u16,
}

impl Grid {
    /// Places the entries row by row: each entry goes at the first position,
    /// at or after the end of the previously placed entry, where it fits
    /// within the columns without covering an earlier entry.  Positions
    /// skipped over are never revisited.
    pub(crate) fn place(entries: &[LayoutEntry]) -> Grid {
        let mut occupied: Vec<[bool; GRID_COLUMNS as usize]> = Vec::new();
        let mut placements = Vec::with_capacity(entries.len());
        let (mut row, mut col) = (0u16, 0u16);
        for entry in entries {
            let cols = entry.cols.clamp(1, GRID_COLUMNS);
            let rows = entry.rows.max(1);
            loop {
                if col + cols > GRID_COLUMNS {
                    row += 1;
                    col = 0;
                } else if is_free(&occupied, row, col, cols, rows) {
                    break;
                } else {
                    col += 1;
                }
            }
            for r in row..row + rows {
                let r = usize::from(r);
                if occupied.len() <= r {
                    occupied.resize(r + 1, [false; GRID_COLUMNS as usize]);
                }
                for c in col..col + cols {
                    occupied[r][usize::from(c)] = true;
                }
            }
            placements.push(Placement {
                item: entry.item,
                col,
                row,
                cols,
                rows,
            });
            col += cols;
        }
        let rows = u16::try_from(occupied.len()).unwrap_or(u16::MAX);
        Grid { placements, rows }
    }

    pub(crate) fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of grid rows used by the placed entries
    pub(crate) fn rows(&self) -> u16 {
        self.rows
    }

    pub(crate) fn get(&self, item: GridItem) -> Option<&Placement> {
        self.placements().iter().find(|p| p.item == item)
    }

    /// Returns the screen rectangle for each placed entry when the grid is
    /// stretched over `area`
    pub(crate) fn cell_areas(&self, area: Rect) -> impl Iterator<Item = (Placement, Rect)> + '_ {
        let rows = self.rows();
        self.placements
            .iter()
            .map(move |&p| (p, placement_area(p, area, rows)))
    }

    pub(crate) fn item_at(&self, area: Rect, x: u16, y: u16) -> Option<GridItem> {
        let pos = Position::new(x, y);
        self.cell_areas(area)
            .find(|(_, r)| r.contains(pos))
            .map(|(p, _)| p.item)
    }

    /// Finds the day cell one step from `from` in the given direction.  Left
    /// and right follow reading order; up and down move to the nearest day in
    /// an adjacent band of rows whose columns overlap `from`'s.
    pub(crate) fn neighbor(&self, from: Day, direction: Direction) -> Option<Day> {
        let here = self.get(GridItem::Day(from))?;
        let mut days = self
            .placements
            .iter()
            .filter(|p| matches!(p.item, GridItem::Day(_)))
            .copied()
            .collect::<Vec<_>>();
        days.sort_by_key(|p| (p.row, p.col));
        let target = match direction {
            Direction::Left => {
                let i = days.iter().position(|p| p == here)?;
                days.get(i.checked_sub(1)?).copied()
            }
            Direction::Right => {
                let i = days.iter().position(|p| p == here)?;
                days.get(i + 1).copied()
            }
            Direction::Up => days
                .iter()
                .filter(|p| p.row_end() <= here.row && p.overlaps_columns(here))
                .max_by_key(|p| (p.row_end(), std::cmp::Reverse(p.col)))
                .copied(),
            Direction::Down => days
                .iter()
                .filter(|p| p.row >= here.row_end() && p.overlaps_columns(here))
                .min_by_key(|p| (p.row, p.col))
                .copied(),
        };
        match target?.item {
            GridItem::Day(d) => Some(d),
            GridItem::Logo => None,
        }
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::place(DEFAULT_LAYOUT)
    }
}

fn is_free(
    occupied: &[[bool; GRID_COLUMNS as usize]],
    row: u16,
    col: u16,
    cols: u16,
    rows: u16,
) -> bool {
    (row..row + rows).all(|r| {
        occupied
            .get(usize::from(r))
            .is_none_or(|line| (col..col + cols).all(|c| !line[usize::from(c)]))
    })
}

/// Returns the offset of the `i`th of `parts` equal divisions of `len`
fn track_start(len: u16, parts: u16, i: u16) -> u16 {
    if parts == 0 {
        return 0;
    }
    let offset = u32::from(len) * u32::from(i) / u32::from(parts);
    u16::try_from(offset).unwrap_or(len)
}

fn placement_area(p: Placement, area: Rect, rows: u16) -> Rect {
    let x0 = track_start(area.width, GRID_COLUMNS, p.col);
    let x1 = track_start(area.width, GRID_COLUMNS, p.col_end());
    let y0 = track_start(area.height, rows, p.row);
    let y1 = track_start(area.height, rows, p.row_end());
    let mut width = x1.saturating_sub(x0);
    if p.col_end() < GRID_COLUMNS && width > COLUMN_GAP {
        width -= COLUMN_GAP;
    }
    Rect {
        x: area.x + x0,
        y: area.y + y0,
        width,
        height: y1.saturating_sub(y0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn test_default_layout_has_every_day_once() {
        let grid = Grid::default();
        assert_eq!(grid.placements().len(), 25);
        let logos = grid
            .placements()
            .iter()
            .filter(|p| p.item == GridItem::Logo)
            .count();
        assert_eq!(logos, 1);
        let days = grid
            .placements()
            .iter()
            .filter_map(|p| match p.item {
                GridItem::Day(d) => Some(d),
                GridItem::Logo => None,
            })
            .collect::<HashSet<_>>();
        assert_eq!(days, Day::all().collect::<HashSet<_>>());
    }

    #[test]
    fn test_default_layout_tiles_without_gaps() {
        let grid = Grid::default();
        assert_eq!(grid.rows(), 10);
        let mut seen = HashSet::new();
        for p in grid.placements() {
            assert!(p.col_end() <= GRID_COLUMNS, "{p:?} overflows");
            for r in p.row..p.row_end() {
                for c in p.col..p.col_end() {
                    assert!(seen.insert((r, c)), "{p:?} overlaps another cell");
                }
            }
        }
        assert_eq!(seen.len(), usize::from(GRID_COLUMNS * grid.rows()));
    }

    #[test]
    fn test_default_placements() {
        let grid = Grid::default();
        let logo = grid.get(GridItem::Logo).unwrap();
        assert_eq!((logo.row, logo.col, logo.cols, logo.rows), (0, 0, 2, 1));
        let p = grid.get(GridItem::Day(day(21))).unwrap();
        assert_eq!((p.row, p.col, p.cols, p.rows), (1, 0, 2, 2));
        let p = grid.get(GridItem::Day(day(5))).unwrap();
        assert_eq!((p.row, p.col, p.cols, p.rows), (6, 0, 3, 1));
        let p = grid.get(GridItem::Day(day(6))).unwrap();
        assert_eq!((p.row, p.col, p.cols, p.rows), (9, 3, 2, 1));
    }

    #[test]
    fn test_wide_entry_wraps() {
        let grid = Grid::place(&[
            LayoutEntry::day(1, 3, 1),
            LayoutEntry::day(2, 3, 1),
            LayoutEntry::day(3, 2, 1),
        ]);
        let positions = grid
            .placements()
            .iter()
            .map(|p| (p.row, p.col))
            .collect::<Vec<_>>();
        assert_eq!(positions, [(0, 0), (1, 0), (1, 3)]);
        assert_eq!(grid.rows(), 2);
    }

    #[test]
    fn test_skips_cells_covered_by_tall_entry() {
        let grid = Grid::place(&[
            LayoutEntry::day(1, 1, 2),
            LayoutEntry::day(2, 4, 1),
            LayoutEntry::day(3, 1, 1),
            LayoutEntry::day(4, 1, 1),
        ]);
        let positions = grid
            .placements()
            .iter()
            .map(|p| (p.row, p.col))
            .collect::<Vec<_>>();
        assert_eq!(positions, [(0, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_oversized_span_is_clamped() {
        let grid = Grid::place(&[LayoutEntry::day(1, 9, 0)]);
        let p = grid.placements()[0];
        assert_eq!((p.cols, p.rows), (GRID_COLUMNS, 1));
    }

    #[test]
    fn test_cell_areas_stretch_over_area() {
        let grid = Grid::default();
        let area = Rect::new(0, 1, 80, 30);
        let areas = grid.cell_areas(area).collect::<Vec<_>>();
        assert_eq!(areas.len(), 25);
        let (_, logo) = areas[0];
        assert_eq!(logo, Rect::new(0, 1, 31, 3));
        let (_, seven) = areas[1];
        assert_eq!(seven, Rect::new(32, 1, 15, 6));
        for (_, r) in &areas {
            assert!(area.contains(r.as_position()));
            assert!(r.right() <= area.right() && r.bottom() <= area.bottom());
        }
    }

    #[test]
    fn test_item_at() {
        let grid = Grid::default();
        let area = Rect::new(0, 1, 80, 30);
        assert_eq!(grid.item_at(area, 5, 2), Some(GridItem::Logo));
        assert_eq!(grid.item_at(area, 40, 6), Some(GridItem::Day(day(7))));
        assert_eq!(grid.item_at(area, 79, 30), Some(GridItem::Day(day(6))));
        // The gap between the logo and day 7
        assert_eq!(grid.item_at(area, 31, 2), None);
        assert_eq!(grid.item_at(area, 5, 0), None);
    }

    #[test]
    fn test_neighbor_horizontal() {
        let grid = Grid::default();
        assert_eq!(grid.neighbor(day(7), Direction::Left), None);
        assert_eq!(grid.neighbor(day(7), Direction::Right), Some(day(13)));
        assert_eq!(grid.neighbor(day(12), Direction::Right), Some(day(21)));
        assert_eq!(grid.neighbor(day(6), Direction::Right), None);
        assert_eq!(grid.neighbor(day(21), Direction::Left), Some(day(12)));
    }

    #[test]
    fn test_neighbor_vertical() {
        let grid = Grid::default();
        assert_eq!(grid.neighbor(day(7), Direction::Down), Some(day(8)));
        assert_eq!(grid.neighbor(day(8), Direction::Up), Some(day(7)));
        assert_eq!(grid.neighbor(day(21), Direction::Up), None);
        assert_eq!(grid.neighbor(day(21), Direction::Down), Some(day(15)));
        assert_eq!(grid.neighbor(day(13), Direction::Down), Some(day(10)));
        assert_eq!(grid.neighbor(day(19), Direction::Down), None);
    }
}
