use crate::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Palette available to actor tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    White,
    Red,
    Aqua,
    Lime,
    Yellow,
    Fuchsia,
    Blue,
    Gray,
}

impl TileColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            TileColor::White => (255, 255, 255),
            TileColor::Red => (255, 0, 0),
            TileColor::Aqua => (0, 255, 255),
            TileColor::Lime => (0, 255, 0),
            TileColor::Yellow => (255, 255, 0),
            TileColor::Fuchsia => (255, 0, 255),
            TileColor::Blue => (0, 0, 255),
            TileColor::Gray => (128, 128, 128),
        }
    }
}

/// Graphic handle: a coloured glyph drawn into one grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub glyph: char,
    pub color: TileColor,
}

impl Tile {
    pub fn new(glyph: char, color: TileColor) -> Self {
        Tile { glyph, color }
    }
}

/// Anything the board can be drawn onto
pub trait Surface {
    /// Clear the whole frame
    fn fill(&mut self);

    /// Draw `tile` into the cell at `pos`
    fn draw(&mut self, pos: Coordinate, tile: &Tile);
}

/// Viewport onto the board: `size` cells wide/high, placed at `origin` on the window grid.
///
/// Board cells outside the viewport are clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridWindow {
    pub origin: Coordinate,
    pub size: Coordinate,
}

impl GridWindow {
    pub fn new(origin: Coordinate, size: Coordinate) -> Self {
        GridWindow { origin, size }
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        pos.x >= 0 && pos.x < self.size.x && pos.y >= 0 && pos.y < self.size.y
    }

    /// Window-grid cell for a board cell, or None if clipped
    pub fn to_window(&self, pos: Coordinate) -> Option<Coordinate> {
        if self.contains(pos) {
            Some(self.origin + pos)
        } else {
            None
        }
    }
}

/// Cells in a `size.x` by `size.y` area; negative extents count as zero
fn cell_count(size: Coordinate) -> usize {
    size.x.max(0) as usize * size.y.max(0) as usize
}

/// Character-buffer surface; one `char` per window cell
#[derive(Clone, Debug)]
pub struct TextSurface {
    window: GridWindow,
    blank: char,
    cells: Vec<char>,
}

impl TextSurface {
    pub fn new(window: GridWindow) -> Self {
        Self::with_blank(window, '.')
    }

    pub fn with_blank(window: GridWindow, blank: char) -> Self {
        TextSurface {
            window,
            blank,
            cells: vec![blank; cell_count(window.size)],
        }
    }

    /// Glyph currently drawn at a board cell, None when clipped
    pub fn glyph_at(&self, pos: Coordinate) -> Option<char> {
        self.index(pos).map(|i| self.cells[i])
    }

    fn index(&self, pos: Coordinate) -> Option<usize> {
        if self.window.contains(pos) {
            Some(pos.x as usize + pos.y as usize * self.window.size.x as usize)
        } else {
            None
        }
    }
}

impl Surface for TextSurface {
    fn fill(&mut self) {
        let blank = self.blank;
        self.cells.iter_mut().for_each(|c| *c = blank);
    }

    fn draw(&mut self, pos: Coordinate, tile: &Tile) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = tile.glyph;
        }
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.window.size.x.max(0) as usize;
        if cols == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(cols) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_clips() {
        let window = GridWindow::new(Coordinate::new(2, 1), Coordinate::new(10, 18));
        assert_eq!(window.to_window(Coordinate::new(0, 0)), Some(Coordinate::new(2, 1)));
        assert_eq!(window.to_window(Coordinate::new(9, 17)), Some(Coordinate::new(11, 18)));
        assert_eq!(window.to_window(Coordinate::new(10, 0)), None);
        assert_eq!(window.to_window(Coordinate::new(-1, 3)), None);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_cell_count_past_i32() {
        assert_eq!(cell_count(Coordinate::new(70_000, 70_000)), 4_900_000_000);
        assert_eq!(cell_count(Coordinate::new(-4, 3)), 0);
    }

    #[test]
    fn test_text_surface_wide_viewport() {
        let window = GridWindow::new(Coordinate::new(0, 0), Coordinate::new(50_000, 2));
        let mut surface = TextSurface::new(window);
        surface.draw(Coordinate::new(49_999, 1), &Tile::new('@', TileColor::Aqua));
        assert_eq!(surface.glyph_at(Coordinate::new(49_999, 1)), Some('@'));
        assert_eq!(surface.glyph_at(Coordinate::new(49_999, 0)), Some('.'));
    }

    #[test]
    fn test_negative_size_is_empty() {
        let window = GridWindow::new(Coordinate::new(0, 0), Coordinate::new(-4, 3));
        let mut surface = TextSurface::new(window);
        surface.draw(Coordinate::new(0, 0), &Tile::new('@', TileColor::Aqua));
        assert_eq!(surface.glyph_at(Coordinate::new(0, 0)), None);
        assert_eq!(surface.to_string(), "");
    }

    #[test]
    fn test_text_surface_draw_and_fill() {
        let window = GridWindow::new(Coordinate::new(0, 0), Coordinate::new(3, 2));
        let mut surface = TextSurface::new(window);
        surface.draw(Coordinate::new(1, 1), &Tile::new('@', TileColor::Red));
        surface.draw(Coordinate::new(5, 5), &Tile::new('#', TileColor::Red));

        assert_eq!(surface.to_string(), "...\n.@.\n");
        assert_eq!(surface.glyph_at(Coordinate::new(1, 1)), Some('@'));
        assert_eq!(surface.glyph_at(Coordinate::new(5, 5)), None);

        surface.fill();
        assert_eq!(surface.to_string(), "...\n...\n");
    }
}
