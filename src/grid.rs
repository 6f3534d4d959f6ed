// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cell::{Cell, CellType, Position};
use crate::maze::generator;

/// Entry cell every floor is carved from and the player spawns next to.
pub const ENTRY: Position = Position { x: 1, y: 1 };

/// One floor of the building: a rectangular cell grid, row-major `[y][x]`.
/// Structure is fixed after generation; the only mutation consumers perform
/// is downgrading a consumed resource cell to `Empty`.
#[derive(Clone, Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, kind: CellType) -> Self {
        let cells = (0..height)
            .map(|y| (0..width).map(|x| Cell::new(x, y, kind)).collect())
            .collect();
        Self { width, height, cells }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get(y).and_then(|row| row.get(x))
    }

    /// Out-of-bounds reads are walls, so callers never special-case the edge.
    pub fn kind_at(&self, x: usize, y: usize) -> CellType {
        self.get(x, y).map(|c| c.kind).unwrap_or(CellType::Wall)
    }

    pub fn set_kind(&mut self, x: usize, y: usize, kind: CellType) {
        if let Some(row) = self.cells.get_mut(y) {
            if let Some(cell) = row.get_mut(x) {
                cell.kind = kind;
            }
        }
    }

    pub fn in_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x < self.width - 1 && y < self.height - 1
    }

    pub fn diagonal(&self) -> f32 {
        let w = self.width as f32;
        let h = self.height as f32;
        (w * w + h * h).sqrt()
    }

    /// Interior positions holding the given cell type.
    pub fn positions_of(&self, kind: CellType) -> Vec<Position> {
        let mut out = Vec::new();
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                if self.cells[y][x].kind == kind {
                    out.push(Position::new(x, y));
                }
            }
        }
        out
    }
}

/// The full tower: one grid per floor, index 0 = floor 1 (the exit floor).
/// Owned by the game session and regenerated wholesale on restart.
pub struct Building {
    pub floors: Vec<Grid>,
}

impl Building {
    pub fn generate(floors: usize, width: usize, height: usize, seed: u64) -> Self {
        let grids = (0..floors)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64 * 0x9e37_79b9));
                generator::generate(width, height, i == 0, &mut rng)
            })
            .collect();
        Self { floors: grids }
    }

    /// Floors are numbered 1..=N, play starts at the top.
    pub fn floor(&self, number: usize) -> &Grid {
        &self.floors[number - 1]
    }

    pub fn floor_mut(&mut self, number: usize) -> &mut Grid {
        &mut self.floors[number - 1]
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_walls() {
        let grid = Grid::filled(5, 5, CellType::Empty);
        assert_eq!(grid.kind_at(5, 2), CellType::Wall);
        assert_eq!(grid.kind_at(2, 99), CellType::Wall);
        assert_eq!(grid.kind_at(2, 2), CellType::Empty);
    }

    #[test]
    fn building_floors_are_stable_for_a_seed() {
        let a = Building::generate(3, 21, 21, 7);
        let b = Building::generate(3, 21, 21, 7);
        for f in 1..=3 {
            for y in 0..21 {
                for x in 0..21 {
                    assert_eq!(a.floor(f).kind_at(x, y), b.floor(f).kind_at(x, y));
                }
            }
        }
    }

    #[test]
    fn only_first_floor_has_exit() {
        let building = Building::generate(4, 25, 25, 42);
        assert_eq!(building.floor(1).positions_of(CellType::Exit).len(), 1);
        for f in 2..=4 {
            assert!(building.floor(f).positions_of(CellType::Exit).is_empty());
            assert_eq!(building.floor(f).positions_of(CellType::Stairs).len(), 1);
        }
    }
}
