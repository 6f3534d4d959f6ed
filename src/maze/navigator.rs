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

use std::collections::{HashSet, VecDeque};

use pathfinding::prelude::bfs;

use crate::cell::{CellType, Position};
use crate::grid::Grid;
use crate::maze::CARDINALS;

/// Farthest `Empty` cell from `from` by 4-neighbor graph distance, explicit
/// worklist so large grids cannot blow the call stack. Degenerates to
/// `(from, 0)` when nothing around the start is carved.
pub fn farthest_cell(grid: &Grid, from: Position) -> (Position, usize) {
    let mut farthest = (from, 0usize);
    let mut visited: HashSet<Position> = HashSet::new();
    let mut queue: VecDeque<(Position, usize)> = VecDeque::new();
    visited.insert(from);
    queue.push_back((from, 0));

    while let Some((pos, dist)) = queue.pop_front() {
        if dist > farthest.1 {
            farthest = (pos, dist);
        }
        for (dx, dy) in CARDINALS {
            let nx = pos.x as isize + dx;
            let ny = pos.y as isize + dy;
            if nx < 1 || ny < 1 {
                continue;
            }
            let next = Position::new(nx as usize, ny as usize);
            if !grid.in_interior(next.x, next.y)
                || grid.kind_at(next.x, next.y) != CellType::Empty
                || !visited.insert(next)
            {
                continue;
            }
            queue.push_back((next, dist + 1));
        }
    }

    farthest
}

/// Whether `to` can be walked to from `from` through non-solid cells.
pub fn reachable(grid: &Grid, from: Position, to: Position) -> bool {
    bfs(
        &from,
        |&pos| {
            let mut next = Vec::new();
            for (dx, dy) in CARDINALS {
                let nx = pos.x as isize + dx;
                let ny = pos.y as isize + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (ux, uy) = (nx as usize, ny as usize);
                if !grid.kind_at(ux, uy).is_solid() {
                    next.push(Position::new(ux, uy));
                }
            }
            next
        },
        |&pos| pos == to,
    )
    .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farthest_on_uncarved_grid_is_the_start() {
        let grid = Grid::filled(9, 9, CellType::Wall);
        let (pos, dist) = farthest_cell(&grid, Position::new(1, 1));
        assert_eq!(pos, Position::new(1, 1));
        assert_eq!(dist, 0);
    }

    #[test]
    fn farthest_follows_a_corridor() {
        let mut grid = Grid::filled(9, 9, CellType::Wall);
        for x in 1..8 {
            grid.set_kind(x, 1, CellType::Empty);
        }
        let (pos, dist) = farthest_cell(&grid, Position::new(1, 1));
        assert_eq!(pos, Position::new(7, 1));
        assert_eq!(dist, 6);
    }

    #[test]
    fn reachability_passes_through_walkable_objects_only() {
        let mut grid = Grid::filled(7, 7, CellType::Wall);
        for x in 1..6 {
            grid.set_kind(x, 1, CellType::Empty);
        }
        grid.set_kind(3, 1, CellType::Spikes);
        assert!(reachable(&grid, Position::new(1, 1), Position::new(5, 1)));
        grid.set_kind(3, 1, CellType::Cooler);
        assert!(!reachable(&grid, Position::new(1, 1), Position::new(5, 1)));
    }
}
