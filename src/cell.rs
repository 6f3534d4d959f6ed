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

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellType {
    Empty,
    Wall,
    Stairs,
    Toilet,
    Cooler,
    Exit,
    Pit,
    Spikes,
    MovingWall,
    Medkit,
}

impl CellType {
    /// Cells the player cannot occupy. Coolers and toilets are furniture:
    /// used via the interact key from an adjacent cell.
    pub fn is_solid(self) -> bool {
        matches!(self, CellType::Wall | CellType::Cooler | CellType::Toilet)
    }

    /// Only true walls terminate a ray; every other occupied cell is
    /// rendered as a billboard sprite the ray passes through.
    pub fn blocks_ray(self) -> bool {
        self == CellType::Wall
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, CellType::Pit | CellType::Spikes | CellType::MovingWall)
    }

    pub fn is_sprite(self) -> bool {
        !matches!(self, CellType::Empty | CellType::Wall)
    }
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub kind: CellType,
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize, kind: CellType) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}
