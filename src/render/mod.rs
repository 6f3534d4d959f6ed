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

pub mod hud;
pub mod minimap;
pub mod raycaster;

use macroquad::prelude::*;

use crate::cell::CellType;

/// Flat fill color for a cell when its texture is unavailable; shared by the
/// wall slices, sprite stripes and both overhead views.
pub fn cell_color(kind: CellType) -> Color {
    match kind {
        CellType::Empty => Color::new(0.0, 0.0, 0.0, 0.0),
        CellType::Wall => Color::new(0.27, 0.27, 0.27, 1.0),
        CellType::Stairs => GOLD,
        CellType::Cooler => Color::new(0.0, 0.9, 0.9, 1.0),
        CellType::Toilet => Color::new(1.0, 0.84, 0.0, 1.0),
        CellType::Exit => Color::new(0.3, 1.0, 0.4, 1.0),
        CellType::Pit => Color::new(0.55, 0.2, 0.1, 1.0),
        CellType::Spikes => Color::new(0.8, 0.1, 0.1, 1.0),
        CellType::MovingWall => Color::new(0.5, 0.4, 0.6, 1.0),
        CellType::Medkit => Color::new(0.0, 1.0, 0.0, 1.0),
    }
}
