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

use crate::grid::Grid;
use crate::input::HeldKeys;

pub const MOVE_SPEED: f32 = 2.5;
pub const TURN_SPEED: f32 = std::f32::consts::PI;
pub const COLLISION_MARGIN: f32 = 0.25;

/// Continuous position inside the grid coordinate space: cell `(ix, iy)`
/// occupies `[ix, ix+1) x [iy, iy+1)`.
#[derive(Clone, Copy, Debug)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

impl PlayerState {
    /// Floor entry point, just inside the corner cell.
    pub fn at_entry() -> Self {
        Self { x: 1.5, y: 1.5, angle: 0.0 }
    }

    pub fn cell(&self) -> (usize, usize) {
        (self.x as usize, self.y as usize)
    }

    /// Integrate held input over `dt`. Collision is resolved per axis so a
    /// blocked axis still lets the other slide along the wall.
    pub fn update(&mut self, grid: &Grid, held: HeldKeys, dt: f32) {
        if held.contains(HeldKeys::TURN_LEFT) {
            self.angle -= TURN_SPEED * dt;
        }
        if held.contains(HeldKeys::TURN_RIGHT) {
            self.angle += TURN_SPEED * dt;
        }

        let (sin, cos) = self.angle.sin_cos();
        let mut dx = 0.0f32;
        let mut dy = 0.0f32;
        if held.contains(HeldKeys::FORWARD) {
            dx += cos;
            dy += sin;
        }
        if held.contains(HeldKeys::BACKWARD) {
            dx -= cos;
            dy -= sin;
        }
        if held.contains(HeldKeys::STRAFE_LEFT) {
            dx += sin;
            dy -= cos;
        }
        if held.contains(HeldKeys::STRAFE_RIGHT) {
            dx -= sin;
            dy += cos;
        }

        if dx == 0.0 && dy == 0.0 {
            return;
        }
        // Normalize so diagonals do not outrun axis-aligned movement.
        let len = (dx * dx + dy * dy).sqrt();
        let step = MOVE_SPEED * dt;
        dx = dx / len * step;
        dy = dy / len * step;

        self.try_move(grid, dx, dy);
    }

    pub fn try_move(&mut self, grid: &Grid, dx: f32, dy: f32) {
        let new_x = self.x + dx;
        let new_y = self.y + dy;

        let probe_x = (new_x + dx.signum() * COLLISION_MARGIN).floor();
        let probe_y = (new_y + dy.signum() * COLLISION_MARGIN).floor();

        if probe_x >= 0.0 && !grid.kind_at(probe_x as usize, self.y as usize).is_solid() {
            self.x = new_x;
        }
        if probe_y >= 0.0 && !grid.kind_at(self.x as usize, probe_y as usize).is_solid() {
            self.y = new_y;
        }
    }
}
