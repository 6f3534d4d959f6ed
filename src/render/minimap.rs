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

use macroquad::prelude::*;

use crate::cell::CellType;
use crate::grid::Grid;
use crate::player::PlayerState;
use crate::render::cell_color;

/// Viewport radius in cells.
const RADIUS: isize = 6;
const PANEL_SIZE: f32 = 200.0;
const MARGIN: f32 = 16.0;

/// Drawn half-angle of the view cone. Kept strictly below a right angle so
/// the triangle cannot collapse into a line at the widest FOV settings.
fn cone_half_angle(fov: f32) -> f32 {
    (fov / 2.0).min(std::f32::consts::FRAC_PI_2 - 0.2)
}

/// A remote player relayed for display only; never touches collision or the
/// maze itself.
pub struct RemotePlayer {
    pub x: f32,
    pub y: f32,
    pub name: String,
}

/// Circular overhead viewport in the top-right corner: nearby walls and
/// objects, the view cone, and any relayed remote players.
pub fn draw(
    grid: &Grid,
    player: &PlayerState,
    fov: f32,
    remote_players: &[RemotePlayer],
) {
    let center_x = screen_width() - PANEL_SIZE / 2.0 - MARGIN;
    let center_y = PANEL_SIZE / 2.0 + MARGIN;
    let scale = (PANEL_SIZE / 2.0) / (RADIUS as f32 + 0.5);

    draw_circle(center_x, center_y, PANEL_SIZE / 2.0, Color::new(0.1, 0.1, 0.1, 0.85));

    let px = player.x.floor() as isize;
    let py = player.y.floor() as isize;
    for dy in -RADIUS..=RADIUS {
        for dx in -RADIUS..=RADIUS {
            // Distance mask stands in for a circular clip.
            if dx * dx + dy * dy > RADIUS * RADIUS {
                continue;
            }
            let mx = px + dx;
            let my = py + dy;
            if mx < 0 || my < 0 {
                continue;
            }
            let kind = grid.kind_at(mx as usize, my as usize);
            let sx = center_x + dx as f32 * scale;
            let sy = center_y + dy as f32 * scale;
            match kind {
                CellType::Empty => {}
                CellType::Wall => draw_rectangle(
                    sx - scale / 2.0,
                    sy - scale / 2.0,
                    scale,
                    scale,
                    cell_color(CellType::Wall),
                ),
                CellType::Stairs | CellType::Exit => {
                    draw_circle(sx, sy, scale * 0.3, cell_color(kind))
                }
                CellType::Cooler | CellType::Toilet => {
                    draw_circle(sx, sy, scale * 0.25, cell_color(kind))
                }
                CellType::Medkit => {
                    let mut color = cell_color(kind);
                    color.a = 0.6;
                    draw_circle(sx, sy, scale * 0.15, color);
                }
                CellType::Pit | CellType::Spikes | CellType::MovingWall => {
                    draw_circle(sx, sy, scale * 0.15, Color::new(1.0, 0.0, 0.0, 0.6));
                }
            }
        }
    }

    // View cone hint.
    let cone = Color::new(0.0, 0.75, 1.0, 0.18);
    let reach = PANEL_SIZE / 2.0;
    let half = cone_half_angle(fov);
    let left = player.angle - half;
    let right = player.angle + half;
    draw_triangle(
        vec2(center_x, center_y),
        vec2(center_x + left.cos() * reach, center_y + left.sin() * reach),
        vec2(center_x + right.cos() * reach, center_y + right.sin() * reach),
        cone,
    );

    for remote in remote_players {
        let dx = remote.x - player.x;
        let dy = remote.y - player.y;
        if dx.abs() > RADIUS as f32 || dy.abs() > RADIUS as f32 {
            continue;
        }
        let sx = center_x + dx * scale;
        let sy = center_y + dy * scale;
        draw_circle(sx, sy, scale * 0.28, Color::new(1.0, 0.33, 0.33, 1.0));
        draw_text(&remote.name, sx - scale, sy - scale * 0.5, scale * 0.9, WHITE);
    }

    draw_circle(center_x, center_y, scale * 0.35, WHITE);
    draw_line(
        center_x,
        center_y,
        center_x + player.angle.cos() * scale * 0.7,
        center_y + player.angle.sin() * scale * 0.7,
        2.0,
        Color::new(0.0, 0.75, 1.0, 1.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn cone_half_angle_never_reaches_a_right_angle() {
        assert!((cone_half_angle(FRAC_PI_2) - FRAC_PI_2 / 2.0).abs() < 1e-6);
        assert!(cone_half_angle(PI) < FRAC_PI_2);
        assert!(cone_half_angle(2.0 * PI) < FRAC_PI_2);
    }
}
