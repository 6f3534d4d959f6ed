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

use std::collections::HashSet;
use std::f32::consts::PI;

use macroquad::prelude::*;

use crate::cell::CellType;
use crate::grid::Grid;
use crate::player::PlayerState;
use crate::render::cell_color;
use crate::textures::TextureStore;

pub const DEFAULT_FOV: f32 = PI / 2.0;
pub const MIN_FOV: f32 = PI / 6.0;
pub const MAX_FOV: f32 = PI;
pub const FOV_STEP: f32 = PI / 36.0;
pub const MIN_CORRIDOR: f32 = 0.5;
pub const MAX_CORRIDOR: f32 = 2.0;
pub const CORRIDOR_STEP: f32 = 0.1;

/// Distance at which the black shading overlay saturates.
const SHADE_FALLOFF: f32 = 10.0;
const SPRITE_SCALE: f32 = 0.7;
const AXIS_EPSILON: f32 = 1e-9;

/// Result of walking one ray through the grid with DDA.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Perpendicular (fisheye-corrected) distance to the wall face.
    pub perp_dist: f32,
    /// 0 = crossed a vertical gridline, 1 = horizontal.
    pub side: u8,
    pub kind: CellType,
    /// Fractional hit coordinate along the un-crossed axis, in `[0, 1)`.
    pub wall_x: f32,
    /// Mirror the texture column so orientation stays consistent.
    pub flip: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteCell {
    pub x: usize,
    pub y: usize,
    pub kind: CellType,
}

/// Step one ray from `(px, py)` with the standard DDA formulation. Non-wall
/// occupied cells do not stop the ray; each is reported once through
/// `on_sprite` for the billboard pass. Leaving the grid or exceeding its
/// diagonal counts as hitting an implicit boundary wall, never an
/// out-of-bounds access.
pub fn cast_ray(
    grid: &Grid,
    px: f32,
    py: f32,
    ray_angle: f32,
    mut on_sprite: impl FnMut(SpriteCell),
) -> RayHit {
    let (sin, cos) = ray_angle.sin_cos();
    let mut map_x = px.floor() as isize;
    let mut map_y = py.floor() as isize;

    let delta_dist_x = if cos.abs() < AXIS_EPSILON { f32::INFINITY } else { (1.0 / cos).abs() };
    let delta_dist_y = if sin.abs() < AXIS_EPSILON { f32::INFINITY } else { (1.0 / sin).abs() };

    let step_x: isize = if cos < 0.0 { -1 } else { 1 };
    let step_y: isize = if sin < 0.0 { -1 } else { 1 };

    let mut side_dist_x = if cos < 0.0 {
        (px - map_x as f32) * delta_dist_x
    } else {
        (map_x as f32 + 1.0 - px) * delta_dist_x
    };
    let mut side_dist_y = if sin < 0.0 {
        (py - map_y as f32) * delta_dist_y
    } else {
        (map_y as f32 + 1.0 - py) * delta_dist_y
    };

    let max_depth = grid.diagonal();
    let mut side: u8;

    loop {
        if side_dist_x.min(side_dist_y) > max_depth {
            // Ray ran out of world before meeting a wall.
            return RayHit {
                perp_dist: max_depth,
                side: 0,
                kind: CellType::Wall,
                wall_x: 0.0,
                flip: false,
            };
        }
        if side_dist_x < side_dist_y {
            side_dist_x += delta_dist_x;
            map_x += step_x;
            side = 0;
        } else {
            side_dist_y += delta_dist_y;
            map_y += step_y;
            side = 1;
        }

        // Out-of-bounds reads come back as walls, so an escaping ray stops
        // exactly at the boundary.
        let kind = if map_x < 0 || map_y < 0 {
            CellType::Wall
        } else {
            grid.kind_at(map_x as usize, map_y as usize)
        };
        if kind == CellType::Empty {
            continue;
        }
        if kind.blocks_ray() {
            break;
        }
        if map_x >= 0 && map_y >= 0 {
            on_sprite(SpriteCell { x: map_x as usize, y: map_y as usize, kind });
        }
    }

    let perp_dist = if side == 0 {
        (map_x as f32 - px + (1.0 - step_x as f32) / 2.0) / cos
    } else {
        (map_y as f32 - py + (1.0 - step_y as f32) / 2.0) / sin
    };

    let mut wall_x = if side == 0 { py + perp_dist * sin } else { px + perp_dist * cos };
    wall_x -= wall_x.floor();
    let flip = (side == 0 && cos > 0.0) || (side == 1 && sin < 0.0);

    RayHit { perp_dist, side, kind: CellType::Wall, wall_x, flip }
}

/// Camera-space billboard projection of a sprite cell center.
#[derive(Clone, Copy, Debug)]
pub struct SpriteProjection {
    /// Depth along the camera forward axis; compared against the z-buffer.
    pub transform_y: f32,
    /// Screen x of the billboard center, in columns.
    pub screen_x: f32,
    /// Square billboard side, in pixels.
    pub size: f32,
}

/// Transform a sprite into camera space via the inverse camera matrix.
/// Returns `None` when the sprite is behind the camera plane.
pub fn project_sprite(
    px: f32,
    py: f32,
    angle: f32,
    fov: f32,
    screen_w: f32,
    screen_h: f32,
    sprite_x: f32,
    sprite_y: f32,
) -> Option<SpriteProjection> {
    let (sin, cos) = angle.sin_cos();
    let plane_scale = (fov / 2.0).tan();
    let (dir_x, dir_y) = (cos, sin);
    let (plane_x, plane_y) = (-sin * plane_scale, cos * plane_scale);

    let rel_x = sprite_x - px;
    let rel_y = sprite_y - py;

    let inv_det = 1.0 / (plane_x * dir_y - dir_x * plane_y);
    let transform_x = inv_det * (dir_y * rel_x - dir_x * rel_y);
    let transform_y = inv_det * (-plane_y * rel_x + plane_x * rel_y);

    if transform_y <= 0.05 {
        return None;
    }

    let screen_x = (screen_w / 2.0) * (1.0 + transform_x / transform_y);
    let size = (screen_h / transform_y).abs() * SPRITE_SCALE;
    Some(SpriteProjection { transform_y, screen_x, size })
}

/// Per-stripe occlusion: a sprite column draws only where it is strictly
/// nearer than the wall the z-buffer recorded there.
pub fn stripe_visible(proj: &SpriteProjection, z_buffer: &[f32], column: usize) -> bool {
    z_buffer.get(column).is_some_and(|&wall| proj.transform_y < wall)
}

/// The 2.5D view: textured wall slices with a per-column depth buffer, then
/// depth-sorted billboard sprites.
pub struct Raycaster {
    pub fov: f32,
    pub corridor: f32,
}

impl Raycaster {
    pub fn new() -> Self {
        Self { fov: DEFAULT_FOV, corridor: 1.0 }
    }

    pub fn widen_fov(&mut self) {
        self.fov = (self.fov + FOV_STEP).min(MAX_FOV);
    }

    pub fn narrow_fov(&mut self) {
        self.fov = (self.fov - FOV_STEP).max(MIN_FOV);
    }

    pub fn widen_corridor(&mut self) {
        self.corridor = (self.corridor + CORRIDOR_STEP).min(MAX_CORRIDOR);
    }

    pub fn narrow_corridor(&mut self) {
        self.corridor = (self.corridor - CORRIDOR_STEP).max(MIN_CORRIDOR);
    }

    pub fn draw_frame(&self, grid: &Grid, player: &PlayerState, textures: &TextureStore) {
        let width = screen_width();
        let height = screen_height();
        let columns = width as usize;

        // Ceiling, then floor; flat fills when textures are still loading.
        match &textures.ceiling {
            Some(tex) => draw_texture_ex(
                tex,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(width, height / 2.0)),
                    ..Default::default()
                },
            ),
            None => draw_rectangle(0.0, 0.0, width, height / 2.0, Color::new(0.23, 0.23, 0.23, 1.0)),
        }
        draw_rectangle(0.0, height / 2.0, width, height / 2.0, Color::new(0.5, 0.5, 0.5, 1.0));

        let mut z_buffer = vec![f32::INFINITY; columns];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut sprites: Vec<SpriteCell> = Vec::new();

        for i in 0..columns {
            let ray_angle = player.angle - self.fov / 2.0 + (i as f32 / columns as f32) * self.fov;
            let hit = cast_ray(grid, player.x, player.y, ray_angle, |sprite| {
                if seen.insert((sprite.x, sprite.y)) {
                    sprites.push(sprite);
                }
            });
            z_buffer[i] = hit.perp_dist;

            let line_height = height / hit.perp_dist * self.corridor;
            let draw_start = (height - line_height) / 2.0;
            let column_x = i as f32;

            match &textures.wall {
                Some(tex) => {
                    let mut tex_x = (hit.wall_x * tex.width()).floor();
                    if hit.flip {
                        tex_x = tex.width() - tex_x - 1.0;
                    }
                    draw_texture_ex(
                        tex,
                        column_x,
                        draw_start,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(vec2(1.0, line_height)),
                            source: Some(Rect::new(tex_x, 0.0, 1.0, tex.height())),
                            ..Default::default()
                        },
                    );
                }
                None => draw_rectangle(
                    column_x,
                    draw_start,
                    1.0,
                    line_height,
                    cell_color(CellType::Wall),
                ),
            }

            // Distance shading: farther slices sink into black.
            let shade = (hit.perp_dist / SHADE_FALLOFF).min(1.0);
            draw_rectangle(column_x, draw_start, 1.0, line_height, Color::new(0.0, 0.0, 0.0, shade));
        }

        self.draw_sprites(player, textures, &mut sprites, &z_buffer, width, height);
    }

    fn draw_sprites(
        &self,
        player: &PlayerState,
        textures: &TextureStore,
        sprites: &mut [SpriteCell],
        z_buffer: &[f32],
        width: f32,
        height: f32,
    ) {
        // Back to front so nearer billboards overdraw farther ones.
        sprites.sort_by(|a, b| {
            let da = dist_sq(player, a);
            let db = dist_sq(player, b);
            db.total_cmp(&da)
        });

        for sprite in sprites.iter() {
            let Some(proj) = project_sprite(
                player.x,
                player.y,
                player.angle,
                self.fov,
                width,
                height,
                sprite.x as f32 + 0.5,
                sprite.y as f32 + 0.5,
            ) else {
                continue;
            };

            let half = proj.size / 2.0;
            let draw_start_y = (height - proj.size) / 2.0;
            let left = proj.screen_x - half;
            let first = left.max(0.0) as usize;
            let last = ((proj.screen_x + half).min(width - 1.0)) as usize;
            let tex = textures.sprite(sprite.kind);

            for column in first..=last {
                if !stripe_visible(&proj, z_buffer, column) {
                    continue;
                }
                match tex {
                    Some(tex) => {
                        let u = (column as f32 - left) / proj.size;
                        let tex_x = (u * tex.width()).clamp(0.0, tex.width() - 1.0);
                        draw_texture_ex(
                            tex,
                            column as f32,
                            draw_start_y,
                            WHITE,
                            DrawTextureParams {
                                dest_size: Some(vec2(1.0, proj.size)),
                                source: Some(Rect::new(tex_x, 0.0, 1.0, tex.height())),
                                ..Default::default()
                            },
                        );
                    }
                    None => {
                        // Flat-color billboard, slightly narrowed so hazards
                        // read as floor objects rather than full slabs.
                        draw_rectangle(
                            column as f32,
                            draw_start_y + proj.size * 0.25,
                            1.0,
                            proj.size * 0.75,
                            cell_color(sprite.kind),
                        );
                    }
                }
            }
        }
    }
}

fn dist_sq(player: &PlayerState, sprite: &SpriteCell) -> f32 {
    let dx = sprite.x as f32 + 0.5 - player.x;
    let dy = sprite.y as f32 + 0.5 - player.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;

    /// 5x5 room: walls on the border, open interior.
    fn room() -> Grid {
        let mut grid = Grid::filled(5, 5, CellType::Wall);
        for y in 1..4 {
            for x in 1..4 {
                grid.set_kind(x, y, CellType::Empty);
            }
        }
        grid
    }

    #[test]
    fn axis_aligned_ray_matches_analytic_distance() {
        let grid = room();
        // One unit inside the west wall, looking straight +x at the east
        // wall face at x = 4.
        let hit = cast_ray(&grid, 1.5, 2.5, 0.0, |_| {});
        let expected = 4.0 - 1.5;
        assert!(
            (hit.perp_dist - expected).abs() / expected < 1e-6,
            "got {}, expected {expected}",
            hit.perp_dist
        );
        assert_eq!(hit.side, 0);
    }

    #[test]
    fn slanted_ray_matches_analytic_distance() {
        let grid = room();
        // 30 degrees off axis from (1.5, 2.5): the east wall face at x = 4
        // is entered before the south wall row, so the hit distance is the
        // x gap divided by cos.
        let angle = 30f32.to_radians();
        let hit = cast_ray(&grid, 1.5, 2.5, angle, |_| {});
        assert_eq!(hit.side, 0);
        let expected = (4.0 - 1.5) / angle.cos();
        assert!((hit.perp_dist - expected).abs() < 1e-5);
    }

    #[test]
    fn escaping_ray_clamps_to_max_depth() {
        // No perimeter at all: the ray must stop at the boundary or the
        // diagonal bound without indexing out of the grid.
        let grid = Grid::filled(4, 4, CellType::Empty);
        let hit = cast_ray(&grid, 1.5, 1.5, 0.3, |_| {});
        assert_eq!(hit.kind, CellType::Wall);
        assert!(hit.perp_dist <= grid.diagonal() + 1e-4);
    }

    #[test]
    fn sprites_are_collected_without_stopping_the_ray() {
        let mut grid = room();
        grid.set_kind(2, 2, CellType::Medkit);
        let mut collected = Vec::new();
        let hit = cast_ray(&grid, 1.5, 2.5, 0.0, |s| collected.push(s));
        assert_eq!(collected, vec![SpriteCell { x: 2, y: 2, kind: CellType::Medkit }]);
        // Ray went on to the actual wall behind the medkit.
        assert!((hit.perp_dist - 2.5).abs() < 1e-5);
    }

    #[test]
    fn sprite_behind_wall_is_rejected_by_the_z_buffer() {
        // Wall recorded at depth 2.0 in every column; sprite sits at 5.0.
        let proj = project_sprite(1.5, 1.5, 0.0, DEFAULT_FOV, 100.0, 100.0, 6.5, 1.5)
            .expect("sprite is in front of the camera");
        assert!((proj.transform_y - 5.0).abs() < 1e-4);
        let z_buffer = vec![2.0f32; 100];
        for column in 0..100 {
            assert!(
                !stripe_visible(&proj, &z_buffer, column),
                "column {column} should be occluded"
            );
        }
    }

    #[test]
    fn sprite_in_front_of_wall_is_visible() {
        let proj = project_sprite(1.5, 1.5, 0.0, DEFAULT_FOV, 100.0, 100.0, 3.5, 1.5)
            .expect("sprite is in front of the camera");
        let z_buffer = vec![10.0f32; 100];
        let center = proj.screen_x as usize;
        assert!(stripe_visible(&proj, &z_buffer, center));
    }

    #[test]
    fn sprite_behind_camera_is_culled() {
        assert!(project_sprite(5.5, 5.5, 0.0, DEFAULT_FOV, 100.0, 100.0, 1.5, 5.5).is_none());
    }

    #[test]
    fn centered_sprite_projects_to_screen_center() {
        let proj = project_sprite(1.5, 2.5, 0.0, DEFAULT_FOV, 800.0, 600.0, 3.5, 2.5)
            .expect("in front");
        assert!((proj.screen_x - 400.0).abs() < 1e-3);
    }
}
