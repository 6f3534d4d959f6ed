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
use crate::config::GameConfig;
use crate::grid::Building;
use crate::input::{self, HeldKeys};
use crate::leaderboard::Leaderboard;
use crate::needs::{DamageLog, DECAY_PERIOD, Needs};
use crate::player::PlayerState;
use crate::render::raycaster::{MAX_FOV, MIN_FOV, Raycaster};
use crate::render::{hud, minimap};
use crate::textures::TextureStore;

/// Blackout length when taking the stairs down.
const FADE_DURATION: f32 = 0.8;
/// Frame delta clamp: a stalled frame must not tunnel the player through
/// walls or dump a burst of decay ticks.
const MAX_FRAME_DT: f32 = 0.1;
/// Reach of the interact key, from player center to furniture cell center.
const INTERACT_RANGE: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
    Playing,
    Dead,
    Victory,
}

struct Transition {
    target_floor: usize,
    remaining: f32,
}

/// One run of the tower, owned top to bottom: the building, the player, the
/// needs clock. Restart throws the whole value away.
pub struct GameState {
    building: Building,
    /// 1-based; play starts at the top floor and descends toward 1.
    floor: usize,
    player: PlayerState,
    needs: Needs,
    damage_log: DamageLog,
    session: Session,
    elapsed: f64,
    decay_accum: f32,
    transition: Option<Transition>,
}

impl GameState {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let building = Building::generate(config.floors, config.width, config.height, seed);
        let floor = building.floor_count();
        Self {
            building,
            floor,
            player: PlayerState::at_entry(),
            needs: Needs::full(),
            damage_log: DamageLog::new(),
            session: Session::Playing,
            elapsed: 0.0,
            decay_accum: 0.0,
            transition: None,
        }
    }

    /// One simulation step. Ordering is deliberate: decay and hazard damage
    /// land before the death check, and the death check lands before any
    /// stairs or exit handling, so dying on the exit cell is a death.
    fn tick(&mut self, held: HeldKeys, interact: bool, dt: f32) {
        if self.session != Session::Playing {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        self.elapsed += dt as f64;

        // The decay clock never pauses while the session is alive; fades
        // only suspend movement and cell semantics.
        self.decay_accum += dt;
        while self.decay_accum >= DECAY_PERIOD {
            self.decay_accum -= DECAY_PERIOD;
            self.needs.decay_tick();
        }

        if let Some(transition) = &mut self.transition {
            transition.remaining -= dt;
            if transition.remaining <= 0.0 {
                self.floor = transition.target_floor;
                self.player = PlayerState::at_entry();
                self.transition = None;
            }
            if self.needs.any_depleted() {
                self.session = Session::Dead;
                self.transition = None;
            }
            return;
        }

        let kind = {
            let grid = self.building.floor(self.floor);
            self.player.update(grid, held, dt);
            let (cx, cy) = self.player.cell();
            grid.kind_at(cx, cy)
        };
        let (cx, cy) = self.player.cell();

        if let Some(damage) = self.damage_log.trigger(self.floor, cx, cy, kind) {
            self.needs.damage(damage);
        }

        if self.needs.any_depleted() {
            self.session = Session::Dead;
            return;
        }

        match kind {
            CellType::Medkit => {
                self.needs.heal();
                self.building.floor_mut(self.floor).set_kind(cx, cy, CellType::Empty);
            }
            CellType::Stairs if self.floor > 1 => {
                // Replaces any pending transition rather than stacking one.
                self.transition = Some(Transition {
                    target_floor: self.floor - 1,
                    remaining: FADE_DURATION,
                });
            }
            CellType::Exit if self.floor == 1 => {
                self.session = Session::Victory;
            }
            _ => {}
        }

        if interact {
            self.use_nearby_furniture();
        }
    }

    /// Drink from a cooler or use a toilet when one sits within reach of the
    /// player. Both are reusable fixtures, nothing is consumed.
    fn use_nearby_furniture(&mut self) {
        let grid = self.building.floor(self.floor);
        let (cx, cy) = self.player.cell();
        let mut found: Option<CellType> = None;
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                let nx = cx as isize + dx;
                let ny = cy as isize + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let kind = grid.kind_at(nx as usize, ny as usize);
                if !matches!(kind, CellType::Cooler | CellType::Toilet) {
                    continue;
                }
                let dist_x = nx as f32 + 0.5 - self.player.x;
                let dist_y = ny as f32 + 0.5 - self.player.y;
                if (dist_x * dist_x + dist_y * dist_y).sqrt() <= INTERACT_RANGE {
                    found = Some(kind);
                }
            }
        }
        match found {
            Some(CellType::Cooler) => self.needs.drink(),
            Some(CellType::Toilet) => self.needs.relieve(),
            _ => {}
        }
    }

    fn fade_alpha(&self) -> Option<f32> {
        self.transition
            .as_ref()
            .map(|t| 1.0 - (t.remaining / FADE_DURATION).clamp(0.0, 1.0))
    }
}

fn session_seed() -> u64 {
    get_time().to_bits()
}

pub async fn run() {
    let config = GameConfig::load().await;
    let textures = TextureStore::load().await;
    let mut leaderboard = Leaderboard::load();

    let mut raycaster = Raycaster::new();
    raycaster.fov = config.fov_radians().clamp(MIN_FOV, MAX_FOV);

    let mut state = GameState::new(&config, session_seed());
    let mut show_minimap = true;
    let mut score_recorded = false;

    loop {
        let snapshot = input::poll();
        let dt = get_frame_time();

        match state.session {
            Session::Playing => state.tick(snapshot.held, snapshot.interact, dt),
            Session::Dead | Session::Victory => {
                if snapshot.restart {
                    state = GameState::new(&config, session_seed());
                    score_recorded = false;
                }
            }
        }

        if state.session == Session::Victory && !score_recorded {
            leaderboard.record(&config.player_name, (state.elapsed * 1000.0) as u64);
            score_recorded = true;
        }

        if snapshot.toggle_view {
            show_minimap = !show_minimap;
        }
        if snapshot.fov_up {
            raycaster.widen_fov();
        }
        if snapshot.fov_down {
            raycaster.narrow_fov();
        }
        if snapshot.corridor_up {
            raycaster.widen_corridor();
        }
        if snapshot.corridor_down {
            raycaster.narrow_corridor();
        }

        clear_background(BLACK);
        let grid = state.building.floor(state.floor);
        raycaster.draw_frame(grid, &state.player, &textures);
        if show_minimap {
            minimap::draw(grid, &state.player, raycaster.fov, &[]);
        }
        hud::draw(
            &state.needs,
            state.floor,
            state.building.floor_count(),
            state.elapsed,
        );
        if let Some(alpha) = state.fade_alpha() {
            hud::draw_fade(alpha);
        }
        match state.session {
            Session::Playing => {}
            Session::Dead => hud::draw_death_overlay(),
            Session::Victory => hud::draw_victory_overlay(state.elapsed, &leaderboard),
        }

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    /// Single open floor with a chosen cell kind under the player start.
    fn single_floor_state(kind_under_player: CellType) -> GameState {
        let mut grid = Grid::filled(8, 8, CellType::Wall);
        for y in 1..7 {
            for x in 1..7 {
                grid.set_kind(x, y, CellType::Empty);
            }
        }
        grid.set_kind(1, 1, kind_under_player);
        GameState {
            building: Building { floors: vec![grid] },
            floor: 1,
            player: PlayerState::at_entry(),
            needs: Needs::full(),
            damage_log: DamageLog::new(),
            session: Session::Playing,
            elapsed: 0.0,
            decay_accum: 0.0,
            transition: None,
        }
    }

    #[test]
    fn standing_on_the_exit_wins() {
        let mut state = single_floor_state(CellType::Exit);
        state.tick(HeldKeys::empty(), false, 0.016);
        assert_eq!(state.session, Session::Victory);
    }

    #[test]
    fn death_wins_the_tie_against_victory() {
        let mut state = single_floor_state(CellType::Exit);
        // Thirst empties on the very tick the player stands on the exit.
        state.needs.thirst = 0.05;
        state.tick(HeldKeys::empty(), false, DECAY_PERIOD);
        assert_eq!(state.session, Session::Dead);
    }

    #[test]
    fn hazard_death_beats_the_exit_too() {
        let mut state = single_floor_state(CellType::Pit);
        state.needs.health = 20.0;
        state.tick(HeldKeys::empty(), false, 0.016);
        assert_eq!(state.session, Session::Dead, "pit damage 25 empties 20 health");
    }

    #[test]
    fn medkit_heals_and_is_consumed() {
        let mut state = single_floor_state(CellType::Medkit);
        state.needs.health = 30.0;
        state.tick(HeldKeys::empty(), false, 0.016);
        assert_eq!(state.needs.health, 70.0);
        assert_eq!(state.building.floor(1).kind_at(1, 1), CellType::Empty);
    }

    /// Two identical open floors with stairs under the player start on the
    /// upper one.
    fn two_floor_stairs_state() -> GameState {
        let mut state = single_floor_state(CellType::Empty);
        let upper = state.building.floors[0].clone();
        state.building.floors.push(upper);
        state.floor = 2;
        state.building.floor_mut(2).set_kind(1, 1, CellType::Stairs);
        state
    }

    #[test]
    fn stairs_schedule_a_fade_and_land_on_the_floor_below() {
        let mut state = two_floor_stairs_state();

        state.tick(HeldKeys::empty(), false, 0.016);
        assert!(state.transition.is_some());
        assert_eq!(state.floor, 2, "floor changes only when the fade completes");

        // Held keys are ignored while the fade runs.
        while state.transition.is_some() {
            state.tick(HeldKeys::FORWARD, false, 0.05);
        }
        assert_eq!(state.floor, 1);
        let reset = PlayerState::at_entry();
        assert_eq!(state.player.x, reset.x);
        assert_eq!(state.player.y, reset.y);
    }

    #[test]
    fn decay_keeps_running_during_the_fade() {
        let mut state = two_floor_stairs_state();
        state.tick(HeldKeys::empty(), false, 0.016);
        assert!(state.transition.is_some());

        for _ in 0..5 {
            state.tick(HeldKeys::empty(), false, DECAY_PERIOD);
        }
        assert!(state.transition.is_some(), "0.5 s into a 0.8 s fade");
        assert!(state.needs.thirst < 100.0, "decay must not pause for the fade");
    }

    #[test]
    fn dying_mid_fade_ends_the_run() {
        let mut state = two_floor_stairs_state();
        state.tick(HeldKeys::empty(), false, 0.016);
        assert!(state.transition.is_some());

        state.needs.thirst = 0.05;
        state.tick(HeldKeys::empty(), false, DECAY_PERIOD);
        assert_eq!(state.session, Session::Dead);
        assert!(state.transition.is_none());
    }

    #[test]
    fn interact_drinks_from_an_adjacent_cooler() {
        let mut state = single_floor_state(CellType::Empty);
        state.building.floor_mut(1).set_kind(2, 1, CellType::Cooler);
        state.needs.thirst = 12.0;
        state.tick(HeldKeys::empty(), true, 0.016);
        assert_eq!(state.needs.thirst, 100.0);
    }

    #[test]
    fn interact_out_of_range_does_nothing() {
        let mut state = single_floor_state(CellType::Empty);
        state.building.floor_mut(1).set_kind(5, 5, CellType::Cooler);
        state.needs.thirst = 12.0;
        state.tick(HeldKeys::empty(), true, 0.016);
        assert!(state.needs.thirst < 100.0);
    }

    #[test]
    fn decay_accumulator_is_frame_rate_independent() {
        let mut fine = single_floor_state(CellType::Empty);
        for _ in 0..100 {
            fine.tick(HeldKeys::empty(), false, 0.01);
        }
        let mut coarse = single_floor_state(CellType::Empty);
        for _ in 0..10 {
            coarse.tick(HeldKeys::empty(), false, 0.1);
        }
        // One simulated second either way; rounding of the accumulator may
        // defer at most one period.
        assert!((fine.needs.thirst - coarse.needs.thirst).abs() <= 0.12 + 1e-4);
        assert!(fine.needs.thirst <= 100.0 - 8.0 * 0.12 + 1e-4);
    }

    #[test]
    fn dead_session_ignores_further_ticks() {
        let mut state = single_floor_state(CellType::Empty);
        state.needs.thirst = 0.0;
        state.tick(HeldKeys::empty(), false, 0.016);
        assert_eq!(state.session, Session::Dead);
        let elapsed = state.elapsed;
        state.tick(HeldKeys::FORWARD, false, 0.016);
        assert_eq!(state.elapsed, elapsed);
    }
}
