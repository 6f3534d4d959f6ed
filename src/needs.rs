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

use crate::cell::CellType;

/// Needs decay on a fixed 100 ms period, independent of the frame rate.
pub const DECAY_PERIOD: f32 = 0.1;
const THIRST_DECAY: f32 = 0.12;
const TOILET_DECAY: f32 = 0.08;
const MEDKIT_HEAL: f32 = 40.0;

#[derive(Clone, Copy, Debug)]
pub struct Needs {
    pub thirst: f32,
    pub toilet: f32,
    pub health: f32,
}

impl Needs {
    pub fn full() -> Self {
        Self { thirst: 100.0, toilet: 100.0, health: 100.0 }
    }

    /// One fixed-period decay step. Health only moves through hazards and
    /// medkits, never by decay.
    pub fn decay_tick(&mut self) {
        self.thirst = (self.thirst - THIRST_DECAY).max(0.0);
        self.toilet = (self.toilet - TOILET_DECAY).max(0.0);
    }

    pub fn any_depleted(&self) -> bool {
        self.thirst <= 0.0 || self.toilet <= 0.0 || self.health <= 0.0
    }

    pub fn drink(&mut self) {
        self.thirst = 100.0;
    }

    pub fn relieve(&mut self) {
        self.toilet = 100.0;
    }

    pub fn heal(&mut self) {
        self.health = (self.health + MEDKIT_HEAL).min(100.0);
    }

    pub fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }
}

pub fn hazard_damage(kind: CellType) -> f32 {
    match kind {
        CellType::Pit => 25.0,
        CellType::Spikes => 15.0,
        CellType::MovingWall => 10.0,
        _ => 0.0,
    }
}

/// One-shot hazard bookkeeping, external to the grid: each
/// `(floor, x, y)` deals damage at most once. Restart rebuilds the session
/// with a fresh log, which is what forgets fired traps.
#[derive(Default)]
pub struct DamageLog {
    fired: HashSet<(usize, usize, usize)>,
}

impl DamageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the damage to apply, or `None` if this trap already fired.
    pub fn trigger(&mut self, floor: usize, x: usize, y: usize, kind: CellType) -> Option<f32> {
        if !kind.is_hazard() {
            return None;
        }
        if self.fired.insert((floor, x, y)) {
            Some(hazard_damage(kind))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_never_goes_below_zero() {
        let mut needs = Needs { thirst: 0.2, toilet: 0.05, health: 50.0 };
        for _ in 0..100 {
            needs.decay_tick();
        }
        assert_eq!(needs.thirst, 0.0);
        assert_eq!(needs.toilet, 0.0);
        assert_eq!(needs.health, 50.0, "health does not decay");
    }

    #[test]
    fn pickups_clamp_at_one_hundred() {
        let mut needs = Needs { thirst: 3.0, toilet: 7.0, health: 90.0 };
        needs.drink();
        needs.relieve();
        needs.heal();
        assert_eq!(needs.thirst, 100.0);
        assert_eq!(needs.toilet, 100.0);
        assert_eq!(needs.health, 100.0);
    }

    #[test]
    fn trap_fires_once_per_floor_and_cell() {
        let mut log = DamageLog::new();
        assert_eq!(log.trigger(3, 5, 7, CellType::Spikes), Some(15.0));
        // Standing on the trap across consecutive ticks.
        assert_eq!(log.trigger(3, 5, 7, CellType::Spikes), None);
        assert_eq!(log.trigger(3, 5, 7, CellType::Spikes), None);
        // Same cell on another floor is a different trap.
        assert_eq!(log.trigger(2, 5, 7, CellType::Spikes), Some(15.0));
    }

    #[test]
    fn fresh_log_forgets_fired_traps() {
        let mut log = DamageLog::new();
        assert!(log.trigger(1, 2, 2, CellType::Pit).is_some());
        assert_eq!(log.trigger(1, 2, 2, CellType::Pit), None);
        let mut restarted = DamageLog::new();
        assert_eq!(restarted.trigger(1, 2, 2, CellType::Pit), Some(25.0));
    }

    #[test]
    fn non_hazard_cells_never_damage() {
        let mut log = DamageLog::new();
        assert_eq!(log.trigger(1, 1, 1, CellType::Medkit), None);
        assert_eq!(log.trigger(1, 1, 1, CellType::Empty), None);
    }
}
