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

use crate::leaderboard::Leaderboard;
use crate::needs::Needs;

const BAR_WIDTH: f32 = 180.0;
const BAR_HEIGHT: f32 = 16.0;
const PADDING: f32 = 16.0;

fn draw_bar(label: &str, value: f32, y: f32, color: Color) {
    draw_text(label, PADDING, y - 4.0, 18.0, WHITE);
    draw_rectangle(PADDING, y, BAR_WIDTH, BAR_HEIGHT, Color::new(0.1, 0.1, 0.1, 0.8));
    let frac = (value / 100.0).clamp(0.0, 1.0);
    draw_rectangle(PADDING, y, BAR_WIDTH * frac, BAR_HEIGHT, color);
    draw_text(
        &format!("{}", value.floor() as i32),
        PADDING + BAR_WIDTH + 8.0,
        y + BAR_HEIGHT - 3.0,
        18.0,
        WHITE,
    );
}

pub fn draw(needs: &Needs, floor: usize, total_floors: usize, elapsed_secs: f64) {
    draw_bar("Thirst", needs.thirst, 40.0, Color::new(0.2, 0.6, 1.0, 1.0));
    draw_bar("Toilet", needs.toilet, 84.0, Color::new(0.9, 0.8, 0.2, 1.0));
    draw_bar("Health", needs.health, 128.0, Color::new(0.9, 0.2, 0.2, 1.0));

    draw_text(
        &format!("Floor {floor} / {total_floors}"),
        PADDING,
        170.0,
        22.0,
        WHITE,
    );
    let mins = elapsed_secs as u64 / 60;
    let secs = elapsed_secs as u64 % 60;
    draw_text(&format!("{mins:02}:{secs:02}"), PADDING, 194.0, 22.0, GRAY);
}

pub fn draw_death_overlay() {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.3, 0.0, 0.0, 0.55));
    let cx = screen_width() / 2.0;
    draw_text("You collapsed in the maze.", cx - 190.0, screen_height() / 2.0 - 10.0, 34.0, WHITE);
    draw_text("Press R to try again", cx - 110.0, screen_height() / 2.0 + 28.0, 24.0, GRAY);
}

pub fn draw_victory_overlay(elapsed_secs: f64, leaderboard: &Leaderboard) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.2, 0.0, 0.55));
    let cx = screen_width() / 2.0;
    draw_text("You found the exit!", cx - 150.0, 140.0, 36.0, WHITE);
    draw_text(
        &format!("Time: {:.1} s", elapsed_secs),
        cx - 70.0,
        178.0,
        24.0,
        WHITE,
    );

    draw_text("Best runs:", cx - 70.0, 226.0, 24.0, GOLD);
    for (i, entry) in leaderboard.top().iter().enumerate() {
        draw_text(
            &format!("{}. {} - {:.1} s", i + 1, entry.name, entry.elapsed_ms as f64 / 1000.0),
            cx - 110.0,
            254.0 + i as f32 * 24.0,
            20.0,
            WHITE,
        );
    }
    draw_text("Press R to play again", cx - 110.0, screen_height() - 60.0, 24.0, GRAY);
}

/// Timed blackout drawn while a floor transition is pending.
pub fn draw_fade(alpha: f32) {
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::new(0.0, 0.0, 0.0, alpha.clamp(0.0, 1.0)),
    );
}
