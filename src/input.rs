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

use bitflags::bitflags;
use macroquad::prelude::*;
use once_cell::sync::Lazy;
use std::sync::Mutex;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeldKeys: u8 {
        const FORWARD      = 0b0000_0001;
        const BACKWARD     = 0b0000_0010;
        const STRAFE_LEFT  = 0b0000_0100;
        const STRAFE_RIGHT = 0b0000_1000;
        const TURN_LEFT    = 0b0001_0000;
        const TURN_RIGHT   = 0b0010_0000;
    }
}

/// One frame's worth of input: the held movement set plus discrete edges.
pub struct InputSnapshot {
    pub held: HeldKeys,
    pub interact: bool,
    pub toggle_view: bool,
    pub restart: bool,
    pub fov_up: bool,
    pub fov_down: bool,
    pub corridor_up: bool,
    pub corridor_down: bool,
}

struct Input;

impl Input {
    fn poll_keyboard(&self) -> InputSnapshot {
        let mut held = HeldKeys::empty();
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            held |= HeldKeys::FORWARD;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            held |= HeldKeys::BACKWARD;
        }
        if is_key_down(KeyCode::A) {
            held |= HeldKeys::STRAFE_LEFT;
        }
        if is_key_down(KeyCode::D) {
            held |= HeldKeys::STRAFE_RIGHT;
        }
        if is_key_down(KeyCode::Left) {
            held |= HeldKeys::TURN_LEFT;
        }
        if is_key_down(KeyCode::Right) {
            held |= HeldKeys::TURN_RIGHT;
        }

        InputSnapshot {
            held,
            interact: is_key_pressed(KeyCode::E) || is_key_pressed(KeyCode::Space),
            toggle_view: is_key_pressed(KeyCode::Tab),
            restart: is_key_pressed(KeyCode::R),
            fov_up: is_key_pressed(KeyCode::Equal),
            fov_down: is_key_pressed(KeyCode::Minus),
            corridor_up: is_key_pressed(KeyCode::RightBracket),
            corridor_down: is_key_pressed(KeyCode::LeftBracket),
        }
    }

    pub fn poll() -> InputSnapshot {
        INPUT.lock().unwrap().poll_keyboard()
    }
}

pub fn poll() -> InputSnapshot {
    Input::poll()
}

static INPUT: Lazy<Mutex<Input>> = Lazy::new(|| Mutex::new(Input));
