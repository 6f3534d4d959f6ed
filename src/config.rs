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

use macroquad::prelude::load_string;
use serde::Deserialize;

const CONFIG_PATH: &str = "assets/config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub floors: usize,
    pub width: usize,
    pub height: usize,
    pub fov_degrees: f32,
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            floors: 10,
            width: 30,
            height: 30,
            fov_degrees: 90.0,
            player_name: "Player".to_string(),
        }
    }
}

impl GameConfig {
    /// Reads the config asset, falling back to defaults when the file is
    /// missing or malformed so a bare checkout still launches.
    pub async fn load() -> Self {
        let raw = match load_string(CONFIG_PATH).await {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Failed to load config from {}: {}", CONFIG_PATH, e);
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to parse {}: {}", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"floors": 4}"#).unwrap();
        assert_eq!(config.floors, 4);
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 30);
        assert_eq!(config.player_name, "Player");
    }

    #[test]
    fn fov_converts_to_radians() {
        let config = GameConfig::default();
        assert!((config.fov_radians() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
