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

use futures::future::join_all;
use macroquad::prelude::*;

use crate::cell::CellType;

/// Every texture is optional: a failed or still-missing asset degrades the
/// renderer to flat fills, it never blocks a frame.
pub struct TextureStore {
    pub wall: Option<Texture2D>,
    pub ceiling: Option<Texture2D>,
    pub cooler: Option<Texture2D>,
    pub toilet: Option<Texture2D>,
    pub door: Option<Texture2D>,
    pub exit: Option<Texture2D>,
    pub medkit: Option<Texture2D>,
}

async fn load_one(path: String) -> Option<Texture2D> {
    match load_texture(&path).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(e) => {
            eprintln!("Failed to load texture from {}: {}", path, e);
            None
        }
    }
}

impl TextureStore {
    pub async fn load() -> Self {
        let names = ["wall", "ceiling", "cooler", "toilet", "door", "exit", "medkit"];
        let mut loaded = join_all(
            names
                .iter()
                .map(|name| load_one(format!("assets/textures/{}.png", name))),
        )
        .await
        .into_iter();

        Self {
            wall: loaded.next().flatten(),
            ceiling: loaded.next().flatten(),
            cooler: loaded.next().flatten(),
            toilet: loaded.next().flatten(),
            door: loaded.next().flatten(),
            exit: loaded.next().flatten(),
            medkit: loaded.next().flatten(),
        }
    }

    /// Billboard texture for a sprite cell. Hazards have no art and fall
    /// back to flat color stripes.
    pub fn sprite(&self, kind: CellType) -> Option<&Texture2D> {
        match kind {
            CellType::Cooler => self.cooler.as_ref(),
            CellType::Toilet => self.toilet.as_ref(),
            CellType::Stairs => self.door.as_ref(),
            CellType::Exit => self.exit.as_ref(),
            CellType::Medkit => self.medkit.as_ref(),
            _ => None,
        }
    }
}
