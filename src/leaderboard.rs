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

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SCORES_PATH: &str = "scores.json";
const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub elapsed_ms: u64,
}

/// Fastest completed runs, persisted beside the executable. Sorted ascending
/// by run time and capped at [`MAX_ENTRIES`].
#[derive(Debug)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    path: PathBuf,
}

impl Leaderboard {
    /// Loads prior scores; a missing or corrupt file starts an empty board
    /// rather than failing the session.
    pub fn load() -> Self {
        Self::load_from(SCORES_PATH)
    }

    fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries: Vec<ScoreEntry> = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("Failed to parse {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        entries.sort_by_key(|entry| entry.elapsed_ms);
        entries.truncate(MAX_ENTRIES);
        Self { entries, path }
    }

    pub fn record(&mut self, name: &str, elapsed_ms: u64) {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            elapsed_ms,
        });
        self.entries.sort_by_key(|entry| entry.elapsed_ms);
        self.entries.truncate(MAX_ENTRIES);
        self.persist();
    }

    pub fn top(&self) -> &[ScoreEntry] {
        &self.entries
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.entries) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    eprintln!("Failed to write {}: {}", self.path.display(), e);
                }
            }
            Err(e) => eprintln!("Failed to serialize scores: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Fresh board bound to a per-test file under the system temp directory.
    fn temp_board(tag: &str) -> Leaderboard {
        let path = env::temp_dir().join(format!("tower-crawl-{tag}-scores.json"));
        let _ = fs::remove_file(&path);
        Leaderboard::load_from(path)
    }

    #[test]
    fn record_keeps_entries_sorted_ascending() {
        let mut board = temp_board("sort");
        board.record("Player", 5000);
        board.record("Player", 1000);
        board.record("Player", 3000);
        let times: Vec<u64> = board.top().iter().map(|e| e.elapsed_ms).collect();
        assert_eq!(times, vec![1000, 3000, 5000]);
        let _ = fs::remove_file(&board.path);
    }

    #[test]
    fn record_caps_the_board_at_ten_fastest() {
        let mut board = temp_board("cap");
        for i in 0..15u64 {
            board.record("Player", (15 - i) * 1000);
        }
        assert_eq!(board.top().len(), 10);
        assert_eq!(board.top()[0].elapsed_ms, 1000);
        assert_eq!(board.top()[9].elapsed_ms, 10_000);
        let _ = fs::remove_file(&board.path);
    }

    #[test]
    fn recorded_scores_survive_a_reload() {
        let mut board = temp_board("reload");
        board.record("Player", 4200);
        board.record("Player", 1200);
        let reloaded = Leaderboard::load_from(board.path.clone());
        let times: Vec<u64> = reloaded.top().iter().map(|e| e.elapsed_ms).collect();
        assert_eq!(times, vec![1200, 4200]);
        let _ = fs::remove_file(&board.path);
    }

    #[test]
    fn corrupt_file_yields_an_empty_board() {
        let path = env::temp_dir().join("tower-crawl-corrupt-scores.json");
        fs::write(&path, "not json").unwrap();
        let board = Leaderboard::load_from(&path);
        assert!(board.top().is_empty());
        let _ = fs::remove_file(&path);
    }
}
