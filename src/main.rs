mod cell;
mod config;
mod game;
mod grid;
mod input;
mod leaderboard;
mod maze;
mod needs;
mod player;
mod render;
mod textures;
use macroquad::prelude::*;

fn window_conf() -> Conf {
    Conf {
        window_title: "Tower Crawl".to_string(),
        window_width: 1000,
        window_height: 720,
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    game::run().await;
}
