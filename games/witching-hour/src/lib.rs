use wasm_bindgen::prelude::*;
use witching_engine::*;

mod beam;
mod challenge;
mod events;
mod game;
mod puzzles;
mod save;
mod scenes;
mod settings;
mod view;
use game::WitchingHour;

witching_web::export_game!(WitchingHour, "witching-hour");
