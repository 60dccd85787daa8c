pub mod config;
pub mod models;
pub mod storage;
pub mod widget;

pub use widget::LuckyDrawWidget;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize the logger for WebAssembly
    wasm_logger::init(wasm_logger::Config::default());
}
