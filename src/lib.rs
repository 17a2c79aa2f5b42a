//! termdeck — animated slide decks in the terminal.
//!
//! A deck is a YAML file: one entry per slide, each slide a list of
//! content items (plain text, figlet banners, tables, diagrams, images)
//! with optional per-item animations and per-slide entry/exit/background
//! animations. The pipeline is deck → renderables → timed effects →
//! a 50 ms player loop.

pub mod deck;
pub mod engine;
pub mod errors;
pub mod player;
pub mod render;
pub mod screen;
pub mod types;
