//! Terminal front end: prompts, pacing, and text rendering.

pub mod render;
pub mod terminal;

pub use terminal::Terminal;
