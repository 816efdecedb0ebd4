//! Node/edge diagram editor drawn on a 2D canvas.

pub mod analysis;
pub mod arena;
pub mod collision;
mod component;
pub mod geometry;
pub mod history;
pub mod render;
pub mod samples;
pub mod spatial;
pub mod state;
pub mod surface;
pub mod types;

pub use component::DiagramCanvas;
