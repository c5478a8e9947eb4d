mod component;
mod engine;
mod options;
mod render;
mod state;
mod types;
mod viewport;

pub use component::ForceGraphCanvas;
