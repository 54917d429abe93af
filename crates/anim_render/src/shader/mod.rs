pub mod grid;
pub mod pack;
pub mod plane;
pub mod renderer;
