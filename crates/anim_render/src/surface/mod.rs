pub mod buffer;
pub mod cell;
pub mod lines;
pub mod serialize;
