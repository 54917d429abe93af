pub mod gradient;
pub mod palette;
