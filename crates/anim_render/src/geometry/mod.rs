pub mod projection;
pub mod vector;
