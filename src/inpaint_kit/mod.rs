pub mod algorithm;
pub mod diffusion;
pub mod grid;
pub mod region_fill;
