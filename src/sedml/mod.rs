//! SED-ML Level 1 elements

pub mod root;
pub mod simulation;

pub use root::SedMl;
pub use simulation::{Algorithm, UniformTimeCourse};
