pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod loop_driver;
pub mod raster;
pub mod render;
