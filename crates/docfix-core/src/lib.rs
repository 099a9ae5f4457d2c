pub mod config;
pub mod consts;
pub mod corners;
pub mod error;
pub mod geometry;
pub mod orient;
pub mod overlay;
pub mod points;
pub mod raster;
pub mod rectify;
pub mod session;
pub mod view;
