pub mod config;
pub mod info;
pub mod rectify;
pub mod rotate;
