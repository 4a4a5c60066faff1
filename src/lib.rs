pub mod camera;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod physics;
pub mod snapshot;
pub mod world_gen;
