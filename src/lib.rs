pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod simulation;
// cmd and reports belong to the binary crate (main.rs).
