// Core modules
pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod review;
