pub mod adapters;
pub mod classifier;
pub mod config;
pub mod error;
pub mod web;
