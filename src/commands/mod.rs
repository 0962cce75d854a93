pub mod config;
pub mod entity;
