//! Cleaning and linear trend forecasting for commodity market price tables.

pub mod analysis;
pub mod config;
pub mod data;
