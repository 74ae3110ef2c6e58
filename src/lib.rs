//! mapip - Show your external IP location on an ASCII world map
//!
//! The tool fetches the machine's public IP, geolocates it and draws a marker
//! on a bundled ASCII world map in the terminal.
//!
//! # Features
//! - **maxmind**: local MaxMind GeoLite2 database lookups (default)
//!
//! # Architecture
//! - `services`: external IP resolution and GeoIP lookup
//! - `map`: map template, bundled asset and coordinate projection
//! - `render`: marker placement, header line and ANSI styling
//! - `runtime`: once / watch execution modes
//! - `config`: configuration built from CLI flags
//! - `system`: logging and terminal output

pub mod cli;
pub mod config;
pub mod errors;
pub mod map;
pub mod render;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
