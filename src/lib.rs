//! scalecmp - Library of image upscaling algorithms
//!
//! This library provides:
//! - An RGB [`raster::Image`] and a signed per-channel [`channels::ChannelImage`]
//! - A common scaler contract with baseline linear, edge-directed (DDT),
//!   parity-averaging (EEP) and self-similarity scalers
//! - A registry, PNG/JPEG codec helpers and `scalecmp.toml` configuration

pub mod channels;
pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod raster;
pub mod registry;
pub mod scalers;
