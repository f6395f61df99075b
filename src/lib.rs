//! Launch records dashboard.
//!
//! [`data`] holds the dataset loader and the pure filtering/aggregation
//! functions behind the two charts; [`state`], [`app`] and [`ui`] wire them to
//! an egui window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
