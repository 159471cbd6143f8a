//! Rendering: the selector panel and the two charts.

pub mod charts;
pub mod panels;
