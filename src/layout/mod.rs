//! Grid feasibility and layout math.
//!
//! The core never positions widgets. It only decides whether a grid fits the
//! configured area and hands the presentation an evenly spaced
//! [`GridLayout`] to apply.

mod grid;

pub use grid::{GridLayout, LayoutSpec, Size2};
