//! Rendering of electricity production dashboards.
//!
//! The crate takes the aggregates computed by `stromschau-production` and
//! writes them into a self-contained HTML page with Plotly charts.

#![warn(missing_docs)]

pub(crate) mod chart;
pub(crate) mod template;

pub mod error;
pub mod layout;
