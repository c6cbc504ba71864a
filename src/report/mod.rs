//! Reporting on top of optimizer output.
//!
//! Pure post-processing: takes returned node sequences and any matrix over
//! the same locations (time, fare, transfer count...) and produces totals
//! and labels. Nothing here feeds back into the optimizer.

mod totals;

pub use totals::{path_total, route_label, TourReport};
