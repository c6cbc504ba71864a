//! Cost matrices and the named-location input contract.
//!
//! [`CostMatrix`] is what the optimizer consumes: square, directed, with
//! missing edges read back as infinite cost. [`LocationMatrix`] is the
//! form loaders produce (names plus nullable cells plus metadata) and
//! converts into a [`CostMatrix`] after shape validation.

mod cost;
mod locations;

pub use cost::CostMatrix;
pub use locations::LocationMatrix;
