#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// array comparison metrics module.
pub mod metrics;

/// morphological filtering module.
pub mod morphology;
