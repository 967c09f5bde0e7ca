#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `morpho-array` provides the owned array container consumed by the
//! morphology operations in `morpho-ops`. Arrays are dense, row-major
//! buffers with a fixed four-slot shape vector ([`Dim4`]); lower-rank data
//! simply leaves the trailing extents at one.
//!
//! # Quick Start
//!
//! ```rust
//! use morpho_array::Array;
//!
//! let a = Array::from_shape_vec([2, 3], vec![1u8, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(a.shape().ndims(), 2);
//! assert_eq!(a.get([1, 2, 0, 0]), Some(&6));
//! ```

/// Array module containing the owned container and its constructors.
pub mod array;

/// Shape module containing the four-slot extent vector.
pub mod dims;

/// Error types for array construction and access.
pub mod error;

pub use crate::array::{get_strides_from_shape, Array};
pub use crate::dims::Dim4;
pub use crate::error::ArrayError;
