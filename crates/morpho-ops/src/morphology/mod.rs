// Morphological filtering over dense arrays.

/// Error types used for the morphological operations.
pub mod error;
pub use error::MorphError;

/// Structuring-element (mask) constructors.
pub mod kernel;
pub use kernel::{box_mask, box_mask3d, structuring_element, MaskShape};

/// Dilation and erosion operations, 2D and 3D, with batching.
pub mod ops;
pub use ops::{close, dilate, dilate3d, erode, erode3d, open};
