use morpho_array::Array;
use num_traits::{One, Zero};

use super::MorphError;

/// The footprint of a 2D structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskShape {
    /// Full square: every offset participates.
    Box,
    /// Center row and center column only.
    Cross,
    /// Offsets inside the inscribed ellipse.
    Ellipse,
}

/// Create an odd square 2D structuring element of the given footprint.
///
/// Active offsets are set to one, inactive offsets to zero; the operations
/// treat any nonzero element as active.
///
/// # Errors
///
/// Returns [`MorphError::EvenMaskExtent`] if `size` is even (neighborhoods
/// need a center element).
///
/// # Examples
///
/// ```
/// use morpho_ops::morphology::{structuring_element, MaskShape};
///
/// let cross = structuring_element::<u8>(MaskShape::Cross, 3).unwrap();
/// assert_eq!(cross.as_slice(), &[0, 1, 0, 1, 1, 1, 0, 1, 0]);
/// ```
pub fn structuring_element<T>(shape: MaskShape, size: usize) -> Result<Array<T>, MorphError>
where
    T: Zero + One + Clone,
{
    if size % 2 == 0 {
        return Err(MorphError::EvenMaskExtent(size));
    }
    let center = size / 2;
    Ok(Array::from_shape_fn([size, size], |[r, c, _, _]| {
        let active = match shape {
            MaskShape::Box => true,
            MaskShape::Cross => r == center || c == center,
            MaskShape::Ellipse => {
                let dy = (r as f64 - center as f64) / (size as f64 / 2.0);
                let dx = (c as f64 - center as f64) / (size as f64 / 2.0);
                dx * dx + dy * dy <= 1.0
            }
        };
        if active {
            T::one()
        } else {
            T::zero()
        }
    }))
}

/// Create an odd all-ones square 2D mask of the given size.
///
/// # Errors
///
/// Returns [`MorphError::EvenMaskExtent`] if `size` is even.
pub fn box_mask<T>(size: usize) -> Result<Array<T>, MorphError>
where
    T: Zero + One + Clone,
{
    structuring_element(MaskShape::Box, size)
}

/// Create an odd all-ones cubic 3D mask of the given size.
///
/// # Errors
///
/// Returns [`MorphError::EvenMaskExtent`] if `size` is even.
pub fn box_mask3d<T>(size: usize) -> Result<Array<T>, MorphError>
where
    T: Zero + One + Clone,
{
    if size % 2 == 0 {
        return Err(MorphError::EvenMaskExtent(size));
    }
    Ok(Array::from_shape_val([size, size, size], T::one()))
}
