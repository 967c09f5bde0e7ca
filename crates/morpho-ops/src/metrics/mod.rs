use morpho_array::Array;

use crate::morphology::MorphError;

/// Compute the root-mean-square deviation (RMSD) between two arrays.
///
/// The RMSD is defined as:
///
/// $ RMSD = \sqrt{\frac{1}{n} \sum_{i=1}^{n} (a_i - b_i)^2} $
///
/// where `n` is the number of elements. It is the comparison metric used for
/// golden data that went through a lossy 8-bit codec, where exact equality
/// cannot hold.
///
/// # Arguments
///
/// * `a` - The first array.
/// * `b` - The second array, same shape as the first.
///
/// # Errors
///
/// Returns [`MorphError::ShapeMismatch`] if the shapes differ.
///
/// # Example
///
/// ```
/// use morpho_array::Array;
/// use morpho_ops::metrics::rmsd;
///
/// let a = Array::from_shape_vec([2, 2], vec![0.0f32, 1.0, 2.0, 3.0]).unwrap();
/// let b = a.clone();
/// assert_eq!(rmsd(&a, &b).unwrap(), 0.0);
/// ```
pub fn rmsd(a: &Array<f32>, b: &Array<f32>) -> Result<f32, MorphError> {
    if a.shape() != b.shape() {
        return Err(MorphError::ShapeMismatch {
            expected: a.shape(),
            actual: b.shape(),
        });
    }

    let sum = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>();

    Ok((sum / a.numel() as f32).sqrt())
}
