use morpho_array::{Array, Dim4};
use num_traits::Zero;
use rayon::prelude::*;

use super::MorphError;

/// Which extremum a pass computes.
#[derive(Clone, Copy)]
enum MorphOp {
    Dilate,
    Erode,
}

#[inline]
fn select<T: Copy + PartialOrd>(op: MorphOp, acc: T, v: T) -> T {
    match op {
        MorphOp::Dilate => {
            if v > acc {
                v
            } else {
                acc
            }
        }
        MorphOp::Erode => {
            if v < acc {
                v
            } else {
                acc
            }
        }
    }
}

fn check_input_rank(shape: Dim4, min: usize, max: usize) -> Result<(), MorphError> {
    let actual = shape.ndims();
    if actual < min || actual > max {
        return Err(MorphError::InvalidInputRank { min, max, actual });
    }
    Ok(())
}

/// Checks that the mask has exactly `rank` dimensions and that its spatial
/// extents are odd and equal.
fn check_mask(shape: Dim4, rank: usize) -> Result<(), MorphError> {
    let actual = shape.ndims();
    if actual != rank {
        return Err(MorphError::InvalidMaskRank {
            expected: rank,
            actual,
        });
    }
    for axis in 0..rank {
        let extent = shape[axis];
        if extent % 2 == 0 {
            return Err(MorphError::EvenMaskExtent(extent));
        }
        if extent != shape[0] {
            return Err(MorphError::NonSquareMask(shape));
        }
    }
    Ok(())
}

/// Collects the offsets of the nonzero mask elements, centered on the mask
/// midpoint. The mask footprint defines which neighbors participate in the
/// extremum; zero elements are excluded.
fn active_offsets_2d<T>(mask: &Array<T>) -> Result<Vec<(isize, isize)>, MorphError>
where
    T: Copy + Zero,
{
    let shape = mask.shape();
    let (rows, cols) = (shape[0], shape[1]);
    let center = (rows as isize / 2, cols as isize / 2);
    let data = mask.as_slice();

    let mut offsets = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            if !data[r * cols + c].is_zero() {
                offsets.push((r as isize - center.0, c as isize - center.1));
            }
        }
    }
    if offsets.is_empty() {
        return Err(MorphError::EmptyMask);
    }
    Ok(offsets)
}

fn active_offsets_3d<T>(mask: &Array<T>) -> Result<Vec<(isize, isize, isize)>, MorphError>
where
    T: Copy + Zero,
{
    let shape = mask.shape();
    let (d0, d1, d2) = (shape[0], shape[1], shape[2]);
    let center = (d0 as isize / 2, d1 as isize / 2, d2 as isize / 2);
    let data = mask.as_slice();

    let mut offsets = Vec::with_capacity(d0 * d1 * d2);
    for r in 0..d0 {
        for c in 0..d1 {
            for s in 0..d2 {
                if !data[(r * d1 + c) * d2 + s].is_zero() {
                    offsets.push((
                        r as isize - center.0,
                        c as isize - center.1,
                        s as isize - center.2,
                    ));
                }
            }
        }
    }
    if offsets.is_empty() {
        return Err(MorphError::EmptyMask);
    }
    Ok(offsets)
}

/// Planar pass: dims 0 and 1 are spatial, dim 2 is a batch of independent
/// slices. Out-of-bounds neighbors are excluded from the extremum; a position
/// whose active offsets all fall outside the input (possible only when the
/// mask footprint exceeds the input) passes its input value through.
fn morph_2d<T>(input: &Array<T>, mask: &Array<T>, op: MorphOp) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    check_input_rank(input.shape(), 2, 3)?;
    check_mask(mask.shape(), 2)?;
    let offsets = active_offsets_2d(mask)?;

    let dims = input.shape();
    let (rows, cols, batch) = (dims[0], dims[1], dims[2]);
    let strides = input.strides();
    let (row_stride, col_stride) = (strides[0], strides[1]);

    let mut output = Array::from_shape_val(dims, T::zero());
    let src = input.as_slice();
    if src.is_empty() {
        return Ok(output);
    }

    output
        .as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(i, out_row)| {
            for j in 0..cols {
                for k in 0..batch {
                    let mut best: Option<T> = None;
                    for &(di, dj) in &offsets {
                        let ni = i as isize + di;
                        let nj = j as isize + dj;
                        if ni < 0 || nj < 0 || ni >= rows as isize || nj >= cols as isize {
                            continue;
                        }
                        let v = src[ni as usize * row_stride + nj as usize * col_stride + k];
                        best = Some(match best {
                            Some(acc) => select(op, acc, v),
                            None => v,
                        });
                    }
                    out_row[j * col_stride + k] =
                        best.unwrap_or(src[i * row_stride + j * col_stride + k]);
                }
            }
        });

    Ok(output)
}

/// Volumetric pass: dims 0..2 are spatial, dim 3 is the batch axis.
fn morph_3d<T>(input: &Array<T>, mask: &Array<T>, op: MorphOp) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    check_input_rank(input.shape(), 3, 4)?;
    check_mask(mask.shape(), 3)?;
    let offsets = active_offsets_3d(mask)?;

    let dims = input.shape();
    let (d0, d1, d2, batch) = (dims[0], dims[1], dims[2], dims[3]);
    let strides = input.strides();
    let (s0, s1, s2) = (strides[0], strides[1], strides[2]);

    let mut output = Array::from_shape_val(dims, T::zero());
    let src = input.as_slice();
    if src.is_empty() {
        return Ok(output);
    }

    output
        .as_slice_mut()
        .par_chunks_exact_mut(s0)
        .enumerate()
        .for_each(|(i, out_plane)| {
            for j in 0..d1 {
                for k in 0..d2 {
                    for l in 0..batch {
                        let mut best: Option<T> = None;
                        for &(di, dj, dk) in &offsets {
                            let ni = i as isize + di;
                            let nj = j as isize + dj;
                            let nk = k as isize + dk;
                            if ni < 0
                                || nj < 0
                                || nk < 0
                                || ni >= d0 as isize
                                || nj >= d1 as isize
                                || nk >= d2 as isize
                            {
                                continue;
                            }
                            let v = src
                                [ni as usize * s0 + nj as usize * s1 + nk as usize * s2 + l];
                            best = Some(match best {
                                Some(acc) => select(op, acc, v),
                                None => v,
                            });
                        }
                        out_plane[j * s1 + k * s2 + l] =
                            best.unwrap_or(src[i * s0 + j * s1 + k * s2 + l]);
                    }
                }
            }
        });

    Ok(output)
}

/// Dilate an array with a 2D structuring element.
///
/// For every output position the result is the maximum of the input over the
/// nonzero mask offsets, centered on the position. Neighbors outside the
/// array bounds are excluded from the maximum. Inputs of rank 3 are treated
/// as a batch of 2D slices stacked along dim 2 (this also covers
/// multi-channel images, one channel per slice); the mask is applied
/// independently to every slice.
///
/// The output array has the same shape and element type as the input and is
/// newly allocated on every call.
///
/// # Arguments
///
/// * `input` - The input array, rank 2 or 3.
/// * `mask` - The structuring element: an odd square 2D array whose nonzero
///   elements define the neighborhood.
///
/// # Errors
///
/// Returns an invalid-argument error if the input rank is outside 2..=3, the
/// mask rank is not 2, a mask extent is even, the mask is not square, or the
/// mask has no nonzero element.
///
/// # Examples
///
/// ```
/// use morpho_array::Array;
/// use morpho_ops::morphology::{box_mask, dilate};
///
/// let input = Array::from_shape_vec(
///     [5, 5],
///     vec![
///         0u8, 0, 0, 0, 0,
///         0, 0, 0, 0, 0,
///         0, 0, 255, 0, 0,
///         0, 0, 0, 0, 0,
///         0, 0, 0, 0, 0,
///     ],
/// ).unwrap();
///
/// let dilated = dilate(&input, &box_mask(3).unwrap()).unwrap();
/// assert_eq!(dilated.get([1, 1, 0, 0]), Some(&255));
/// assert_eq!(dilated.get([0, 0, 0, 0]), Some(&0));
/// ```
pub fn dilate<T>(input: &Array<T>, mask: &Array<T>) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    morph_2d(input, mask, MorphOp::Dilate)
}

/// Erode an array with a 2D structuring element.
///
/// Dual of [`dilate`]: the result is the minimum of the input over the
/// nonzero mask offsets. Out-of-bounds neighbors are excluded from the
/// minimum rather than clamped or filled, matching the dilation policy so
/// that borders stay well-defined without artificial halos.
///
/// # Arguments
///
/// * `input` - The input array, rank 2 or 3.
/// * `mask` - The structuring element: an odd square 2D array whose nonzero
///   elements define the neighborhood.
///
/// # Errors
///
/// Same invalid-argument conditions as [`dilate`].
pub fn erode<T>(input: &Array<T>, mask: &Array<T>) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    morph_2d(input, mask, MorphOp::Erode)
}

/// Dilate a volume with a 3D structuring element.
///
/// Dims 0..2 of the input participate jointly with the mask axes; rank-4
/// inputs batch over dim 3 only.
///
/// # Errors
///
/// Returns an invalid-argument error if the input rank is below 3, the mask
/// rank is not 3 (a 9x9 planar mask or a 3x3x3x3 mask is rejected), or the
/// mask extents are even, unequal, or all zero.
pub fn dilate3d<T>(input: &Array<T>, mask: &Array<T>) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    morph_3d(input, mask, MorphOp::Dilate)
}

/// Erode a volume with a 3D structuring element.
///
/// Dual of [`dilate3d`].
///
/// # Errors
///
/// Same invalid-argument conditions as [`dilate3d`].
pub fn erode3d<T>(input: &Array<T>, mask: &Array<T>) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    morph_3d(input, mask, MorphOp::Erode)
}

/// Morphological opening: erosion followed by dilation.
///
/// Removes bright structures smaller than the mask footprint.
pub fn open<T>(input: &Array<T>, mask: &Array<T>) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    let eroded = erode(input, mask)?;
    dilate(&eroded, mask)
}

/// Morphological closing: dilation followed by erosion.
///
/// Fills dark structures smaller than the mask footprint.
pub fn close<T>(input: &Array<T>, mask: &Array<T>) -> Result<Array<T>, MorphError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    let dilated = dilate(input, mask)?;
    erode(&dilated, mask)
}

#[cfg(test)]
mod tests {
    use super::super::kernel::box_mask;
    use super::*;

    fn grid3x3(data: [i32; 9]) -> Array<i32> {
        Array::from_shape_vec([3, 3], data.to_vec()).unwrap()
    }

    #[test]
    fn test_erode_box_3x3() -> Result<(), MorphError> {
        let input = grid3x3([5, 3, 7, 6, 2, 8, 9, 4, 1]);
        let eroded = erode(&input, &box_mask(3)?)?;
        assert_eq!(eroded.as_slice(), &[2, 2, 2, 2, 1, 1, 2, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_dilate_box_3x3() -> Result<(), MorphError> {
        let input = grid3x3([5, 3, 7, 6, 2, 8, 9, 4, 1]);
        let dilated = dilate(&input, &box_mask(3)?)?;
        assert_eq!(dilated.as_slice(), &[6, 8, 8, 9, 9, 8, 9, 9, 8]);
        Ok(())
    }

    #[test]
    fn test_erode_cross_mask() -> Result<(), MorphError> {
        let input = grid3x3([5, 3, 7, 6, 2, 8, 9, 4, 1]);
        let cross =
            Array::from_shape_vec([3, 3], vec![0, 1, 0, 1, 1, 1, 0, 1, 0]).unwrap();
        let eroded = erode(&input, &cross)?;
        assert_eq!(eroded.as_slice(), &[3, 2, 3, 2, 2, 1, 4, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_identity_mask() -> Result<(), MorphError> {
        let input = grid3x3([10, 20, 30, 40, 50, 60, 70, 80, 90]);
        let identity =
            Array::from_shape_vec([3, 3], vec![0, 0, 0, 0, 1, 0, 0, 0, 0]).unwrap();
        assert_eq!(dilate(&input, &identity)?.as_slice(), input.as_slice());
        assert_eq!(erode(&input, &identity)?.as_slice(), input.as_slice());
        Ok(())
    }

    #[test]
    fn test_passthrough_when_no_neighbor_in_bounds() -> Result<(), MorphError> {
        // corners-only mask on a single-row input: every active offset lands
        // outside the array, so each position keeps its own value
        let input = Array::from_shape_vec([1, 3], vec![4, 5, 6]).unwrap();
        let corners =
            Array::from_shape_vec([3, 3], vec![1, 0, 1, 0, 0, 0, 1, 0, 1]).unwrap();
        assert_eq!(dilate(&input, &corners)?.as_slice(), &[4, 5, 6]);
        assert_eq!(erode(&input, &corners)?.as_slice(), &[4, 5, 6]);
        Ok(())
    }

    #[test]
    fn test_zero_mask_rejected() {
        let input = grid3x3([0; 9]);
        let mask = Array::<i32>::zeros([3, 3]);
        assert_eq!(dilate(&input, &mask).err(), Some(MorphError::EmptyMask));
    }

    #[test]
    fn test_input_rank_validation() {
        let mask = box_mask::<i32>(3).unwrap();

        let one_d = Array::from_shape_val([100], 1);
        assert_eq!(
            dilate(&one_d, &mask).err(),
            Some(MorphError::InvalidInputRank {
                min: 2,
                max: 3,
                actual: 1
            })
        );

        let four_d = Array::from_shape_val([5, 5, 2, 2], 1);
        assert_eq!(
            erode(&four_d, &mask).err(),
            Some(MorphError::InvalidInputRank {
                min: 2,
                max: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn test_mask_rank_validation() {
        let input = Array::from_shape_val([10, 10], 1);

        let one_d = Array::from_shape_val([16], 1);
        assert_eq!(
            dilate(&input, &one_d).err(),
            Some(MorphError::InvalidMaskRank {
                expected: 2,
                actual: 1
            })
        );

        let four_d = Array::from_shape_val([2, 2, 2, 2], 1);
        assert_eq!(
            erode(&input, &four_d).err(),
            Some(MorphError::InvalidMaskRank {
                expected: 2,
                actual: 4
            })
        );
    }

    #[test]
    fn test_mask_extent_validation() {
        let input = Array::from_shape_val([10, 10], 1);

        let even = Array::from_shape_val([4, 4], 1);
        assert_eq!(
            dilate(&input, &even).err(),
            Some(MorphError::EvenMaskExtent(4))
        );

        let rect = Array::from_shape_val([3, 5], 1);
        assert_eq!(
            dilate(&input, &rect).err(),
            Some(MorphError::NonSquareMask(Dim4::from([3, 5])))
        );
    }

    #[test]
    fn test_volume_mask_rank_validation() {
        let input = Array::from_shape_val([10, 10, 10], 1);

        let planar = Array::from_shape_val([9, 9], 1);
        assert_eq!(
            dilate3d(&input, &planar).err(),
            Some(MorphError::InvalidMaskRank {
                expected: 3,
                actual: 2
            })
        );

        let four_d = Array::from_shape_val([3, 3, 3, 3], 1);
        assert_eq!(
            erode3d(&input, &four_d).err(),
            Some(MorphError::InvalidMaskRank {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn test_open_removes_isolated_pixel() -> Result<(), MorphError> {
        let mut data = vec![0u8; 49];
        data[3 * 7 + 3] = 255;
        let input = Array::from_shape_vec([7, 7], data).unwrap();
        let opened = open(&input, &box_mask(3)?)?;
        assert!(opened.iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_close_fills_isolated_hole() -> Result<(), MorphError> {
        let mut data = vec![255u8; 49];
        data[3 * 7 + 3] = 0;
        let input = Array::from_shape_vec([7, 7], data).unwrap();
        let closed = close(&input, &box_mask(3)?)?;
        assert!(closed.iter().all(|&v| v == 255));
        Ok(())
    }
}
