use num_traits::Zero;

use crate::dims::Dim4;
use crate::error::ArrayError;

/// Computes the strides for a row-major (C-contiguous) layout.
///
/// The rightmost extent has stride 1 and each extent's stride is the product
/// of all extents to its right.
///
/// # Examples
///
/// ```rust
/// use morpho_array::{get_strides_from_shape, Dim4};
///
/// let strides = get_strides_from_shape(Dim4::from([2, 3]));
/// assert_eq!(strides, [3, 1, 1, 1]);
/// ```
pub fn get_strides_from_shape(shape: Dim4) -> [usize; 4] {
    let mut strides = [0usize; 4];
    let mut stride = 1;
    for i in (0..4).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A dense, owned, row-major array with up to four dimensions.
///
/// The container is deliberately small: it owns a contiguous buffer, a
/// [`Dim4`] shape and the precomputed strides. It is the value type consumed
/// and produced by the morphology operations; those never mutate their
/// inputs and allocate exactly one new `Array` per call.
///
/// # Examples
///
/// ```rust
/// use morpho_array::Array;
///
/// let a = Array::from_shape_vec([2, 2], vec![1u8, 2, 3, 4]).unwrap();
/// assert_eq!(a.numel(), 4);
/// assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct Array<T> {
    data: Vec<T>,
    shape: Dim4,
    strides: [usize; 4],
}

impl<T> Array<T> {
    /// Create a new array from a shape and a data vector.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidShape`] if the data length does not match
    /// the shape product.
    pub fn from_shape_vec(shape: impl Into<Dim4>, data: Vec<T>) -> Result<Self, ArrayError> {
        let shape = shape.into();
        let numel = shape.elements();
        if numel != data.len() {
            return Err(ArrayError::InvalidShape {
                expected: numel,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Create a new array from a shape and a slice of data.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidShape`] if the data length does not match
    /// the shape product.
    pub fn from_shape_slice(shape: impl Into<Dim4>, data: &[T]) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Create a new array filled with a single value.
    pub fn from_shape_val(shape: impl Into<Dim4>, value: T) -> Self
    where
        T: Clone,
    {
        let shape = shape.into();
        Self {
            data: vec![value; shape.elements()],
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new array by evaluating a function at every index.
    ///
    /// The function receives the full four-slot index `[i0, i1, i2, i3]`;
    /// trailing indices are zero for lower-rank shapes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morpho_array::Array;
    ///
    /// let iota = Array::from_shape_fn([2, 3], |[i, j, _, _]| (i * 3 + j) as u8);
    /// assert_eq!(iota.as_slice(), &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn from_shape_fn(shape: impl Into<Dim4>, f: impl Fn([usize; 4]) -> T) -> Self {
        let shape = shape.into();
        let mut data = Vec::with_capacity(shape.elements());
        for i0 in 0..shape[0] {
            for i1 in 0..shape[1] {
                for i2 in 0..shape[2] {
                    for i3 in 0..shape[3] {
                        data.push(f([i0, i1, i2, i3]));
                    }
                }
            }
        }
        Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new array filled with zeros.
    pub fn zeros(shape: impl Into<Dim4>) -> Self
    where
        T: Zero + Clone,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// The shape of the array.
    #[inline]
    pub fn shape(&self) -> Dim4 {
        self.shape
    }

    /// The effective rank of the array (see [`Dim4::ndims`]).
    #[inline]
    pub fn ndims(&self) -> usize {
        self.shape.ndims()
    }

    /// The row-major strides of the array data in memory.
    #[inline]
    pub fn strides(&self) -> [usize; 4] {
        self.strides
    }

    /// Total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// The data of the array as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The data of the array as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the array and returns the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to the element at the given four-slot index, or `None`
    /// if any index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morpho_array::Array;
    ///
    /// let a = Array::from_shape_vec([2, 2], vec![1u8, 2, 3, 4]).unwrap();
    /// assert_eq!(a.get([1, 0, 0, 0]), Some(&3));
    /// assert_eq!(a.get([2, 0, 0, 0]), None);
    /// ```
    pub fn get(&self, index: [usize; 4]) -> Option<&T> {
        for (axis, &i) in index.iter().enumerate() {
            if i >= self.shape[axis] {
                return None;
            }
        }
        let offset = index
            .iter()
            .zip(self.strides.iter())
            .map(|(&i, &s)| i * s)
            .sum::<usize>();
        self.data.get(offset)
    }

    /// Apply a function to each element, producing a new array of the same
    /// shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Array<U> {
        Array {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Cast each element to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::CastError`] if any element cannot be represented
    /// in the target type.
    pub fn cast<U>(&self) -> Result<Array<U>, ArrayError>
    where
        T: num_traits::NumCast + Copy,
        U: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ArrayError::CastError))
            .collect::<Result<Vec<U>, _>>()?;
        Ok(Array {
            data,
            shape: self.shape,
            strides: self.strides,
        })
    }

    /// Returns an iterator over the elements in memory order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}
