#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use morpho_array as array;

#[doc(inline)]
pub use morpho_ops as ops;
