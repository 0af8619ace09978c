//! Fixed-width vector type and its binary codec
//!
//! Every vector has exactly [`DIM`] double-precision components. The byte
//! format is the `DIM` components as consecutive little-endian IEEE-754
//! doubles, no header or length prefix: the format is not self-describing,
//! and [`DIM`] is the single compile-time constant shared by every producer
//! and consumer of stored bytes. A slice of any other length fails to decode.
//!
//! ## Contract
//!
//! - `from_bytes(v.to_bytes()) == v` for every vector (bit-exact)
//! - `dot` sums in index order; results are reproducible across runs
//! - `mean` of zero vectors is refused, never a silent NaN

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Number of components in every vector
pub const DIM: usize = 10;

/// Encoded vector width in bytes
pub const VECTOR_LEN: usize = DIM * 8;

/// A propensity vector: exactly [`DIM`] f64 components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector([f64; DIM]);

impl Vector {
    /// The all-zero vector
    pub const ZERO: Vector = Vector([0.0; DIM]);

    /// Create a vector from its components
    pub fn new(components: [f64; DIM]) -> Self {
        Vector(components)
    }

    /// Borrow the components
    pub fn components(&self) -> &[f64; DIM] {
        &self.0
    }

    /// Serialize as `DIM` consecutive little-endian f64 values
    pub fn to_bytes(&self) -> [u8; VECTOR_LEN] {
        let mut buf = [0u8; VECTOR_LEN];
        LittleEndian::write_f64_into(&self.0, &mut buf);
        buf
    }

    /// Deserialize from the fixed-width byte form
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `bytes` is not exactly `DIM * 8` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != VECTOR_LEN {
            return Err(Error::Decode {
                expected: VECTOR_LEN,
                actual: bytes.len(),
            });
        }
        let mut components = [0.0f64; DIM];
        LittleEndian::read_f64_into(bytes, &mut components);
        Ok(Vector(components))
    }

    /// Dot product, summed in index order
    ///
    /// The summation order is fixed so that a given pair of vectors always
    /// produces the identical float result.
    pub fn dot(&self, other: &Vector) -> f64 {
        let mut acc = 0.0;
        for i in 0..DIM {
            acc += self.0[i] * other.0[i];
        }
        acc
    }

    /// Elementwise mean of a non-empty set of vectors
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for an empty slice; dividing by zero is
    /// refused rather than producing NaN components.
    pub fn mean(vectors: &[Vector]) -> Result<Vector> {
        if vectors.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut acc = [0.0f64; DIM];
        for v in vectors {
            for i in 0..DIM {
                acc[i] += v.0[i];
            }
        }
        let n = vectors.len() as f64;
        for c in acc.iter_mut() {
            *c /= n;
        }
        Ok(Vector(acc))
    }
}

impl From<[f64; DIM]> for Vector {
    fn from(components: [f64; DIM]) -> Self {
        Vector(components)
    }
}
