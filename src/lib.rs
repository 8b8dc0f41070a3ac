//! FockCore: Fock-basis matrix elements of Gaussian unitaries
//!
//! Dense multidimensional Hermite tensors generated by a linear recurrence
//! from a single seed entry, for interferometers, squeezers and
//! displacements.

pub mod enumerator;
pub mod engine;
pub mod error;
pub mod index;
pub mod scalar;
pub mod tensor;
pub mod variants;


pub use engine::{AxisRestriction, FillConfig, RecurrenceEngine, SelectionRule};
pub use enumerator::PositionEnumerator;
pub use error::{FockError, Result};
pub use index::{flatten, tensor_len, unflatten};
pub use scalar::FockScalar;
pub use tensor::HermiteTensor;
pub use variants::{
    displacement_tensor, hermite_tensor, interferometer_tensor, normalized_hermite_tensor,
    single_mode_squeezer_tensor, two_mode_squeezer_tensor, DimConstraint, Variant,
};
