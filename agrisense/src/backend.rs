//! Backend abstraction - CPU inference backend
//!
//! All inference in this crate is deterministic request/response work on
//! read-only weights; the NdArray backend keeps the binary free of GPU
//! runtime requirements.

use burn::backend::NdArray;

/// The backend used for all inference in this crate
pub type InferenceBackend = NdArray;

/// Get the default device for the inference backend
pub fn default_device() -> <InferenceBackend as burn::tensor::backend::Backend>::Device {
    Default::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "NdArray (CPU)"
}
