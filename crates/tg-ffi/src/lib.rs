//! # tg-ffi
//!
//! Binds the C routines emitted by the tree-ensemble code generator,
//!
//! ```c
//! double predict(double* data);
//! int get_num_features(void);
//! ```
//!
//! as [`tg_core::Predictor`]s, so a generated translation unit linked into a
//! test binary can be checked against its golden fixture.
//!
//! This is the only crate in the workspace permitted to use `unsafe` code.
//! All unsafe blocks are confined to `call.rs`. Binding a routine is itself
//! `unsafe`: the [`NativePredictor`] constructors take the caller's word that
//! the routine honors the contract below, since safe code reaches it later
//! through [`tg_core::Predictor::predict`].
//!
//! ## Safety Contract
//!
//! The bound `predict` function MUST:
//! - Read at most `get_num_features()` doubles from `data`
//! - Not write through `data`
//! - Not retain `data` after returning
//! - Be safe to call concurrently from several threads
//!
//! `get_num_features` MUST be a pure function returning the same value on
//! every call.

#![deny(unsafe_code)]

pub mod call;
pub mod error;
pub mod predictor;

pub use call::{NumFeaturesFn, PredictFn};
pub use error::FfiError;
pub use predictor::NativePredictor;
