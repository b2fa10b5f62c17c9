//! Data model types for encnorm.
//!
//! A single sum type carries every input: text or bytes, decided at the
//! boundary where the value enters the program.

pub mod value;

pub use value::{Kind, Value};
