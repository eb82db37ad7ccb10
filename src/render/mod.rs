//! Rendering module for writing documents back to their external form.

mod json;

pub use json::{to_json, write_json, JsonFormat};
