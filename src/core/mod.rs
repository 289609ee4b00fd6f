// src/core/mod.rs

pub mod fields;
pub mod net;
pub mod sanitize;

pub use fields::{Field, FieldMappingWarning, Fields, MappingLog};
pub use net::{HttpTransport, Transport};
