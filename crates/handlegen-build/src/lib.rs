//! Generation configuration for handlegen.
//!
//! This crate provides:
//! - The configuration format (`handlegen.toml`)
//! - The curated mapping tables consumed read-only by the generator
//!
//! # Example
//!
//! ```toml
//! # handlegen.toml
//! [package]
//! name = "cudnn"
//! include = "cudnn_v7.h"
//!
//! [input]
//! headers = ["cudnn.h"]
//! strip_tokens = ["CUDNNWINAPI"]
//!
//! [output]
//! dir = "dnn"
//! formatter = ["goimports", "-w"]
//!
//! [tables]
//! prefix = "cudnn"
//! status_type = "cudnnStatus_t"
//!
//! [tables.types]
//! int = "int"
//! cudnnTensorDescriptor_t = { go = "TensorDescriptor", wrapper = true }
//!
//! [tables.setters]
//! cudnnTensorDescriptor_t = ["cudnnSetTensor4dDescriptor"]
//!
//! [tables.creations]
//! cudnnTensorDescriptor_t = ["cudnnCreateTensorDescriptor"]
//!
//! [tables.destructions]
//! cudnnTensorDescriptor_t = ["cudnnDestroyTensorDescriptor"]
//! ```

mod config;
mod error;
mod tables;

pub use config::{GenConfig, InputConfig, OutputConfig, PackageConfig};
pub use error::{ConfigError, Result};
pub use tables::{Tables, TypeMapping};
