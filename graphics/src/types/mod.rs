//! Descriptor types shared across the graphics crate.

mod buffer;

pub use buffer::{BufferDescriptor, BufferUsage};
