//! Trait definitions for the Taleweaver storytelling pipeline.
//!
//! The backend seam lives here so that the story crate can depend on the
//! abstraction while provider crates supply implementations.

mod traits;

pub use traits::TaleweaverDriver;
