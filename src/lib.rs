//! Latte GPU shader translation (microcode → GLSL)
//!
//! The Latte GPU uses an AMD R700-derived VLIW instruction set. This crate
//! decodes its packed texture-clause instruction words and emits equivalent
//! GLSL statements, together with the sampler-usage metadata the resource
//! binder needs to set up descriptor slots before a draw.
//!
//! Only a subset of the ISA is implemented; instructions without a handler
//! fail with a distinct error rather than being silently skipped.

pub mod error;
pub mod microcode;
pub mod sampler;
pub mod translate;

pub use error::{Result, TranslationError};
pub use sampler::SamplerType;
pub use translate::{Shader, ShaderStage, State, TexDispatch};
