//! Sampler kind table
//!
//! Maps each bound sampler slot's dimensionality to the coordinate arity
//! the hardware expects. The table must stay consistent with the sampler
//! classification of the hardware-configuration API that packs the actual
//! sampler registers.

use crate::error::{Result, TranslationError};

/// Number of sampler slots per shader stage
pub const MAX_SAMPLERS: usize = 16;

/// GLSL sampler dimensionality for a bound sampler slot
///
/// `Invalid` marks a slot the caller never resolved a binding for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerType {
    #[default]
    Invalid,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler2DRect,
    Sampler1DArray,
    Sampler2DArray,
    SamplerCubeArray,
    SamplerBuffer,
    Sampler2DMS,
    Sampler2DMSArray,
    Sampler1DShadow,
    Sampler2DShadow,
    SamplerCubeShadow,
    Sampler2DRectShadow,
    Sampler1DArrayShadow,
    Sampler2DArrayShadow,
    SamplerCubeArrayShadow,
}

impl SamplerType {
    /// Number of texture-coordinate components the hardware expects
    ///
    /// Array kinds consume one extra component for the layer index and
    /// shadow kinds one extra for the depth reference value. Kinds with no
    /// defined mapping in this hardware revision are unsupported.
    pub fn arg_count(self) -> Result<usize> {
        match self {
            SamplerType::Sampler1D => Ok(1),
            SamplerType::Sampler2D => Ok(2),
            SamplerType::Sampler3D => Ok(3),
            SamplerType::Sampler1DArray => Ok(1 + 1),
            SamplerType::Sampler2DArray => Ok(2 + 1),
            SamplerType::Sampler1DShadow => Ok(1 + 1),
            SamplerType::Sampler2DShadow => Ok(2 + 1),
            SamplerType::Sampler1DArrayShadow => Ok(1 + 1 + 1),
            SamplerType::Sampler2DArrayShadow => Ok(2 + 1 + 1),
            SamplerType::SamplerCube => Ok(3),
            SamplerType::SamplerCubeArray => Ok(3 + 1),
            SamplerType::SamplerCubeShadow => Ok(3 + 1),
            other => Err(TranslationError::Unsupported(format!(
                "sampler type {:?}",
                other
            ))),
        }
    }

    /// Whether this kind performs a hardware depth comparison
    pub fn is_shadow(self) -> bool {
        matches!(
            self,
            SamplerType::Sampler1DShadow
                | SamplerType::Sampler2DShadow
                | SamplerType::SamplerCubeShadow
                | SamplerType::Sampler2DRectShadow
                | SamplerType::Sampler1DArrayShadow
                | SamplerType::Sampler2DArrayShadow
                | SamplerType::SamplerCubeArrayShadow
        )
    }
}
