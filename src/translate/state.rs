//! Per-shader translation state
//!
//! One [`State`] exists per shader-translation invocation. Handlers only
//! ever append to its output buffer, so emitted statements preserve
//! instruction order.

use bitflags::bitflags;

use crate::sampler::{SamplerType, MAX_SAMPLERS};

bitflags! {
    /// Shader stage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShaderStage: u8 {
        const VERTEX = 0x01;
        const GEOMETRY = 0x02;
        const PIXEL = 0x04;
    }
}

/// Shader metadata accumulated during one translation
///
/// Owned by exactly one in-flight translation; the resource binder reads
/// `sampler_used` afterwards to decide which descriptor slots to bind.
#[derive(Debug, Clone)]
pub struct Shader {
    pub stage: ShaderStage,
    /// Sampler kind bound to each slot, set by the caller from resource
    /// state before translation
    pub samplers: [SamplerType; MAX_SAMPLERS],
    /// Slots referenced by translated code
    pub sampler_used: [bool; MAX_SAMPLERS],
}

impl Shader {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            samplers: [SamplerType::Invalid; MAX_SAMPLERS],
            sampler_used: [false; MAX_SAMPLERS],
        }
    }
}

/// Mutable context threaded through every handler during one translation
pub struct State<'a> {
    /// Output GLSL text
    pub out: String,
    /// Current indentation, two spaces per nesting level
    indent: String,
    /// Control-flow program counter, maintained by the stream walker
    pub cf_pc: u32,
    /// Instruction-group counter within the current clause
    pub group_pc: u32,
    /// Attached metadata record; `None` during analysis-only passes
    pub shader: Option<&'a mut Shader>,
}

impl<'a> State<'a> {
    /// Create a translation state
    ///
    /// Pass `None` for an analysis-only pass with no metadata record; the
    /// handlers then fall back to permissive defaults where resource
    /// bindings would be consulted.
    pub fn new(shader: Option<&'a mut Shader>) -> Self {
        Self {
            out: String::new(),
            indent: String::new(),
            cf_pc: 0,
            group_pc: 0,
            shader,
        }
    }

    /// Begin an output line at the current indentation
    pub fn line_start(&mut self) {
        self.out.push_str(&self.indent);
    }

    /// Terminate the current output line
    pub fn line_end(&mut self) {
        self.out.push('\n');
    }

    pub fn increase_indent(&mut self) {
        self.indent.push_str("  ");
    }

    pub fn decrease_indent(&mut self) {
        let len = self.indent.len().saturating_sub(2);
        self.indent.truncate(len);
    }

    /// Record that translated code references sampler slot `id`
    ///
    /// No-op when no metadata record is attached. `id` must already be
    /// validated against [`MAX_SAMPLERS`].
    pub fn register_sampler(&mut self, id: u32) {
        if let Some(shader) = &mut self.shader {
            shader.sampler_used[id as usize] = true;
        }
    }
}

/// Name of a general-purpose register reference
///
/// Relative references index through the loop register AL.
pub fn register_name(gpr: u32, rel: bool) -> String {
    if rel {
        format!("R[AL + {}]", gpr)
    } else {
        format!("R{}", gpr)
    }
}
