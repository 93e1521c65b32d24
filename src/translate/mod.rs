//! Microcode → GLSL translation
//!
//! Per instruction, the upstream stream walker hands the enclosing clause
//! descriptor and the decoded instruction to [`TexDispatch::translate`],
//! which dispatches on the opcode. Handlers append GLSL statements to the
//! [`State`] output buffer and update the attached [`Shader`] metadata.

pub mod select;
pub mod state;
pub mod tex;

pub use state::{Shader, ShaderStage, State};

use std::collections::HashMap;

use crate::error::{Result, TranslationError};
use crate::microcode::{ControlFlowInst, TexOpcode, TextureFetchInst};

/// A translation handler for one texture-clause opcode
pub trait TexTranslator: Send + Sync {
    /// Append the GLSL statements for `inst` to the output buffer
    fn translate(
        &self,
        state: &mut State<'_>,
        cf: &ControlFlowInst,
        inst: &TextureFetchInst,
    ) -> Result<()>;
}

impl<F> TexTranslator for F
where
    F: Fn(&mut State<'_>, &ControlFlowInst, &TextureFetchInst) -> Result<()> + Send + Sync,
{
    fn translate(
        &self,
        state: &mut State<'_>,
        cf: &ControlFlowInst,
        inst: &TextureFetchInst,
    ) -> Result<()> {
        self(state, cf, inst)
    }
}

/// Opcode → handler table for the texture-fetch category
///
/// Built once before any translation runs and read-only afterwards, so
/// concurrent translations of independent shaders can share it by
/// reference.
pub struct TexDispatch {
    handlers: HashMap<TexOpcode, Box<dyn TexTranslator>>,
}

impl TexDispatch {
    /// Build the table with every implemented opcode registered
    pub fn new() -> Self {
        let mut dispatch = Self {
            handlers: HashMap::new(),
        };
        tex::register_tex_functions(&mut dispatch);
        tracing::debug!(
            "Registered {} texture fetch handlers",
            dispatch.handlers.len()
        );
        dispatch
    }

    /// Insert or overwrite the handler for `opcode`
    pub fn register(&mut self, opcode: TexOpcode, handler: Box<dyn TexTranslator>) {
        self.handlers.insert(opcode, handler);
    }

    /// Translate a single instruction, dispatching on its opcode
    ///
    /// A raw opcode outside the ISA table is an unsupported construct; a
    /// known opcode with no registered handler surfaces as the distinct
    /// missing-handler kind so the caller can skip or stub it.
    pub fn translate(
        &self,
        state: &mut State<'_>,
        cf: &ControlFlowInst,
        inst: &TextureFetchInst,
    ) -> Result<()> {
        let opcode = inst.opcode().ok_or_else(|| {
            TranslationError::Unsupported(format!("texture opcode 0x{:02x}", inst.word0.opcode))
        })?;

        let handler = self
            .handlers
            .get(&opcode)
            .ok_or(TranslationError::MissingHandler { opcode })?;

        tracing::trace!(
            "Translating {:?} at cf_pc={} group_pc={}",
            opcode,
            state.cf_pc,
            state.group_pc
        );
        handler.translate(state, cf, inst)
    }
}

impl Default for TexDispatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cf() -> ControlFlowInst {
        ControlFlowInst::decode(0, 0)
    }

    // SAMPLE_L with an otherwise valid encoding
    fn unhandled_inst() -> TextureFetchInst {
        TextureFetchInst::decode(17, 7 << 9, 0)
    }

    #[test]
    fn test_missing_handler_distinct() {
        let dispatch = TexDispatch::new();
        let mut state = State::new(None);

        let err = dispatch
            .translate(&mut state, &cf(), &unhandled_inst())
            .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::MissingHandler {
                opcode: TexOpcode::SampleL
            }
        ));
        assert!(state.out.is_empty());
    }

    #[test]
    fn test_unknown_opcode_unsupported() {
        let dispatch = TexDispatch::new();
        let mut state = State::new(None);

        let inst = TextureFetchInst::decode(63, 0, 0);
        let err = dispatch.translate(&mut state, &cf(), &inst).unwrap_err();
        assert!(matches!(err, TranslationError::Unsupported(_)));
    }

    #[test]
    fn test_register_overwrites() {
        let mut dispatch = TexDispatch::new();

        fn noop(
            _state: &mut State<'_>,
            _cf: &ControlFlowInst,
            _inst: &TextureFetchInst,
        ) -> Result<()> {
            Ok(())
        }
        dispatch.register(TexOpcode::SampleL, Box::new(noop));

        let mut state = State::new(None);
        dispatch
            .translate(&mut state, &cf(), &unhandled_inst())
            .unwrap();
        assert!(state.out.is_empty());
    }

    #[test]
    fn test_dispatch_shared_across_threads() {
        let dispatch = std::sync::Arc::new(TexDispatch::new());

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let dispatch = dispatch.clone();
                std::thread::spawn(move || {
                    let mut state = State::new(None);
                    let inst = TextureFetchInst::decode(
                        16 | (1 << 8),
                        (1 << 12) | (7 << 15) | (7 << 18),
                        (1 << 15) | (1 << 23),
                    );
                    dispatch.translate(&mut state, &cf(), &inst).unwrap();
                    state.out
                })
            })
            .collect();

        for handle in handles {
            let out = handle.join().unwrap();
            assert!(out.contains("texture(sampler_1"));
        }
    }
}
