//! Texture-fetch instruction handlers
//!
//! Unimplemented: VTX_FETCH, VTX_SEMANTIC, MEM, LD, GET_TEXTURE_INFO,
//! GET_SAMPLE_INFO, GET_COMP_TEX_LOD, GET_GRADIENTS_H, GET_GRADIENTS_V,
//! GET_LERP, KEEP_GRADIENTS, SET_GRADIENTS_H, SET_GRADIENTS_V, PASS,
//! SET_CUBEMAP_INDEX, SAMPLE_L, SAMPLE_LB, SAMPLE_G and variants,
//! SAMPLE_C_L, SAMPLE_C_LB, SAMPLE_C_LZ, SAMPLE_C_G and variants,
//! SET_TEXTURE_OFFSETS, GATHER4 and variants, GET_BUFFER_RESINFO.

use crate::error::{Result, TranslationError};
use crate::microcode::{ControlFlowInst, SelectCode, TexOpcode, TextureFetchInst};
use crate::sampler::{SamplerType, MAX_SAMPLERS};
use crate::translate::select::{condense_selections, write_select_vector};
use crate::translate::state::{register_name, State};
use crate::translate::TexDispatch;

/// Shared emission path for all sampling opcodes
///
/// `func` is the GLSL sampling function and `extra_args` literal argument
/// text appended after the coordinate vector.
fn sample_func(
    state: &mut State<'_>,
    _cf: &ControlFlowInst,
    inst: &TextureFetchInst,
    func: &str,
    extra_args: &str,
) -> Result<()> {
    let mut dst_sels = inst.word1.dst_sels();
    let mut src_sels = inst.word2.src_sels();

    let resource_id = inst.word0.resource_id;
    let sampler_id = inst.word2.sampler_id;

    if sampler_id as usize >= MAX_SAMPLERS {
        return Err(TranslationError::Unsupported(format!(
            "sampler id {} out of range",
            sampler_id
        )));
    }

    state.register_sampler(sampler_id);

    let sampler_type = match &state.shader {
        Some(shader) => shader.samplers[sampler_id as usize],
        None => {
            tracing::debug!(
                "No shader metadata attached, assuming 2D sampler for slot {}",
                sampler_id
            );
            SamplerType::Sampler2D
        }
    };

    if resource_id != sampler_id {
        return Err(TranslationError::Unsupported(format!(
            "sample with resource id {} != sampler id {}",
            resource_id, sampler_id
        )));
    }

    let dst = register_name(inst.word1.dst_gpr, inst.word1.dst_rel);
    let src = register_name(inst.word0.src_gpr, inst.word0.src_rel);

    let (dst_mask, num_dst_sels) = condense_selections(&mut dst_sels);

    if num_dst_sels == 0 {
        // Fully masked destination, the fetch has no visible effect
        return Ok(());
    }

    let sampler_elements = sampler_type.arg_count()?;

    if sampler_type.is_shadow() {
        // The hardware packs the depth compare value in the w channel,
        // whereas GLSL shadow samplers expect it as the last coordinate
        // component, so the last select must read w.
        match sampler_elements {
            2 => src_sels[1] = SelectCode::W,
            3 => src_sels[2] = SelectCode::W,
            4 => src_sels[3] = SelectCode::W,
            n => {
                return Err(TranslationError::Internal(format!(
                    "shadow sampler with {} coordinate components",
                    n
                )));
            }
        }
    }

    state.line_start();
    state
        .out
        .push_str(&format!("texTmp = {}(sampler_{}, ", func, sampler_id));
    write_select_vector(&mut state.out, &src, &src_sels, sampler_elements)?;
    state.out.push_str(extra_args);
    state.out.push_str(");");
    state.line_end();

    state.line_start();
    state.out.push_str(&format!("{}.{} = ", dst, dst_mask));
    write_select_vector(&mut state.out, "texTmp", &dst_sels, num_dst_sels)?;
    state.out.push(';');
    state.line_end();

    Ok(())
}

fn fetch4(state: &mut State<'_>, cf: &ControlFlowInst, inst: &TextureFetchInst) -> Result<()> {
    sample_func(state, cf, inst, "textureGather", "")
}

fn sample(state: &mut State<'_>, cf: &ControlFlowInst, inst: &TextureFetchInst) -> Result<()> {
    sample_func(state, cf, inst, "texture", "")
}

/// Sample with LOD forced to zero
fn sample_lz(state: &mut State<'_>, cf: &ControlFlowInst, inst: &TextureFetchInst) -> Result<()> {
    sample_func(state, cf, inst, "textureLod", ", 0")
}

/// Register every implemented texture-fetch opcode
///
/// SAMPLE and SAMPLE_C share one handler; the shadow-channel remap in
/// `sample_func` is what distinguishes comparison sampling.
pub fn register_tex_functions(dispatch: &mut TexDispatch) {
    dispatch.register(TexOpcode::Fetch4, Box::new(fetch4));
    dispatch.register(TexOpcode::Sample, Box::new(sample));
    dispatch.register(TexOpcode::SampleC, Box::new(sample));
    dispatch.register(TexOpcode::SampleLz, Box::new(sample_lz));
}
