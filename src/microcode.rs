//! Latte texture-clause microcode formats
//!
//! Texture-fetch instructions are 96 bits (3 x u32 words); control-flow
//! instructions are 64 bits (2 x u32 words). Every field is extracted with
//! the exact mask and shift the hardware defines, and no field is shared
//! across instruction categories.

/// Per-component channel selector
///
/// Four of these accompany every register reference, one per vector
/// component. Only X/Y/Z/W name a channel; `Zero` and `One` force a
/// constant and `Mask` discards the component.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectCode {
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
    Zero = 4,
    One = 5,
    Reserved = 6,
    Mask = 7,
}

impl From<u32> for SelectCode {
    fn from(v: u32) -> Self {
        match v & 0x7 {
            0 => SelectCode::X,
            1 => SelectCode::Y,
            2 => SelectCode::Z,
            3 => SelectCode::W,
            4 => SelectCode::Zero,
            5 => SelectCode::One,
            6 => SelectCode::Reserved,
            _ => SelectCode::Mask,
        }
    }
}

/// Texture-clause instruction opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexOpcode {
    VtxFetch = 0,
    VtxSemantic = 1,
    Mem = 2,
    Ld = 3,
    GetTextureInfo = 4,
    GetSampleInfo = 5,
    GetCompTexLod = 6,
    GetGradientsH = 7,
    GetGradientsV = 8,
    GetLerp = 9,
    KeepGradients = 10,
    SetGradientsH = 11,
    SetGradientsV = 12,
    Pass = 13,
    SetCubemapIndex = 14,
    Fetch4 = 15,
    Sample = 16,
    SampleL = 17,
    SampleLb = 18,
    SampleLz = 19,
    SampleG = 20,
    SampleGL = 21,
    SampleGLb = 22,
    SampleGLz = 23,
    SampleC = 24,
    SampleCL = 25,
    SampleCLb = 26,
    SampleCLz = 27,
    SampleCG = 28,
    SampleCGL = 29,
    SampleCGLb = 30,
    SampleCGLz = 31,
    SetTextureOffsets = 32,
    Gather4 = 33,
    Gather4O = 34,
    Gather4C = 35,
    Gather4CO = 36,
    GetBufferResinfo = 37,
}

impl TexOpcode {
    /// Decode a raw opcode field, `None` for values outside the ISA table
    pub fn from_raw(v: u32) -> Option<Self> {
        match v {
            0 => Some(TexOpcode::VtxFetch),
            1 => Some(TexOpcode::VtxSemantic),
            2 => Some(TexOpcode::Mem),
            3 => Some(TexOpcode::Ld),
            4 => Some(TexOpcode::GetTextureInfo),
            5 => Some(TexOpcode::GetSampleInfo),
            6 => Some(TexOpcode::GetCompTexLod),
            7 => Some(TexOpcode::GetGradientsH),
            8 => Some(TexOpcode::GetGradientsV),
            9 => Some(TexOpcode::GetLerp),
            10 => Some(TexOpcode::KeepGradients),
            11 => Some(TexOpcode::SetGradientsH),
            12 => Some(TexOpcode::SetGradientsV),
            13 => Some(TexOpcode::Pass),
            14 => Some(TexOpcode::SetCubemapIndex),
            15 => Some(TexOpcode::Fetch4),
            16 => Some(TexOpcode::Sample),
            17 => Some(TexOpcode::SampleL),
            18 => Some(TexOpcode::SampleLb),
            19 => Some(TexOpcode::SampleLz),
            20 => Some(TexOpcode::SampleG),
            21 => Some(TexOpcode::SampleGL),
            22 => Some(TexOpcode::SampleGLb),
            23 => Some(TexOpcode::SampleGLz),
            24 => Some(TexOpcode::SampleC),
            25 => Some(TexOpcode::SampleCL),
            26 => Some(TexOpcode::SampleCLb),
            27 => Some(TexOpcode::SampleCLz),
            28 => Some(TexOpcode::SampleCG),
            29 => Some(TexOpcode::SampleCGL),
            30 => Some(TexOpcode::SampleCGLb),
            31 => Some(TexOpcode::SampleCGLz),
            32 => Some(TexOpcode::SetTextureOffsets),
            33 => Some(TexOpcode::Gather4),
            34 => Some(TexOpcode::Gather4O),
            35 => Some(TexOpcode::Gather4C),
            36 => Some(TexOpcode::Gather4CO),
            37 => Some(TexOpcode::GetBufferResinfo),
            _ => None,
        }
    }
}

/// Texture-fetch word 0
#[derive(Debug, Clone, Copy)]
pub struct TexWord0 {
    pub opcode: u32,            // bits 0-5
    pub bc_frac_mode: bool,     // bit 6
    pub fetch_whole_quad: bool, // bit 7
    pub resource_id: u32,       // bits 8-15
    pub src_gpr: u32,           // bits 16-22
    pub src_rel: bool,          // bit 23
    pub alt_const: bool,        // bit 24
}

impl TexWord0 {
    pub fn decode(val: u32) -> Self {
        Self {
            opcode: val & 0x3F,
            bc_frac_mode: (val >> 6) & 1 != 0,
            fetch_whole_quad: (val >> 7) & 1 != 0,
            resource_id: (val >> 8) & 0xFF,
            src_gpr: (val >> 16) & 0x7F,
            src_rel: (val >> 23) & 1 != 0,
            alt_const: (val >> 24) & 1 != 0,
        }
    }
}

/// Texture-fetch word 1
#[derive(Debug, Clone, Copy)]
pub struct TexWord1 {
    pub dst_gpr: u32,          // bits 0-6
    pub dst_rel: bool,         // bit 7
    pub dst_sel_x: SelectCode, // bits 9-11
    pub dst_sel_y: SelectCode, // bits 12-14
    pub dst_sel_z: SelectCode, // bits 15-17
    pub dst_sel_w: SelectCode, // bits 18-20
    pub lod_bias: u32,         // bits 21-27, signed 4.3 fixed point
    pub coord_type_x: bool,    // bit 28
    pub coord_type_y: bool,    // bit 29
    pub coord_type_z: bool,    // bit 30
    pub coord_type_w: bool,    // bit 31
}

impl TexWord1 {
    pub fn decode(val: u32) -> Self {
        Self {
            dst_gpr: val & 0x7F,
            dst_rel: (val >> 7) & 1 != 0,
            dst_sel_x: SelectCode::from(val >> 9),
            dst_sel_y: SelectCode::from(val >> 12),
            dst_sel_z: SelectCode::from(val >> 15),
            dst_sel_w: SelectCode::from(val >> 18),
            lod_bias: (val >> 21) & 0x7F,
            coord_type_x: (val >> 28) & 1 != 0,
            coord_type_y: (val >> 29) & 1 != 0,
            coord_type_z: (val >> 30) & 1 != 0,
            coord_type_w: (val >> 31) & 1 != 0,
        }
    }

    /// Destination selects in component order
    pub fn dst_sels(&self) -> [SelectCode; 4] {
        [self.dst_sel_x, self.dst_sel_y, self.dst_sel_z, self.dst_sel_w]
    }
}

/// Texture-fetch word 2
#[derive(Debug, Clone, Copy)]
pub struct TexWord2 {
    pub offset_x: u32,         // bits 0-4, signed 4.1 fixed point texels
    pub offset_y: u32,         // bits 5-9
    pub offset_z: u32,         // bits 10-14
    pub sampler_id: u32,       // bits 15-19
    pub src_sel_x: SelectCode, // bits 20-22
    pub src_sel_y: SelectCode, // bits 23-25
    pub src_sel_z: SelectCode, // bits 26-28
    pub src_sel_w: SelectCode, // bits 29-31
}

impl TexWord2 {
    pub fn decode(val: u32) -> Self {
        Self {
            offset_x: val & 0x1F,
            offset_y: (val >> 5) & 0x1F,
            offset_z: (val >> 10) & 0x1F,
            sampler_id: (val >> 15) & 0x1F,
            src_sel_x: SelectCode::from(val >> 20),
            src_sel_y: SelectCode::from(val >> 23),
            src_sel_z: SelectCode::from(val >> 26),
            src_sel_w: SelectCode::from(val >> 29),
        }
    }

    /// Source selects in component order
    pub fn src_sels(&self) -> [SelectCode; 4] {
        [self.src_sel_x, self.src_sel_y, self.src_sel_z, self.src_sel_w]
    }
}

/// A decoded texture-fetch instruction
#[derive(Debug, Clone, Copy)]
pub struct TextureFetchInst {
    pub word0: TexWord0,
    pub word1: TexWord1,
    pub word2: TexWord2,
}

impl TextureFetchInst {
    /// Decode the three instruction words
    pub fn decode(word0: u32, word1: u32, word2: u32) -> Self {
        Self {
            word0: TexWord0::decode(word0),
            word1: TexWord1::decode(word1),
            word2: TexWord2::decode(word2),
        }
    }

    /// The instruction's opcode, `None` for raw values outside the ISA table
    pub fn opcode(&self) -> Option<TexOpcode> {
        TexOpcode::from_raw(self.word0.opcode)
    }
}

/// Control-flow word 0
#[derive(Debug, Clone, Copy)]
pub struct CfWord0 {
    pub addr: u32, // bits 0-31, clause address in instruction words
}

impl CfWord0 {
    pub fn decode(val: u32) -> Self {
        Self { addr: val }
    }
}

/// Control-flow word 1
#[derive(Debug, Clone, Copy)]
pub struct CfWord1 {
    pub pop_count: u32,         // bits 0-2
    pub cf_const: u32,          // bits 3-7
    pub cond: u32,              // bits 8-9
    pub count: u32,             // bits 10-12
    pub call_count: u32,        // bits 13-18
    pub end_of_program: bool,   // bit 21
    pub valid_pixel_mode: bool, // bit 22
    pub cf_inst: u32,           // bits 23-29
    pub whole_quad_mode: bool,  // bit 30
    pub barrier: bool,          // bit 31
}

impl CfWord1 {
    pub fn decode(val: u32) -> Self {
        Self {
            pop_count: val & 0x7,
            cf_const: (val >> 3) & 0x1F,
            cond: (val >> 8) & 0x3,
            count: (val >> 10) & 0x7,
            call_count: (val >> 13) & 0x3F,
            end_of_program: (val >> 21) & 1 != 0,
            valid_pixel_mode: (val >> 22) & 1 != 0,
            cf_inst: (val >> 23) & 0x7F,
            whole_quad_mode: (val >> 30) & 1 != 0,
            barrier: (val >> 31) & 1 != 0,
        }
    }
}

/// A decoded control-flow instruction, the clause descriptor handed to
/// every handler by the instruction-stream walker
#[derive(Debug, Clone, Copy)]
pub struct ControlFlowInst {
    pub word0: CfWord0,
    pub word1: CfWord1,
}

impl ControlFlowInst {
    /// Decode the two control-flow words
    pub fn decode(word0: u32, word1: u32) -> Self {
        Self {
            word0: CfWord0::decode(word0),
            word1: CfWord1::decode(word1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_code_decode() {
        assert_eq!(SelectCode::from(0), SelectCode::X);
        assert_eq!(SelectCode::from(1), SelectCode::Y);
        assert_eq!(SelectCode::from(2), SelectCode::Z);
        assert_eq!(SelectCode::from(3), SelectCode::W);
        assert_eq!(SelectCode::from(4), SelectCode::Zero);
        assert_eq!(SelectCode::from(5), SelectCode::One);
        assert_eq!(SelectCode::from(6), SelectCode::Reserved);
        assert_eq!(SelectCode::from(7), SelectCode::Mask);
        // Only the low three bits participate
        assert_eq!(SelectCode::from(8), SelectCode::X);
    }

    #[test]
    fn test_tex_word0_decode() {
        let val = 16 | (1 << 6) | (3 << 8) | (5 << 16) | (1 << 23);
        let word0 = TexWord0::decode(val);
        assert_eq!(word0.opcode, 16);
        assert!(word0.bc_frac_mode);
        assert!(!word0.fetch_whole_quad);
        assert_eq!(word0.resource_id, 3);
        assert_eq!(word0.src_gpr, 5);
        assert!(word0.src_rel);
        assert!(!word0.alt_const);
    }

    #[test]
    fn test_tex_word1_decode() {
        let val = 2 | (1 << 7) | (1 << 12) | (7 << 15) | (7 << 18) | (0x40 << 21);
        let word1 = TexWord1::decode(val);
        assert_eq!(word1.dst_gpr, 2);
        assert!(word1.dst_rel);
        assert_eq!(word1.dst_sel_x, SelectCode::X);
        assert_eq!(word1.dst_sel_y, SelectCode::Y);
        assert_eq!(word1.dst_sel_z, SelectCode::Mask);
        assert_eq!(word1.dst_sel_w, SelectCode::Mask);
        assert_eq!(word1.lod_bias, 0x40);
    }

    #[test]
    fn test_tex_word2_decode() {
        let val = 3 | (1 << 5) | (3 << 15) | (1 << 23) | (2 << 26) | (3u32 << 29);
        let word2 = TexWord2::decode(val);
        assert_eq!(word2.offset_x, 3);
        assert_eq!(word2.offset_y, 1);
        assert_eq!(word2.offset_z, 0);
        assert_eq!(word2.sampler_id, 3);
        assert_eq!(
            word2.src_sels(),
            [SelectCode::X, SelectCode::Y, SelectCode::Z, SelectCode::W]
        );
    }

    #[test]
    fn test_tex_opcode_from_raw() {
        assert_eq!(TexOpcode::from_raw(16), Some(TexOpcode::Sample));
        assert_eq!(TexOpcode::from_raw(19), Some(TexOpcode::SampleLz));
        assert_eq!(TexOpcode::from_raw(24), Some(TexOpcode::SampleC));
        assert_eq!(TexOpcode::from_raw(15), Some(TexOpcode::Fetch4));
        assert_eq!(TexOpcode::from_raw(37), Some(TexOpcode::GetBufferResinfo));
        assert_eq!(TexOpcode::from_raw(38), None);
        assert_eq!(TexOpcode::from_raw(63), None);
    }

    #[test]
    fn test_cf_word1_decode() {
        let val = 5 | (2 << 10) | (1 << 21) | (0x36 << 23) | (1u32 << 31);
        let word1 = CfWord1::decode(val);
        assert_eq!(word1.pop_count, 5);
        assert_eq!(word1.count, 2);
        assert!(word1.end_of_program);
        assert_eq!(word1.cf_inst, 0x36);
        assert!(word1.barrier);
        assert!(!word1.whole_quad_mode);
    }
}
