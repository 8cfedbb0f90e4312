use thiserror::Error;

/// First word of every SPIR-V module.
pub const SPIRV_MAGIC: u32 = 0x0723_0203;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpirvError {
    #[error("SPIR-V module is empty")]
    Empty,

    #[error("SPIR-V byte length ({0}) is not a multiple of 4")]
    InvalidLength(usize),

    #[error("bad SPIR-V magic number {0:#010x}")]
    BadMagic(u32),
}

/// Reinterprets raw file bytes as SPIR-V words.
///
/// Modules written in either byte order are accepted; big-endian ones are
/// swapped to the host order wgpu expects.
pub fn parse_spirv(bytes: &[u8]) -> Result<Vec<u32>, SpirvError> {
    if bytes.is_empty() {
        return Err(SpirvError::Empty);
    }
    if bytes.len() % 4 != 0 {
        return Err(SpirvError::InvalidLength(bytes.len()));
    }

    let mut words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    match words[0] {
        SPIRV_MAGIC => {}
        m if m.swap_bytes() == SPIRV_MAGIC => {
            for w in &mut words {
                *w = w.swap_bytes();
            }
        }
        other => return Err(SpirvError::BadMagic(other)),
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_le(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn little_endian_module_parses() {
        let bytes = module_le(&[SPIRV_MAGIC, 0x0001_0000, 0, 8, 0]);
        let words = parse_spirv(&bytes).unwrap();
        assert_eq!(words, vec![SPIRV_MAGIC, 0x0001_0000, 0, 8, 0]);
    }

    #[test]
    fn big_endian_module_is_swapped() {
        let bytes: Vec<u8> = [SPIRV_MAGIC, 0x0001_0000]
            .iter()
            .flat_map(|w| w.to_be_bytes())
            .collect();
        let words = parse_spirv(&bytes).unwrap();
        assert_eq!(words, vec![SPIRV_MAGIC, 0x0001_0000]);
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(parse_spirv(&[]), Err(SpirvError::Empty));
    }

    #[test]
    fn truncated_input_rejected() {
        let mut bytes = module_le(&[SPIRV_MAGIC, 1]);
        bytes.pop();
        assert_eq!(parse_spirv(&bytes), Err(SpirvError::InvalidLength(7)));
    }

    #[test]
    fn text_file_rejected_by_magic() {
        // A GLSL source handed over by mistake.
        let err = parse_spirv(b"#version 450\n\0\0\0").unwrap_err();
        assert!(matches!(err, SpirvError::BadMagic(_)));
        assert!(err.to_string().starts_with("bad SPIR-V magic number 0x"));
    }

    #[test]
    fn shipped_shaders_are_valid_spirv() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../shaders/bin");
        for name in ["triangle.vert.spv", "triangle.frag.spv"] {
            let bytes = std::fs::read(format!("{dir}/{name}")).unwrap();
            let words = parse_spirv(&bytes).unwrap();
            // magic, version, generator, bound, schema
            assert!(words.len() > 5, "{name} has no instructions");
        }
    }
}
