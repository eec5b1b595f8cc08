use anyhow::{Context, Result};
use std::path::Path;

/// A raw Tiny-ASM binary: no header, one instruction per byte.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub fn load_program(path: &Path, skip: usize, len: Option<usize>) -> Result<Program> {
    let file = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Program { name, bytes: payload.to_vec() })
}

/// Writes `bytes` verbatim.
pub fn write_program(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loader_applies_skip_and_len() {
        let path = std::env::temp_dir().join("_tiny_disasm_loader.bin");
        write_program(&path, &[0x05, 0x81, 0xC2, 0xC7, 0xD0, 0x00]).unwrap();
        let prog = load_program(&path, 1, Some(3)).unwrap();
        assert_eq!(prog.name, "_tiny_disasm_loader.bin");
        assert_eq!(prog.bytes, vec![0x81, 0xC2, 0xC7]);

        let whole = load_program(&path, 0, None).unwrap();
        assert_eq!(whole.len(), 6);

        assert!(load_program(&path, 7, None).is_err());
        assert!(load_program(&path, 2, Some(5)).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
