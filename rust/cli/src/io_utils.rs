//! File and stdin helpers shared by the commands.
//!
//! Transcripts may be stored plain or Zstandard-compressed; the `.zst`
//! extension selects compression on both read and write.

use std::io::BufRead;
use std::path::Path;

const ZSTD_LEVEL: i32 = 3;

/// Reads one trimmed line. `None` on EOF or read error.
///
/// ```rust
/// use std::io::Cursor;
/// # use sequence_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("  card 3 \n");
/// assert_eq!(read_stdin_line(&mut input), Some("card 3".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing when the path ends with `.zst`.
/// A leading UTF-8 BOM is dropped.
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Writes a text file, compressing when the path ends with `.zst`.
pub fn write_text_auto(path: &Path, content: &str) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let bytes = if path.to_string_lossy().ends_with(".zst") {
        zstd::encode_all(content.as_bytes(), ZSTD_LEVEL).map_err(|e| e.to_string())?
    } else {
        content.as_bytes().to_vec()
    };
    std::fs::write(path, bytes)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
