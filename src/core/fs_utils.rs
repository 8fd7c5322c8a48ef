//! File system utility helpers (BOM-aware readers, atomic writes)
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Read an HTML report as UTF-8 text, stripping UTF-8 BOM if present.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; extraction only
/// looks at `<title>` and `<meta>` so a stray byte must not fail the run.
pub fn read_html_file(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    let mut content = String::from_utf8_lossy(&bytes).into_owned();
    if content.starts_with('\u{FEFF}') {
        content = content.trim_start_matches('\u{FEFF}').to_string();
    }
    Ok(content)
}

/// Mode of files that did not exist before the first write
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replace `path` with `contents` via a temp file in the same directory.
///
/// The replaced file keeps its permissions; new files get a world-readable
/// mode. The temp file is removed on drop if anything fails before the rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;

    match fs::metadata(path) {
        Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => set_new_file_mode(tmp.as_file())?,
        Err(e) => return Err(e),
    }

    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_mode(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn set_new_file_mode(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
