use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const TMP_SUFFIX: &str = "tmp";

/// Returns the staging path used while replacing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Replaces the contents of `path` by staging to a temporary file and renaming it into place.
///
/// A failure at any step leaves the previous contents of `path` untouched.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}
