use std::path::Path;

use crate::Result;

/// Checks whether the metadata describes a file with any execute bit set.
#[cfg(unix)]
pub fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    false
}

/// Sets the execute bits on an existing file.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result {
    Ok(())
}

/// Creates a symbolic link at `link` pointing at `target`.
#[cfg(unix)]
pub fn symlink(target: &Path, link: &Path) -> Result {
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn symlink(_target: &Path, link: &Path) -> Result {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("cannot create symbolic link at {}", link.display()),
    )
    .into())
}
