use crate::error::{Result, StoryboardError};
use std::path::{Path, PathBuf};

/// 確認檔案存在並回傳絕對路徑
pub fn resolve_existing_file(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(StoryboardError::NotFound(path.to_path_buf()));
    }
    Ok(std::path::absolute(path)?)
}

pub fn ensure_directory_exists(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    if !path.is_dir() {
        anyhow::bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve_existing_file(file.path()).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.exists());
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = resolve_existing_file(Path::new("does/not/exist.mp4")).unwrap_err();
        assert!(matches!(err, StoryboardError::NotFound(_)));
    }

    #[test]
    fn test_ensure_directory_exists_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_directory_exists_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_directory_exists(file.path()).is_err());
    }
}
