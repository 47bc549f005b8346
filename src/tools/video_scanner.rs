use crate::config::FileTypeTable;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 展開命令列輸入：資料夾遞迴收集影片檔，其餘路徑原樣保留
///
/// 不存在的路徑也會保留，交由後續處理回報錯誤。
#[must_use]
pub fn expand_video_inputs(inputs: &[PathBuf], file_type_table: &FileTypeTable) -> Vec<PathBuf> {
    let mut videos = Vec::new();

    for input in inputs {
        if input.is_dir() {
            videos.extend(
                WalkDir::new(input)
                    .follow_links(false)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                    .filter(|entry| entry.file_type().is_file())
                    .filter(|entry| file_type_table.is_video_file(entry.path()))
                    .map(walkdir::DirEntry::into_path),
            );
        } else {
            videos.push(input.clone());
        }
    }

    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn table() -> FileTypeTable {
        FileTypeTable {
            video_file: vec![".mp4".to_string(), ".mkv".to_string()],
        }
    }

    #[test]
    fn test_expand_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.mkv"), b"").unwrap();
        fs::write(dir.path().join("a.MP4"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.mp4"), b"").unwrap();

        let videos = expand_video_inputs(&[dir.path().to_path_buf()], &table());
        let names: Vec<_> = videos
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.MP4", "b.mkv", "c.mp4"]);
    }

    #[test]
    fn test_plain_paths_kept_in_order() {
        let inputs = vec![PathBuf::from("/missing/z.avi"), PathBuf::from("/missing/a.mp4")];
        assert_eq!(expand_video_inputs(&inputs, &table()), inputs);
    }
}
