use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EngineError;

const FRAME_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Media type of every listed frame; only JPEG stills are picked up.
pub const FRAME_MIME_TYPE: &str = "image/jpeg";

/// One extracted still, positioned by discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub path: PathBuf,
}

impl Frame {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Source of frames extracted by an external collaborator.
pub trait FrameProvider: Send + Sync {
    fn list_frames(&self) -> Result<Vec<Frame>, EngineError>;

    fn read_frame(&self, frame: &Frame) -> Result<Vec<u8>, EngineError> {
        fs::read(&frame.path).map_err(|source| EngineError::FrameRead {
            path: frame.path.clone(),
            source,
        })
    }
}

/// Frames stored as JPEG files in one directory, ordered by file name.
#[derive(Debug, Clone)]
pub struct DirectoryFrameProvider {
    dir: PathBuf,
}

impl DirectoryFrameProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FrameProvider for DirectoryFrameProvider {
    fn list_frames(&self) -> Result<Vec<Frame>, EngineError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "frames directory missing");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(EngineError::FrameList {
                    dir: self.dir.clone(),
                    source,
                })
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| EngineError::FrameList {
                dir: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && is_frame_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| Frame { index, path })
            .collect())
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FRAME_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{DirectoryFrameProvider, Frame, FrameProvider};
    use crate::error::EngineError;

    #[test]
    fn lists_jpegs_in_name_order() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        for name in [
            "frame_0002.jpg",
            "frame_0000.jpg",
            "frame_0001.JPEG",
            "frame_0003.png",
            "notes.txt",
        ] {
            fs::write(temp.path().join(name), b"x")?;
        }
        fs::create_dir(temp.path().join("nested.jpg"))?;

        let frames = DirectoryFrameProvider::new(temp.path()).list_frames()?;
        let names: Vec<String> = frames.iter().map(Frame::file_name).collect();
        assert_eq!(names, vec!["frame_0000.jpg", "frame_0001.JPEG", "frame_0002.jpg"]);
        assert_eq!(
            frames.iter().map(|frame| frame.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        Ok(())
    }

    #[test]
    fn missing_directory_is_empty() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let provider = DirectoryFrameProvider::new(temp.path().join("absent"));
        assert!(provider.list_frames()?.is_empty());
        Ok(())
    }

    #[test]
    fn read_frame_reports_missing_file() {
        let provider = DirectoryFrameProvider::new("/nonexistent");
        let frame = Frame {
            index: 0,
            path: "/nonexistent/frame_0000.jpg".into(),
        };
        assert!(matches!(
            provider.read_frame(&frame),
            Err(EngineError::FrameRead { .. })
        ));
    }
}
