use std::path::{Path, PathBuf};

/// Resolves a template's relative `image_path` to a file on disk.
///
/// Two candidates are tried in order: the path joined onto the base
/// directory the service was deployed to, then the path taken literally
/// (relative to the working directory, or absolute).
#[derive(Debug, Clone)]
pub struct AssetLocator {
    base_dir: PathBuf,
}

impl AssetLocator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Base directory next to the running executable.
    pub fn beside_executable() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn candidates(&self, image_path: &str) -> [PathBuf; 2] {
        [self.base_dir.join(image_path), PathBuf::from(image_path)]
    }

    /// First candidate that exists, if any.
    pub fn locate(&self, image_path: &str) -> Option<PathBuf> {
        self.candidates(image_path).into_iter().find(|p| p.exists())
    }

    pub fn is_available(&self, image_path: &str) -> bool {
        self.locate(image_path).is_some()
    }
}
