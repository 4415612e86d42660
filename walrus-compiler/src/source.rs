use std::path::{Path, PathBuf};

use path_clean::PathClean;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u32);

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: SourceId,
    pub path: PathBuf,
    pub contents: String,
}

impl SourceFile {
    /// The path is normalized (`./a/../b.wal` becomes `b.wal`) since it is only
    /// used to attribute diagnostics.
    pub fn new(id: SourceId, path: PathBuf, contents: String) -> Self {
        Self {
            id,
            path: path.clean(),
            contents,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
