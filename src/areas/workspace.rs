use crate::areas::repository::REPO_DIR;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

/// Working directory file system operations.
///
/// The working tree is flat: only top-level plain files are tracked, and the
/// repository metadata directory is never listed.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all plain files in the working tree, in name order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut file_names = std::fs::read_dir(&self.path)
            .context(format!(
                "Unable to list working tree at {}",
                self.path.display()
            ))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name != REPO_DIR)
            .collect::<Vec<_>>();
        file_names.sort();

        Ok(file_names)
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_name);

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    /// Read a working-tree file into a blob carrying its name
    pub fn parse_blob(&self, file_name: &str) -> anyhow::Result<Blob> {
        let content = self.read_file(file_name)?;
        Ok(Blob::new(content, file_name.to_string()))
    }

    /// Create or overwrite a working-tree file
    pub fn write_file(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .context(format!("Unable to open file {}", file_path.display()))?;
        file.write_all(content)
            .context(format!("Unable to write file {}", file_path.display()))?;

        Ok(())
    }

    /// Delete a plain file if present; deleting an absent file is a no-op
    pub fn remove_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to remove file {}", file_path.display()))?;
        }

        Ok(())
    }
}
