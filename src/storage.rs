use crate::models::StudentData;
use crate::store::StoreError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Where committed student data ends up.
#[derive(Debug, Clone)]
pub enum Persistence {
    /// Pretty-printed JSON at the given path, rewritten on every commit.
    JsonFile(PathBuf),
    /// Nothing survives the process.
    Ephemeral,
}

impl Persistence {
    pub async fn load(&self) -> Result<StudentData, StoreError> {
        match self {
            Self::JsonFile(path) => load_file(path).await,
            Self::Ephemeral => Ok(StudentData::default()),
        }
    }

    pub async fn persist(&self, data: &StudentData) -> Result<(), StoreError> {
        match self {
            Self::JsonFile(path) => {
                let payload = serde_json::to_vec_pretty(data)?;
                fs::write(path, payload).await?;
                debug!(path = %path.display(), count = data.students.len(), "persisted students");
                Ok(())
            }
            Self::Ephemeral => Ok(()),
        }
    }
}

async fn load_file(path: &Path) -> Result<StudentData, StoreError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "data file not found, starting empty");
            Ok(StudentData::default())
        }
        Err(err) => Err(err.into()),
    }
}
