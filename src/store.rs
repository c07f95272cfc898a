//! The student Data Store.
//!
//! Reads go straight to the shared snapshot. Writes are staged in a
//! [`Session`] and only become visible once [`Session::commit`] has
//! persisted them, so a failed commit leaves nothing behind.

use crate::models::{Student, StudentData};
use crate::storage::Persistence;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("constraint violated: student '{id}' already exists")]
    Duplicate { id: Uuid },

    #[error("constraint violated: student '{id}' no longer exists")]
    Missing { id: Uuid },
}

#[derive(Clone)]
pub struct Store {
    data: Arc<RwLock<StudentData>>,
    persistence: Arc<Persistence>,
}

impl Store {
    pub async fn load(persistence: Persistence) -> Result<Self, StoreError> {
        let data = persistence.load().await?;
        Ok(Self {
            data: Arc::new(RwLock::new(data)),
            persistence: Arc::new(persistence),
        })
    }

    pub async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let data = self.data.read().await;
        Ok(data.students.values().cloned().collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        let data = self.data.read().await;
        Ok(data.students.get(&id).cloned())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let data = self.data.read().await;
        Ok(data.students.contains_key(&id))
    }

    pub fn begin(&self) -> Session<'_> {
        Session {
            store: self,
            changes: Vec::new(),
        }
    }
}

#[derive(Debug)]
enum Change {
    Insert(Student),
    Update(Student),
    Remove(Uuid),
}

/// A batch of staged writes. Dropping it without committing discards them.
pub struct Session<'a> {
    store: &'a Store,
    changes: Vec<Change>,
}

impl Session<'_> {
    pub fn insert(&mut self, student: Student) {
        self.changes.push(Change::Insert(student));
    }

    pub fn update(&mut self, student: Student) {
        self.changes.push(Change::Update(student));
    }

    pub fn remove(&mut self, student: &Student) {
        self.changes.push(Change::Remove(student.id));
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        if self.changes.is_empty() {
            return Ok(());
        }

        let mut data = self.store.data.write().await;
        let mut next = data.clone();
        for change in self.changes {
            match change {
                Change::Insert(student) => {
                    if next.students.contains_key(&student.id) {
                        return Err(StoreError::Duplicate { id: student.id });
                    }
                    next.students.insert(student.id, student);
                }
                Change::Update(student) => match next.students.get_mut(&student.id) {
                    Some(existing) => *existing = student,
                    None => return Err(StoreError::Missing { id: student.id }),
                },
                Change::Remove(id) => {
                    next.students.remove(&id);
                }
            }
        }

        self.store.persistence.persist(&next).await?;
        *data = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentFields;

    fn student(first: &str, last: &str) -> Student {
        Student::new(StudentFields {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            program: None,
        })
    }

    async fn memory_store() -> Store {
        Store::load(Persistence::Ephemeral).await.unwrap()
    }

    #[tokio::test]
    async fn staged_writes_are_invisible_until_commit() {
        let store = memory_store().await;
        let ada = student("Ada", "Lovelace");

        let mut session = store.begin();
        session.insert(ada.clone());
        assert!(!store.exists(ada.id).await.unwrap());

        session.commit().await.unwrap();
        assert_eq!(store.find_by_id(ada.id).await.unwrap(), Some(ada));
    }

    #[tokio::test]
    async fn dropped_session_discards_changes() {
        let store = memory_store().await;
        {
            let mut session = store.begin();
            session.insert(student("Ada", "Lovelace"));
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_vanished_student_fails_whole_commit() {
        let store = memory_store().await;
        let ghost = student("Grace", "Hopper");
        let ada = student("Ada", "Lovelace");

        let mut session = store.begin();
        session.insert(ada.clone());
        session.update(ghost.clone());
        let err = session.commit().await.unwrap_err();

        assert!(matches!(err, StoreError::Missing { id } if id == ghost.id));
        assert!(!store.exists(ada.id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = memory_store().await;
        let ada = student("Ada", "Lovelace");

        let mut session = store.begin();
        session.insert(ada.clone());
        session.commit().await.unwrap();

        let mut session = store.begin();
        session.insert(ada.clone());
        assert!(matches!(
            session.commit().await,
            Err(StoreError::Duplicate { .. })
        ));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_then_lookup_is_none() {
        let store = memory_store().await;
        let ada = student("Ada", "Lovelace");

        let mut session = store.begin();
        session.insert(ada.clone());
        session.commit().await.unwrap();

        let mut session = store.begin();
        session.remove(&ada);
        session.commit().await.unwrap();
        assert_eq!(store.find_by_id(ada.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn json_file_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let ada = student("Ada", "Lovelace");

        let store = Store::load(Persistence::JsonFile(path.clone())).await.unwrap();
        let mut session = store.begin();
        session.insert(ada.clone());
        session.commit().await.unwrap();

        let reloaded = Store::load(Persistence::JsonFile(path)).await.unwrap();
        assert_eq!(reloaded.list().await.unwrap(), vec![ada]);
    }

    #[tokio::test]
    async fn failed_persist_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        // Loads as empty, but the parent directory is never created.
        let path = dir.path().join("absent").join("students.json");
        let store = Store::load(Persistence::JsonFile(path)).await.unwrap();
        let mut session = store.begin();
        session.insert(student("Ada", "Lovelace"));

        assert!(matches!(session.commit().await, Err(StoreError::Io(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_refuses_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, b"{ not json").unwrap();

        assert!(matches!(
            Store::load(Persistence::JsonFile(path)).await,
            Err(StoreError::Json(_))
        ));
    }
}
