use std::sync::Arc;
use tokio::sync::RwLock;

use models::{Course, Enrollment, IntoRecordId, Student};

use super::directory::{Collection, Directory, NewRecord, Record};
use crate::errors::ServiceError;

/// Cloneable handle to one [`Directory`] shared across request handlers.
///
/// Every mutation goes through the write lock, so the collections and both id
/// counters change inside a single critical section. Reads hand back owned
/// clones. Ids are normalized before awaiting the lock.
#[derive(Clone, Default)]
pub struct SharedDirectory {
    inner: Arc<RwLock<Directory>>,
}

impl SharedDirectory {
    pub fn new() -> Self {
        Self::from_directory(Directory::new())
    }

    pub fn seeded() -> Self {
        Self::from_directory(Directory::seeded())
    }

    pub fn from_directory(dir: Directory) -> Self {
        Self { inner: Arc::new(RwLock::new(dir)) }
    }

    /// Run a read-only closure against the store.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Directory) -> T,
    {
        let dir = self.inner.read().await;
        f(&*dir)
    }

    /// Apply a check-then-mutate closure under the write lock.
    pub async fn update<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Directory) -> Result<T, ServiceError>,
    {
        let mut dir = self.inner.write().await;
        f(&mut *dir)
    }

    pub async fn list(&self, collection: Collection) -> Vec<Record> {
        self.read(|d| d.list(collection)).await
    }

    pub async fn students(&self) -> Vec<Student> {
        self.read(|d| d.students().to_vec()).await
    }

    pub async fn courses(&self) -> Vec<Course> {
        self.read(|d| d.courses().to_vec()).await
    }

    pub async fn enrollments(&self) -> Vec<Enrollment> {
        self.read(|d| d.enrollments().to_vec()).await
    }

    pub async fn get<I: IntoRecordId>(&self, collection: Collection, id: I) -> Option<Record> {
        let id = id.into_record_id();
        self.read(|d| d.get(collection, id)).await
    }

    pub async fn student<I: IntoRecordId>(&self, id: I) -> Option<Student> {
        let id = id.into_record_id();
        self.read(|d| d.student(id).cloned()).await
    }

    pub async fn course<I: IntoRecordId>(&self, id: I) -> Option<Course> {
        let id = id.into_record_id();
        self.read(|d| d.course(id).cloned()).await
    }

    pub async fn create(&self, payload: NewRecord) -> Result<Record, ServiceError> {
        self.update(|d| d.create(payload)).await
    }

    pub async fn remove<I: IntoRecordId>(&self, collection: Collection, id: I) -> bool {
        let id = id.into_record_id();
        let mut dir = self.inner.write().await;
        dir.remove(collection, id)
    }

    pub async fn enroll<S: IntoRecordId, C: IntoRecordId>(&self, student_id: S, course_id: C) -> Result<(), ServiceError> {
        let (student_id, course_id) = (student_id.into_record_id(), course_id.into_record_id());
        self.update(|d| d.enroll(student_id, course_id)).await
    }

    pub async fn unenroll<S: IntoRecordId, C: IntoRecordId>(&self, student_id: S, course_id: C) -> Result<(), ServiceError> {
        let (student_id, course_id) = (student_id.into_record_id(), course_id.into_record_id());
        self.update(|d| d.unenroll(student_id, course_id)).await
    }

    pub async fn student_courses<I: IntoRecordId>(&self, student_id: I) -> Vec<Course> {
        let id = student_id.into_record_id();
        self.read(|d| d.student_courses(id)).await
    }

    pub async fn course_students<I: IntoRecordId>(&self, course_id: I) -> Vec<Student> {
        let id = course_id.into_record_id();
        self.read(|d| d.course_students(id)).await
    }

    pub async fn reset(&self) {
        self.inner.write().await.reset();
    }

    pub async fn seed(&self) {
        self.inner.write().await.seed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::NewStudent;

    #[tokio::test]
    async fn handles_share_one_store() -> Result<(), anyhow::Error> {
        let store = SharedDirectory::seeded();
        let other = store.clone();

        other.enroll("1", 2).await?;
        assert_eq!(store.student_courses(1).await.len(), 1);

        store
            .create(NewRecord::Student(NewStudent::new("David", "david@example.com")))
            .await?;
        assert_eq!(other.list(Collection::Students).await.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn reset_then_seed_restores_fixture() {
        let store = SharedDirectory::seeded();
        store.remove(Collection::Students, 1).await;
        store.reset().await;
        assert!(store.students().await.is_empty());

        store.seed().await;
        let alice = store.get(Collection::Students, "1").await;
        assert_eq!(
            alice,
            Some(Record::Student(Student { id: 1, name: "Alice".into(), email: "alice@example.com".into() }))
        );
    }

    #[tokio::test]
    async fn concurrent_enrollments_keep_pairs_unique() {
        let store = SharedDirectory::seeded();
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move { store.enroll(1, 1).await }));
        }
        let mut ok = 0;
        for t in tasks {
            if t.await.expect("join").is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.enrollments().await.len(), 1);
    }
}
