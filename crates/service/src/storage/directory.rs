use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use models::{Course, Enrollment, IntoRecordId, NewCourse, NewStudent, RecordId, Student};

use crate::errors::{ServiceError, ALREADY_ENROLLED, EMAIL_NOT_UNIQUE};

const SEED_STUDENTS: [(&str, &str); 3] = [
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@example.com"),
];

const SEED_COURSES: [(&str, &str); 3] = [
    ("Math", "Mr. Smith"),
    ("Physics", "Dr. Brown"),
    ("History", "Ms. Clark"),
];

/// The three collections held by a [`Directory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    Courses,
    Enrollments,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Courses => "courses",
            Collection::Enrollments => "enrollments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record from any collection. Serialized untagged, so a `Record::Student`
/// has exactly the JSON shape of a `Student`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Student(Student),
    Course(Course),
    Enrollment(Enrollment),
}

impl Record {
    /// Enrollments have no identity of their own.
    pub fn id(&self) -> Option<RecordId> {
        match self {
            Record::Student(s) => Some(s.id),
            Record::Course(c) => Some(c.id),
            Record::Enrollment(_) => None,
        }
    }
}

/// Creation payload; the variant selects the target collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewRecord {
    Student(NewStudent),
    Course(NewCourse),
}

/// In-memory store of students, courses and the enrollments joining them.
///
/// Ids are handed out from two independent counters starting at 1 and are
/// never reused until [`Directory::reset`]. Deleting a student or a course
/// always succeeds and drops every enrollment that references it.
#[derive(Clone, Debug)]
pub struct Directory {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    next_student_id: RecordId,
    next_course_id: RecordId,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            enrollments: Vec::new(),
            next_student_id: 1,
            next_course_id: 1,
        }
    }

    /// Empty store populated with the fixed seed data.
    pub fn seeded() -> Self {
        let mut dir = Self::new();
        dir.seed();
        dir
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Whole collection in insertion order.
    pub fn list(&self, collection: Collection) -> Vec<Record> {
        match collection {
            Collection::Students => self.students.iter().cloned().map(Record::Student).collect(),
            Collection::Courses => self.courses.iter().cloned().map(Record::Course).collect(),
            Collection::Enrollments => self.enrollments.iter().copied().map(Record::Enrollment).collect(),
        }
    }

    pub fn get<I: IntoRecordId>(&self, collection: Collection, id: I) -> Option<Record> {
        let id = id.into_record_id()?;
        match collection {
            Collection::Students => self.find_student(id).cloned().map(Record::Student),
            Collection::Courses => self.find_course(id).cloned().map(Record::Course),
            Collection::Enrollments => None,
        }
    }

    pub fn student<I: IntoRecordId>(&self, id: I) -> Option<&Student> {
        self.find_student(id.into_record_id()?)
    }

    pub fn course<I: IntoRecordId>(&self, id: I) -> Option<&Course> {
        self.find_course(id.into_record_id()?)
    }

    pub fn student_mut<I: IntoRecordId>(&mut self, id: I) -> Option<&mut Student> {
        let id = id.into_record_id()?;
        self.students.iter_mut().find(|s| s.id == id)
    }

    pub fn course_mut<I: IntoRecordId>(&mut self, id: I) -> Option<&mut Course> {
        let id = id.into_record_id()?;
        self.courses.iter_mut().find(|c| c.id == id)
    }

    pub fn create(&mut self, payload: NewRecord) -> Result<Record, ServiceError> {
        match payload {
            NewRecord::Student(p) => self.create_student(p).map(Record::Student),
            NewRecord::Course(p) => Ok(Record::Course(self.create_course(p))),
        }
    }

    /// Append a student. The email must not be used by any current student
    /// (exact match); a rejected create does not consume an id.
    pub fn create_student(&mut self, payload: NewStudent) -> Result<Student, ServiceError> {
        if self.students.iter().any(|s| s.email == payload.email) {
            warn!(email = %payload.email, "student create rejected: email taken");
            return Err(ServiceError::conflict(EMAIL_NOT_UNIQUE));
        }
        let id = self.next_student_id;
        self.next_student_id += 1;
        let student = Student { id, name: payload.name, email: payload.email };
        self.students.push(student.clone());
        info!(id, "student created");
        Ok(student)
    }

    /// Append a course. Titles may repeat.
    pub fn create_course(&mut self, payload: NewCourse) -> Course {
        let id = self.next_course_id;
        self.next_course_id += 1;
        let course = Course { id, title: payload.title, teacher: payload.teacher };
        self.courses.push(course.clone());
        info!(id, "course created");
        course
    }

    /// Remove a student or course by id, cascading to its enrollments.
    /// Returns `false` when nothing matched. Enrollments are removed
    /// through [`Directory::unenroll`] instead.
    pub fn remove<I: IntoRecordId>(&mut self, collection: Collection, id: I) -> bool {
        let Some(id) = id.into_record_id() else {
            return false;
        };
        let removed = match collection {
            Collection::Students => match self.students.iter().position(|s| s.id == id) {
                Some(idx) => {
                    self.students.remove(idx);
                    self.enrollments.retain(|e| e.student_id != id);
                    true
                }
                None => false,
            },
            Collection::Courses => match self.courses.iter().position(|c| c.id == id) {
                Some(idx) => {
                    self.courses.remove(idx);
                    self.enrollments.retain(|e| e.course_id != id);
                    true
                }
                None => false,
            },
            Collection::Enrollments => false,
        };
        if removed {
            info!(%collection, id, "record removed");
        } else {
            debug!(%collection, id, "remove: no such record");
        }
        removed
    }

    /// Enroll a student in a course. The course is resolved first, then the
    /// student, then the pair is checked for duplicates.
    pub fn enroll<S: IntoRecordId, C: IntoRecordId>(&mut self, student_id: S, course_id: C) -> Result<(), ServiceError> {
        let course_id = self
            .course(course_id)
            .map(|c| c.id)
            .ok_or_else(|| ServiceError::not_found("Course"))?;
        let student_id = self
            .student(student_id)
            .map(|s| s.id)
            .ok_or_else(|| ServiceError::not_found("Student"))?;
        if self.enrollments.iter().any(|e| e.is_pair(student_id, course_id)) {
            warn!(student_id, course_id, "enroll rejected: already enrolled");
            return Err(ServiceError::conflict(ALREADY_ENROLLED));
        }
        self.enrollments.push(Enrollment::new(student_id, course_id));
        info!(student_id, course_id, "student enrolled");
        Ok(())
    }

    pub fn unenroll<S: IntoRecordId, C: IntoRecordId>(&mut self, student_id: S, course_id: C) -> Result<(), ServiceError> {
        let pair = student_id.into_record_id().zip(course_id.into_record_id());
        let idx = pair
            .and_then(|(s, c)| self.enrollments.iter().position(|e| e.is_pair(s, c)))
            .ok_or_else(|| ServiceError::not_found("Enrollment"))?;
        let removed = self.enrollments.remove(idx);
        info!(student_id = removed.student_id, course_id = removed.course_id, "student unenrolled");
        Ok(())
    }

    /// Courses of a student, in enrollment order.
    pub fn student_courses<I: IntoRecordId>(&self, student_id: I) -> Vec<Course> {
        let Some(student_id) = student_id.into_record_id() else {
            return Vec::new();
        };
        self.enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| self.find_course(e.course_id))
            .cloned()
            .collect()
    }

    /// Students enrolled in a course, in enrollment order.
    pub fn course_students<I: IntoRecordId>(&self, course_id: I) -> Vec<Student> {
        let Some(course_id) = course_id.into_record_id() else {
            return Vec::new();
        };
        self.enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| self.find_student(e.student_id))
            .cloned()
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        info!("directory reset");
    }

    /// Insert the fixed seed data through the regular create path.
    pub fn seed(&mut self) {
        for (name, email) in SEED_STUDENTS {
            if let Err(e) = self.create_student(NewStudent::new(name, email)) {
                warn!(%email, error = %e, "seed student skipped");
            }
        }
        for (title, teacher) in SEED_COURSES {
            self.create_course(NewCourse::new(title, teacher));
        }
        debug!(students = self.students.len(), courses = self.courses.len(), "directory seeded");
    }

    fn find_student(&self, id: RecordId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    fn find_course(&self, id: RecordId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }
}
