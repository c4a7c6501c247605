//! Courses. Creating one uploads a PDF from which questions are generated.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Published,
    Draft,
}

/// Section reference embedded in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<SectionRef>,
    pub status: CourseStatus,
    #[serde(default)]
    pub total_questions: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }

    pub fn in_section(&self, section_id: &str) -> bool {
        self.sections.iter().any(|s| s.id == section_id)
    }
}

impl Dated for Course {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Input for course creation (multipart upload).
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    /// Section ids, sent as a JSON-encoded text field.
    pub sections: Vec<String>,
    pub pdf_file_name: String,
    pub pdf: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_lowercase() {
        let course: Course = serde_json::from_str(
            r#"{"_id":"c1","title":"Physique","status":"published","sections":[{"_id":"s1","name":"Sci"}],"totalQuestions":40}"#,
        )
        .unwrap();
        assert!(course.is_published());
        assert!(course.in_section("s1"));
        assert!(!course.in_section("s2"));
        assert_eq!(course.total_questions, Some(40));
    }
}
