//! Courses: listing, PDF upload and the publish lifecycle.

use serde::Deserialize;
use tracing::info;

use super::required;
use crate::error::ClientResult;
use crate::http::{ApiRequest, FormPart};
use crate::interceptor::SessionClient;
use crate::models::{Ack, Course, NewCourse};
use crate::routes;

#[derive(Deserialize)]
struct CourseList {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    courses: Vec<Course>,
}

#[derive(Deserialize)]
struct CourseEnvelope {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    course: Option<Course>,
}

pub struct Courses {
    client: SessionClient,
}

impl Courses {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// `GET /cours/admin/`
    pub async fn list(&self) -> ClientResult<Vec<Course>> {
        let body: CourseList = self.client.get_json(routes::GET_COURSES).await?;
        body.ack.ensure()?;
        Ok(body.courses)
    }

    /// Upload a PDF and create the course; the backend generates its
    /// questions before answering.
    pub async fn create(&self, course: &NewCourse) -> ClientResult<Course> {
        let request = ApiRequest::post(routes::POST_COURSE).multipart(course_form(course)?);
        let body: CourseEnvelope = self.client.send_json(request).await?;
        body.ack.ensure()?;
        let created = required(body.course, "course")?;
        info!(id = %created.id, title = %created.title, "course created");
        Ok(created)
    }

    pub async fn publish(&self, id: &str) -> ClientResult<Course> {
        self.transition(routes::publish_course(id)).await
    }

    pub async fn unpublish(&self, id: &str) -> ClientResult<Course> {
        self.transition(routes::unpublish_course(id)).await
    }

    /// Delete a course together with its questions.
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let body: Ack = self
            .client
            .send_json(ApiRequest::delete(routes::delete_course(id)))
            .await?;
        body.ensure()?;
        info!(id, "course removed");
        Ok(())
    }

    /// Ask the backend to regenerate a course's questions. Runs asynchronously
    /// on the server; only the acceptance is reported.
    pub async fn regenerate_questions(&self, id: &str) -> ClientResult<()> {
        self.client
            .send(ApiRequest::post(routes::regenerate_course(id)))
            .await?;
        info!(id, "question regeneration requested");
        Ok(())
    }

    async fn transition(&self, path: String) -> ClientResult<Course> {
        let body: CourseEnvelope = self.client.send_json(ApiRequest::post(path)).await?;
        body.ack.ensure()?;
        required(body.course, "course")
    }
}

fn course_form(course: &NewCourse) -> ClientResult<Vec<FormPart>> {
    Ok(vec![
        FormPart::Text {
            name: "title".into(),
            value: course.title.clone(),
        },
        FormPart::Text {
            name: "description".into(),
            value: course.description.clone(),
        },
        // Multipart has no arrays; the backend parses this field as JSON.
        FormPart::Text {
            name: "sections".into(),
            value: serde_json::to_string(&course.sections)?,
        },
        FormPart::File {
            name: "pdf".into(),
            file_name: course.pdf_file_name.clone(),
            mime: "application/pdf".into(),
            bytes: course.pdf.clone(),
        },
    ])
}

/// Courses attached to `section_id`; all of them when `None`.
pub fn filter_by_section<'a>(courses: &'a [Course], section_id: Option<&str>) -> Vec<&'a Course> {
    match section_id {
        None => courses.iter().collect(),
        Some(id) => courses.iter().filter(|c| c.in_section(id)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::Method;
    use serde_json::json;

    use super::*;
    use crate::http::RequestBody;
    use crate::resources::testing::{Canned, client};

    fn course(id: &str, sections: &[&str]) -> Course {
        serde_json::from_value(json!({
            "_id": id,
            "title": id,
            "status": "draft",
            "sections": sections.iter().map(|s| json!({"_id": s, "name": s})).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    #[test]
    fn filter_by_section_keeps_matching_courses() {
        let courses = vec![course("c1", &["s1"]), course("c2", &["s2"]), course("c3", &["s1", "s2"])];

        let ids = |v: Vec<&Course>| v.into_iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(filter_by_section(&courses, Some("s1"))), ["c1", "c3"]);
        assert_eq!(ids(filter_by_section(&courses, None)).len(), 3);
        assert!(filter_by_section(&courses, Some("s9")).is_empty());
    }

    #[tokio::test]
    async fn create_sends_multipart_with_json_sections() {
        let transport = Canned::ok(json!({
            "success": true,
            "course": {"_id": "c1", "title": "Physique", "status": "draft"}
        }));
        let created = client(transport.clone())
            .courses()
            .create(&NewCourse {
                title: "Physique".into(),
                description: "Mécanique".into(),
                sections: vec!["s1".into(), "s2".into()],
                pdf_file_name: "physique.pdf".into(),
                pdf: Bytes::from_static(b"%PDF-1.4"),
            })
            .await
            .unwrap();
        assert_eq!(created.id, "c1");

        let sent = transport.last_request();
        assert_eq!(sent.path, "/cours/admin/courses");
        let RequestBody::Multipart(parts) = sent.body else {
            panic!("expected multipart body");
        };
        assert!(parts.iter().any(|p| matches!(
            p,
            FormPart::Text { name, value } if name == "sections" && value == r#"["s1","s2"]"#
        )));
        assert!(parts.iter().any(|p| matches!(
            p,
            FormPart::File { name, file_name, .. } if name == "pdf" && file_name == "physique.pdf"
        )));
    }

    #[tokio::test]
    async fn publish_returns_updated_course() {
        let transport = Canned::ok(json!({
            "success": true,
            "course": {"_id": "c1", "title": "Physique", "status": "published"}
        }));
        let course = client(transport.clone()).courses().publish("c1").await.unwrap();
        assert!(course.is_published());
        assert_eq!(
            transport.last(),
            (Method::POST, "/cours/admin/publish/c1".to_string())
        );
    }

    #[tokio::test]
    async fn regenerate_posts_to_regenerate_route() {
        let transport = Canned::ok(json!({"message": "started"}));
        client(transport.clone())
            .courses()
            .regenerate_questions("c1")
            .await
            .unwrap();
        assert_eq!(
            transport.last(),
            (Method::POST, "/cours/regenerate/c1".to_string())
        );
    }
}
