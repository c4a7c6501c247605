//! Curriculum: provinces, sections and courses.

use edubooster_client::SessionClient;
use edubooster_client::models::{
    Course, NewCourse, NewProvince, NewSection, Province, ProvinceUpdate, Section, SectionUpdate,
};
use edubooster_client::resources::filter_by_section;
use tracing::info;

use super::day;
use crate::cli::{CoursesCmd, ProvincesCmd, SectionsCmd};
use crate::output::Output;
use crate::{Error, Result};

pub async fn provinces(client: &SessionClient, cmd: &ProvincesCmd, out: &Output) -> Result<()> {
    let provinces = client.provinces();
    match cmd {
        ProvincesCmd::List => {
            let list = provinces.list().await?;
            out.emit(&list, |list| list.iter().map(province_line).collect())
        }
        ProvincesCmd::Add { name, country } => {
            let created = provinces
                .create(&NewProvince {
                    name: name.clone(),
                    country: country.clone(),
                })
                .await?;
            out.emit(&created, |p| vec![format!("province added: {}", province_line(p))])
        }
        ProvincesCmd::Update { id, name, country } => {
            if name.is_none() && country.is_none() {
                return Err(Error::Custom("nothing to update: pass --name or --country".into()));
            }
            let update = ProvinceUpdate {
                name: name.clone(),
                country: country.clone(),
            };
            let updated = provinces.update(id, &update).await?;
            out.emit(&updated, |p| vec![format!("province updated: {}", province_line(p))])
        }
        ProvincesCmd::Delete { id } => {
            provinces.remove(id).await?;
            out.done(&format!("province {id} deleted"))
        }
    }
}

fn province_line(p: &Province) -> String {
    format!("{}  {:<24} {:<8} {}", p.id, p.name, p.country, day(p.created_at))
}

pub async fn sections(client: &SessionClient, cmd: &SectionsCmd, out: &Output) -> Result<()> {
    let sections = client.sections();
    match cmd {
        SectionsCmd::List => {
            let list = sections.list().await?;
            out.emit(&list, |list| list.iter().map(section_line).collect())
        }
        SectionsCmd::Add { name, provinces } => {
            let created = sections
                .create(&NewSection {
                    name: name.clone(),
                    provinces: provinces.clone(),
                })
                .await?;
            out.emit(&created, |s| vec![format!("section created: {}", section_line(s))])
        }
        SectionsCmd::Update {
            id,
            name,
            province_id,
        } => {
            let update = SectionUpdate {
                name: name.clone(),
                province_id: province_id.clone(),
            };
            let updated = sections.update(id, &update).await?;
            out.emit(&updated, |s| vec![format!("section updated: {}", section_line(s))])
        }
        SectionsCmd::Delete { id } => {
            sections.remove(id).await?;
            out.done(&format!("section {id} deleted"))
        }
    }
}

fn section_line(s: &Section) -> String {
    format!(
        "{}  {:<24} provinces={} courses={}",
        s.id,
        s.name,
        s.provinces.len(),
        s.courses.len()
    )
}

pub async fn courses(client: &SessionClient, cmd: &CoursesCmd, out: &Output) -> Result<()> {
    let courses = client.courses();
    match cmd {
        CoursesCmd::List { section } => {
            let all = courses.list().await?;
            let shown = filter_by_section(&all, section.as_deref());
            out.emit(&shown, |list| list.iter().copied().map(course_line).collect())
        }
        CoursesCmd::Add {
            title,
            description,
            sections,
            pdf,
        } => {
            let bytes = tokio::fs::read(pdf).await?;
            let pdf_file_name = pdf
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "course.pdf".into());
            info!(file = %pdf.display(), size = bytes.len(), "uploading course PDF");
            let created = courses
                .create(&NewCourse {
                    title: title.clone(),
                    description: description.clone(),
                    sections: sections.clone(),
                    pdf_file_name,
                    pdf: bytes.into(),
                })
                .await?;
            out.emit(&created, |c| vec![format!("course created: {}", course_line(c))])
        }
        CoursesCmd::Publish { id } => {
            let course = courses.publish(id).await?;
            out.emit(&course, |c| vec![format!("published: {}", course_line(c))])
        }
        CoursesCmd::Unpublish { id } => {
            let course = courses.unpublish(id).await?;
            out.emit(&course, |c| vec![format!("unpublished: {}", course_line(c))])
        }
        CoursesCmd::Delete { id } => {
            courses.remove(id).await?;
            out.done(&format!("course {id} and its questions deleted"))
        }
        CoursesCmd::Regenerate { id } => {
            courses.regenerate_questions(id).await?;
            out.done(&format!("questions for course {id} are being regenerated"))
        }
    }
}

fn course_line(c: &Course) -> String {
    let sections: Vec<&str> = c.sections.iter().map(|s| s.name.as_str()).collect();
    format!(
        "{}  {:<9} {:<32} questions={} sections={}",
        c.id,
        if c.is_published() { "published" } else { "draft" },
        c.title,
        c.total_questions.map_or_else(|| "-".to_string(), |n| n.to_string()),
        sections.join(",")
    )
}
