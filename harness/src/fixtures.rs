//! Example records submitted by the CRUD suites.

use client::{NewStudent, NewTeacher, ResourceKind, StudentUpdate, TeacherUpdate};
use serde_json::Value;

pub fn sample_teacher() -> NewTeacher {
    NewTeacher {
        name: "Dr. Sarah Johnson".to_string(),
        email: "sarah.johnson@school.edu".to_string(),
        phone: "+1-555-0123".to_string(),
        department: "Mathematics".to_string(),
        subject: "Advanced Calculus".to_string(),
        hire_date: "2020-08-15".to_string(),
        salary: 75000,
        qualification: "PhD in Mathematics".to_string(),
        experience: 8,
    }
}

pub fn disposable_teacher() -> NewTeacher {
    NewTeacher {
        name: "Test Teacher for Deletion".to_string(),
        email: "delete.test@school.edu".to_string(),
        phone: "+1-555-9999".to_string(),
        department: "Test Department".to_string(),
        subject: "Test Subject".to_string(),
        hire_date: "2023-01-01".to_string(),
        salary: 50000,
        qualification: "Test Qualification".to_string(),
        experience: 1,
    }
}

pub fn teacher_update() -> TeacherUpdate {
    TeacherUpdate {
        name: Some("Dr. Sarah Johnson-Smith".to_string()),
        salary: Some(80000),
        experience: Some(9),
        ..Default::default()
    }
}

pub fn sample_student(teacher_id: Option<String>) -> NewStudent {
    NewStudent {
        name: "Emma Wilson".to_string(),
        email: "emma.wilson@student.edu".to_string(),
        phone: "+1-555-0456".to_string(),
        grade: "10th Grade".to_string(),
        section: "A".to_string(),
        teacher_id,
        parent_name: "Robert Wilson".to_string(),
        parent_phone: "+1-555-0457".to_string(),
    }
}

pub fn disposable_student(teacher_id: Option<String>) -> NewStudent {
    NewStudent {
        name: "Test Student for Deletion".to_string(),
        email: "delete.student@test.edu".to_string(),
        phone: "+1-555-8888".to_string(),
        grade: "9th Grade".to_string(),
        section: "Z".to_string(),
        teacher_id,
        parent_name: "Test Parent".to_string(),
        parent_phone: "+1-555-8889".to_string(),
    }
}

pub fn student_update() -> StudentUpdate {
    StudentUpdate {
        name: Some("Emma Wilson-Smith".to_string()),
        grade: Some("11th Grade".to_string()),
        section: Some("B".to_string()),
        ..Default::default()
    }
}

/// JSON bodies for one pass of the CRUD suite over a resource kind.
#[derive(Debug, Clone)]
pub struct CrudPlan {
    pub kind: ResourceKind,
    pub create: Value,
    pub disposable: Value,
    pub update: Value,
}

impl CrudPlan {
    /// `teacher_id` is the reference students are assigned to; ignored for
    /// teachers.
    pub fn for_kind(
        kind: ResourceKind,
        teacher_id: Option<String>,
    ) -> Result<Self, serde_json::Error> {
        let (create, disposable, update) = match kind {
            ResourceKind::Teacher => (
                serde_json::to_value(sample_teacher())?,
                serde_json::to_value(disposable_teacher())?,
                serde_json::to_value(teacher_update())?,
            ),
            ResourceKind::Student => (
                serde_json::to_value(sample_student(teacher_id.clone()))?,
                serde_json::to_value(disposable_student(teacher_id))?,
                serde_json::to_value(student_update())?,
            ),
        };

        Ok(Self {
            kind,
            create,
            disposable,
            update,
        })
    }
}
