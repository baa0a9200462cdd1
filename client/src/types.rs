use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fields the server fills in on every record it stores.
pub const SERVER_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two record collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Teacher,
    Student,
}

impl ResourceKind {
    /// Key wrapping a single record in create/fetch/update responses.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Teacher => "teacher",
            ResourceKind::Student => "student",
        }
    }

    /// Key wrapping the array in list responses, also the route segment.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Teacher => "teachers",
            ResourceKind::Student => "students",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Teacher => "Teacher",
            ResourceKind::Student => "Student",
        }
    }

    pub fn collection_path(&self) -> String {
        format!("/{}", self.plural())
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.plural(), id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the `/api` prefix, starting with `/`.
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// A completed HTTP exchange. Non-2xx statuses land here too.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body, `None` when the body was empty or not JSON.
    pub body: Option<Value>,
    pub text: String,
}

impl ApiResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        let text = text.into();
        let body = serde_json::from_str(&text).ok();
        Self { status, body, text }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            text: body.to_string(),
            body: Some(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn record(&self, kind: ResourceKind) -> Option<&Map<String, Value>> {
        self.body.as_ref()?.get(kind.singular())?.as_object()
    }

    pub fn records(&self, kind: ResourceKind) -> Option<&Vec<Value>> {
        self.body.as_ref()?.get(kind.plural())?.as_array()
    }

    pub fn record_id(&self, kind: ResourceKind) -> Option<&str> {
        self.record(kind)?.get("id")?.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub subject: String,
    pub hire_date: String,
    pub salary: u32,
    pub qualification: String,
    pub experience: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub grade: String,
    pub section: String,
    /// Weak reference to a teacher; sent as `null` when unassigned.
    pub teacher_id: Option<String>,
    pub parent_name: String,
    pub parent_phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_paths() {
        assert_eq!(ResourceKind::Teacher.collection_path(), "/teachers");
        assert_eq!(ResourceKind::Student.item_path("abc"), "/students/abc");
        assert_eq!(ResourceKind::Student.singular(), "student");
        assert_eq!(ResourceKind::Teacher.label(), "Teacher");
    }

    #[test]
    fn test_new_teacher_serializes_camel_case() {
        let teacher = NewTeacher {
            name: "Dr. Sarah Johnson".to_string(),
            email: "sarah.johnson@school.edu".to_string(),
            phone: "+1-555-0123".to_string(),
            department: "Mathematics".to_string(),
            subject: "Advanced Calculus".to_string(),
            hire_date: "2020-08-15".to_string(),
            salary: 75000,
            qualification: "PhD in Mathematics".to_string(),
            experience: 8,
        };

        let value = serde_json::to_value(&teacher).unwrap();
        assert_eq!(value["hireDate"], "2020-08-15");
        assert_eq!(value["salary"], 75000);
        assert!(value.get("hire_date").is_none());
    }

    #[test]
    fn test_unassigned_student_keeps_teacher_id_key() {
        let student = NewStudent {
            name: "Emma Wilson".to_string(),
            email: "emma.wilson@student.edu".to_string(),
            phone: "+1-555-0456".to_string(),
            grade: "10th Grade".to_string(),
            section: "A".to_string(),
            teacher_id: None,
            parent_name: "Robert Wilson".to_string(),
            parent_phone: "+1-555-0457".to_string(),
        };

        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value.get("teacherId"), Some(&Value::Null));
        assert_eq!(value["parentName"], "Robert Wilson");
    }

    #[test]
    fn test_partial_update_omits_unset_fields() {
        let update = TeacherUpdate {
            name: Some("Dr. Sarah Johnson-Smith".to_string()),
            salary: Some(80000),
            ..Default::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"name": "Dr. Sarah Johnson-Smith", "salary": 80000}));
    }

    #[test]
    fn test_response_accessors() {
        let response = ApiResponse::json(
            200,
            json!({"teacher": {"id": "t-1", "name": "Dr. Sarah Johnson"}}),
        );
        assert!(response.is_success());
        assert_eq!(response.record_id(ResourceKind::Teacher), Some("t-1"));
        assert!(response.record(ResourceKind::Student).is_none());

        let list = ApiResponse::json(200, json!({"students": []}));
        assert_eq!(list.records(ResourceKind::Student).map(Vec::len), Some(0));
        assert!(list.records(ResourceKind::Teacher).is_none());
    }

    #[test]
    fn test_non_json_body_is_kept_as_text() {
        let response = ApiResponse::new(500, "Internal Server Error");
        assert!(response.body.is_none());
        assert_eq!(response.text, "Internal Server Error");
        assert!(!response.is_success());
    }
}
