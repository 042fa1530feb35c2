//! # HTML Views
//!
//! askama templates for the student pages, plus the view models they read.
//! Templates live in `apps/registrar/templates/`.

use super::error::AppError;
use super::types::DATE_FORMAT;
use askama::Template;
use axum::response::Html;
use registrar_core::{Field, Major, Student, StudentId, Violations};

/// Gender choices offered as radio buttons. Validation only requires a
/// non-blank value; a stored value outside this list gets its own checked
/// radio so it survives an edit.
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// Render a template, mapping engine failures to a 500.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Template render error: {}", e);
        AppError::Internal(format!("template error: {e}"))
    })
}

// =============================================================================
// STUDENT FORM
// =============================================================================

/// Whether the form creates a new student or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(StudentId),
}

/// One `<option>` in the major selector.
#[derive(Debug, Clone)]
pub struct MajorOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One gender radio button.
#[derive(Debug, Clone)]
pub struct GenderOption {
    pub value: String,
    pub checked: bool,
}

/// Violation messages grouped by form field.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    pub name: Vec<&'static str>,
    pub student_code: Vec<&'static str>,
    pub date_of_birth: Vec<&'static str>,
    pub major: Vec<&'static str>,
    pub notes: Vec<&'static str>,
    pub gender: Vec<&'static str>,
    pub agreed_to_terms: Vec<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn from_violations(violations: &Violations) -> Self {
        let collect = |field| violations.for_field(field).collect::<Vec<_>>();
        Self {
            name: collect(Field::Name),
            student_code: collect(Field::StudentCode),
            date_of_birth: collect(Field::DateOfBirth),
            major: collect(Field::Major),
            notes: collect(Field::Notes),
            gender: collect(Field::Gender),
            agreed_to_terms: collect(Field::AgreedToTerms),
        }
    }
}

/// The create/edit form.
#[derive(Debug, Template)]
#[template(path = "student-form.html")]
pub struct StudentFormPage {
    pub heading: &'static str,
    /// Set in edit mode; the form then posts to `/students/{id}`.
    pub student_id: Option<u64>,
    pub name: String,
    pub student_code: String,
    pub date_of_birth: String,
    pub notes: String,
    pub agreed_to_terms: bool,
    pub majors: Vec<MajorOption>,
    pub genders: Vec<GenderOption>,
    pub errors: FieldErrors,
    pub error_count: usize,
}

impl StudentFormPage {
    /// Build the form for `student`, annotated with `violations`.
    ///
    /// The major list is always supplied, whether the form is shown fresh
    /// or re-rendered after a failed submit.
    #[must_use]
    pub fn new(mode: FormMode, student: &Student, violations: &Violations) -> Self {
        let (heading, student_id) = match mode {
            FormMode::Create => ("New student", None),
            FormMode::Edit(id) => ("Edit student", Some(id.0)),
        };

        let majors = Major::ALL
            .into_iter()
            .map(|m| MajorOption {
                value: m.as_str(),
                label: m.label(),
                selected: student.major == Some(m),
            })
            .collect();

        let mut genders: Vec<GenderOption> = GENDERS
            .into_iter()
            .map(|g| GenderOption {
                value: g.to_string(),
                checked: student.gender == g,
            })
            .collect();
        if !student.gender.trim().is_empty() && !genders.iter().any(|g| g.checked) {
            genders.push(GenderOption {
                value: student.gender.clone(),
                checked: true,
            });
        }

        Self {
            heading,
            student_id,
            name: student.name.clone(),
            student_code: student.student_code.clone(),
            date_of_birth: student
                .date_of_birth
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            notes: student.notes.clone(),
            agreed_to_terms: student.agreed_to_terms,
            majors,
            genders,
            errors: FieldErrors::from_violations(violations),
            error_count: violations.len(),
        }
    }

    /// Show the user's original date text instead of an empty box when it
    /// could not be parsed.
    #[must_use]
    pub fn with_rejected_date(mut self, raw: Option<String>) -> Self {
        if let Some(raw) = raw {
            self.date_of_birth = raw;
        }
        self
    }
}

// =============================================================================
// STUDENT LIST
// =============================================================================

/// One table row in the list view.
#[derive(Debug, Clone)]
pub struct StudentRow {
    pub id: u64,
    pub name: String,
    pub student_code: String,
    pub date_of_birth: String,
    pub major: &'static str,
    pub gender: String,
    pub notes: String,
}

impl StudentRow {
    /// Unsaved students have no row; they never reach the list.
    #[must_use]
    pub fn from_student(student: Student) -> Option<Self> {
        let id = student.id?;
        Some(Self {
            id: id.0,
            date_of_birth: student
                .date_of_birth
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            major: student.major.map(Major::label).unwrap_or_default(),
            name: student.name,
            student_code: student.student_code,
            gender: student.gender,
            notes: student.notes,
        })
    }
}

/// The list of all students.
#[derive(Debug, Template)]
#[template(path = "list-students.html")]
pub struct StudentListPage {
    pub students: Vec<StudentRow>,
}

impl StudentListPage {
    #[must_use]
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students: students
                .into_iter()
                .filter_map(StudentRow::from_student)
                .collect(),
        }
    }
}

// =============================================================================
// ERROR PAGE
// =============================================================================

/// Shown for 404 and 500 responses.
#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub title: &'static str,
    pub message: String,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student() -> Student {
        Student {
            id: Some(StudentId(3)),
            name: "Vo Van F".to_string(),
            student_code: "VVF00003".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1998, 1, 5),
            major: Some(Major::BusinessAdministration),
            notes: String::new(),
            gender: "Male".to_string(),
            agreed_to_terms: true,
        }
    }

    #[test]
    fn create_form_posts_to_collection() {
        let page = StudentFormPage::new(FormMode::Create, &Student::new(), &Violations::new());
        assert_eq!(page.majors.len(), 4);
        assert!(page.majors.iter().all(|m| !m.selected));
        assert!(page.student_id.is_none());
    }

    #[test]
    fn edit_form_posts_to_member_and_selects_major() {
        let page = StudentFormPage::new(FormMode::Edit(StudentId(3)), &student(), &Violations::new());
        assert_eq!(page.student_id, Some(3));
        let html = page.render().expect("render");
        assert!(html.contains("action=\"/students/3\""));
        assert_eq!(page.date_of_birth, "1998-01-05");

        let selected: Vec<_> = page.majors.iter().filter(|m| m.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "BUSINESS_ADMINISTRATION");
        assert!(page.genders.iter().any(|g| g.value == "Male" && g.checked));
        assert_eq!(page.genders.len(), GENDERS.len());
    }

    #[test]
    fn unlisted_gender_gets_a_checked_radio() {
        let stored = Student {
            gender: "Nonbinary".to_string(),
            ..student()
        };
        let page = StudentFormPage::new(FormMode::Edit(StudentId(3)), &stored, &Violations::new());

        assert_eq!(page.genders.len(), GENDERS.len() + 1);
        let checked: Vec<_> = page.genders.iter().filter(|g| g.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].value, "Nonbinary");
    }

    #[test]
    fn blank_gender_adds_no_radio() {
        let page = StudentFormPage::new(FormMode::Create, &Student::new(), &Violations::new());
        assert_eq!(page.genders.len(), GENDERS.len());
        assert!(page.genders.iter().all(|g| !g.checked));
    }

    #[test]
    fn rendered_form_escapes_user_input() {
        let hostile = Student {
            name: "<script>alert(1)</script>".to_string(),
            ..Student::new()
        };
        let page = StudentFormPage::new(FormMode::Create, &hostile, &Violations::new());
        let html = page.render().expect("render");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("alert(1)"));
    }

    #[test]
    fn rendered_form_shows_messages_next_to_fields() {
        let student = Student::new();
        let violations = registrar_core::validate(&student);
        let page = StudentFormPage::new(FormMode::Create, &student, &violations);
        let html = page.render().expect("render");

        assert!(html.contains("name must not be empty"));
        assert!(html.contains("must agree to terms"));
        assert!(html.contains("Information Technology"));
    }

    #[test]
    fn list_rows_use_major_labels() {
        let page = StudentListPage::new(vec![student()]);
        assert_eq!(page.students.len(), 1);
        assert_eq!(page.students[0].major, "Business Administration");

        let html = page.render().expect("render");
        assert!(html.contains("/students/edit/3"));
        assert!(html.contains("/students/delete/3"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let html = StudentListPage::new(Vec::new()).render().expect("render");
        assert!(html.contains("No students yet"));
    }
}
