//! HTML Pages
//!
//! Server-rendered pages for the student forms and listing. Every piece of
//! user-supplied text passes through [`escape`].

use storage::{RecordStore, RollNumber, StudentRecord};

/// Values typed into a form, echoed back on redisplay
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValues<'a> {
    pub roll_no: &'a str,
    pub name: &'a str,
    pub marks: &'a str,
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; }}
.error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whole-number marks keep one decimal place, as stored in the data file
pub fn format_marks(marks: f64) -> String {
    if marks.fract() == 0.0 {
        format!("{:.1}", marks)
    } else {
        marks.to_string()
    }
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

/// Listing of every student with derived grade
pub fn students_list(store: &RecordStore) -> String {
    let mut body = String::from(r#"<p><a href="/students/add">Add Student</a></p>"#);

    if store.is_empty() {
        body.push_str("<p>No students found.</p>");
        return layout("Students", &body);
    }

    body.push_str(
        "<table>\n<tr><th>Roll No</th><th>Name</th><th>Marks</th><th>Grade</th><th>Actions</th></tr>\n",
    );
    for (roll_no, record) in store.iter() {
        body.push_str(&format!(
            concat!(
                "<tr><td>{roll}</td><td>{name}</td><td>{marks}</td><td>{grade}</td>",
                r#"<td><a href="/students/update/{roll}">Update</a> "#,
                r#"<a href="/students/delete/{roll}">Delete</a></td></tr>"#,
                "\n"
            ),
            roll = roll_no,
            name = escape(&record.name),
            marks = format_marks(record.marks),
            grade = grading::grade(record.marks),
        ));
    }
    body.push_str("</table>");

    layout("Students", &body)
}

/// Create form, optionally with an error and the previously typed values
pub fn add_student(error: Option<&str>, values: FormValues<'_>) -> String {
    let body = format!(
        r#"{error}<form method="post" action="/students/add">
<label>Roll No <input name="roll_no" value="{roll}" required></label><br>
<label>Name <input name="name" value="{name}" required></label><br>
<label>Marks <input name="marks" value="{marks}" required></label><br>
<button type="submit">Add</button>
</form>
<p><a href="/students">Back to list</a></p>"#,
        error = error_block(error),
        roll = escape(values.roll_no),
        name = escape(values.name),
        marks = escape(values.marks),
    );
    layout("Add Student", &body)
}

/// Edit form showing the current record; blank fields are left unchanged
pub fn update_student(
    roll_no: RollNumber,
    record: &StudentRecord,
    error: Option<&str>,
    values: FormValues<'_>,
) -> String {
    let body = format!(
        r#"{error}<p>Roll No: {roll}<br>Current name: {current_name}<br>Current marks: {current_marks}</p>
<form method="post" action="/students/update/{roll}">
<label>Name <input name="name" value="{name}" placeholder="leave blank to keep"></label><br>
<label>Marks <input name="marks" value="{marks}" placeholder="leave blank to keep"></label><br>
<button type="submit">Update</button>
</form>
<p><a href="/students">Back to list</a></p>"#,
        error = error_block(error),
        roll = roll_no,
        current_name = escape(&record.name),
        current_marks = format_marks(record.marks),
        name = escape(values.name),
        marks = escape(values.marks),
    );
    layout("Update Student", &body)
}

/// Page shown for unrecoverable failures
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"{}<p><a href="/students">Back to list</a></p>"#,
        error_block(Some(message))
    );
    layout("Error", &body)
}
