/// Projection of raw sheet rows into course records

/// Column titles of the course sheet that the bot understands.
pub mod columns {
    pub const SCHOOL: &str = "學校";
    pub const DATE: &str = "日期";
    pub const START_TIME: &str = "開始時間";
    pub const END_TIME: &str = "結束時間";
    pub const HEADCOUNT: &str = "人數";
    pub const GRADE: &str = "年級";
    pub const TOPIC: &str = "主題";
    pub const LECTURER: &str = "講師";
    pub const FACILITATOR: &str = "引導師";
    pub const DESCRIPTION: &str = "說明";
    pub const REMARKS: &str = "備註";
    pub const CONTACT_NAME: &str = "聯絡對象";
    pub const CONTACT_PHONE: &str = "聯絡電話";
}

/// One course, as read from a single sheet row.
///
/// Every field is optional: a column may be missing from the header, or the
/// row may be shorter than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseRow {
    /// 1-based row number in the sheet, when known
    pub sheet_row: Option<usize>,
    pub school: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub headcount: Option<String>,
    pub grade: Option<String>,
    pub topic: Option<String>,
    pub lecturer: Option<String>,
    pub facilitator: Option<String>,
    pub description: Option<String>,
    pub remarks: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

impl CourseRow {
    /// Builds a row from `(column title, value)` pairs. Later pairs overwrite
    /// earlier ones with the same title; unknown titles are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = CourseRow::default();
        for (key, value) in pairs {
            row.set_field(key.as_ref(), Some(value.into()));
        }
        row
    }

    /// Assigns the field named by a column title; `None` clears it. Returns
    /// false for titles the record has no slot for.
    pub fn set_field(&mut self, column: &str, value: Option<String>) -> bool {
        let slot = match column {
            columns::SCHOOL => &mut self.school,
            columns::DATE => &mut self.date,
            columns::START_TIME => &mut self.start_time,
            columns::END_TIME => &mut self.end_time,
            columns::HEADCOUNT => &mut self.headcount,
            columns::GRADE => &mut self.grade,
            columns::TOPIC => &mut self.topic,
            columns::LECTURER => &mut self.lecturer,
            columns::FACILITATOR => &mut self.facilitator,
            columns::DESCRIPTION => &mut self.description,
            columns::REMARKS => &mut self.remarks,
            columns::CONTACT_NAME => &mut self.contact_name,
            columns::CONTACT_PHONE => &mut self.contact_phone,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// The lecturer cell, or "" when absent.
    pub fn lecturer(&self) -> &str {
        self.lecturer.as_deref().unwrap_or_default()
    }

    /// The facilitator cell, or "" when absent.
    pub fn facilitator(&self) -> &str {
        self.facilitator.as_deref().unwrap_or_default()
    }

    /// The raw date cell, or "" when absent.
    pub fn date_text(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }
}

/// Zips a header row with a data row by position.
///
/// Every header position is assigned in order, so a repeated title takes its
/// last position even when that cell is past the end of a short row (absent).
/// Cells past the end of the header are dropped.
pub fn project(header: &[String], row: &[String]) -> CourseRow {
    let mut course = CourseRow::default();
    for (i, column) in header.iter().enumerate() {
        course.set_field(column, row.get(i).cloned());
    }
    course
}

/// Projects a whole table whose first row is the header.
///
/// Sheet row numbers are assigned assuming the table starts at row 1.
pub fn project_table(table: &[Vec<String>]) -> Vec<CourseRow> {
    let Some((header, rows)) = table.split_first() else {
        return Vec::new();
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| CourseRow {
            sheet_row: Some(i + 2),
            ..project(header, row)
        })
        .collect()
}
