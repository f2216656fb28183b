/// Rendering of course rows into chat messages
use super::date::display_month_day;
use super::matcher::DatedCourse;
use super::row::CourseRow;

/// Shown for an empty notes/remarks cell.
pub const NOTES_PLACEHOLDER: &str = "（無）";

/// Separator between course blocks in a query reply.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Discord's per-message content limit, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Which message a course block is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Query reply; the date is re-rendered from the parsed value
    Upcoming,
    /// Daily reminder for a course tomorrow
    DueTomorrow,
    /// Daily reminder for a course in one week
    DueNextWeek,
}

impl FormatMode {
    fn banner(self) -> Option<&'static str> {
        match self {
            FormatMode::Upcoming => None,
            FormatMode::DueTomorrow => Some("**通知通知📢明天有課程呦～**"),
            FormatMode::DueNextWeek => Some("**通知通知📢下週有課程呦～**"),
        }
    }
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn cell_or_placeholder(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(NOTES_PLACEHOLDER)
}

/// Renders the labelled block for one course.
pub fn format_course(course: &DatedCourse<'_>, mode: FormatMode) -> String {
    let row = course.row;
    let date = match mode {
        FormatMode::Upcoming => display_month_day(course.date),
        FormatMode::DueTomorrow | FormatMode::DueNextWeek => row.date_text().to_string(),
    };

    let fields = [
        ("學校", cell(&row.school).to_string()),
        ("日期", date),
        ("時間", format!("{}～{}", cell(&row.start_time), cell(&row.end_time))),
        ("人數", cell(&row.headcount).to_string()),
        ("年級", cell(&row.grade).to_string()),
        ("主題", cell(&row.topic).to_string()),
        ("講師", cell(&row.lecturer).to_string()),
        ("引導師", cell(&row.facilitator).to_string()),
        ("說明", cell_or_placeholder(&row.description).to_string()),
        ("聯絡對象", cell(&row.contact_name).to_string()),
        ("聯絡電話", cell(&row.contact_phone).to_string()),
    ];

    let body = fields
        .iter()
        .map(|(label, value)| format!("**{label}：{value}**"))
        .collect::<Vec<_>>()
        .join("\n");

    match mode.banner() {
        Some(banner) => format!("{banner}\n\n{body}"),
        None => body,
    }
}

/// Renders the "new course" offer that goes out with the choice buttons.
pub fn format_offer(row: &CourseRow) -> String {
    format!(
        "📢 **新課程通知**\n\n\
         **學校：** {}\n\
         **日期：** {}\n\
         **時間：** {}～{}\n\
         **年級：** {}\n\
         **主題：** {}\n\
         **人數：** {}\n\
         **備註：** {}\n\n\
         請選擇您的意願👇",
        cell(&row.school),
        cell(&row.date),
        cell(&row.start_time),
        cell(&row.end_time),
        cell(&row.grade),
        cell(&row.topic),
        cell(&row.headcount),
        cell_or_placeholder(&row.remarks),
    )
}

/// Renders the full reply to an upcoming-courses query.
pub fn format_query_reply(display_name: &str, courses: &[DatedCourse<'_>]) -> String {
    if courses.is_empty() {
        return format!("目前沒有 {display_name} 的後續課程喔！");
    }

    let blocks = courses
        .iter()
        .map(|c| format_course(c, FormatMode::Upcoming))
        .collect::<Vec<_>>();
    format!(
        "{display_name} 之後的課程如下：\n\n{}",
        blocks.join(BLOCK_SEPARATOR)
    )
}

/// Splits a reply into messages of at most `limit` characters.
///
/// Splits prefer course block separators, then line breaks; a single line
/// longer than the limit is cut at a character boundary.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for block in text.split(BLOCK_SEPARATOR) {
        let joined_len = if current.is_empty() {
            block.chars().count()
        } else {
            current.chars().count() + BLOCK_SEPARATOR.chars().count() + block.chars().count()
        };

        if joined_len <= limit {
            if !current.is_empty() {
                current.push_str(BLOCK_SEPARATOR);
            }
            current.push_str(block);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if block.chars().count() <= limit {
            current.push_str(block);
        } else {
            let mut pieces = split_lines(block, limit);
            current = pieces.pop().unwrap_or_default();
            chunks.extend(pieces);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_lines(block: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in block.split('\n') {
        let needed = current.chars().count() + usize::from(!current.is_empty()) + line.chars().count();
        if needed <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        let chars: Vec<char> = line.chars().collect();
        for piece in chars.chunks(limit.max(1)) {
            current = piece.iter().collect();
            if current.chars().count() == limit {
                chunks.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
