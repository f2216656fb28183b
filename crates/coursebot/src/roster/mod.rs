//! The course roster engine: turning sheet rows into course records and
//! deciding which of them concern which user, and when.
//!
//! Nothing in this module performs I/O. Command handlers and the daily
//! reminder job both feed it rows that were fetched elsewhere.

pub mod date;
pub mod format;
pub mod matcher;
pub mod offer;
pub mod registry;
pub mod row;

pub use date::parse_course_date;
pub use format::{format_course, format_offer, format_query_reply, split_message, FormatMode};
pub use matcher::{due_in_offset, upcoming_for, DatedCourse, DueCourse};
pub use offer::{parse_custom_id, OfferChoice};
pub use registry::{find_user, is_valid_display_name, users_from_rows, RegisteredUser};
pub use row::{project, project_table, CourseRow};
