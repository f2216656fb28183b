/// Registered users, as stored in the user registry sheet
use regex::Regex;
use std::sync::LazyLock;

static DISPLAY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4E00}-\x{9FA5}]{2,3}$").unwrap());

/// A chat user who has told the bot their name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    /// Chat-platform user id, unique within the registry
    pub external_id: String,
    /// 2-3 CJK characters, matched against lecturer/facilitator cells
    pub display_name: String,
    /// The chat handle at registration time
    pub handle: String,
}

impl RegisteredUser {
    pub fn new(
        external_id: impl Into<String>,
        display_name: impl Into<String>,
        handle: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            display_name: display_name.into(),
            handle: handle.into(),
        }
    }

    /// Decodes a registry row `[id, name, handle]`. Rows without an id are
    /// not users.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let external_id = row.first().map(|s| s.trim()).filter(|s| !s.is_empty())?;
        let cell = |i: usize| row.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

        Some(Self {
            external_id: external_id.to_string(),
            display_name: cell(1),
            handle: cell(2),
        })
    }

    /// The row appended to the registry for this user.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.external_id.clone(),
            self.display_name.clone(),
            self.handle.clone(),
        ]
    }
}

/// Decodes every user row of the registry table.
pub fn users_from_rows(rows: &[Vec<String>]) -> Vec<RegisteredUser> {
    rows.iter()
        .filter_map(|row| RegisteredUser::from_row(row))
        .collect()
}

/// Finds a user by chat id.
pub fn find_user<'a>(users: &'a [RegisteredUser], external_id: &str) -> Option<&'a RegisteredUser> {
    users.iter().find(|u| u.external_id == external_id)
}

/// Checks that a (trimmed) name is two or three CJK characters.
pub fn is_valid_display_name(name: &str) -> bool {
    DISPLAY_NAME_REGEX.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_display_name_validation() {
        assert!(is_valid_display_name("小明"));
        assert!(is_valid_display_name("王小明"));
        assert!(!is_valid_display_name("明"));
        assert!(!is_valid_display_name("歐陽小明"));
        assert!(!is_valid_display_name("Tom"));
        assert!(!is_valid_display_name("小明1"));
        assert!(!is_valid_display_name(""));
    }

    #[test]
    fn test_from_row() {
        let user = RegisteredUser::from_row(&strings(&["U1", "小明", "ming#0001"])).unwrap();
        assert_eq!(user, RegisteredUser::new("U1", "小明", "ming#0001"));

        let short = RegisteredUser::from_row(&strings(&["U2"])).unwrap();
        assert_eq!(short.display_name, "");
        assert_eq!(short.handle, "");

        assert!(RegisteredUser::from_row(&strings(&["", "小明"])).is_none());
        assert!(RegisteredUser::from_row(&[]).is_none());
    }

    #[test]
    fn test_from_row_trims_cells() {
        let user = RegisteredUser::from_row(&strings(&[" U1 ", "小明 ", " ming"])).unwrap();
        assert_eq!(user, RegisteredUser::new("U1", "小明", "ming"));
        assert!(RegisteredUser::from_row(&strings(&["  ", "小明"])).is_none());
    }

    #[test]
    fn test_find_user() {
        let users = users_from_rows(&[
            strings(&["U1", "小明", "a"]),
            strings(&[]),
            strings(&["U2", "小美", "b"]),
        ]);

        assert_eq!(users.len(), 2);
        assert_eq!(find_user(&users, "U2").map(|u| u.display_name.as_str()), Some("小美"));
        assert!(find_user(&users, "U3").is_none());
    }
}
