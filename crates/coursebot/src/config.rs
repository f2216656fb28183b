/// Runtime configuration, read from the environment
use crate::sheets::{a1_range, column_letter, ServiceAccountKey};
use std::fs;
use thiserror::Error;

const DEFAULT_USER_SHEET: &str = "DC 使用者名單";
const DEFAULT_COURSE_SHEET: &str = "Line 自動通知";
const DEFAULT_SIGNUP_SHEET: &str = "課程報名區";
const DEFAULT_REMINDER_HOUR: u32 = 8;
const DEFAULT_PORT: u16 = 3000;

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {name}")]
    Missing { name: &'static str },

    #[error("Invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },

    #[error("Could not load Google credentials: {message}")]
    Credentials { message: String },
}

/// Tab names of the three tables the bot works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    /// Registry of `[user id, display name, handle]`, header in row 1
    pub users: String,
    /// Course table, header in row 1
    pub courses: String,
    /// Signup table; row 1 holds one column per display name
    pub signups: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            users: DEFAULT_USER_SHEET.to_string(),
            courses: DEFAULT_COURSE_SHEET.to_string(),
            signups: DEFAULT_SIGNUP_SHEET.to_string(),
        }
    }
}

impl SheetNames {
    /// Registry rows, skipping the header.
    pub fn users_range(&self) -> String {
        a1_range(&self.users, "A2:C")
    }

    /// Where new registry rows are appended.
    pub fn users_append_range(&self) -> String {
        a1_range(&self.users, "A:C")
    }

    /// The course table including its header row.
    pub fn courses_range(&self) -> String {
        a1_range(&self.courses, "A1:Z")
    }

    /// The header row of the signup table.
    pub fn signup_header_range(&self) -> String {
        a1_range(&self.signups, "A1:Z1")
    }

    /// One cell of the signup table, by 0-based column and 1-based row.
    pub fn signup_cell(&self, column: usize, row: u32) -> String {
        a1_range(&self.signups, &format!("{}{}", column_letter(column), row))
    }
}

/// Everything the bot needs to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register slash commands in this guild only (faster to propagate)
    pub guild_id: Option<u64>,
    pub spreadsheet_id: String,
    pub credentials: ServiceAccountKey,
    pub sheets: SheetNames,
    /// Local hour at which the daily reminder sweep runs
    pub reminder_hour: u32,
    /// Port of the health-check/offer server
    pub port: u16,
}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing { name });

        let discord_token = require("DISCORD_TOKEN")?;
        let spreadsheet_id = require("SHEET_ID")?;

        let guild_id = get("GUILD_ID")
            .map(|v| parse_number::<u64>("GUILD_ID", &v))
            .transpose()?;

        let credentials_json = match (get("GOOGLE_CREDENTIALS"), get("GOOGLE_CREDENTIALS_FILE")) {
            (Some(value), _) => value,
            (None, Some(path)) => fs::read_to_string(&path).map_err(|e| ConfigError::Credentials {
                message: format!("{path}: {e}"),
            })?,
            (None, None) => return Err(ConfigError::Missing { name: "GOOGLE_CREDENTIALS" }),
        };
        let credentials = ServiceAccountKey::decode(&credentials_json)
            .map_err(|message| ConfigError::Credentials { message })?;

        let defaults = SheetNames::default();
        let sheets = SheetNames {
            users: get("USER_SHEET").unwrap_or(defaults.users),
            courses: get("COURSE_SHEET").unwrap_or(defaults.courses),
            signups: get("SIGNUP_SHEET").unwrap_or(defaults.signups),
        };

        let reminder_hour = match get("REMINDER_HOUR") {
            Some(v) => parse_number::<u32>("REMINDER_HOUR", &v)?,
            None => DEFAULT_REMINDER_HOUR,
        };
        if reminder_hour > 23 {
            return Err(ConfigError::Invalid {
                name: "REMINDER_HOUR",
                message: format!("{reminder_hour} is not an hour of the day"),
            });
        }

        let port = match get("PORT") {
            Some(v) => parse_number::<u16>("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            discord_token,
            guild_id,
            spreadsheet_id,
            credentials,
            sheets,
            reminder_hour,
            port,
        })
    }
}

fn parse_number<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        message: format!("{value:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY_JSON: &str = r#"{"client_email": "bot@example.com", "private_key": "x"}"#;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DISCORD_TOKEN", "token"),
            ("SHEET_ID", "sheet"),
            ("GOOGLE_CREDENTIALS", KEY_JSON),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&base_vars())).unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.spreadsheet_id, "sheet");
        assert_eq!(config.guild_id, None);
        assert_eq!(config.sheets, SheetNames::default());
        assert_eq!(config.reminder_hour, 8);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let mut vars = base_vars();
        vars.extend([
            ("GUILD_ID", "1234"),
            ("USER_SHEET", "users"),
            ("REMINDER_HOUR", "7"),
            ("PORT", "8080"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.guild_id, Some(1234));
        assert_eq!(config.sheets.users, "users");
        assert_eq!(config.sheets.courses, DEFAULT_COURSE_SHEET);
        assert_eq!(config.reminder_hour, 7);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_required() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != "SHEET_ID")
            .collect();
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { name: "SHEET_ID" }));

        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != "GOOGLE_CREDENTIALS")
            .collect();
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { name: "GOOGLE_CREDENTIALS" }));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = base_vars();
        vars.push(("REMINDER_HOUR", "24"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Invalid { name: "REMINDER_HOUR", .. }
        ));

        let mut vars = base_vars();
        vars.push(("PORT", "http"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Invalid { name: "PORT", .. }
        ));

        let mut vars = base_vars();
        vars[2] = ("GOOGLE_CREDENTIALS", "nope");
        assert!(matches!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Credentials { .. }
        ));
    }

    #[test]
    fn test_sheet_ranges() {
        let names = SheetNames::default();
        assert_eq!(names.users_range(), "'DC 使用者名單'!A2:C");
        assert_eq!(names.courses_range(), "'Line 自動通知'!A1:Z");
        assert_eq!(names.signup_header_range(), "'課程報名區'!A1:Z1");
        assert_eq!(names.signup_cell(2, 14), "'課程報名區'!C14");
    }
}
