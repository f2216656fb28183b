//! In-memory stand-ins for the spreadsheet and the chat platform.

use crate::bot::dispatch::{DispatchError, Notifier, OutgoingMessage};
use crate::sheets::{SheetStore, SheetsError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

/// A spreadsheet keyed by exact range strings, recording every write.
#[derive(Default)]
pub struct FakeSheets {
    tables: Mutex<HashMap<String, Vec<Vec<String>>>>,
    pub appends: Mutex<Vec<(String, Vec<String>)>>,
    pub writes: Mutex<Vec<(String, String)>>,
    pub fail_reads: bool,
}

impl FakeSheets {
    pub fn with_table(self, range: &str, rows: &[&[&str]]) -> Self {
        self.tables.lock().unwrap().insert(
            range.to_string(),
            rows.iter().map(|row| strings(row)).collect(),
        );
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn write_count(&self) -> usize {
        self.appends.lock().unwrap().len() + self.writes.lock().unwrap().len()
    }
}

impl SheetStore for FakeSheets {
    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        if self.fail_reads {
            return Err(SheetsError::Network {
                message: "connection refused".to_string(),
            });
        }
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(range)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), SheetsError> {
        self.appends.lock().unwrap().push((range.to_string(), row));
        Ok(())
    }

    async fn write_cell(&self, range: &str, value: &str) -> Result<(), SheetsError> {
        self.writes
            .lock()
            .unwrap()
            .push((range.to_string(), value.to_string()));
        Ok(())
    }
}

/// Records sends; sends to ids in `unreachable` fail.
#[derive(Default)]
pub struct FakeNotifier {
    pub sent: Mutex<Vec<(String, OutgoingMessage)>>,
    pub unreachable: HashSet<String>,
}

impl FakeNotifier {
    pub fn unreachable(ids: &[&str]) -> Self {
        Self {
            unreachable: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl Notifier for FakeNotifier {
    async fn send(&self, recipient_id: &str, message: &OutgoingMessage) -> Result<(), DispatchError> {
        if self.unreachable.contains(recipient_id) {
            return Err(DispatchError::Discord {
                message: "Cannot send messages to this user".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), message.clone()));
        Ok(())
    }
}
