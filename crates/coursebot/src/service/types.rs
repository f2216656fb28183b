/// Outcomes of the bot's triggers
use crate::roster::OfferChoice;

/// Result of `/註冊姓名`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The name is not 2-3 CJK characters; nothing was written
    InvalidName,
    /// The chat id is already in the registry; nothing was written
    AlreadyRegistered,
    /// A registry row was appended
    Registered { display_name: String },
}

/// Result of `/查課程`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The caller has not registered a name yet
    NotRegistered,
    /// The rendered reply, possibly a "nothing upcoming" notice
    Upcoming {
        display_name: String,
        count: usize,
        reply: String,
    },
}

/// Result of pressing an offer button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The presser has not registered a name yet
    NotRegistered,
    /// The signup header has no column titled with the presser's name
    ColumnNotFound { display_name: String },
    /// The choice was written into the signup sheet
    Recorded {
        display_name: String,
        choice: OfferChoice,
        signup_row: u32,
    },
}

/// Counts of a batch of direct messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

impl DeliveryReport {
    pub fn merge(&mut self, other: DeliveryReport) {
        self.delivered += other.delivered;
        self.failed += other.failed;
    }
}

/// What one run of the daily reminder job did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Courses dated tomorrow
    pub due_tomorrow: usize,
    /// Courses dated exactly one week from today
    pub due_next_week: usize,
    pub delivery: DeliveryReport,
}
