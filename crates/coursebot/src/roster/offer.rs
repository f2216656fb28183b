//! The four answers a user can give to a course offer, and the button ids
//! that carry them back to the bot.

use std::fmt;

const CUSTOM_ID_PREFIX: &str = "join";

/// A user's answer to a course offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferChoice {
    /// Wants to lecture
    Lecturer,
    /// Wants to facilitate
    Facilitator,
    /// Either role is fine
    Either,
    /// Not available
    Neither,
}

impl OfferChoice {
    /// All choices, in button order.
    pub const ALL: [OfferChoice; 4] = [
        OfferChoice::Lecturer,
        OfferChoice::Facilitator,
        OfferChoice::Either,
        OfferChoice::Neither,
    ];

    /// Button label. This is also the value written into the signup sheet.
    pub fn label(self) -> &'static str {
        match self {
            OfferChoice::Lecturer => "講師",
            OfferChoice::Facilitator => "引導師",
            OfferChoice::Either => "歐都給",
            OfferChoice::Neither => "都不行",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Button custom id for this choice on a signup row, e.g. `join_12_講師`.
    pub fn custom_id(self, signup_row: u32) -> String {
        format!("{CUSTOM_ID_PREFIX}_{signup_row}_{}", self.label())
    }
}

impl fmt::Display for OfferChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes a button custom id into `(signup row, choice)`.
pub fn parse_custom_id(custom_id: &str) -> Option<(u32, OfferChoice)> {
    let mut parts = custom_id.splitn(3, '_');
    if parts.next()? != CUSTOM_ID_PREFIX {
        return None;
    }
    let row = parts.next()?.parse::<u32>().ok().filter(|r| *r > 0)?;
    let choice = OfferChoice::from_label(parts.next()?)?;
    Some((row, choice))
}
