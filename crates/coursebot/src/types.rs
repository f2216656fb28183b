use crate::bot::dispatch::DiscordNotifier;
use crate::config::Config;
use crate::sheets::SheetsClient;

/// The clients and settings shared by every trigger. Built once at startup
/// and handed around behind an `Arc`.
pub struct BotState {
    pub config: Config,
    pub sheets: SheetsClient,
    pub notifier: DiscordNotifier,
}
