use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event_log::EventLog;
use crate::db::store::DayStore;
use crate::errors::AppResult;
use crate::models::event::EventId;
use crate::ui::messages::{info, success, warning};
use crate::ui::view::TerminalTable;
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        id,
        date: day,
        yes,
    } = cmd
    {
        let d = date::parse_or_today(day.as_ref())?;
        let id = EventId(*id);

        let store = DayStore::open(&cfg.database)?;
        let view = TerminalTable {
            separator: cfg.separator(),
            ..Default::default()
        };
        let mut log = EventLog::open_at(store, view, d);

        log.request_delete(id);

        let prompt = format!("Delete event {} of {}? This action is irreversible.", id, d);
        if !*yes && !ask_confirmation(&prompt) {
            log.cancel_delete();
            info("Operation cancelled.");
            return Ok(());
        }

        if log.confirm_delete()? {
            success(format!("Event {} of {} has been deleted.", id, d));
        } else {
            info(format!("No event {} on {}: nothing to delete.", id, d));
        }
    }

    Ok(())
}
