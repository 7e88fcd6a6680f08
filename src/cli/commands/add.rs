use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event_log::{EventLog, validate};
use crate::core::photo::PhotoBlob;
use crate::db::store::DayStore;
use crate::errors::AppResult;
use crate::models::event::NewEvent;
use crate::ui::messages::{info, success};
use crate::ui::view::TerminalTable;
use crate::utils::date;

/// Record a new stop/incident event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        number,
        date: event_date,
        start,
        end,
        reason,
        photo,
    } = cmd
    {
        let raw = NewEvent {
            number: number.clone().unwrap_or_default(),
            date: event_date.clone().unwrap_or_default(),
            start: start.clone().unwrap_or_default(),
            end: end.clone().unwrap_or_default(),
            reason: reason.clone().unwrap_or_default(),
        };

        let today = date::today();

        //
        // 1. Field checks before touching the photo or the DB
        //
        validate(&raw, today)?;

        //
        // 2. Encode the photo; the record is only built once this is done
        //
        let blob = match photo {
            Some(p) => Some(PhotoBlob::from_file(p)?),
            None => None,
        };

        //
        // 3. Persist
        //
        let store = DayStore::open(&cfg.database)?;
        let view = TerminalTable {
            separator: cfg.separator(),
            ..Default::default()
        };
        let mut log = EventLog::open_at(store, view, today);
        let record = log.create(raw, blob)?;

        success(format!(
            "Event #{} saved for {} ({} → {}, {}), id {}",
            record.number,
            record.date,
            record.start_str(),
            record.end_str(),
            record.duration,
            record.id
        ));

        if record.date != log.active_date() {
            info(format!(
                "Use `list --date {}` to see that day.",
                record.date_str()
            ));
        }
    }

    Ok(())
}
