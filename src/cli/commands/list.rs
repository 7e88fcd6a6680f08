use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event_log::EventLog;
use crate::db::store::DayStore;
use crate::errors::AppResult;
use crate::ui::view::TerminalTable;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date: day } = cmd {
        let d = date::parse_or_today(day.as_ref())?;

        let store = DayStore::open(&cfg.database)?;
        let view = TerminalTable {
            separator: cfg.separator(),
            ..Default::default()
        };

        // switching renders the selected day
        let mut log = EventLog::new(store, view);
        log.switch_query_date(d);
    }
    Ok(())
}
