use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event_log::EventLog;
use crate::db::log::ttlog;
use crate::db::store::DayStore;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportOptions, resolve_export_path};
use crate::ui::messages::warning;
use crate::ui::view::NoView;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        file,
        date: day,
        format,
        force,
    } = cmd
    {
        let format = format.unwrap_or(cfg.export_format);

        // reject a blank name before opening anything
        resolve_export_path(file, format)?;

        let d = date::parse_or_today(day.as_ref())?;
        let store = DayStore::open(&cfg.database)?;
        let mut log = EventLog::new(store, NoView);
        log.switch_query_date(d);

        let opts = ExportOptions {
            title: cfg.pdf_title.clone(),
            thumbnail_size: cfg.thumbnail_size,
            force: *force,
        };
        let path = ExportLogic::export(log.events(), file, format, &opts)?;

        let message = format!(
            "{} events of {} exported as {}",
            log.events().len(),
            d,
            format.as_str()
        );
        if let Err(e) = ttlog(log.store().conn(), "export", &path.to_string_lossy(), &message) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
    Ok(())
}
