use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::store::DayStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        print: true,
        operation,
    } = cmd
    {
        let store = DayStore::open(&cfg.database)?;
        LogLogic::print_log(&store, operation.as_deref())?;
    }

    Ok(())
}
