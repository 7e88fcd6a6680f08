use crate::db::store::DayStore;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(store: &DayStore, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let stats = store.stats()?;
    println!(
        "{}• Days with events:{} {}{}{}",
        CYAN, RESET, GREEN, stats.days, RESET
    );
    println!(
        "{}• Total events:{} {}{}{} ({} with photo)",
        CYAN, RESET, GREEN, stats.events, RESET, stats.with_photo
    );

    //
    // 3) DATE RANGE
    //
    let fmt_first = stats
        .first_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = stats
        .last_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE EVENTS/DAY
    //
    if stats.days > 0 {
        let avg = stats.events as f64 / stats.days as f64;
        println!("{}• Average events/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
