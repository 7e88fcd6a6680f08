//! rStoplogger main entrypoint.

use rstoplogger::run;
use rstoplogger::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
