//! `tickerchat screeners` — List the available stock screeners.

use tickerchat_tools::screener::ScreenerKind;

pub fn run() {
    println!();
    println!("  Available screeners:");
    println!();
    for kind in ScreenerKind::ALL {
        println!("    {:<26} ({})", kind.title(), kind.key());
    }
    println!();
    println!("  In chat, just ask — e.g. \"show me today's top gainers\".");
    println!();
}
