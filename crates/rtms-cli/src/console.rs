//! Terminal presentation.

use colored::Colorize;
use rtms_application::{App, View};
use rtms_core::notice::{ACCESS_DENIED_MESSAGE, Notice, NoticeLevel, Notifier};
use rtms_core::page::PageId;

/// Prints notices and prompts as they are requested.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn prompt_login(&self, requested: &PageId) {
        println!(
            "{}",
            format!("🔒 '{}' needs a login.", requested).bright_yellow()
        );
        println!(
            "{}",
            "   login <email> <password> [student|staff]   or   social <google|github>".bright_black()
        );
    }

    fn access_denied(&self, _requested: &PageId) {
        println!("{}", ACCESS_DENIED_MESSAGE.red());
    }

    fn notify(&self, notice: Notice) {
        println!("{}", notice_line(&notice));
    }
}

pub fn notice_line(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✓ {}", notice.message).green().to_string(),
        NoticeLevel::Info => format!("ℹ {}", notice.message).cyan().to_string(),
        NoticeLevel::Warning => format!("! {}", notice.message).yellow().to_string(),
        NoticeLevel::Error => format!("✗ {}", notice.message).red().to_string(),
    }
}

pub fn print_view(view: &View) {
    println!("{}", view.heading.bright_magenta().bold());
    for line in &view.lines {
        println!("  {}", line);
    }
}

pub fn print_current(app: &App) {
    match app.router().current_view() {
        Some(view) => print_view(&view),
        None => println!("{}", app.router().current_page().title.bright_magenta().bold()),
    }
}

/// Identity badge, e.g. `Sam Lee (Student)` or `Guest`.
pub async fn badge(app: &App) -> String {
    match app.session().identity().await {
        Some(identity) => format!("{} ({})", identity.display_name(), identity.role.label()),
        None => "Guest".to_string(),
    }
}

pub async fn prompt(app: &App) -> String {
    let identity = app.session().identity().await;
    let who = identity
        .map(|identity| identity.initials())
        .unwrap_or_else(|| "guest".to_string());
    let unread = match app.unread_notifications() {
        0 => String::new(),
        n => format!(" [{}]", n),
    };
    format!("{}@{}{}> ", who, app.router().current_page().id, unread)
}
