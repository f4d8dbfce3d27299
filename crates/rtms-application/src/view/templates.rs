//! Page bodies.
//!
//! Public pages are fixed text. Personalized pages read the session
//! identity; an anonymous session gets a neutral placeholder so a build never
//! fails.

use rtms_core::identity::Identity;
use rtms_core::page::Page;
use rtms_core::session::Session;

pub(super) fn heading_and_lines(page: &Page, session: &Session) -> (String, Vec<String>) {
    if page.personalized {
        return personalized(page, session.identity());
    }
    (page.title.to_string(), static_lines(page.id.as_str()))
}

fn personalized(page: &Page, identity: Option<&Identity>) -> (String, Vec<String>) {
    let Some(identity) = identity else {
        return (page.title.to_string(), vec!["Log in to see this page.".into()]);
    };

    match page.id.as_str() {
        "dashboard" => (
            format!("Welcome back, {}!", identity.first_name),
            vec![
                "Next Meeting: Weekly Standup".into(),
                "Current Challenge: Build a Portfolio Site".into(),
                "Announcements and your latest submissions appear here.".into(),
            ],
        ),
        "profile" => (
            identity.display_name(),
            vec![
                format!(
                    "Avatar: {}",
                    identity.avatar.clone().unwrap_or_else(|| identity.initials())
                ),
                format!("Email: {}", identity.email),
                format!("Role: {}", identity.role.label()),
            ],
        ),
        "admin-dashboard" => (
            format!("Admin Dashboard · {}", identity.display_name()),
            vec![
                "Recent Activity".into(),
                "Quick Actions: manage students, challenges, chapters".into(),
            ],
        ),
        "submissions" => (
            format!("{}'s Submissions", identity.first_name),
            vec!["Your submitted challenges and their review status.".into()],
        ),
        _ => (
            page.title.to_string(),
            vec![format!("Signed in as {}", identity.display_name())],
        ),
    }
}

fn static_lines(page_id: &str) -> Vec<String> {
    let lines: &[&str] = match page_id {
        "home" => &[
            "Real builders, real projects, real community.",
            "Join a chapter, ship challenges, get featured.",
        ],
        "join" => &["Apply in 2 minutes. We'll review and set you up."],
        "challenges" => &[
            "Optional, but featured if you ship.",
            "Build a Portfolio Website",
            "API Integration Project",
            "Machine Learning Model",
        ],
        "showcase" => &[
            "AI-Powered Study Assistant",
            "Sustainable Campus App",
            "Local Business Directory",
        ],
        "sponsors" => &[
            "Power a chapter. Boost student makers.",
            "Join industry leaders supporting the next generation of builders.",
        ],
        "chapters" => &["Find your local community or start one at your school."],
        "merch" => &[
            "Profits support the club and student chapters.",
            "RTMS Hoodie",
            "RTMS T-Shirt",
            "Sticker Pack",
        ],
        "calendar" => &["Upcoming chapter meetups, workshops and hackathons."],
        "policies" => &[
            "Code of Conduct",
            "Privacy Policy",
            "Terms of Service",
            "Academic Integrity",
        ],
        "styleguide" => &["Colors, typography, components, and patterns."],
        "manage-students" => &["Search, filter and update student status."],
        "manage-challenges" => &["Create, edit and retire challenges."],
        "manage-chapters" => &["Create and update chapters."],
        "analytics" => &["Engagement and growth over the selected timeframe."],
        "settings" => &["Site-wide configuration."],
        _ => &[],
    };
    lines.iter().map(|line| line.to_string()).collect()
}
