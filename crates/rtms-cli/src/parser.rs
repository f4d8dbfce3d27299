//! REPL line parsing.
//!
//! Every line becomes either an [`Intent`] for the application shell or a
//! local command that only reads state.

use rtms_application::Intent;
use rtms_core::auth::SocialProvider;
use rtms_core::identity::{LoginCredentials, Role};
use rtms_core::preferences::ThemeMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Intent(Intent),
    Show,
    WhoAmI,
    Pages,
    History,
    Notices,
    Help,
    Quit,
}

/// Command words offered by completion.
pub const COMMANDS: &[&str] = &[
    "go", "back", "forward", "join", "sponsor", "login", "social", "role", "logout", "theme",
    "show", "whoami", "pages", "history", "notices", "help", "quit",
];

pub const HELP: &str = "\
  go <page>                          open a page (see `pages`)
  back | forward                     move through history
  join | sponsor                     open the join / sponsors page
  login                              show the login form
  login <email> <password> [student|staff] [--remember]
  social <google|github>             sign in with a provider
  role <student|staff>               role used for social sign-in
  logout
  theme <redesign|accessible|high-glow>
  show | whoami | pages | history | notices
  help | quit";

/// Parses one trimmed, non-empty line.
///
/// # Errors
///
/// Returns a usage message when the line is not a valid command.
pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err("Empty command".to_string());
    };
    let args: Vec<&str> = words.collect();

    let intent = match (command, args.as_slice()) {
        ("go" | "open", [page]) => Intent::Navigate(page.to_string()),
        ("go" | "open", _) => return Err("Usage: go <page>".to_string()),
        ("back", []) => Intent::Back,
        ("forward", []) => Intent::Forward,
        ("join", []) => Intent::JoinClub,
        ("sponsor", []) => Intent::BecomeSponsor,
        ("login", []) => Intent::OpenLogin,
        ("login", args) => Intent::Login(parse_credentials(args)?),
        ("social", [provider]) => Intent::SocialLogin(
            provider
                .parse::<SocialProvider>()
                .map_err(|_| format!("Unknown provider '{}'", provider))?,
        ),
        ("role", [role]) => Intent::SelectLoginRole(parse_login_role(role)?),
        ("logout", []) => Intent::Logout,
        ("theme", [theme]) => Intent::SetTheme(
            theme
                .parse::<ThemeMode>()
                .map_err(|_| format!("Unknown theme '{}'", theme))?,
        ),
        ("show", []) => return Ok(ReplCommand::Show),
        ("whoami", []) => return Ok(ReplCommand::WhoAmI),
        ("pages", []) => return Ok(ReplCommand::Pages),
        ("history", []) => return Ok(ReplCommand::History),
        ("notices", []) => return Ok(ReplCommand::Notices),
        ("help" | "?", []) => return Ok(ReplCommand::Help),
        ("quit" | "exit", []) => return Ok(ReplCommand::Quit),
        _ => return Err(format!("Unknown command '{}'. Type 'help'.", line)),
    };
    Ok(ReplCommand::Intent(intent))
}

fn parse_credentials(args: &[&str]) -> Result<LoginCredentials, String> {
    const USAGE: &str = "Usage: login <email> <password> [student|staff] [--remember]";

    let remember_me = args.contains(&"--remember");
    let positional: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| *arg != "--remember")
        .collect();

    let (email, password, role) = match positional.as_slice() {
        [email, password] => (*email, *password, Role::Student),
        [email, password, role] => (*email, *password, parse_login_role(role)?),
        _ => return Err(USAGE.to_string()),
    };
    Ok(LoginCredentials::new(email, password, role).with_remember_me(remember_me))
}

fn parse_login_role(value: &str) -> Result<Role, String> {
    match value.parse::<Role>() {
        Ok(Role::Anonymous) | Err(_) => Err(format!("Unknown role '{}'", value)),
        Ok(role) => Ok(role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_commands() {
        assert_eq!(
            parse_line("go admin-dashboard"),
            Ok(ReplCommand::Intent(Intent::Navigate("admin-dashboard".into())))
        );
        assert_eq!(parse_line("join"), Ok(ReplCommand::Intent(Intent::JoinClub)));
        assert_eq!(parse_line("back"), Ok(ReplCommand::Intent(Intent::Back)));
        assert!(parse_line("go").is_err());
    }

    #[test]
    fn test_login_forms() {
        assert_eq!(parse_line("login"), Ok(ReplCommand::Intent(Intent::OpenLogin)));
        assert_eq!(
            parse_line("login kim@uni.edu pw staff --remember"),
            Ok(ReplCommand::Intent(Intent::Login(
                LoginCredentials::new("kim@uni.edu", "pw", Role::Staff).with_remember_me(true)
            )))
        );
        assert_eq!(
            parse_line("login kim@uni.edu pw"),
            Ok(ReplCommand::Intent(Intent::Login(LoginCredentials::new(
                "kim@uni.edu",
                "pw",
                Role::Student
            ))))
        );
        assert!(parse_line("login kim@uni.edu pw anonymous").is_err());
        assert!(parse_line("login kim@uni.edu").is_err());
    }

    #[test]
    fn test_social_role_and_theme() {
        assert_eq!(
            parse_line("social GitHub"),
            Ok(ReplCommand::Intent(Intent::SocialLogin(SocialProvider::Github)))
        );
        assert_eq!(
            parse_line("role staff"),
            Ok(ReplCommand::Intent(Intent::SelectLoginRole(Role::Staff)))
        );
        assert_eq!(
            parse_line("theme high-glow"),
            Ok(ReplCommand::Intent(Intent::SetTheme(ThemeMode::HighGlow)))
        );
        assert!(parse_line("social myspace").is_err());
    }

    #[test]
    fn test_local_commands() {
        assert_eq!(parse_line("whoami"), Ok(ReplCommand::WhoAmI));
        assert_eq!(parse_line("exit"), Ok(ReplCommand::Quit));
        assert!(parse_line("dance").is_err());
    }
}
