use colored::Colorize;
use rtms_core::page::{Page, PageRegistry};

pub fn list(registry: &PageRegistry) {
    for page in registry.pages() {
        println!(
            "  {:<18} {:<18} {}",
            page.id.as_str(),
            page.title,
            access_label(page).bright_black()
        );
    }
}

pub fn access_label(page: &Page) -> String {
    match (page.requires_auth, page.requires_role) {
        (_, Some(role)) => format!("{} only", role.label().to_lowercase()),
        (true, None) => "login".to_string(),
        (false, None) => "public".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_labels() {
        let registry = PageRegistry::standard();
        assert_eq!(access_label(registry.get("home").unwrap()), "public");
        assert_eq!(access_label(registry.get("profile").unwrap()), "login");
        assert_eq!(access_label(registry.get("analytics").unwrap()), "staff only");
    }
}
