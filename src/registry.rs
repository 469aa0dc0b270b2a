//! Static command registry and portfolio content.
//!
//! The registry drives autocompletion and the `help` output; command
//! execution itself is matched by name in the dispatcher.

use crate::theme;

/// One known command: its name, a short description, an optional argument
/// hint, and the argument values tab completion may offer.
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub args_hint: Option<&'static str>,
    pub autocomplete: &'static [&'static str],
}

/// All known commands, in fixed declaration order. Prefix searches keep this
/// order, so the first entry wins ties.
pub const REGISTRY: &[CommandSpec] = &[
    CommandSpec {
        name: "about",
        description: "Get to know me better",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "ascii",
        description: "Convert text to ASCII art",
        args_hint: Some("<text>"),
        autocomplete: &[],
    },
    CommandSpec {
        name: "clear",
        description: "Clear terminal screen/history/all",
        args_hint: Some("<args>"),
        autocomplete: &["screen", "history", "all"],
    },
    CommandSpec {
        name: "contact",
        description: "View contact information",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "date",
        description: "Display the current date",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "help",
        description: "List all available commands",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "history",
        description: "Show previously entered commands",
        args_hint: Some("[n]"),
        autocomplete: &[],
    },
    CommandSpec {
        name: "projects",
        description: "Show a list of major projects",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "quote",
        description: "Show a random inspirational quote",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "reset",
        description: "Reset the terminal to default state",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "set theme",
        description: "Change the terminal theme",
        args_hint: Some("<theme>"),
        autocomplete: theme::THEME_KEYS,
    },
    CommandSpec {
        name: "set username",
        description: "Set a new terminal username",
        args_hint: Some("<name>"),
        autocomplete: &[],
    },
    CommandSpec {
        name: "social",
        description: "View social media profiles",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "theme",
        description: "Display a list of available themes",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "time",
        description: "Display the current time",
        args_hint: None,
        autocomplete: &[],
    },
    CommandSpec {
        name: "username",
        description: "Display the current username",
        args_hint: None,
        autocomplete: &[],
    },
];

/// Case-insensitive lookup by full command name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    REGISTRY.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub const SITE_URL: &str = "https://mkrause.dev";
pub const EMAIL: &str = "hello@mkrause.dev";

/// Social platforms and their profile URLs, lowercase-keyed.
pub const SOCIAL: &[(&str, &str)] = &[
    ("linkedin", "https://www.linkedin.com/in/m-krause"),
    ("instagram", "https://www.instagram.com/mkrause.dev"),
    ("twitter", "https://x.com/mkrause_dev"),
    ("github", "https://github.com/mkrause-dev"),
];

pub fn social_url(platform: &str) -> Option<&'static str> {
    SOCIAL
        .iter()
        .find(|(name, _)| *name == platform)
        .map(|(_, url)| *url)
}

pub fn help_text() -> String {
    [
        "Available commands:",
        "about             - Display information about me",
        "ascii <text>      - Convert text to ASCII art",
        "clear             - Clear the terminal screen or command history",
        "                    Options: [screen|history|all], Default: screen",
        "contact           - Show my contact information",
        "date              - Display the current date",
        "help              - Show this help message",
        "history [n]       - Show previously entered commands",
        "projects          - List some of my major projects",
        "quote             - Show a random inspirational quote",
        "reset             - Reset the terminal to its default state",
        "set theme <name>  - Apply a theme, type 'theme' for the list",
        "set username <n>  - Set a new terminal username",
        "social            - Display my social media profiles",
        "theme             - List all available themes",
        "time              - Display the current time",
        "username          - Display the current username",
    ]
    .join("\n")
}

pub fn about_text() -> String {
    [
        "About Me:",
        "Hi! I'm Martin, a software engineer building networked services",
        "and terminal tooling, mostly in Rust.",
        "",
        "Type 'projects' to view my work.",
    ]
    .join("\n")
}

pub fn contact_text() -> String {
    format!(
        "Contact Details:\nWebsite           - {}\nEmail             - {}",
        SITE_URL, EMAIL
    )
}

pub fn projects_text() -> String {
    format!(
        "Projects:\nPersonal Website   - {}\nPortfolio Terminal - {}/terminal\nGitHub Repos       - {}",
        SITE_URL,
        SITE_URL,
        social_url("github").unwrap_or(SITE_URL)
    )
}

pub fn social_text() -> String {
    let mut lines = vec!["Social Media:".to_string()];
    lines.push(format!("Website           - {}", SITE_URL));
    for (name, url) in SOCIAL {
        let mut label = name.to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        lines.push(format!("{:<18}- {}", label, url));
    }
    lines.push(String::new());
    lines.push("Type 'social <platform>' to open a profile.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(lookup("HELP").is_some());
        assert!(lookup("Set Theme").is_some());
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn names_are_unique() {
        for (i, spec) in REGISTRY.iter().enumerate() {
            assert!(
                !REGISTRY[i + 1..].iter().any(|c| c.name == spec.name),
                "duplicate command name: {}",
                spec.name
            );
        }
    }

    #[test]
    fn set_theme_offers_every_theme_key() {
        let spec = lookup("set theme").unwrap();
        assert_eq!(spec.autocomplete, theme::THEME_KEYS);
    }

    #[test]
    fn social_urls_resolve() {
        assert!(social_url("github").is_some());
        assert!(social_url("myspace").is_none());
    }
}
