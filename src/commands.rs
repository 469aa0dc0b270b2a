//! Command dispatch and handlers.
//!
//! `Dispatcher` owns the session state, the settings store, and the pending
//! confirmation. `dispatch` resolves every command to a single completion
//! signal: synchronous handlers finish before it returns, the quote handler
//! hands back a channel the UI waits on before opening the next prompt.

use chrono::Local;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::ascii;
use crate::quote::QuoteClient;
use crate::registry;
use crate::session::{Session, SettingsStore};
use crate::theme;
use crate::transcript::Transcript;

/// Confirmation-gated operations, inspectable without executing anything.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfirmAction {
    ResetAll,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PendingAction {
    Idle,
    AwaitingConfirmation(ConfirmAction),
}

/// Completion signal for one dispatched command. `Pending` carries the
/// channel that yields the final output line of an asynchronous handler.
pub enum DispatchOutcome {
    Done,
    Pending(UnboundedReceiver<String>),
}

pub struct Dispatcher {
    pub session: Session,
    store: Box<dyn SettingsStore>,
    pending: PendingAction,
    quote: QuoteClient,
    system_theme: String,
    handle: tokio::runtime::Handle,
}

impl Dispatcher {
    pub fn new(
        store: Box<dyn SettingsStore>,
        system_theme: &str,
        handle: tokio::runtime::Handle,
    ) -> Self {
        let session = Session::load(&*store, system_theme);
        Self {
            session,
            store,
            pending: PendingAction::Idle,
            quote: QuoteClient::new(),
            system_theme: system_theme.to_string(),
            handle,
        }
    }

    pub fn awaiting_confirmation(&self) -> bool {
        matches!(self.pending, PendingAction::AwaitingConfirmation(_))
    }

    pub fn pending(&self) -> PendingAction {
        self.pending
    }

    pub fn store(&self) -> &dyn SettingsStore {
        &*self.store
    }

    /// Executes one raw input line against the terminal state.
    pub fn dispatch(&mut self, raw: &str, out: &mut Transcript) -> DispatchOutcome {
        if let PendingAction::AwaitingConfirmation(action) = self.pending {
            self.pending = PendingAction::Idle;
            let response = raw.trim().to_lowercase();
            if matches!(response.as_str(), "y" | "yes") {
                self.run_confirmed(action, out);
            } else {
                out.push_output("Cancelled the action.");
            }
            return DispatchOutcome::Done;
        }

        if !raw.is_empty() {
            self.session.push_history(raw, &mut *self.store);
        }

        let mut tokens = raw.split_whitespace();
        let name = tokens.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = tokens.collect();

        tracing::debug!(command = %name, "dispatch");

        match name.as_str() {
            "" => {}
            "help" => out.push_output(&registry::help_text()),
            "about" => out.push_output(&registry::about_text()),
            "contact" => out.push_output(&registry::contact_text()),
            "projects" => out.push_output(&registry::projects_text()),
            "social" => self.cmd_social(&args, out),
            "set" => self.cmd_set(&args, out),
            "date" => out.push_output(&Local::now().format("%a %b %d %Y").to_string()),
            "time" => out.push_output(&Local::now().format("%I:%M:%S %p").to_string()),
            "reset" => self.cmd_reset(&args, out),
            "username" => out.push_output(&self.session.username),
            "theme" => out.push_output(&theme::THEME_KEYS.join("\n")),
            "history" => self.cmd_history(&args, out),
            "ascii" => Self::cmd_ascii(&args, out),
            "quote" => return self.cmd_quote(),
            "clear" => self.cmd_clear(&args, out),
            _ => out.push_error(&format!("Command not found: {raw}")),
        }

        DispatchOutcome::Done
    }

    fn run_confirmed(&mut self, action: ConfirmAction, out: &mut Transcript) {
        match action {
            ConfirmAction::ResetAll => {
                self.session.reset(&mut *self.store, &self.system_theme);
                out.push_output("All terminal settings reset to default.");
            }
        }
    }

    fn cmd_social(&mut self, args: &[&str], out: &mut Transcript) {
        let Some(platform) = args.first() else {
            out.push_output(&registry::social_text());
            return;
        };
        let platform = platform.to_lowercase();
        match registry::social_url(&platform) {
            Some(url) => {
                out.push_output(&format!("Opening {platform} ..."));
                open_url(url);
            }
            None => out.push_error(&format!("Unknown social platform: {platform}")),
        }
    }

    fn cmd_set(&mut self, args: &[&str], out: &mut Transcript) {
        if args.len() < 2 {
            out.push_error(&unknown_setting(args.first().copied().unwrap_or("")));
            return;
        }
        let key = args[0].to_lowercase();
        let values = &args[1..];
        match key.as_str() {
            "username" => self.cmd_set_username(values, out),
            "theme" => self.cmd_set_theme(values, out),
            _ => out.push_error(&unknown_setting(args[0])),
        }
    }

    fn cmd_set_username(&mut self, values: &[&str], out: &mut Transcript) {
        if values.len() != 1 {
            out.push_error(&format!(
                "Error: INVALID_USERNAME '{}'\nUsername can only contain letters, numbers, and underscores.",
                values.join(" ")
            ));
            return;
        }
        let user = values[0].trim();
        if user.is_empty() {
            out.push_error("Error: USERNAME_NOT_UPDATED\nUsage: set username [your_name]");
            return;
        }
        if !user.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            out.push_error(&format!(
                "Error: INVALID_USERNAME '{user}'\nUsername can only contain letters, numbers, and underscores."
            ));
            return;
        }
        if user.len() < 3 || user.len() > 20 {
            out.push_error(
                "Error: USERNAME_LENGTH_INVALID\nUsername must be between 3 and 20 characters.",
            );
            return;
        }
        if user == self.session.username {
            out.push_output(&format!(
                "Username is already set to '{user}'\nUse 'set username [new_name]' to change it."
            ));
            return;
        }
        self.session.set_username(user, &mut *self.store);
        out.push_output(&format!("Username updated to '{user}'"));
    }

    fn cmd_set_theme(&mut self, values: &[&str], out: &mut Transcript) {
        if values.len() != 1 {
            out.push_error(&format!(
                "Error: INVALID_THEME {}\nType 'theme' to view list of available themes.",
                values.join(" ")
            ));
            return;
        }
        let key = values[0].trim().to_lowercase();
        match theme::lookup(&key) {
            Some(theme) => {
                self.session.set_theme(theme.key, &mut *self.store);
                out.push_output(&format!("Theme changed to '{key}'"));
            }
            None => {
                let listing: Vec<String> = theme::THEME_KEYS
                    .iter()
                    .map(|k| format!("- {k}"))
                    .collect();
                out.push_error(&format!(
                    "Error: INVALID_THEME '{key}'\nAvailable themes:\n{}",
                    listing.join("\n")
                ));
            }
        }
    }

    fn cmd_reset(&mut self, args: &[&str], out: &mut Transcript) {
        let scope = args.first().map_or_else(|| "all".to_string(), |s| s.to_lowercase());
        if scope == "all" {
            out.push_output(
                "Are you sure you want to reset all terminal settings? Type 'yes' or 'no'.",
            );
            self.pending = PendingAction::AwaitingConfirmation(ConfirmAction::ResetAll);
        } else {
            out.push_error(&format!(
                "Unknown reset target: '{scope}'\nValid option:\n - all\n\nUsage: reset all"
            ));
        }
    }

    fn cmd_clear(&mut self, args: &[&str], out: &mut Transcript) {
        let scope = args
            .first()
            .map_or_else(|| "screen".to_string(), |s| s.to_lowercase());
        match scope.as_str() {
            "screen" => out.clear_screen(),
            "history" => {
                self.session.clear_history(&mut *self.store);
                out.push_output("Command history cleared.");
            }
            "all" => {
                self.session.clear_history(&mut *self.store);
                out.clear_screen();
                out.push_output("Terminal history and screen cleared.");
            }
            _ => out.push_error(&format!(
                "Unknown clear target: '{scope}'\nValid options:\n - history\n - screen\n - all\n\nUsage: clear [history|screen|all]"
            )),
        }
    }

    fn cmd_history(&self, args: &[&str], out: &mut Transcript) {
        // The listing never includes the `history` command that produced it.
        let history = &self.session.history;
        let effective = &history[..history.len().saturating_sub(1)];
        if effective.is_empty() {
            out.push_output("No command history available.");
            return;
        }

        let mut count = effective.len();
        if let Some(n) = args.first().and_then(|a| a.parse::<usize>().ok()) {
            count = n.min(effective.len());
        }

        let listing: Vec<String> = effective[effective.len() - count..]
            .iter()
            .enumerate()
            .map(|(idx, cmd)| format!("{}: {}", idx + 1, cmd))
            .collect();
        out.push_output(&listing.join("\n"));
    }

    fn cmd_ascii(args: &[&str], out: &mut Transcript) {
        let text = args.join(" ");
        if text.is_empty() {
            out.push_output("Usage: ascii <text>");
            return;
        }
        match ascii::render(&text) {
            Ok(art) => out.push_output(&art),
            Err(e) => {
                tracing::debug!(error = %e, "ascii rendering failed");
                out.push_error("Error generating ASCII art.");
            }
        }
    }

    fn cmd_quote(&mut self) -> DispatchOutcome {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = self.quote.clone();
        self.handle.spawn(async move {
            let line = client.fetch_line().await;
            let _ = tx.send(line);
        });
        DispatchOutcome::Pending(rx)
    }
}

fn unknown_setting(key: &str) -> String {
    format!(
        "Unknown setting: '{key}'\nValid options:\n - username\n - theme\n\nUsage:\n - set username <name>\n - set theme <theme>"
    )
}

fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let launcher = "open";
    #[cfg(target_os = "windows")]
    let launcher = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let launcher = "xdg-open";

    if let Err(e) = std::process::Command::new(launcher).arg(url).spawn() {
        tracing::warn!(error = %e, url, "failed to open link");
    }
}
