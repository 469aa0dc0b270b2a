use eframe::egui;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use portfolio_terminal::autocomplete::{self, Completion};
use portfolio_terminal::commands::{DispatchOutcome, Dispatcher};
use portfolio_terminal::quote;
use portfolio_terminal::session::{FileStore, MemStore, SettingsStore};
use portfolio_terminal::theme::{self, Theme};
use portfolio_terminal::transcript::{LineKind, Transcript};
use portfolio_terminal::{ascii, registry};

fn main() -> Result<(), eframe::Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portfolio_terminal=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("Portfolio Terminal")
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Terminal",
        options,
        Box::new(|cc| Ok(Box::new(TerminalApp::new(cc)))),
    )
}

struct TerminalApp {
    transcript: Transcript,
    dispatcher: Dispatcher,
    input_buffer: String,
    cursor_pos: usize,
    show_cursor: bool,
    last_cursor_blink: Instant,
    /// Channel for the in-flight asynchronous command, if any. While this is
    /// set there is no editable prompt line.
    awaiting: Option<UnboundedReceiver<String>>,
    theme: &'static Theme,
    _runtime: tokio::runtime::Runtime,
}

impl TerminalApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let system_dark = !matches!(cc.integration_info.system_theme, Some(eframe::Theme::Light));
        let system_key = if system_dark { "dark" } else { "light" };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("portfolio-net")
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::warn!(error = %e, "multi-threaded runtime unavailable");
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })
            .expect("Failed to build async runtime");

        let store: Box<dyn SettingsStore> = match FileStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "settings will not persist this session");
                Box::new(MemStore::default())
            }
        };

        let dispatcher = Dispatcher::new(store, system_key, runtime.handle().clone());
        let theme = theme::lookup(&dispatcher.session.theme_id)
            .unwrap_or_else(|| theme::system_default(system_dark));
        apply_visuals(&cc.egui_ctx, theme);

        let mut transcript = Transcript::new();
        transcript.push_banner("");
        match ascii::render("portfolio") {
            Ok(art) => {
                for row in art.lines() {
                    transcript.push_banner(row);
                }
            }
            Err(_) => transcript.push_banner("PORTFOLIO"),
        }
        transcript.push_banner("");
        transcript.push_banner(&format!(
            "Welcome! This terminal lives at {}",
            registry::SITE_URL
        ));
        transcript.push_banner("");

        Self {
            transcript,
            dispatcher,
            input_buffer: String::new(),
            cursor_pos: 0,
            show_cursor: true,
            last_cursor_blink: Instant::now(),
            awaiting: None,
            theme,
            _runtime: runtime,
        }
    }

    fn prompt_string(&self) -> String {
        if self.dispatcher.awaiting_confirmation() {
            "[confirm]: ".to_string()
        } else {
            format!("{}@portfolio:~$ ", self.dispatcher.session.username)
        }
    }

    fn refresh_suggestions(&mut self) {
        self.transcript.clear_suggestions();
        if let Some(items) = autocomplete::live_suggestions(&self.input_buffer) {
            self.transcript.show_suggestions(items);
        }
    }

    fn submit_line(&mut self) {
        let command = self.input_buffer.trim().to_string();
        let prompt = self.prompt_string();
        self.transcript.clear_suggestions();
        self.transcript.push_input(&format!("{prompt}{command}"));
        self.input_buffer.clear();
        self.cursor_pos = 0;

        match self.dispatcher.dispatch(&command, &mut self.transcript) {
            DispatchOutcome::Done => {}
            DispatchOutcome::Pending(rx) => self.awaiting = Some(rx),
        }

        self.theme = theme::lookup(&self.dispatcher.session.theme_id).unwrap_or(self.theme);
    }

    fn history_prev(&mut self) {
        let session = &mut self.dispatcher.session;
        if !session.history.is_empty() && session.history_cursor > 0 {
            session.history_cursor -= 1;
            self.input_buffer = session.history[session.history_cursor].clone();
            self.cursor_pos = self.input_buffer.len();
        }
    }

    fn history_next(&mut self) {
        let session = &mut self.dispatcher.session;
        if !session.history.is_empty() && session.history_cursor + 1 < session.history.len() {
            session.history_cursor += 1;
            self.input_buffer = session.history[session.history_cursor].clone();
            self.cursor_pos = self.input_buffer.len();
        } else {
            session.history_cursor = session.history.len();
            self.input_buffer.clear();
            self.cursor_pos = 0;
        }
    }

    fn apply_tab_completion(&mut self) {
        self.transcript.clear_suggestions();
        match autocomplete::suggest(&self.input_buffer) {
            Completion::Complete(value) => {
                self.input_buffer = value;
                self.cursor_pos = self.input_buffer.len();
            }
            Completion::List(items) => self.transcript.show_suggestions(items),
            Completion::None => {}
        }
    }

    fn handle_key(&mut self, key: egui::Key, modifiers: egui::Modifiers) {
        if modifiers.command && key == egui::Key::K {
            self.transcript.clear_screen();
            return;
        }

        match key {
            egui::Key::Enter => self.submit_line(),
            egui::Key::Backspace => {
                if self.cursor_pos > 0 {
                    let start = prev_char_boundary(&self.input_buffer, self.cursor_pos);
                    self.input_buffer.replace_range(start..self.cursor_pos, "");
                    self.cursor_pos = start;
                }
                self.refresh_suggestions();
            }
            egui::Key::Delete => {
                if self.cursor_pos < self.input_buffer.len() {
                    let end = next_char_boundary(&self.input_buffer, self.cursor_pos);
                    self.input_buffer.replace_range(self.cursor_pos..end, "");
                }
                self.refresh_suggestions();
            }
            egui::Key::ArrowLeft => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = prev_char_boundary(&self.input_buffer, self.cursor_pos);
                }
            }
            egui::Key::ArrowRight => {
                if self.cursor_pos < self.input_buffer.len() {
                    self.cursor_pos = next_char_boundary(&self.input_buffer, self.cursor_pos);
                }
            }
            egui::Key::ArrowUp => {
                if !self.dispatcher.awaiting_confirmation() {
                    self.transcript.clear_suggestions();
                    self.history_prev();
                }
            }
            egui::Key::ArrowDown => {
                if !self.dispatcher.awaiting_confirmation() {
                    self.transcript.clear_suggestions();
                    self.history_next();
                }
            }
            egui::Key::Tab => self.apply_tab_completion(),
            egui::Key::Escape => self.transcript.clear_suggestions(),
            egui::Key::Home => self.cursor_pos = 0,
            egui::Key::End => self.cursor_pos = self.input_buffer.len(),
            _ => {}
        }
    }

    fn insert_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_control() || ch == '\n' || ch == '\r' {
                continue;
            }
            self.input_buffer.insert(self.cursor_pos, ch);
            self.cursor_pos += ch.len_utf8();
        }
        self.refresh_suggestions();
    }

    fn poll_pending(&mut self, ctx: &egui::Context) {
        let Some(rx) = &mut self.awaiting else {
            return;
        };
        match rx.try_recv() {
            Ok(line) => {
                self.transcript.push_output(&line);
                self.awaiting = None;
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(50));
            }
            Err(TryRecvError::Disconnected) => {
                self.transcript.push_output(quote::FALLBACK_LINE);
                self.awaiting = None;
            }
        }
    }

    fn line_color(&self, kind: LineKind) -> egui::Color32 {
        match kind {
            LineKind::Hint => self.theme.suggestion,
            LineKind::Banner => self.theme.accent,
            LineKind::Input => self.theme.prompt,
            LineKind::Output => self.theme.foreground,
            LineKind::Error => self.theme.error,
        }
    }

    fn paint_prompt_line(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(self.prompt_string())
                    .font(egui::FontId::monospace(15.0))
                    .color(self.theme.prompt),
            );

            let mut display_input = self.input_buffer.clone();
            if self.show_cursor {
                if self.cursor_pos >= display_input.len() {
                    display_input.push('█');
                } else {
                    display_input.insert(self.cursor_pos, '█');
                }
            }
            ui.label(
                egui::RichText::new(display_input)
                    .font(egui::FontId::monospace(15.0))
                    .color(self.theme.foreground),
            );
        });
    }
}

impl eframe::App for TerminalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.last_cursor_blink.elapsed() > Duration::from_millis(500) {
            self.show_cursor = !self.show_cursor;
            self.last_cursor_blink = Instant::now();
        }
        ctx.request_repaint_after(Duration::from_millis(500));

        self.poll_pending(ctx);

        // Keystrokes go to the single editable prompt line; while a command
        // is still completing there is no such line and input is dropped.
        if self.awaiting.is_none() {
            let events = ctx.input(|i| i.events.clone());
            for event in &events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => self.handle_key(*key, *modifiers),
                    egui::Event::Text(text) => self.insert_text(text),
                    _ => {}
                }
            }
        }

        apply_visuals(ctx, self.theme);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.background))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(self.theme.background)
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .stick_to_bottom(true)
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                ui.with_layout(
                                    egui::Layout::top_down_justified(egui::Align::LEFT),
                                    |ui| {
                                        for line in self.transcript.lines() {
                                            ui.label(
                                                egui::RichText::new(&line.text)
                                                    .font(egui::FontId::monospace(15.0))
                                                    .color(self.line_color(line.kind)),
                                            );
                                        }

                                        if self.awaiting.is_none() {
                                            self.paint_prompt_line(ui);
                                        }

                                        if let Some(items) = self.transcript.suggestions() {
                                            let text =
                                                format!("Suggestions:\n\n{}", items.join("\n"));
                                            ui.label(
                                                egui::RichText::new(text)
                                                    .font(egui::FontId::monospace(15.0))
                                                    .color(self.theme.suggestion),
                                            );
                                        }
                                    },
                                );
                            });

                        ui.separator();
                        ui.horizontal(|ui| {
                            ui.small(format!(
                                "theme: {} | Ctrl+K: clear screen | Tab: complete",
                                self.dispatcher.session.theme_id
                            ));
                        });
                    });
            });
    }
}

fn apply_visuals(ctx: &egui::Context, theme: &Theme) {
    let [r, g, b, _] = theme.background.to_array();
    let light_base = (r as u16 + g as u16 + b as u16) / 3 > 128;
    let mut visuals = if light_base {
        egui::Visuals::light()
    } else {
        egui::Visuals::dark()
    };
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.background;
    visuals.extreme_bg_color = theme.background;
    ctx.set_visuals(visuals);
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.saturating_sub(1);
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = (idx + 1).min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
