//! Login screen — admin token entry.
//!
//! Shown whenever the session holds no credential: on first launch, after
//! an explicit logout, and whenever the backend answers 401/403. The
//! token is not validated here; the first fetch after submit is the
//! validation, and a rejection routes straight back with the reason.

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct LoginScreen {
    focused: bool,
    input: Input,
    show_token: bool,
    error: Option<String>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            input: Input::default(),
            show_token: false,
            error: None,
        }
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Enter => {
                let token = self.input.value().trim().to_owned();
                if token.is_empty() {
                    self.error = Some("Token cannot be empty".into());
                    return Ok(None);
                }
                self.error = None;
                self.input.reset();
                Ok(Some(Action::LoginSubmit(token)))
            }
            KeyCode::Tab => {
                self.show_token = !self.show_token;
                Ok(None)
            }
            _ => {
                self.error = None;
                self.input.handle_event(&CrosstermEvent::Key(key));
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        // Arriving here because the backend revoked the session: show why.
        if let Action::SessionExpired { message } = action {
            self.error = Some(message.clone());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 64u16.min(area.width.saturating_sub(4));
        let height = 10u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog = Rect::new(area.x + x, area.y + y, width, height);

        let block = Block::default()
            .title(" Stagepass — Admin Sign In ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let shown = if self.show_token {
            self.input.value().to_owned()
        } else {
            "•".repeat(self.input.value().chars().count())
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Paste the admin API token for the box-office backend.",
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Token: ", theme::field_label()),
                Span::styled(shown, Style::default().fg(theme::HEADER_CYAN)),
                Span::styled("█", Style::default().fg(theme::HEADER_CYAN)),
            ]),
            Line::from(""),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {error}"),
                Style::default().fg(theme::STATUS_RED),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("sign in   ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("show/hide   ", theme::key_hint()),
            Span::styled("Ctrl+C ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Login"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn type_str(screen: &mut LoginScreen, s: &str) {
        for c in s.chars() {
            screen
                .handle_key_event(KeyEvent::from(KeyCode::Char(c)))
                .unwrap();
        }
    }

    #[test]
    fn submitting_blank_token_sets_error() {
        let mut screen = LoginScreen::new();
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        assert!(action.is_none());
        assert!(screen.error.is_some());
    }

    #[test]
    fn submitting_token_emits_login_action() {
        let mut screen = LoginScreen::new();
        type_str(&mut screen, "  secret-tkn  ");

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();

        match action {
            Some(Action::LoginSubmit(token)) => assert_eq!(token, "secret-tkn"),
            other => panic!("expected LoginSubmit, got: {other:?}"),
        }
    }

    #[test]
    fn session_expiry_reason_is_displayed() {
        let mut screen = LoginScreen::new();
        screen
            .update(&Action::SessionExpired {
                message: "Invalid or expired token".into(),
            })
            .unwrap();
        assert_eq!(screen.error.as_deref(), Some("Invalid or expired token"));
    }
}
