//! Pending screen — bookings awaiting approval, with approve/reject.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use stagepass_core::{Booking, filter_bookings};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::LoadState;
use crate::theme;
use crate::widgets::fmt::{fmt_event_date, fmt_money, fmt_timestamp};

pub struct PendingScreen {
    focused: bool,
    bookings: Arc<Vec<Booking>>,
    load: LoadState,
    query: String,
    selected: usize,
    throbber: throbber_widgets_tui::ThrobberState,
}

impl PendingScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            bookings: Arc::new(Vec::new()),
            load: LoadState::Idle,
            query: String::new(),
            selected: 0,
            throbber: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn filtered(&self) -> Vec<&Booking> {
        filter_bookings(&self.bookings, &self.query)
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// The selected booking's (id, customer name), when actionable.
    fn selection(&self) -> Option<(stagepass_core::BookingId, String)> {
        let filtered = self.filtered();
        let booking = filtered.get(self.selected)?;
        Some(((*booking).id.clone(), (*booking).customer_name.clone()))
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let searching = !self.query.trim().is_empty();
        let (title, hint) = if searching {
            ("No Results Found", "Try a different search term")
        } else {
            ("No Pending Bookings", "All bookings have been processed!")
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {title}"), theme::title_style())),
            Line::from(Span::styled(format!("  {hint}"), theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, filtered: &[&Booking]) {
        let visible = area.height as usize;
        let start = self
            .selected
            .saturating_sub(visible.saturating_sub(1))
            .min(filtered.len().saturating_sub(visible.min(filtered.len())));

        let mut lines: Vec<Line> = Vec::new();
        for (idx, booking) in filtered.iter().enumerate().skip(start).take(visible) {
            let style = if idx == self.selected {
                theme::list_selected()
            } else {
                theme::list_row()
            };
            let marker = if idx == self.selected { "▸" } else { " " };
            let width = area.width.saturating_sub(4) as usize;
            let row = format!("{} {} · {}", marker, booking.customer_name, booking.id);
            let row: String = row.chars().take(width).collect();
            lines.push(Line::from(Span::styled(row, style)));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, booking: &Booking) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<12}"), theme::field_label()),
                Span::styled(value, theme::field_value()),
            ])
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("  {}", booking.customer_name),
                    theme::title_style(),
                ),
                Span::raw("  "),
                Span::styled(
                    theme::status_badge(&booking.status),
                    theme::badge_style(&booking.status),
                ),
            ]),
            field("ID", booking.id.to_string()),
            Line::from(""),
            field("Email", booking.email.clone()),
            field("Phone", booking.phone.clone()),
            field("Event", booking.event_name.clone()),
            field("Date", fmt_event_date(&booking.event_date)),
            field("Type", booking.ticket_type.clone()),
            field("Tickets", booking.number_of_tickets.to_string()),
            field("Per ticket", fmt_money(booking.price_per_ticket)),
            field("Total", fmt_money(booking.total_price)),
            field("Requested", fmt_timestamp(&booking.created_at)),
        ];

        if self.load == LoadState::Loaded {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  a ", theme::key_hint_key()),
                Span::styled("approve    ", theme::key_hint()),
                Span::styled("x ", theme::key_hint_key()),
                Span::styled("reject", theme::key_hint()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for PendingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.filtered().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Ok(None)
            }
            KeyCode::Char('G') => {
                self.selected = self.filtered().len().saturating_sub(1);
                Ok(None)
            }
            // Approve/reject only offered once the list has loaded; a
            // stale selection during a refresh can't fire a request.
            KeyCode::Char('a') if self.load == LoadState::Loaded => {
                Ok(self
                    .selection()
                    .map(|(id, name)| Action::RequestApprove { id, name }))
            }
            KeyCode::Char('x') if self.load == LoadState::Loaded => {
                Ok(self
                    .selection()
                    .map(|(id, name)| Action::RequestReject { id, name }))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::FetchStarted {
                screen: ScreenId::Pending,
                ..
            } => {
                self.load = LoadState::Loading;
            }
            Action::PendingLoaded { bookings, .. } => {
                self.bookings = Arc::clone(bookings);
                self.load = LoadState::Loaded;
                self.clamp_selection();
            }
            Action::FetchFailed {
                screen: ScreenId::Pending,
                message,
                ..
            } => {
                self.load = LoadState::Error(message.clone());
            }
            Action::SearchInput(query) => {
                self.query = query.clone();
                self.clamp_selection();
            }
            Action::CloseSearch => {
                self.query.clear();
                self.clamp_selection();
            }
            Action::Tick => {
                if self.load == LoadState::Loading {
                    self.throbber.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let filtered = self.filtered();

        let block = Block::default()
            .title(format!(" Pending Bookings ({}) ", self.bookings.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // status line
            Constraint::Min(1),    // content
            Constraint::Length(1), // hints
        ])
        .split(inner);

        // Status line: search feedback or load state
        let status = if self.query.trim().is_empty() {
            match &self.load {
                LoadState::Error(msg) => Line::from(Span::styled(
                    format!("  ✗ {msg}"),
                    Style::default().fg(theme::STATUS_RED),
                )),
                LoadState::Loading => {
                    Line::from(Span::styled("  ⟳ refreshing…", theme::key_hint()))
                }
                _ => Line::from(""),
            }
        } else {
            Line::from(vec![
                Span::styled("  Search: ", theme::field_label()),
                Span::styled(self.query.clone(), Style::default().fg(theme::HEADER_CYAN)),
                Span::styled(
                    format!("  — {} result(s)", filtered.len()),
                    theme::key_hint(),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(status), layout[0]);

        // Content
        if self.load == LoadState::Loading && self.bookings.is_empty() {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Loading bookings...")
                .style(Style::default().fg(theme::HEADER_CYAN))
                .throbber_style(Style::default().fg(theme::ACCENT_VIOLET));
            frame.render_stateful_widget(throbber, layout[1], &mut self.throbber.clone());
        } else if filtered.is_empty() {
            self.render_empty(frame, layout[1]);
        } else {
            let columns =
                Layout::horizontal([Constraint::Percentage(38), Constraint::Percentage(62)])
                    .split(layout[1]);
            self.render_list(frame, columns[0], &filtered);
            if let Some(booking) = filtered.get(self.selected) {
                self.render_detail(frame, columns[1], booking);
            }
        }

        // Hints
        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("approve  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("reject  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Pending"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use stagepass_core::{BookingId, BookingStatus};

    use super::*;

    fn pending_booking(id: &str, name: &str) -> Booking {
        Booking {
            id: BookingId::new(id),
            customer_name: name.into(),
            email: "asha@example.com".into(),
            phone: "+91-98450-12345".into(),
            event_name: "Spring Gala".into(),
            event_date: Utc.with_ymd_and_hms(2026, 9, 12, 19, 30, 0).unwrap(),
            ticket_type: "Balcony".into(),
            price_per_ticket: 400.0,
            number_of_tickets: 2,
            total_price: 800.0,
            status: BookingStatus::PendingPayment,
            ticket_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 8, 15, 0).unwrap(),
            used_at: None,
        }
    }

    fn loaded_screen(bookings: Vec<Booking>) -> PendingScreen {
        let mut screen = PendingScreen::new();
        screen
            .update(&Action::PendingLoaded {
                generation: 1,
                bookings: Arc::new(bookings),
            })
            .unwrap();
        screen
    }

    fn render_to_text(screen: &PendingScreen) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_pending_booking_with_badge_and_actions() {
        let screen = loaded_screen(vec![pending_booking("BK-1001", "Asha Rao")]);
        let text = render_to_text(&screen);

        assert!(text.contains("BK-1001"));
        assert!(text.contains("Asha Rao"));
        assert!(text.contains("⏳ PENDING"));
        assert!(text.contains("approve"));
        assert!(text.contains("reject"));
        assert!(text.contains("₹800"));
    }

    #[test]
    fn refetch_without_booking_removes_it() {
        let mut screen = loaded_screen(vec![
            pending_booking("BK-1001", "Asha Rao"),
            pending_booking("BK-1002", "Miguel Ortega"),
        ]);

        // Server approved BK-1001; the refreshed pending list omits it.
        screen
            .update(&Action::PendingLoaded {
                generation: 2,
                bookings: Arc::new(vec![pending_booking("BK-1002", "Miguel Ortega")]),
            })
            .unwrap();

        let text = render_to_text(&screen);
        assert!(!text.contains("BK-1001"));
        assert!(text.contains("BK-1002"));
    }

    #[test]
    fn approve_key_emits_request_for_selected_booking() {
        let mut screen = loaded_screen(vec![pending_booking("BK-1001", "Asha Rao")]);

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('a')))
            .unwrap();

        match action {
            Some(Action::RequestApprove { id, name }) => {
                assert_eq!(id, BookingId::new("BK-1001"));
                assert_eq!(name, "Asha Rao");
            }
            other => panic!("expected RequestApprove, got: {other:?}"),
        }
    }

    #[test]
    fn actions_are_suppressed_while_loading() {
        let mut screen = loaded_screen(vec![pending_booking("BK-1001", "Asha Rao")]);
        screen
            .update(&Action::FetchStarted {
                screen: ScreenId::Pending,
                generation: 2,
            })
            .unwrap();

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('a')))
            .unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn search_narrows_the_rendered_list() {
        let mut screen = loaded_screen(vec![
            pending_booking("BK-1001", "Asha Rao"),
            pending_booking("BK-1002", "Miguel Ortega"),
        ]);
        screen
            .update(&Action::SearchInput("miguel".into()))
            .unwrap();

        let text = render_to_text(&screen);
        assert!(text.contains("1 result(s)"));
        assert!(!text.contains("BK-1001"));
        assert!(text.contains("BK-1002"));
    }

    #[test]
    fn empty_search_shows_no_results_state() {
        let mut screen = loaded_screen(vec![pending_booking("BK-1001", "Asha Rao")]);
        screen
            .update(&Action::SearchInput("zzz-nope".into()))
            .unwrap();

        let text = render_to_text(&screen);
        assert!(text.contains("No Results Found"));
        assert!(text.contains("Try a different search term"));
    }

    #[test]
    fn empty_list_shows_all_processed_state() {
        let screen = loaded_screen(vec![]);
        let text = render_to_text(&screen);
        assert!(text.contains("No Pending Bookings"));
        assert!(text.contains("All bookings have been processed!"));
    }

    #[test]
    fn fetch_failure_keeps_previous_list_and_shows_error() {
        let mut screen = loaded_screen(vec![pending_booking("BK-1001", "Asha Rao")]);
        screen
            .update(&Action::FetchFailed {
                screen: ScreenId::Pending,
                generation: 2,
                message: "Failed to fetch bookings".into(),
                requires_login: false,
            })
            .unwrap();

        let text = render_to_text(&screen);
        assert!(text.contains("BK-1001"), "list must survive a failed fetch");
        assert!(text.contains("Failed to fetch bookings"));
    }
}
