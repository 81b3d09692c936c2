//! All-bookings screen — complete history with the mark-used action.
//!
//! Denser than the pending screen: one row per booking with a status
//! badge, plus a detail pane for the selection. The mark-used action is
//! offered only for confirmed bookings; redeemed tickets render a
//! terminal banner instead.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use stagepass_core::{Booking, BookingStatus, filter_bookings};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::LoadState;
use crate::theme;
use crate::widgets::fmt::{fmt_money, fmt_timestamp};

pub struct AllScreen {
    focused: bool,
    bookings: Arc<Vec<Booking>>,
    load: LoadState,
    query: String,
    selected: usize,
    throbber: throbber_widgets_tui::ThrobberState,
}

impl AllScreen {
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

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let searching = !self.query.trim().is_empty();
        let (title, hint) = if searching {
            ("No Results Found", "Try a different search term")
        } else {
            (
                "No Bookings Yet",
                "Bookings will appear here once customers start booking.",
            )
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
            let marker = if idx == self.selected { "▸" } else { " " };
            let row_style = if idx == self.selected {
                theme::list_selected()
            } else {
                theme::list_row()
            };
            let summary = format!(
                "{} {:<20} {:<9} {}×{} {}",
                marker,
                truncate(&booking.customer_name, 20),
                booking.id,
                booking.ticket_type,
                booking.number_of_tickets,
                fmt_money(booking.total_price),
            );
            lines.push(Line::from(vec![
                Span::styled(summary, row_style),
                Span::raw("  "),
                Span::styled(
                    theme::status_badge(&booking.status),
                    theme::badge_style(&booking.status),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    #[allow(clippy::too_many_lines)]
    fn render_detail(&self, frame: &mut Frame, area: Rect, booking: &Booking) {
        let block = Block::default()
            .borders(Borders::TOP)
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
            field("Email", booking.email.clone()),
            field("Phone", booking.phone.clone()),
            field(
                "Pricing",
                format!(
                    "{} × {} = {}",
                    fmt_money(booking.price_per_ticket),
                    booking.number_of_tickets,
                    fmt_money(booking.total_price),
                ),
            ),
            field("Booked on", fmt_timestamp(&booking.created_at)),
        ];

        if let Some(ref ticket_id) = booking.ticket_id {
            lines.push(field("Ticket ID", ticket_id.clone()));
        }

        match booking.status {
            // Terminal state: banner, never an action
            BookingStatus::Used => {
                if let Some(ref used_at) = booking.used_at {
                    lines.push(field("Used at", fmt_timestamp(used_at)));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "  ✓ TICKET USED AT VENUE  ",
                    theme::used_banner(),
                )));
            }
            // Only confirmed bookings can be redeemed
            BookingStatus::Confirmed if self.load == LoadState::Loaded => {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("  u ", theme::key_hint_key()),
                    Span::styled("mark as used at venue", theme::key_hint()),
                ]));
            }
            _ => {}
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for AllScreen {
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
            KeyCode::Char('u') if self.load == LoadState::Loaded => {
                let filtered = self.filtered();
                let Some(booking) = filtered.get(self.selected) else {
                    return Ok(None);
                };
                // Gate on status, not just presence: used/rejected/
                // cancelled bookings have no redeem action.
                if booking.status != BookingStatus::Confirmed {
                    return Ok(None);
                }
                Ok(Some(Action::RequestMarkUsed {
                    id: booking.id.clone(),
                    name: booking.customer_name.clone(),
                }))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::FetchStarted {
                screen: ScreenId::All,
                ..
            } => {
                self.load = LoadState::Loading;
            }
            Action::AllLoaded { bookings, .. } => {
                self.bookings = Arc::clone(bookings);
                self.load = LoadState::Loaded;
                self.clamp_selection();
            }
            Action::FetchFailed {
                screen: ScreenId::All,
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
            .title(format!(" All Bookings ({}) ", self.bookings.len()))
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
            Constraint::Length(1),  // status line
            Constraint::Min(1),     // list
            Constraint::Length(12), // detail pane
            Constraint::Length(1),  // hints
        ])
        .split(inner);

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

        if self.load == LoadState::Loading && self.bookings.is_empty() {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Loading bookings...")
                .style(Style::default().fg(theme::HEADER_CYAN))
                .throbber_style(Style::default().fg(theme::ACCENT_VIOLET));
            frame.render_stateful_widget(throbber, layout[1], &mut self.throbber.clone());
        } else if filtered.is_empty() {
            self.render_empty(frame, layout[1]);
        } else {
            self.render_list(frame, layout[1], &filtered);
            if let Some(booking) = filtered.get(self.selected) {
                self.render_detail(frame, layout[2], booking);
            }
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("u ", theme::key_hint_key()),
            Span::styled("mark used  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "All"
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use stagepass_core::BookingId;

    use super::*;

    fn booking(id: &str, status: BookingStatus) -> Booking {
        let used = status == BookingStatus::Used;
        Booking {
            id: BookingId::new(id),
            customer_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "+91-98450-12345".into(),
            event_name: "Spring Gala".into(),
            event_date: Utc.with_ymd_and_hms(2026, 9, 12, 19, 30, 0).unwrap(),
            ticket_type: "Balcony".into(),
            price_per_ticket: 400.0,
            number_of_tickets: 2,
            total_price: 800.0,
            ticket_id: (status != BookingStatus::PendingPayment).then(|| "TK-77-B".into()),
            status,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 8, 15, 0).unwrap(),
            used_at: used.then(|| Utc.with_ymd_and_hms(2026, 9, 12, 18, 5, 0).unwrap()),
        }
    }

    fn loaded_screen(bookings: Vec<Booking>) -> AllScreen {
        let mut screen = AllScreen::new();
        screen
            .update(&Action::AllLoaded {
                generation: 1,
                bookings: Arc::new(bookings),
            })
            .unwrap();
        screen
    }

    fn render_to_text(screen: &AllScreen) -> String {
        let backend = TestBackend::new(110, 32);
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
    fn used_booking_renders_banner_and_no_action() {
        let screen = loaded_screen(vec![booking("BK-0042", BookingStatus::Used)]);
        let text = render_to_text(&screen);

        assert!(text.contains("TICKET USED AT VENUE"));
        assert!(!text.contains("mark as used at venue"));
        assert!(text.contains("Used at"));
    }

    #[test]
    fn confirmed_booking_offers_action_and_no_banner() {
        let screen = loaded_screen(vec![booking("BK-0042", BookingStatus::Confirmed)]);
        let text = render_to_text(&screen);

        assert!(text.contains("mark as used at venue"));
        assert!(!text.contains("TICKET USED AT VENUE"));
        assert!(text.contains("TK-77-B"));
    }

    #[test]
    fn mark_used_key_only_fires_for_confirmed() {
        let mut screen = loaded_screen(vec![booking("BK-0042", BookingStatus::Confirmed)]);
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('u')))
            .unwrap();
        assert!(matches!(action, Some(Action::RequestMarkUsed { .. })));

        let mut screen = loaded_screen(vec![booking("BK-0042", BookingStatus::Used)]);
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('u')))
            .unwrap();
        assert!(action.is_none());

        let mut screen = loaded_screen(vec![booking("BK-0042", BookingStatus::Rejected)]);
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('u')))
            .unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn unknown_status_renders_uppercased_raw_value() {
        let screen = loaded_screen(vec![booking(
            "BK-0099",
            BookingStatus::Other("on_waitlist".into()),
        )]);
        let text = render_to_text(&screen);
        assert!(text.contains("ON_WAITLIST"));
    }

    #[test]
    fn empty_history_shows_waiting_state() {
        let screen = loaded_screen(vec![]);
        let text = render_to_text(&screen);
        assert!(text.contains("No Bookings Yet"));
    }
}
