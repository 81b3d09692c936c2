//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use stagepass_core::BoxOffice;

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays up before auto-dismissing.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search overlay visibility.
    search_active: bool,
    /// Current search query (shared across both booking views).
    search_query: String,
    /// Action sender — components and fetch tasks dispatch through this.
    action_tx: tokio::sync::mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: tokio::sync::mpsc::UnboundedReceiver<Action>,
    /// The booking desk facade (API + session).
    desk: BoxOffice,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Per-view fetch generations. Only a response carrying the view's
    /// current generation may update that view's list; anything older is
    /// a stale in-flight request and is dropped.
    pending_generation: Arc<AtomicU64>,
    all_generation: Arc<AtomicU64>,
}

impl App {
    /// Create the app. The session guard runs here: with no stored
    /// credential the panel starts on the login screen.
    pub fn new(desk: BoxOffice) -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        let active_screen = if desk.session().authenticated() {
            ScreenId::Pending
        } else {
            ScreenId::Login
        };

        Self {
            active_screen,
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            desk,
            pending_confirm: None,
            notification: None,
            pending_generation: Arc::new(AtomicU64::new(0)),
            all_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Landed on a booking view at startup: fetch it immediately.
        if self.active_screen.fetches() {
            self.fetch(self.active_screen);
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("admin panel event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("admin panel event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Login screen captures all keys except Ctrl+C
        if self.active_screen == ScreenId::Login {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&ScreenId::Login) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        // Search input captures printable keys
        if self.search_active {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseSearch)),
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Refresh)),

            (KeyModifiers::NONE, KeyCode::Char('l')) => return Ok(Some(Action::Logout)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Esc dismisses the current toast, if any
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if self.notification.is_some() {
                    return Ok(Some(Action::DismissNotification));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to screens.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                // Auto-dismiss notifications
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
                // Screens animate their throbbers on ticks
                self.broadcast(action)?;
            }

            // ── Navigation ────────────────────────────────────────────
            Action::SwitchScreen(target) => {
                // Session guard: booking views require a credential.
                let target = if *target != ScreenId::Login
                    && !self.desk.session().authenticated()
                {
                    ScreenId::Login
                } else {
                    *target
                };

                if target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = target;
                    if let Some(screen) = self.screens.get_mut(&target) {
                        screen.set_focused(true);
                    }

                    // Arriving at a booking view re-fetches its list.
                    if target.fetches() {
                        self.fetch(target);
                    }
                }
            }

            Action::Refresh => {
                if self.active_screen.fetches() {
                    self.fetch(self.active_screen);
                }
            }

            // ── Session ───────────────────────────────────────────────
            Action::LoginSubmit(token) => {
                match self
                    .desk
                    .session()
                    .login(SecretString::from(token.clone()))
                {
                    Ok(()) => {
                        self.action_tx
                            .send(Action::Notify(Notification::success("Signed in")))?;
                        self.action_tx
                            .send(Action::SwitchScreen(ScreenId::Pending))?;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to persist admin token");
                        self.action_tx
                            .send(Action::Notify(Notification::error(format!("{e}"))))?;
                    }
                }
            }

            Action::Logout => {
                self.desk.session().invalidate();
                self.action_tx
                    .send(Action::SwitchScreen(ScreenId::Login))?;
                self.action_tx
                    .send(Action::Notify(Notification::info("Signed out")))?;
            }

            Action::SessionExpired { message } => {
                // The desk already invalidated the session; route to login
                // with the reason on display.
                if let Some(screen) = self.screens.get_mut(&ScreenId::Login) {
                    screen.update(action)?;
                }
                self.action_tx
                    .send(Action::SwitchScreen(ScreenId::Login))?;
                self.action_tx
                    .send(Action::Notify(Notification::error(message.clone())))?;
            }

            // ── Data ──────────────────────────────────────────────────
            Action::FetchStarted { .. } => {
                self.broadcast(action)?;
            }

            Action::PendingLoaded { generation, .. } => {
                if *generation == self.pending_generation.load(Ordering::Relaxed) {
                    self.broadcast(action)?;
                } else {
                    debug!(generation, "dropping stale pending response");
                }
            }

            Action::AllLoaded { generation, .. } => {
                if *generation == self.all_generation.load(Ordering::Relaxed) {
                    self.broadcast(action)?;
                } else {
                    debug!(generation, "dropping stale all-bookings response");
                }
            }

            Action::FetchFailed {
                screen,
                generation,
                message,
                requires_login,
            } => {
                let current = match screen {
                    ScreenId::Pending => self.pending_generation.load(Ordering::Relaxed),
                    ScreenId::All => self.all_generation.load(Ordering::Relaxed),
                    ScreenId::Login => 0,
                };
                if *generation != current {
                    debug!(generation, "dropping stale fetch failure");
                    return Ok(());
                }
                if *requires_login {
                    self.action_tx.send(Action::SessionExpired {
                        message: message.clone(),
                    })?;
                } else {
                    self.broadcast(action)?;
                    self.action_tx
                        .send(Action::Notify(Notification::error(message.clone())))?;
                }
            }

            // ── Booking commands: request → confirm → execute ─────────
            Action::RequestApprove { id, name } => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::Approve {
                        id: id.clone(),
                        name: name.clone(),
                    }))?;
            }

            Action::RequestReject { id, name } => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::Reject {
                        id: id.clone(),
                        name: name.clone(),
                    }))?;
            }

            Action::RequestMarkUsed { id, name } => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::MarkUsed {
                        id: id.clone(),
                        name: name.clone(),
                    }))?;
            }

            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            Action::ActionFinished { message, refresh } => {
                self.action_tx
                    .send(Action::Notify(Notification::success(message.clone())))?;
                self.fetch(*refresh);
            }

            Action::ActionFailed {
                message,
                requires_login,
            } => {
                // Lists stay exactly as they were; only the toast changes.
                if *requires_login {
                    self.action_tx.send(Action::SessionExpired {
                        message: message.clone(),
                    })?;
                } else {
                    self.action_tx
                        .send(Action::Notify(Notification::error(message.clone())))?;
                }
            }

            // ── Search ────────────────────────────────────────────────
            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.broadcast(action)?;
            }

            Action::SearchInput(query) => {
                self.search_query = query.clone();
                self.broadcast(action)?;
            }

            Action::SearchSubmit => {
                // Keep the filter applied, just drop the input overlay.
                self.search_active = false;
            }

            // ── Help / notifications ──────────────────────────────────
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }
        }

        Ok(())
    }

    /// Forward an action to every screen so both views stay in sync.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Fetch pipeline ────────────────────────────────────────────────

    /// Dispatch a list fetch for a booking view.
    ///
    /// Bumps the view's generation so any response still in flight from
    /// an earlier fetch becomes stale, then runs the request in a task
    /// that reports back through the action channel.
    fn fetch(&self, screen: ScreenId) {
        let counter = match screen {
            ScreenId::Pending => &self.pending_generation,
            ScreenId::All => &self.all_generation,
            ScreenId::Login => return,
        };
        let generation = counter.fetch_add(1, Ordering::Relaxed) + 1;

        let _ = self
            .action_tx
            .send(Action::FetchStarted { screen, generation });

        let desk = self.desk.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match screen {
                ScreenId::Pending => desk.pending_bookings().await.map(|bookings| {
                    Action::PendingLoaded {
                        generation,
                        bookings: Arc::new(bookings),
                    }
                }),
                ScreenId::All => desk.all_bookings().await.map(|bookings| Action::AllLoaded {
                    generation,
                    bookings: Arc::new(bookings),
                }),
                ScreenId::Login => return,
            };

            let action = match result {
                Ok(loaded) => loaded,
                Err(e) => {
                    warn!(error = %e, ?screen, "booking fetch failed");
                    Action::FetchFailed {
                        screen,
                        generation,
                        message: e.user_message(),
                        requires_login: e.requires_login(),
                    }
                }
            };
            let _ = tx.send(action);
        });
    }

    /// Spawn a confirmed admin action. Sends a toast + refresh on success.
    fn execute_confirm(&self, confirm: ConfirmAction) {
        let desk = self.desk.clone();
        let tx = self.action_tx.clone();
        let refresh = confirm.refreshes();
        tokio::spawn(async move {
            let result = match &confirm {
                ConfirmAction::Approve { id, .. } => desk.approve(id).await,
                ConfirmAction::Reject { id, .. } => desk.reject(id).await,
                ConfirmAction::MarkUsed { id, .. } => desk.mark_used(id).await,
            };
            match result {
                Ok(message) => {
                    let _ = tx.send(Action::ActionFinished { message, refresh });
                }
                Err(e) => {
                    warn!(error = %e, "booking action failed");
                    let _ = tx.send(Action::ActionFailed {
                        message: e.user_message(),
                        requires_login: e.requires_login(),
                    });
                }
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Login gets the full frame — no tab bar or status bar
        if self.active_screen == ScreenId::Login {
            if let Some(screen) = self.screens.get(&ScreenId::Login) {
                screen.render(frame, area);
            }
            if let Some((ref notif, _)) = self.notification {
                self.render_notification(frame, area, notif);
            }
            return;
        }

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays (order matters: last = topmost)
        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar: search input or session + key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::ACCENT_VIOLET)),
                Span::styled(&self.search_query, Style::default().fg(theme::HEADER_CYAN)),
                Span::styled("█", Style::default().fg(theme::HEADER_CYAN)),
                Span::styled("  Esc cancel  Enter submit", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let session_indicator = if self.desk.session().authenticated() {
            Span::styled("● signed in", Style::default().fg(theme::STATUS_GREEN))
        } else {
            Span::styled("○ signed out", Style::default().fg(theme::STATUS_RED))
        };

        let hints = Span::styled(
            " │ ? help  / search  r refresh  l logout  q quit",
            theme::key_hint(),
        );

        let line = Line::from(vec![Span::raw(" "), session_indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 16u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let hint_row = |key: &str, text: &str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(text.to_owned(), theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            hint_row("1 / 2", "Pending / All bookings"),
            hint_row("Tab", "Next view"),
            hint_row("j/k ↑/↓", "Move selection"),
            hint_row("a", "Approve selected (pending view)"),
            hint_row("x", "Reject selected (pending view)"),
            hint_row("u", "Mark ticket used (all view)"),
            hint_row("/", "Search name, ID, email, phone"),
            hint_row("r", "Refresh current view"),
            hint_row("l", "Log out"),
            hint_row("?", "This help"),
            hint_row("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                    Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a centered confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let width = 54u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::STATUS_AMBER));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::STATUS_GREEN, "✓"),
            NotificationLevel::Error => (theme::STATUS_RED, "✗"),
            NotificationLevel::Info => (theme::HEADER_CYAN, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use url::Url;

    use stagepass_api::BookingClient;
    use stagepass_core::{
        Booking, BookingId, BookingStatus, MemoryTokenStore, Session, TokenStore,
    };

    use super::*;

    fn make_app(authenticated: bool) -> App {
        let store: Arc<dyn TokenStore> = if authenticated {
            Arc::new(MemoryTokenStore::with_token("tkn"))
        } else {
            Arc::new(MemoryTokenStore::new())
        };
        let session = Arc::new(Session::new(store));
        // Unroutable endpoint: tests never await real fetch results.
        let client = BookingClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:9/").unwrap(),
        );
        App::new(BoxOffice::with_client(client, session))
    }

    fn booking(id: &str, name: &str) -> Booking {
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

    /// Process everything queued on the action channel, like run() does.
    fn drain(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
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

    #[tokio::test]
    async fn unauthenticated_app_starts_on_login() {
        let app = make_app(false);
        assert_eq!(app.active_screen, ScreenId::Login);
        assert!(render_to_text(&app).contains("Admin Sign In"));
    }

    #[tokio::test]
    async fn session_guard_blocks_booking_views() {
        let mut app = make_app(false);
        app.process_action(&Action::SwitchScreen(ScreenId::All))
            .unwrap();
        assert_eq!(app.active_screen, ScreenId::Login);
    }

    #[tokio::test]
    async fn authenticated_app_starts_on_pending() {
        let app = make_app(true);
        assert_eq!(app.active_screen, ScreenId::Pending);
    }

    #[tokio::test]
    async fn stale_fetch_response_is_dropped() {
        let mut app = make_app(true);
        app.pending_generation.store(5, Ordering::Relaxed);

        // A response from generation 4 arrives after generation 5 was
        // dispatched: it must not touch the list.
        app.process_action(&Action::PendingLoaded {
            generation: 4,
            bookings: Arc::new(vec![booking("BK-STALE", "Stale Response")]),
        })
        .unwrap();
        assert!(!render_to_text(&app).contains("BK-STALE"));

        app.process_action(&Action::PendingLoaded {
            generation: 5,
            bookings: Arc::new(vec![booking("BK-1001", "Asha Rao")]),
        })
        .unwrap();
        assert!(render_to_text(&app).contains("BK-1001"));
    }

    #[tokio::test]
    async fn stale_fetch_failure_is_dropped() {
        let mut app = make_app(true);
        app.pending_generation.store(3, Ordering::Relaxed);
        app.process_action(&Action::PendingLoaded {
            generation: 3,
            bookings: Arc::new(vec![booking("BK-1001", "Asha Rao")]),
        })
        .unwrap();

        app.process_action(&Action::FetchFailed {
            screen: ScreenId::Pending,
            generation: 2,
            message: "timed out".into(),
            requires_login: false,
        })
        .unwrap();
        drain(&mut app);

        let text = render_to_text(&app);
        assert!(text.contains("BK-1001"));
        assert!(!text.contains("timed out"));
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn failed_action_leaves_lists_untouched() {
        let mut app = make_app(true);
        app.pending_generation.store(1, Ordering::Relaxed);
        app.process_action(&Action::PendingLoaded {
            generation: 1,
            bookings: Arc::new(vec![booking("BK-1001", "Asha Rao")]),
        })
        .unwrap();

        app.process_action(&Action::ActionFailed {
            message: "Failed to approve booking".into(),
            requires_login: false,
        })
        .unwrap();
        drain(&mut app);

        let text = render_to_text(&app);
        assert!(text.contains("BK-1001"), "list must be unchanged");
        assert!(text.contains("Failed to approve booking"), "toast shown");
    }

    #[tokio::test]
    async fn request_flows_through_confirmation() {
        let mut app = make_app(true);
        app.process_action(&Action::RequestApprove {
            id: BookingId::new("BK-1001"),
            name: "Asha Rao".into(),
        })
        .unwrap();
        drain(&mut app);

        assert!(matches!(
            app.pending_confirm,
            Some(ConfirmAction::Approve { .. })
        ));
        assert!(render_to_text(&app).contains("Approve booking for Asha Rao?"));

        // Declining clears the dialog without dispatching anything.
        app.process_action(&Action::ConfirmNo).unwrap();
        assert!(app.pending_confirm.is_none());
    }

    #[tokio::test]
    async fn expired_session_routes_to_login_and_clears_credential() {
        let mut app = make_app(true);
        // The desk invalidates the session before this action is emitted.
        app.desk.session().invalidate();

        app.process_action(&Action::SessionExpired {
            message: "Invalid or expired token".into(),
        })
        .unwrap();
        drain(&mut app);

        assert_eq!(app.active_screen, ScreenId::Login);
        assert!(!app.desk.session().authenticated());
        let text = render_to_text(&app);
        assert!(text.contains("Invalid or expired token"));
    }

    #[tokio::test]
    async fn logout_returns_to_login() {
        let mut app = make_app(true);
        app.process_action(&Action::Logout).unwrap();
        drain(&mut app);

        assert_eq!(app.active_screen, ScreenId::Login);
        assert!(!app.desk.session().authenticated());
    }

    #[tokio::test]
    async fn login_submit_establishes_session_and_opens_pending() {
        let mut app = make_app(false);
        app.process_action(&Action::LoginSubmit("fresh-tkn".into()))
            .unwrap();
        drain(&mut app);

        assert!(app.desk.session().authenticated());
        assert_eq!(app.active_screen, ScreenId::Pending);
    }

    #[tokio::test]
    async fn search_input_filters_both_views() {
        let mut app = make_app(true);
        app.pending_generation.store(1, Ordering::Relaxed);
        app.process_action(&Action::PendingLoaded {
            generation: 1,
            bookings: Arc::new(vec![
                booking("BK-1001", "Asha Rao"),
                booking("BK-1002", "Miguel Ortega"),
            ]),
        })
        .unwrap();

        app.process_action(&Action::SearchInput("asha".into()))
            .unwrap();
        let text = render_to_text(&app);
        assert!(text.contains("BK-1001"));
        assert!(!text.contains("BK-1002"));

        // Esc clears the filter everywhere.
        app.process_action(&Action::CloseSearch).unwrap();
        let text = render_to_text(&app);
        assert!(text.contains("BK-1002"));
    }
}
