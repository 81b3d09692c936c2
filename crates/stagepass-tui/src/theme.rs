//! Palette and semantic styling for the admin panel.

use ratatui::style::{Color, Modifier, Style};

use stagepass_core::BookingStatus;

// ── Core Palette ──────────────────────────────────────────────────────

pub const ACCENT_VIOLET: Color = Color::Rgb(154, 120, 235); // #9a78eb
pub const HEADER_CYAN: Color = Color::Rgb(102, 217, 239); // #66d9ef
pub const DIM_WHITE: Color = Color::Rgb(205, 208, 218); // #cdd0da
pub const BORDER_GRAY: Color = Color::Rgb(92, 99, 120); // #5c6378
pub const BG_DARK: Color = Color::Rgb(24, 25, 33); // #181921
pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 44, 58); // #2a2c3a

// ── Status Palette (booking lifecycle) ────────────────────────────────

pub const STATUS_GREEN: Color = Color::Rgb(40, 167, 69); // #28a745 — confirmed
pub const STATUS_AMBER: Color = Color::Rgb(255, 193, 7); // #ffc107 — pending payment
pub const STATUS_RED: Color = Color::Rgb(220, 53, 69); // #dc3545 — rejected
pub const STATUS_GRAY: Color = Color::Rgb(108, 117, 125); // #6c757d — cancelled / unknown
pub const STATUS_TEAL: Color = Color::Rgb(23, 162, 184); // #17a2b8 — used

/// Deterministic status → color lookup. Unrecognized statuses fall back
/// to gray, same bucket as cancelled.
pub fn status_color(status: &BookingStatus) -> Color {
    match status {
        BookingStatus::Confirmed => STATUS_GREEN,
        BookingStatus::PendingPayment => STATUS_AMBER,
        BookingStatus::Rejected => STATUS_RED,
        BookingStatus::Used => STATUS_TEAL,
        BookingStatus::Cancelled | BookingStatus::Other(_) => STATUS_GRAY,
    }
}

/// Badge glyph shown before the status label.
pub fn status_glyph(status: &BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "✓",
        BookingStatus::PendingPayment => "⏳",
        BookingStatus::Rejected => "✗",
        BookingStatus::Used => "⦿",
        BookingStatus::Cancelled => "⊘",
        BookingStatus::Other(_) => "·",
    }
}

/// Full badge text: glyph + label (e.g. "⏳ PENDING").
pub fn status_badge(status: &BookingStatus) -> String {
    format!("{} {}", status_glyph(status), status.label())
}

/// Style for a status badge.
pub fn badge_style(status: &BookingStatus) -> Style {
    Style::default()
        .fg(status_color(status))
        .add_modifier(Modifier::BOLD)
}

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default()
        .fg(HEADER_CYAN)
        .add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ACCENT_VIOLET)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Normal list row text.
pub fn list_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted list row.
pub fn list_selected() -> Style {
    Style::default()
        .fg(ACCENT_VIOLET)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Detail-card field label ("Email:", "Phone:", ...).
pub fn field_label() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Detail-card field value.
pub fn field_value() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// The terminal redeemed-ticket banner.
pub fn used_banner() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(STATUS_TEAL)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(ACCENT_VIOLET)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default()
        .fg(HEADER_CYAN)
        .add_modifier(Modifier::BOLD)
}
