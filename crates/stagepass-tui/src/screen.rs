//! Screen identifier enum.

use std::fmt;

/// Identifies each primary screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Bookings awaiting approval.
    #[default]
    Pending, // 1
    /// Complete booking history.
    All, // 2
    /// Token entry — not in the tab bar, shown whenever the session is
    /// unauthenticated.
    Login,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Pending, Self::All];

    /// Numeric key for this screen. Login has no number key.
    pub fn number(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::All => 2,
            Self::Login => 0,
        }
    }

    /// Screen from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Pending),
            2 => Some(Self::All),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether this screen shows a fetched booking list.
    pub fn fetches(self) -> bool {
        matches!(self, Self::Pending | Self::All)
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::All => "All Bookings",
            Self::Login => "Sign In",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps_both_ways() {
        assert_eq!(ScreenId::Pending.next(), ScreenId::All);
        assert_eq!(ScreenId::All.next(), ScreenId::Pending);
        assert_eq!(ScreenId::Pending.prev(), ScreenId::All);
    }

    #[test]
    fn login_is_not_numbered() {
        assert_eq!(ScreenId::Login.number(), 0);
        assert_eq!(ScreenId::from_number(3), None);
    }
}
