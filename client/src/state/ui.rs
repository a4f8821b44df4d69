//! Local UI chrome state (menus and the sign-in modal).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the session and widget
//! states so the navbar can evolve independently of the pages.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// A top-level navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

/// Navigation entries in display order.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Home", path: "/" },
    NavItem { label: "Assistant", path: "/assistant" },
    NavItem { label: "Weather", path: "/weather" },
    NavItem { label: "Market", path: "/market" },
    NavItem { label: "Disease", path: "/disease" },
];

/// Whether `item` is the entry for the current location path.
#[must_use]
pub fn is_active(item: &NavItem, pathname: &str) -> bool {
    let trimmed = pathname.trim_end_matches('/');
    if item.path == "/" {
        trimmed.is_empty()
    } else {
        trimmed == item.path
    }
}

/// UI state for the navbar menus and sign-in modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub sign_in_open: bool,
    pub mobile_menu_open: bool,
    pub profile_menu_open: bool,
}

impl UiState {
    pub fn open_sign_in(&mut self) {
        self.sign_in_open = true;
        self.mobile_menu_open = false;
    }

    /// Close every menu, as after navigating.
    pub fn close_menus(&mut self) {
        self.mobile_menu_open = false;
        self.profile_menu_open = false;
    }
}
