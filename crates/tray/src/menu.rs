//! Context menu derived from the controller snapshot.

use pubip_status::{DisplayState, StatusSnapshot};

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CopyAddress,
    Refresh,
    ToggleShowStatus,
    /// Show the "about" window.
    About,
    Quit,
}

/// How a menu entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    Normal,
    Checkbox { checked: bool },
    Separator,
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    pub kind: MenuItemKind,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn action(label: &str, action: MenuAction, enabled: bool) -> Self {
        Self {
            label: label.into(),
            kind: MenuItemKind::Normal,
            enabled,
            action: Some(action),
        }
    }

    fn separator() -> Self {
        Self {
            label: String::new(),
            kind: MenuItemKind::Separator,
            enabled: false,
            action: None,
        }
    }
}

/// Current state used to build the context menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Application name used in the about/quit entries.
    pub app_name: String,
    pub state: DisplayState,
    pub show_status: bool,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            app_name: "PubIP".into(),
            state: DisplayState::Offline,
            show_status: true,
        }
    }
}

impl MenuState {
    /// Builds menu state from a controller snapshot.
    pub fn from_snapshot(app_name: &str, snapshot: &StatusSnapshot) -> Self {
        Self {
            app_name: app_name.into(),
            state: snapshot.state.clone(),
            show_status: snapshot.show_status,
        }
    }

    /// Header text describing the current status.
    pub fn header(&self) -> String {
        match &self.state {
            DisplayState::Online(addr) => format!("Online: {addr}"),
            DisplayState::Refreshing => "Refreshing".into(),
            DisplayState::Offline => "Offline".into(),
        }
    }

    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = Vec::new();

        items.push(MenuItem {
            label: self.header(),
            kind: MenuItemKind::Normal,
            enabled: false,
            action: None,
        });

        // Copy is only offered while an address is known.
        if matches!(self.state, DisplayState::Online(_)) {
            items.push(MenuItem::action(
                "Copy IP Address to Clipboard",
                MenuAction::CopyAddress,
                true,
            ));
        }

        let refreshing = matches!(self.state, DisplayState::Refreshing);
        items.push(MenuItem::action("Refresh", MenuAction::Refresh, !refreshing));

        items.push(MenuItem::separator());

        items.push(MenuItem {
            label: "Show Status in Menu Bar".into(),
            kind: MenuItemKind::Checkbox {
                checked: self.show_status,
            },
            enabled: true,
            action: Some(MenuAction::ToggleShowStatus),
        });

        items.push(MenuItem::separator());

        items.push(MenuItem::action(
            &format!("About {}", self.app_name),
            MenuAction::About,
            true,
        ));

        items.push(MenuItem::separator());

        items.push(MenuItem::action(
            &format!("Quit {}", self.app_name),
            MenuAction::Quit,
            true,
        ));

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(items: &[MenuItem], action: MenuAction) -> Option<&MenuItem> {
        items.iter().find(|i| i.action == Some(action))
    }

    #[test]
    fn default_menu_state() {
        let state = MenuState::default();
        assert_eq!(state.app_name, "PubIP");
        assert_eq!(state.state, DisplayState::Offline);
        assert!(state.show_status);
    }

    #[test]
    fn online_menu_offers_copy() {
        let state = MenuState {
            state: DisplayState::Online("203.0.113.5".into()),
            ..MenuState::default()
        };
        let items = state.build_menu();

        assert_eq!(items[0].label, "Online: 203.0.113.5");
        assert!(!items[0].enabled);
        assert!(find(&items, MenuAction::CopyAddress).unwrap().enabled);
        assert!(find(&items, MenuAction::Refresh).unwrap().enabled);
    }

    #[test]
    fn refreshing_menu_disables_refresh() {
        let state = MenuState {
            state: DisplayState::Refreshing,
            ..MenuState::default()
        };
        let items = state.build_menu();

        assert_eq!(items[0].label, "Refreshing");
        assert!(find(&items, MenuAction::CopyAddress).is_none());
        assert!(!find(&items, MenuAction::Refresh).unwrap().enabled);
    }

    #[test]
    fn offline_menu_allows_refresh() {
        let items = MenuState::default().build_menu();

        assert_eq!(items[0].label, "Offline");
        assert!(find(&items, MenuAction::CopyAddress).is_none());
        assert!(find(&items, MenuAction::Refresh).unwrap().enabled);
    }

    #[test]
    fn toggle_checkbox_follows_show_status() {
        let snapshot = StatusSnapshot {
            state: DisplayState::Offline,
            show_status: false,
        };
        let items = MenuState::from_snapshot("PubIP", &snapshot).build_menu();
        let toggle = find(&items, MenuAction::ToggleShowStatus).unwrap();
        assert_eq!(toggle.kind, MenuItemKind::Checkbox { checked: false });
    }

    #[test]
    fn quit_is_last_and_enabled() {
        let items = MenuState::default().build_menu();
        let last = items.last().unwrap();
        assert_eq!(last.action, Some(MenuAction::Quit));
        assert_eq!(last.label, "Quit PubIP");
        assert!(last.enabled);
        assert!(find(&items, MenuAction::About).unwrap().label.contains("PubIP"));
    }
}
