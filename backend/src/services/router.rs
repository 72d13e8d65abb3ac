//! Screen routing over a model of the browser history stack.
//!
//! Forward navigation pushes a history entry; back/forward signals move the
//! cursor and return the entry's screen, which is then shown without pushing.
//! The in-app back button follows a fixed parent mapping rather than popping
//! history.

use serde::Serialize;

use crate::models::Screen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub screen: Screen,
    pub path: &'static str,
}

impl HistoryEntry {
    fn for_screen(screen: Screen) -> Self {
        Self {
            screen,
            path: screen.path(),
        }
    }
}

/// Browser session history: entries plus a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl History {
    fn new(initial: Screen) -> Self {
        Self {
            entries: vec![HistoryEntry::for_screen(initial)],
            index: 0,
        }
    }

    /// Pushing drops every forward entry, like `history.pushState`.
    fn push(&mut self, screen: Screen) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry::for_screen(screen));
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, screen: Screen) {
        self.entries[self.index] = HistoryEntry::for_screen(screen);
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// How a navigation interacts with history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// User-initiated: add an entry
    Push,
    /// Initial load: rewrite the current entry
    Replace,
    /// Driven by a back/forward signal: history already moved
    Restore,
}

#[derive(Debug, Clone)]
pub struct Router {
    current: Screen,
    history: History,
}

impl Router {
    pub fn new(initial: Screen) -> Self {
        Self {
            current: initial,
            history: History::new(initial),
        }
    }

    /// Router for a fresh page load at `path`. Deep links to screens that
    /// need in-memory invite context fall back to the explanation screen;
    /// the second value reports whether that happened.
    pub fn initial(path: &str) -> (Self, bool) {
        let (screen, redirected) = initial_screen(path);
        (Self::new(screen), redirected)
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.current == screen
    }

    pub fn navigate(&mut self, screen: Screen, mode: HistoryMode) {
        match mode {
            HistoryMode::Push if screen != self.current => self.history.push(screen),
            HistoryMode::Push | HistoryMode::Restore => {}
            HistoryMode::Replace => self.history.replace(screen),
        }
        tracing::debug!("🧭 {} -> {} ({:?})", self.current, screen, mode);
        self.current = screen;
    }

    /// Moves the history cursor back and returns the screen to restore.
    pub fn history_back(&mut self) -> Option<Screen> {
        self.history.back().map(|entry| entry.screen)
    }

    pub fn history_forward(&mut self) -> Option<Screen> {
        self.history.forward().map(|entry| entry.screen)
    }
}

/// Where the in-app back button leads from `screen`.
pub fn back_target(screen: Screen) -> Option<Screen> {
    match screen {
        Screen::Response => Some(Screen::Find),
        Screen::Feedback => Some(Screen::Response),
        Screen::Explanation | Screen::Find => None,
    }
}

/// Screen shown for a page load at `path`, and whether the link was redirected.
pub fn initial_screen(path: &str) -> (Screen, bool) {
    match Screen::from_path(path) {
        Some(screen) if screen.is_deep_linkable() => (screen, false),
        _ => (Screen::Explanation, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_mapping() {
        assert_eq!(back_target(Screen::Feedback), Some(Screen::Response));
        assert_eq!(back_target(Screen::Response), Some(Screen::Find));
        assert_eq!(back_target(Screen::Find), None);
        assert_eq!(back_target(Screen::Explanation), None);
    }

    #[test]
    fn test_deep_links() {
        assert_eq!(initial_screen("/"), (Screen::Explanation, false));
        assert_eq!(initial_screen("/find"), (Screen::Find, false));
        assert_eq!(initial_screen("/responses"), (Screen::Explanation, true));
        assert_eq!(initial_screen("/feedback"), (Screen::Explanation, true));
        assert_eq!(initial_screen("/bogus"), (Screen::Explanation, true));
    }

    #[test]
    fn test_push_then_history_back_and_forward() {
        let mut router = Router::new(Screen::Explanation);
        router.navigate(Screen::Find, HistoryMode::Push);
        router.navigate(Screen::Response, HistoryMode::Push);
        assert_eq!(router.history().len(), 3);

        let previous = router.history_back().unwrap();
        router.navigate(previous, HistoryMode::Restore);
        assert_eq!(router.current(), Screen::Find);
        assert_eq!(router.history().len(), 3);

        let next = router.history_forward().unwrap();
        router.navigate(next, HistoryMode::Restore);
        assert_eq!(router.current(), Screen::Response);
        assert!(router.history_forward().is_none());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut router = Router::new(Screen::Explanation);
        router.navigate(Screen::Find, HistoryMode::Push);
        router.navigate(Screen::Response, HistoryMode::Push);
        router.history_back();
        router.navigate(Screen::Feedback, HistoryMode::Push);

        assert_eq!(router.history().len(), 3);
        assert_eq!(router.history().current().path, "/feedback");
        assert!(router.history_forward().is_none());
    }

    #[test]
    fn test_only_current_screen_visible() {
        let mut router = Router::new(Screen::Explanation);
        router.navigate(Screen::Feedback, HistoryMode::Push);
        let visible: Vec<_> = Screen::ALL.into_iter().filter(|s| router.is_visible(*s)).collect();
        assert_eq!(visible, vec![Screen::Feedback]);
    }
}
