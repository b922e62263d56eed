use std::ops::ControlFlow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{DirectoryError, WindowHandle, WindowManager};

/// A top-level window and its title at the time of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub handle: WindowHandle,
    pub title: String,
}

/// Read-only view over the live set of top-level windows.
///
/// Nothing is cached: the window set changes constantly and the OS
/// offers no invalidation signal, so every query re-enumerates.
#[derive(Clone)]
pub struct WindowDirectory {
    wm: Arc<dyn WindowManager>,
}

impl WindowDirectory {
    pub fn new(wm: Arc<dyn WindowManager>) -> Self {
        Self { wm }
    }

    /// Returns every top-level window with a non-empty title, in OS
    /// enumeration order.
    pub fn list_windows(&self) -> Result<Vec<WindowRecord>, DirectoryError> {
        let mut records = Vec::new();
        self.wm.for_each_window(&mut |handle| {
            let title = self.wm.window_title(handle);
            if !title.is_empty() {
                records.push(WindowRecord { handle, title });
            }
            ControlFlow::Continue(())
        })?;
        Ok(records)
    }

    /// Returns the first window whose title contains `keyword`.
    ///
    /// Matching is a case-sensitive substring test and enumeration stops
    /// at the first hit. When several windows match, the first one in
    /// enumeration order wins; ambiguity is not reported.
    pub fn find_by_keyword(&self, keyword: &str) -> Result<WindowRecord, DirectoryError> {
        ensure_keyword(keyword)?;

        let mut found = None;
        self.wm.for_each_window(&mut |handle| {
            let title = self.wm.window_title(handle);
            if title.contains(keyword) {
                found = Some(WindowRecord { handle, title });
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        })?;

        found.ok_or_else(|| DirectoryError::NotFound {
            keyword: keyword.to_owned(),
        })
    }

    /// Returns every window whose title contains `keyword`, in
    /// enumeration order. No match is an empty list, not an error.
    pub fn find_all(&self, keyword: &str) -> Result<Vec<WindowRecord>, DirectoryError> {
        ensure_keyword(keyword)?;

        let mut matches = Vec::new();
        self.wm.for_each_window(&mut |handle| {
            let title = self.wm.window_title(handle);
            if title.contains(keyword) {
                matches.push(WindowRecord { handle, title });
            }
            ControlFlow::Continue(())
        })?;
        Ok(matches)
    }
}

fn ensure_keyword(keyword: &str) -> Result<(), DirectoryError> {
    if keyword.is_empty() {
        return Err(DirectoryError::Enumeration {
            message: "window title keyword is empty".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeWindowManager;

    fn directory(wm: &Arc<FakeWindowManager>) -> WindowDirectory {
        WindowDirectory::new(wm.clone())
    }

    #[test]
    fn list_skips_untitled_windows() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Notepad", "", "Game - MyChar"]);

        // Act
        let records = directory(&wm).list_windows().unwrap();

        // Assert
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Notepad", "Game - MyChar"]);
    }

    #[test]
    fn keyword_resolves_partial_title() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Notepad", "Game - MyChar"]);

        // Act
        let record = directory(&wm).find_by_keyword("Game").unwrap();

        // Assert
        assert_eq!(record.title, "Game - MyChar");
        assert_eq!(record.handle, wm.handle_of("Game - MyChar"));
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Game - MyChar"]);

        // Act
        let result = directory(&wm).find_by_keyword("game");

        // Assert
        assert_eq!(
            result,
            Err(DirectoryError::NotFound {
                keyword: "game".into()
            })
        );
    }

    #[test]
    fn first_match_wins_and_is_stable() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Game - Alpha", "Notepad", "Game - Beta"]);
        let dir = directory(&wm);

        // Act
        let first = dir.find_by_keyword("Game").unwrap();
        let second = dir.find_by_keyword("Game").unwrap();

        // Assert
        assert_eq!(first.title, "Game - Alpha");
        assert_eq!(first, second);
    }

    #[test]
    fn enumeration_stops_at_first_match() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Game - Alpha", "Notepad", "Game - Beta"]);

        // Act
        directory(&wm).find_by_keyword("Game").unwrap();

        // Assert
        assert_eq!(wm.visited(), 1);
    }

    #[test]
    fn missing_keyword_leaves_listing_unaffected() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Notepad", "Calculator"]);
        let dir = directory(&wm);
        let before = dir.list_windows().unwrap();

        // Act
        let result = dir.find_by_keyword("Game");

        // Assert
        assert!(matches!(result, Err(DirectoryError::NotFound { .. })));
        assert_eq!(dir.list_windows().unwrap(), before);
    }

    #[test]
    fn empty_keyword_is_rejected() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Notepad"]);

        // Act
        let result = directory(&wm).find_by_keyword("");

        // Assert
        assert!(matches!(result, Err(DirectoryError::Enumeration { .. })));
        assert_eq!(wm.visited(), 0);
    }

    #[test]
    fn enumeration_failure_is_surfaced() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Notepad"]);
        wm.fail_enumeration();

        // Act
        let list = directory(&wm).list_windows();
        let find = directory(&wm).find_by_keyword("Note");

        // Assert
        assert!(matches!(list, Err(DirectoryError::Enumeration { .. })));
        assert!(matches!(find, Err(DirectoryError::Enumeration { .. })));
    }

    #[test]
    fn find_all_returns_every_match_in_order() {
        // Arrange
        let wm = FakeWindowManager::with_titles(&["Dofus - Ana", "Chat", "Dofus - Bob"]);

        // Act
        let matches = directory(&wm).find_all("Dofus").unwrap();

        // Assert
        let titles: Vec<_> = matches.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Dofus - Ana", "Dofus - Bob"]);
        assert!(directory(&wm).find_all("Steam").unwrap().is_empty());
    }
}
