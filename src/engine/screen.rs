//! Full-screen selection session.
//!
//! Clear-and-redraw frames on the stderr terminal, one frame per state
//! transition, with a scrolling viewport and a live filter line. Input and
//! display both use the inherited terminal; the result leaves the process
//! over the result channel, never through these streams.

use std::io::Write;

use console::{Key, Term};

use crate::catalog::Copilot;
use crate::error::{PickerError, Result};
use crate::ui::PickerTheme;

use super::state::{Outcome, SelectionState};

/// Rows consumed by header, status, controls and footer chrome.
const CHROME_ROWS: usize = 9;

/// Cursor jump for PageUp/PageDown.
const PAGE: usize = 10;

/// One full-screen session over a catalog.
#[derive(Debug)]
pub struct FullScreenSession<'a> {
    catalog: &'a [Copilot],
    term: Term,
    theme: PickerTheme,
    state: SelectionState,
    offset: usize,
    searching: bool,
    duplicate: Vec<bool>,
}

impl<'a> FullScreenSession<'a> {
    /// Prepare a session; fails when stderr has no terminal to render on.
    pub fn new(catalog: &'a [Copilot]) -> Result<Self> {
        let term = Term::stderr();
        if !term.is_term() {
            return Err(PickerError::EngineInit {
                tier: "full".into(),
                message: "stderr is not a terminal".into(),
            });
        }
        Ok(Self {
            catalog,
            term,
            theme: PickerTheme::for_env(),
            state: SelectionState::new(catalog),
            offset: 0,
            searching: false,
            duplicate: duplicate_flags(catalog),
        })
    }

    /// Run the session to a terminal outcome.
    pub fn run(mut self) -> Result<SelectionState> {
        self.term.hide_cursor().ok();
        let result = self.event_loop();
        self.term.clear_screen().ok();
        self.term.show_cursor().ok();

        match result {
            Ok(()) => Ok(self.state),
            Err(e) => {
                // An unrecoverable rendering error ends the session as a
                // cancellation; the orchestrator falls through to the next
                // tier.
                tracing::warn!("full-screen session failed: {e}");
                self.state.cancel();
                Ok(self.state)
            }
        }
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        loop {
            self.render()?;
            let key = match self.term.read_key() {
                Ok(key) => key,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    self.state.cancel();
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            if self.searching {
                self.handle_search_key(key);
            } else {
                self.handle_browse_key(key);
            }

            if self.state.outcome() != Outcome::Pending {
                return Ok(());
            }
        }
    }

    fn handle_browse_key(&mut self, key: Key) {
        match key {
            Key::ArrowUp | Key::Char('k') => self.state.move_up(),
            Key::ArrowDown | Key::Char('j') => self.state.move_down(),
            Key::PageUp => self.state.move_page_up(PAGE),
            Key::PageDown => self.state.move_page_down(PAGE),
            Key::Char(' ') => self.state.toggle_current(),
            Key::Char('a') => self.state.check_visible(),
            Key::Char('n') => self.state.uncheck_visible(),
            Key::Char('t') => self.state.invert_visible(),
            Key::Char('/') => self.searching = true,
            Key::Escape => self.state.clear_filter(),
            Key::Enter => self.state.confirm(),
            Key::Char('q') => self.state.cancel(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: Key) {
        match key {
            Key::Enter => self.searching = false,
            Key::Escape => {
                self.state.clear_filter();
                self.searching = false;
            }
            Key::Backspace => self.state.pop_filter(),
            Key::Char(c) if !c.is_control() => self.state.push_filter(c),
            _ => {}
        }
    }

    fn render(&mut self) -> std::io::Result<()> {
        let (rows, cols) = self.term.size();
        let width = (cols as usize).clamp(20, 120);
        let avail = (rows as usize).saturating_sub(CHROME_ROWS).max(1);
        self.offset = adjust_offset(self.offset, self.state.cursor(), avail);

        self.term.clear_screen()?;
        let mut frame = String::new();

        frame.push_str(&format!(
            "{}\n{}\n",
            self.theme.header.apply_to("Select copilots to install"),
            self.theme.dim.apply_to("─".repeat(width))
        ));

        let mut status = format!(
            "Showing {}/{} · {} selected",
            self.state.visible().len(),
            self.catalog.len(),
            self.state.checked_count()
        );
        if !self.state.filter().is_empty() {
            status.push_str(&format!(" · filter '{}'", self.state.filter()));
        }
        frame.push_str(&format!("{status}\n\n"));

        frame.push_str(&format!(
            "{}\n{}\n{}\n",
            self.theme
                .hint
                .apply_to("↑/↓ move · Space toggle · / filter · Esc clear"),
            self.theme
                .hint
                .apply_to("a all · n none · t invert · Enter confirm · q cancel"),
            self.theme.dim.apply_to("─".repeat(width))
        ));

        if self.state.visible().is_empty() {
            frame.push_str("\n  No copilots match the filter.\n");
        } else {
            let end = (self.offset + avail).min(self.state.visible().len());
            for (row, &catalog_index) in self.state.visible()[self.offset..end].iter().enumerate() {
                let at_cursor = self.offset + row == self.state.cursor();
                frame.push_str(&self.format_row(catalog_index, at_cursor, width));
                frame.push('\n');
            }

            let below = self.state.visible().len() - end;
            if below > 0 {
                frame.push_str(&format!("{}\n", self.theme.dim.apply_to(format!("↓ {below} more"))));
            }
        }

        if self.searching {
            frame.push_str(&format!("\nFilter: {}▌", self.state.filter()));
        }

        self.term.write_all(frame.as_bytes())?;
        self.term.flush()
    }

    fn format_row(&self, catalog_index: usize, at_cursor: bool, width: usize) -> String {
        let record = &self.catalog[catalog_index];
        let marker = if at_cursor { ">" } else { " " };
        let checkbox = if self.state.is_checked(catalog_index) {
            format!("{}", self.theme.checked.apply_to("[x]"))
        } else {
            "[ ]".to_string()
        };
        let dup = if self.duplicate[catalog_index] { " ‼" } else { "" };
        let line = record.display_line(width.saturating_sub(8));

        if at_cursor {
            format!("{marker} {checkbox} {}{dup}", self.theme.highlight.apply_to(line))
        } else {
            format!("{marker} {checkbox} {line}{dup}")
        }
    }
}

/// Keep the cursor inside the `avail`-row viewport.
fn adjust_offset(offset: usize, cursor: usize, avail: usize) -> usize {
    if cursor < offset {
        cursor
    } else if cursor >= offset + avail {
        cursor + 1 - avail
    } else {
        offset
    }
}

/// Flag records whose display name occurs more than once in the catalog.
fn duplicate_flags(catalog: &[Copilot]) -> Vec<bool> {
    catalog
        .iter()
        .map(|record| {
            catalog
                .iter()
                .filter(|other| other.name == record.name)
                .count()
                > 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_cursor_upward() {
        assert_eq!(adjust_offset(5, 3, 10), 3);
    }

    #[test]
    fn offset_follows_cursor_downward() {
        assert_eq!(adjust_offset(0, 12, 10), 3);
    }

    #[test]
    fn offset_stays_put_when_cursor_visible() {
        assert_eq!(adjust_offset(2, 5, 10), 2);
    }

    #[test]
    fn offset_handles_single_row_viewport() {
        assert_eq!(adjust_offset(0, 7, 1), 7);
    }

    #[test]
    fn duplicate_flags_mark_repeated_names() {
        let catalog = vec![
            Copilot::new("a1", "Alpha"),
            Copilot::new("a2", "Alpha"),
            Copilot::new("b1", "Beta"),
        ];
        assert_eq!(duplicate_flags(&catalog), vec![true, true, false]);
    }

    #[test]
    fn session_requires_a_terminal() {
        // Under a test harness stderr is piped, so construction must refuse
        // rather than attempt to render.
        if !Term::stderr().is_term() {
            let catalog = vec![Copilot::new("a1", "Alpha")];
            let err = FullScreenSession::new(&catalog).unwrap_err();
            assert!(matches!(err, PickerError::EngineInit { .. }));
        }
    }
}
