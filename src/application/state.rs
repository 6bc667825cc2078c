//! Application state management for the boolean calculator.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use crate::domain::{
    parse_symbol, Evaluation, ExpressionEvaluator, HistoryEntry, Session, Settings, SymbolConfig,
};
use crate::infrastructure::{DEFAULT_HISTORY_CSV, DEFAULT_SESSION_FILE, DEFAULT_TABLE_CSV};
use std::collections::VecDeque;

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Main menu - single-key shortcuts available
    Normal,
    /// Expression entry - user is typing an expression
    Editing,
    /// Prompting for the character that means true
    DefineTrue,
    /// Prompting for the character that means false
    DefineFalse,
    /// Gate truth table is displayed
    TruthTable,
    /// Help screen is displayed
    Help,
    /// Save session dialog is open
    SaveAs,
    /// Load session dialog is open
    LoadFile,
    /// History CSV export dialog is open
    ExportHistory,
    /// Truth table CSV export dialog is open
    ExportTable,
}

impl AppMode {
    pub fn is_filename_prompt(self) -> bool {
        matches!(
            self,
            AppMode::SaveAs | AppMode::LoadFile | AppMode::ExportHistory | AppMode::ExportTable
        )
    }
}

/// Main application state: active settings, history and UI state.
///
/// # Examples
///
/// ```
/// use boolterm::application::App;
///
/// let mut app = App::default();
/// app.start_editing();
/// app.input = "T | F & F".to_string();
/// app.finish_editing();
/// assert_eq!(app.history.len(), 1);
/// assert!(app.last_evaluation.as_ref().unwrap().result);
/// ```
#[derive(Debug)]
pub struct App {
    /// Symbols and limits in force for the next evaluation
    pub settings: Settings,
    /// Current application mode
    pub mode: AppMode,
    /// Expression or symbol input buffer
    pub input: String,
    /// Cursor position within the active buffer, in characters
    pub cursor_position: usize,
    /// Current session filename (if saved/loaded)
    pub filename: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Evaluated expressions, oldest first
    pub history: VecDeque<HistoryEntry>,
    /// Most recent successful evaluation
    pub last_evaluation: Option<Evaluation>,
    /// Message of the most recent rejected expression
    pub last_error: Option<String>,
    /// Position while browsing history with Up/Down, counted from the newest entry
    pub recall_index: Option<usize>,
    /// Symbols being defined, once the true character has been accepted
    pub pending_symbols: Option<SymbolConfig>,
    /// Where redefined symbols are persisted, if anywhere
    pub settings_file: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl App {
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            filename: None,
            filename_input: String::new(),
            help_scroll: 0,
            status_message: None,
            history: VecDeque::new(),
            last_evaluation: None,
            last_error: None,
            recall_index: None,
            pending_symbols: None,
            settings_file: None,
        }
    }

    pub fn symbols(&self) -> &SymbolConfig {
        &self.settings.symbols
    }

    /// Switches to expression entry with an empty line.
    pub fn start_editing(&mut self) {
        self.mode = AppMode::Editing;
        self.clear_input();
        self.recall_index = None;
        self.status_message = None;
    }

    /// Evaluates the input line.
    ///
    /// On success the result is recorded in history; on failure the error
    /// message is kept for display. Either way the shell stays in editing
    /// mode with a fresh line, ready for the next expression.
    pub fn finish_editing(&mut self) {
        let evaluator = ExpressionEvaluator::new(&self.settings.symbols);

        match evaluator.evaluate(&self.input) {
            Ok(evaluation) => {
                self.push_history(HistoryEntry {
                    expression: evaluation.expression.clone(),
                    postfix: evaluation.postfix.clone(),
                    result: evaluation.result,
                    symbols: evaluation.symbols,
                });
                self.last_evaluation = Some(evaluation);
                self.last_error = None;
                self.status_message = self
                    .result_text()
                    .map(|text| format!("The result of the expression is: {}", text));
            }
            Err(error) => {
                self.status_message = Some(format!("Error: {}", error));
                self.last_error = Some(error.to_string());
            }
        }

        self.clear_input();
        self.recall_index = None;
    }

    /// Cancels editing and returns to the menu.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.clear_input();
        self.recall_index = None;
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push_back(entry);
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.settings.history_limit {
            self.history.pop_front();
        }
    }

    /// Replaces the input line with an older expression from history.
    pub fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.recall_index {
            None => 0,
            Some(i) => (i + 1).min(self.history.len() - 1),
        };
        self.load_recalled(index);
    }

    /// Moves back towards the newest history entry, ending on an empty line.
    pub fn recall_next(&mut self) {
        match self.recall_index {
            None => {}
            Some(0) => {
                self.recall_index = None;
                self.clear_input();
            }
            Some(i) => self.load_recalled(i - 1),
        }
    }

    fn load_recalled(&mut self, index: usize) {
        if let Some(entry) = self.history.iter().rev().nth(index) {
            self.input = entry.expression.clone();
            self.cursor_position = self.input.chars().count();
            self.recall_index = Some(index);
        }
    }

    /// Starts the two-step prompt that redefines the true and false characters.
    pub fn start_define_symbols(&mut self) {
        self.mode = AppMode::DefineTrue;
        self.pending_symbols = None;
        self.clear_input();
        self.status_message = None;
    }

    /// Accepts the typed character for the current prompt.
    ///
    /// The true character is checked against the current false one, then the
    /// false character against the new true one. Rejected input keeps the
    /// prompt open. The settings only change once both are accepted.
    pub fn submit_symbol(&mut self) {
        let result = parse_symbol(&self.input).and_then(|ch| match self.mode {
            AppMode::DefineTrue => self.settings.symbols.with_true(ch),
            _ => self
                .pending_symbols
                .unwrap_or(self.settings.symbols)
                .with_false(ch),
        });

        match (self.mode, result) {
            (AppMode::DefineTrue, Ok(symbols)) => {
                self.pending_symbols = Some(symbols);
                self.mode = AppMode::DefineFalse;
                self.status_message = None;
            }
            (_, Ok(symbols)) => {
                self.settings.symbols = symbols;
                self.pending_symbols = None;
                self.mode = AppMode::Normal;
                self.status_message = Some(format!(
                    "True representation set to: {} | False representation set to: {}",
                    symbols.true_char(),
                    symbols.false_char()
                ));
                tracing::debug!(
                    true_char = %symbols.true_char(),
                    false_char = %symbols.false_char(),
                    "symbols redefined"
                );
            }
            (_, Err(error)) => {
                self.status_message = Some(format!("Invalid input: {}", error));
            }
        }

        self.clear_input();
    }

    /// Reports a failure to persist redefined symbols; they stay active for this run.
    pub fn set_settings_save_error(&mut self, error: String) {
        self.status_message = Some(format!(
            "Symbols changed for this session only, save failed: {}",
            error
        ));
    }

    /// Abandons symbol definition, keeping the previous symbols.
    pub fn cancel_define_symbols(&mut self) {
        self.mode = AppMode::Normal;
        self.pending_symbols = None;
        self.clear_input();
    }

    pub fn show_truth_table(&mut self) {
        self.mode = AppMode::TruthTable;
        self.status_message = None;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    /// Closes the help or truth table view.
    pub fn close_overlay(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Switches to save-as mode to prompt for a filename.
    pub fn start_save_as(&mut self) {
        let default = self.default_session_filename();
        self.start_filename_prompt(AppMode::SaveAs, default);
    }

    /// Switches to load-file mode to prompt for a filename.
    pub fn start_load_file(&mut self) {
        let default = self.default_session_filename();
        self.start_filename_prompt(AppMode::LoadFile, default);
    }

    pub fn start_history_export(&mut self) {
        self.start_filename_prompt(AppMode::ExportHistory, DEFAULT_HISTORY_CSV.to_string());
    }

    pub fn start_table_export(&mut self) {
        self.start_filename_prompt(AppMode::ExportTable, DEFAULT_TABLE_CSV.to_string());
    }

    fn default_session_filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string())
    }

    fn start_filename_prompt(&mut self, mode: AppMode, default: String) {
        self.mode = mode;
        self.cursor_position = default.chars().count();
        self.filename_input = default;
        self.status_message = None;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// The filename typed at the prompt, or the mode's default when empty.
    pub fn prompt_filename(&self) -> String {
        if !self.filename_input.is_empty() {
            return self.filename_input.clone();
        }
        match self.mode {
            AppMode::ExportHistory => DEFAULT_HISTORY_CSV.to_string(),
            AppMode::ExportTable => DEFAULT_TABLE_CSV.to_string(),
            _ => DEFAULT_SESSION_FILE.to_string(),
        }
    }

    /// Snapshot of everything a session file stores.
    pub fn session(&self) -> Session {
        Session {
            settings: self.settings.clone(),
            history: self.history.iter().cloned().collect(),
        }
    }

    /// Processes the result of a save operation.
    pub fn set_save_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Saved to {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }
        self.finish_filename_prompt();
    }

    /// Processes the result of a load operation, replacing settings and history.
    pub fn set_load_result(&mut self, result: Result<(Session, String), String>) {
        match result {
            Ok((session, filename)) => {
                self.settings = session.settings;
                self.history = session.history.into();
                self.trim_history();
                self.last_evaluation = None;
                self.last_error = None;
                self.status_message = Some(format!("Loaded from {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }
        self.finish_filename_prompt();
    }

    /// Processes the result of either CSV export.
    pub fn set_export_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported to {}", filename),
            Err(error) => format!("Export failed: {}", error),
        });
        self.finish_filename_prompt();
    }

    fn finish_filename_prompt(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// The last result as shown to the user, e.g. `F (False)`.
    ///
    /// Uses the symbols the expression was evaluated with, so redefining
    /// them later leaves the displayed result unchanged.
    pub fn result_text(&self) -> Option<String> {
        self.last_evaluation.as_ref().map(|evaluation| {
            format!(
                "{} ({})",
                evaluation.result_symbol(),
                if evaluation.result { "True" } else { "False" }
            )
        })
    }

    /// Text copied by the clipboard shortcut: the last expression and its result.
    pub fn clipboard_text(&self) -> Option<String> {
        self.last_evaluation.as_ref().map(|evaluation| {
            format!("{} = {}", evaluation.expression.trim(), evaluation.result_symbol())
        })
    }

    pub fn set_clipboard_result(&mut self, result: Result<(), String>) {
        self.status_message = Some(match result {
            Ok(()) => "Copied last result to clipboard".to_string(),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }

    fn active_buffer(&mut self) -> &mut String {
        if self.mode.is_filename_prompt() {
            &mut self.filename_input
        } else {
            &mut self.input
        }
    }

    fn byte_offset(buffer: &str, char_index: usize) -> usize {
        buffer
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(buffer.len())
    }

    /// Inserts a character at the cursor of the active buffer.
    pub fn insert_char(&mut self, ch: char) {
        let cursor = self.cursor_position;
        let buffer = self.active_buffer();
        let offset = Self::byte_offset(buffer, cursor);
        buffer.insert(offset, ch);
        self.cursor_position += 1;
    }

    /// Deletes the character before the cursor.
    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor = self.cursor_position - 1;
        let buffer = self.active_buffer();
        let offset = Self::byte_offset(buffer, cursor);
        buffer.remove(offset);
        self.cursor_position = cursor;
    }

    /// Deletes the character under the cursor.
    pub fn delete_at_cursor(&mut self) {
        let cursor = self.cursor_position;
        let buffer = self.active_buffer();
        if cursor < buffer.chars().count() {
            let offset = Self::byte_offset(buffer, cursor);
            buffer.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.active_buffer().chars().count();
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.active_buffer().chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(app: &mut App, expression: &str) {
        app.input = expression.to_string();
        app.finish_editing();
    }

    #[test]
    fn test_default_state() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.symbols(), &SymbolConfig::default());
        assert!(app.history.is_empty());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_successful_evaluation() {
        let mut app = App::default();
        app.start_editing();
        evaluate(&mut app, "(T|F)&F");

        assert_eq!(app.mode, AppMode::Editing);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
        let evaluation = app.last_evaluation.as_ref().unwrap();
        assert!(!evaluation.result);
        assert_eq!(evaluation.postfix, "T F | F &");
        assert_eq!(
            app.status_message.as_deref(),
            Some("The result of the expression is: F (False)")
        );
        assert_eq!(app.history.len(), 1);
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_failed_evaluation_keeps_running() {
        let mut app = App::default();
        app.start_editing();
        evaluate(&mut app, "T&&F");

        assert_eq!(app.mode, AppMode::Editing);
        assert!(app.history.is_empty());
        assert!(app.last_error.as_ref().unwrap().contains("consecutive operators"));
        assert!(app.status_message.as_ref().unwrap().starts_with("Error: "));

        // the next expression still works and clears the error
        evaluate(&mut app, "!!T");
        assert!(app.last_error.is_none());
        assert!(app.last_evaluation.as_ref().unwrap().result);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut app = App::with_settings(Settings {
            history_limit: 2,
            ..Settings::default()
        });
        app.start_editing();
        evaluate(&mut app, "T");
        evaluate(&mut app, "F");
        evaluate(&mut app, "T&F");

        let expressions: Vec<&str> = app.history.iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, vec!["F", "T&F"]);
    }

    #[test]
    fn test_history_recall() {
        let mut app = App::default();
        app.start_editing();
        evaluate(&mut app, "T");
        evaluate(&mut app, "T|F");

        app.recall_previous();
        assert_eq!(app.input, "T|F");
        assert_eq!(app.cursor_position, 3);
        app.recall_previous();
        assert_eq!(app.input, "T");
        // stops at the oldest entry
        app.recall_previous();
        assert_eq!(app.input, "T");

        app.recall_next();
        assert_eq!(app.input, "T|F");
        app.recall_next();
        assert!(app.input.is_empty());
        assert!(app.recall_index.is_none());
    }

    #[test]
    fn test_define_symbols() {
        let mut app = App::default();
        app.start_define_symbols();
        assert_eq!(app.mode, AppMode::DefineTrue);

        app.input = "1".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineFalse);
        // not applied until both are accepted
        assert_eq!(app.symbols(), &SymbolConfig::default());

        app.input = "0".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.symbols(), &SymbolConfig::new('1', '0').unwrap());
        assert!(app.status_message.as_ref().unwrap().contains("True representation set to: 1"));
    }

    #[test]
    fn test_define_symbols_rejects_bad_input() {
        let mut app = App::default();
        app.start_define_symbols();

        app.input = "ab".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineTrue);
        assert!(app.status_message.as_ref().unwrap().starts_with("Invalid input"));

        app.input = " ".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineTrue);

        app.input = "y".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineFalse);

        // equal to the new true symbol
        app.input = "y".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineFalse);

        app.input = "&".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineFalse);

        app.cancel_define_symbols();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.symbols(), &SymbolConfig::default());
    }

    #[test]
    fn test_true_symbol_must_differ_from_current_false() {
        let mut app = App::default();
        app.start_define_symbols();
        app.input = "F".to_string();
        app.submit_symbol();
        assert_eq!(app.mode, AppMode::DefineTrue);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Invalid input: 'true' and 'false' cannot both be 'F'")
        );
        assert!(app.pending_symbols.is_none());
        assert_eq!(app.symbols(), &SymbolConfig::default());
    }

    #[test]
    fn test_last_result_keeps_its_symbols() {
        let mut app = App::default();
        app.start_editing();
        evaluate(&mut app, "T|F");
        app.cancel_editing();

        app.start_define_symbols();
        app.input = "1".to_string();
        app.submit_symbol();
        app.input = "0".to_string();
        app.submit_symbol();
        assert_eq!(app.symbols(), &SymbolConfig::new('1', '0').unwrap());

        assert_eq!(app.clipboard_text().as_deref(), Some("T|F = T"));
        assert_eq!(app.result_text().as_deref(), Some("T (True)"));
        assert_eq!(app.last_evaluation.as_ref().unwrap().postfix, "T F |");
    }

    #[test]
    fn test_symbol_change_applies_to_later_evaluations_only() {
        let mut app = App::default();
        app.start_editing();
        evaluate(&mut app, "T&F");

        app.settings.symbols = SymbolConfig::new('1', '0').unwrap();
        app.start_editing();
        evaluate(&mut app, "T&F");
        assert!(app.last_error.as_ref().unwrap().contains("unrecognized character 'T'"));

        evaluate(&mut app, "1|0");
        assert_eq!(app.history.len(), 2);
        assert_eq!(app.history[0].result_symbol(), 'F');
        assert_eq!(app.history[1].result_symbol(), '1');
    }

    #[test]
    fn test_input_editing_is_char_based() {
        let mut app = App::default();
        app.start_editing();
        for ch in "T&F".chars() {
            app.insert_char(ch);
        }
        app.move_cursor_left();
        app.insert_char('!');
        assert_eq!(app.input, "T&!F");

        app.move_cursor_home();
        app.delete_at_cursor();
        assert_eq!(app.input, "&!F");
        app.insert_char('é');
        app.insert_char('T');
        app.delete_before_cursor();
        assert_eq!(app.input, "é&!F");
        app.move_cursor_end();
        assert_eq!(app.cursor_position, 4);
        app.move_cursor_right();
        assert_eq!(app.cursor_position, 4);
    }

    #[test]
    fn test_filename_prompts() {
        let mut app = App::default();

        app.start_save_as();
        assert_eq!(app.mode, AppMode::SaveAs);
        assert_eq!(app.filename_input, "session.boolterm");
        app.insert_char('x');
        assert_eq!(app.filename_input, "session.booltermx");
        assert!(app.input.is_empty());

        app.filename_input.clear();
        assert_eq!(app.prompt_filename(), "session.boolterm");
        app.cancel_filename_input();
        assert_eq!(app.mode, AppMode::Normal);

        app.start_history_export();
        assert_eq!(app.filename_input, "history.csv");
        app.start_table_export();
        assert_eq!(app.mode, AppMode::ExportTable);
        app.filename_input.clear();
        assert_eq!(app.prompt_filename(), "truth_table.csv");
    }

    #[test]
    fn test_save_and_load_results() {
        let mut app = App::default();
        app.start_editing();
        evaluate(&mut app, "T$F");
        let session = app.session();
        assert_eq!(session.history.len(), 1);

        app.start_save_as();
        app.set_save_result(Ok("a.boolterm".to_string()));
        assert_eq!(app.filename.as_deref(), Some("a.boolterm"));
        assert_eq!(app.mode, AppMode::Normal);

        let mut other = App::default();
        other.start_load_file();
        other.set_load_result(Ok((session, "a.boolterm".to_string())));
        assert_eq!(other.history.len(), 1);
        assert_eq!(other.status_message.as_deref(), Some("Loaded from a.boolterm"));

        other.start_load_file();
        other.set_load_result(Err("missing".to_string()));
        assert_eq!(other.status_message.as_deref(), Some("Load failed: missing"));
        assert_eq!(other.history.len(), 1);
    }

    #[test]
    fn test_clipboard_text() {
        let mut app = App::default();
        assert!(app.clipboard_text().is_none());
        app.start_editing();
        evaluate(&mut app, " T @ T ");
        assert_eq!(app.clipboard_text().as_deref(), Some("T @ T = F"));
    }
}
