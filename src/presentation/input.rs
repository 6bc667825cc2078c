use crate::application::{App, AppMode};
use crate::infrastructure::{CsvExporter, FileRepository};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::DefineTrue | AppMode::DefineFalse => Self::handle_symbol_mode(app, key),
            AppMode::TruthTable => Self::handle_truth_table_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::SaveAs
            | AppMode::LoadFile
            | AppMode::ExportHistory
            | AppMode::ExportTable => Self::handle_filename_input_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => app.start_save_as(),
                KeyCode::Char('o') => app.start_load_file(),
                KeyCode::Char('e') => app.start_history_export(),
                KeyCode::Char('t') => app.start_table_export(),
                KeyCode::Char('y') => Self::copy_last_result(app),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('1') => app.start_editing(),
            KeyCode::Char('t') | KeyCode::Char('2') => app.show_truth_table(),
            KeyCode::Char('d') | KeyCode::Char('3') => app.start_define_symbols(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Up => app.recall_previous(),
            KeyCode::Down => app.recall_next(),
            _ => Self::handle_line_editing(app, key),
        }
    }

    fn handle_symbol_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let before = app.settings.symbols;
                app.submit_symbol();
                if app.settings.symbols != before {
                    Self::persist_settings(app);
                }
            }
            KeyCode::Esc => app.cancel_define_symbols(),
            _ => Self::handle_line_editing(app, key),
        }
    }

    fn handle_truth_table_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Char('t') if modifiers.contains(KeyModifiers::CONTROL) => app.start_table_export(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('t') | KeyCode::Enter => app.close_overlay(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_overlay();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.prompt_filename();
                match app.mode {
                    AppMode::SaveAs => {
                        let result = FileRepository::save_session(&app.session(), &filename)
                            .map_err(|e| e.to_string());
                        app.set_save_result(result);
                    }
                    AppMode::LoadFile => {
                        let result = FileRepository::load_session(&filename).map_err(|e| e.to_string());
                        app.set_load_result(result);
                    }
                    AppMode::ExportHistory => {
                        let history: Vec<_> = app.history.iter().cloned().collect();
                        let result = CsvExporter::export_history(&history, &filename)
                            .map_err(|e| e.to_string());
                        app.set_export_result(result);
                    }
                    AppMode::ExportTable => {
                        let result = CsvExporter::export_truth_table(app.symbols(), &filename)
                            .map_err(|e| e.to_string());
                        app.set_export_result(result);
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => app.cancel_filename_input(),
            _ => Self::handle_line_editing(app, key),
        }
    }

    fn handle_line_editing(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Backspace => app.delete_before_cursor(),
            KeyCode::Delete => app.delete_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn persist_settings(app: &mut App) {
        let Some(filename) = app.settings_file.clone() else {
            return;
        };
        if let Err(e) = FileRepository::save_settings(&app.settings, &filename) {
            app.set_settings_save_error(e.to_string());
        }
    }

    fn copy_last_result(app: &mut App) {
        let Some(text) = app.clipboard_text() else {
            app.status_message = Some("Nothing to copy yet".to_string());
            return;
        };

        let result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .map_err(|e| e.to_string());
        app.set_clipboard_result(result);
    }
}
