use crate::application::{App, AppMode};
use crate::domain::GateTruthTable;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_input(f, app, chunks[1]);
    render_result(f, app, chunks[2]);
    render_history(f, app, chunks[3]);
    render_status_bar(f, app, chunks[4]);

    match app.mode {
        AppMode::TruthTable => render_truth_table_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let symbols = app.symbols();
    let header = Paragraph::new(format!(
        "boolterm - Boolean Expression Evaluator | true: {} | false: {}",
        symbols.true_char(),
        symbols.false_char()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, text, active) = match app.mode {
        AppMode::Editing => ("Expression", app.input.as_str(), true),
        AppMode::DefineTrue => ("Character for 'true'", app.input.as_str(), true),
        AppMode::DefineFalse => ("Character for 'false'", app.input.as_str(), true),
        _ => ("Expression", "", false),
    };

    let style = if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if active {
        let column = cursor_column(text.chars().take(app.cursor_position).count(), area);
        f.set_cursor_position((area.x + 1 + column, area.y + 1));
    }
}

/// Column of a cursor `chars` characters into a bordered box, kept inside its last cell.
fn cursor_column(chars: usize, area: Rect) -> u16 {
    let limit = area.width.saturating_sub(3);
    u16::try_from(chars).unwrap_or(u16::MAX).min(limit)
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let symbols = app.symbols();
    let lines = if let Some(ref error) = app.last_error {
        vec![Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))]
    } else if let (Some(evaluation), Some(text)) = (&app.last_evaluation, app.result_text()) {
        vec![
            Line::from(vec![
                Span::raw("Result:  "),
                Span::styled(text, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(format!("Postfix: {}", evaluation.postfix)),
        ]
    } else {
        vec![Line::from(Span::styled(
            format!(
                "Operators: ! NOT  & AND  $ XOR  | OR  @ NAND   Literals: {} {}",
                symbols.true_char(),
                symbols.false_char()
            ),
            Style::default().fg(Color::DarkGray),
        ))]
    };

    let result = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Result"));
    f.render_widget(result, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .history
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| {
            let style = if app.recall_index == Some(i) {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(format!(
                "{} = {}    [{}]",
                entry.expression.trim(),
                entry.result_symbol(),
                entry.postfix
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("History ({})", app.history.len())),
    );
    f.render_widget(list, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "e/Enter: evaluate | t: truth table | d: define true/false | Ctrl+S: save | Ctrl+O: load | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => app
            .status_message
            .clone()
            .unwrap_or_else(|| "Enter: evaluate | ↑↓: history | Esc: back to menu".to_string()),
        AppMode::DefineTrue | AppMode::DefineFalse => app
            .status_message
            .clone()
            .unwrap_or_else(|| "Type a single character (Enter to confirm, Esc to cancel)".to_string()),
        AppMode::TruthTable => "Ctrl+T: export CSV | Esc/t/q: close".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::SaveAs => format!("Save session as: {} (Enter to save, Esc to cancel)", app.filename_input),
        AppMode::LoadFile => format!("Load session: {} (Enter to load, Esc to cancel)", app.filename_input),
        AppMode::ExportHistory => format!("Export history CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::ExportTable => format!("Export truth table CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::DefineTrue | AppMode::DefineFalse => Style::default().fg(Color::Magenta),
            AppMode::TruthTable | AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::SaveAs | AppMode::LoadFile => Style::default().fg(Color::Yellow),
            AppMode::ExportHistory | AppMode::ExportTable => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);

    if app.mode.is_filename_prompt() {
        let prefix = match app.mode {
            AppMode::SaveAs => "Save session as: ",
            AppMode::LoadFile => "Load session: ",
            AppMode::ExportHistory => "Export history CSV as: ",
            _ => "Export truth table CSV as: ",
        };
        let chars = prefix.chars().count()
            + app.filename_input.chars().take(app.cursor_position).count();
        f.set_cursor_position((area.x + 1 + cursor_column(chars, area), area.y + 1));
    }
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn render_truth_table_popup(f: &mut Frame, app: &App) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let header = Row::new(
        GateTruthTable::HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    );
    let rows = GateTruthTable::generate()
        .to_string_rows(app.symbols())
        .into_iter()
        .map(|row| Row::new(row.into_iter().map(Cell::from)));

    let widths = [
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Truth Table")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White))
        .column_spacing(1);

    f.render_widget(table, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("boolterm Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"BOOLTERM EXPRESSION REFERENCE

=== LITERALS ===
T       true  (default, redefine with 'd')
F       false (default, redefine with 'd')
Literals are single characters and case sensitive.

=== OPERATORS (tightest first) ===
!       NOT     unary, right-assoc    !T → F, !!T → T
&       AND     left-assoc            T&F → F
$       XOR     left-assoc            T$F → T
|       OR      left-assoc            T|F → T
@       NAND    left-assoc            T@T → F

AND and XOR share one precedence tier, OR and NAND the tier below.
Operators in the same tier group left to right: T@F|F = (T@F)|F.

=== PARENTHESES ===
( )     Group sub-expressions       (T|F)&F → F, T|F&F → T

Whitespace is ignored anywhere in an expression.

=== ERRORS ===
unrecognized character          a character that is not a literal,
                                operator or parenthesis
operand follows operand         TF, T(F)
consecutive operators           T&&F, T!F
missing operand                 &T, T&, ()
mismatched parentheses          (T&F, T&F)
no operands or operators        empty input

=== MENU ===
e / Enter       Evaluate expressions (Esc returns to menu)
t               Show truth table of AND, OR, NAND, XOR, NOT
d               Define the characters for true and false
Ctrl+S          Save session (symbols + history) as JSON
Ctrl+O          Load session
Ctrl+E          Export history to CSV
Ctrl+T          Export truth table to CSV
Ctrl+Y          Copy last result to clipboard
F1 or ?         Show this help
q               Quit

=== WHILE EDITING ===
↑ / ↓           Recall previous expressions
← → Home End    Move cursor
Backspace/Del   Delete characters

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

Settings are read from boolterm.json (or the path given as the first
argument). Set BOOLTERM_LOG=debug to write a log to boolterm.log."#
}
