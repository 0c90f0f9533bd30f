use crate::{
    app::App,
    colors::*,
    file_node::{FileNode, NodeKind},
    fs::{FileSystem, Opener},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SIZE_WIDTH: usize = 10;
const DATE_WIDTH: usize = 18;

pub fn ui<F: FileSystem, O: Opener>(f: &mut Frame, app: &mut App<F, O>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Navigation + path
            Constraint::Length(1), // Column headers
            Constraint::Min(0),    // Tree
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let [title_area, path_area, header_area, tree_area, footer_area] = *chunks else {
        return;
    };

    render_title_bar(f, title_area);
    render_path_bar(f, app, path_area);
    render_column_headers(f, header_area);
    render_tree(f, app, tree_area);
    render_footer(f, app, footer_area);

    if app.show_help {
        render_help_overlay(f);
    } else if let Some(alert) = app.alert.as_deref() {
        render_alert(f, alert);
    }
}

fn render_title_bar(f: &mut Frame, area: Rect) {
    let version = env!("CARGO_PKG_VERSION");
    let terminal_width = f.area().width as usize;

    // " rfe vX.X.X    (press ? for help)"
    let title_len = 1 + 3 + 2 + version.len() + 4 + 7 + 1 + 10;
    let padding = terminal_width.saturating_sub(title_len);

    let title_bar = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("rfe", Style::default().fg(COLOR_HEADER_FG).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" v{}    (press ", version)),
        Span::styled("?", Style::default().fg(COLOR_HEADER_FG).add_modifier(Modifier::BOLD)),
        Span::raw(" for help)"),
        Span::raw(" ".repeat(padding)),
    ]))
    .style(Style::default().fg(COLOR_HEADER_FG).bg(COLOR_HEADER_BG));
    f.render_widget(title_bar, area);
}

fn nav_span(label: &'static str, enabled: bool) -> Span<'static> {
    let color = if enabled { COLOR_NAV_ENABLED } else { COLOR_NAV_DISABLED };
    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn render_path_bar<F: FileSystem, O: Opener>(f: &mut Frame, app: &App<F, O>, area: Rect) {
    let line = Line::from(vec![
        Span::raw(" "),
        nav_span("←", app.nav.can_go_back()),
        Span::raw(" "),
        nav_span("→", app.nav.can_go_forward()),
        Span::raw(" "),
        nav_span("↑", app.nav.can_go_up()),
        Span::raw("  "),
        Span::styled(
            app.current_path().display().to_string(),
            Style::default().fg(COLOR_PATH),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn name_width(total: u16) -> usize {
    // Two border columns and two separators
    (total as usize).saturating_sub(SIZE_WIDTH + DATE_WIDTH + 2 + 6)
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{}{}", text, " ".repeat(width - count))
    } else if width > 0 {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        String::new()
    }
}

fn render_column_headers(f: &mut Frame, area: Rect) {
    let style = Style::default().fg(COLOR_COLUMN_HEADER).add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(fit("Name", name_width(area.width)), style),
        Span::raw(" | "),
        Span::styled(format!("{:>width$}", "Size", width = SIZE_WIDTH), style),
        Span::raw(" | "),
        Span::styled(fit("Date Modified", DATE_WIDTH), style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn tree_line<'a>(node: &FileNode, depth: usize, expanded: bool, width: usize) -> Line<'a> {
    let marker = match (node.is_expandable(), expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    };
    let (suffix, color) = match node.kind {
        NodeKind::Directory => ("/", COLOR_DIRECTORY),
        NodeKind::Bundle => ("/", COLOR_BUNDLE),
        NodeKind::File => ("", COLOR_FILE),
    };
    let label = format!("{}{}{}{}", "  ".repeat(depth), marker, node.name, suffix);

    Line::from(vec![
        Span::styled(fit(&label, width), Style::default().fg(color)),
        Span::raw(" | "),
        Span::styled(
            format!("{:>width$}", node.size_label(), width = SIZE_WIDTH),
            Style::default().fg(COLOR_SIZE),
        ),
        Span::raw(" | "),
        Span::styled(fit(&node.date_label(), DATE_WIDTH), Style::default().fg(COLOR_DATE)),
    ])
}

fn render_tree<F: FileSystem, O: Opener>(f: &mut Frame, app: &mut App<F, O>, area: Rect) {
    let width = name_width(area.width);
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .filter_map(|row| {
            let node = app.node(row)?;
            Some(ListItem::new(tree_line(node, row.depth, app.is_expanded(node), width)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(COLOR_HIGHLIGHT_BG).fg(COLOR_HIGHLIGHT_FG));

    f.render_stateful_widget(list, area, &mut app.state);
}

fn render_footer<F: FileSystem, O: Opener>(f: &mut Frame, app: &App<F, O>, area: Rect) {
    let terminal_width = f.area().width as usize;
    let status_msg = app.status_message.as_deref().unwrap_or("");
    let footer_left = format!(
        " {} items  history {}/{}",
        app.nav.root_nodes().len(),
        app.nav.history().position().map_or(0, |i| i + 1),
        app.nav.history().len(),
    );
    let footer_right = if !status_msg.is_empty() {
        format!("  {} ", status_msg)
    } else {
        String::new()
    };
    let footer_padding = terminal_width.saturating_sub(footer_left.len() + footer_right.len());
    let footer_text = format!("{}{:padding$}{}", footer_left, "", footer_right, padding = footer_padding);

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(COLOR_HEADER_FG).bg(COLOR_HEADER_BG));
    f.render_widget(footer, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_alert(f: &mut Frame, message: &str) {
    let area = centered(f.area(), 60, 7);
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(COLOR_HELP_HINT))),
    ];
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .border_style(Style::default().fg(COLOR_ALERT_BORDER))
            .style(Style::default().bg(Color::Black)))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    f.render_widget(popup, area);
}

fn render_help_overlay(f: &mut Frame) {
    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  rfe - Rust File Explorer", Style::default().fg(COLOR_HELP_TITLE).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("  Selection:", Style::default().fg(COLOR_HELP_HEADER).add_modifier(Modifier::BOLD))),
        Line::from("    j / ↓           Move down 1 item"),
        Line::from("    k / ↑           Move up 1 item"),
        Line::from("    Ctrl+d / PgDn   Move down 10 items"),
        Line::from("    Ctrl+u / PgUp   Move up 10 items"),
        Line::from("    H / Home        Go to first item"),
        Line::from("    G / End         Go to last item"),
        Line::from(""),
        Line::from(Span::styled("  Tree:", Style::default().fg(COLOR_HELP_HEADER).add_modifier(Modifier::BOLD))),
        Line::from("    l / →           Expand directory"),
        Line::from("    h / ←           Collapse / go to parent"),
        Line::from("    Space           Toggle expansion"),
        Line::from("    Enter / o       Enter directory or open file"),
        Line::from(""),
        Line::from(Span::styled("  History:", Style::default().fg(COLOR_HELP_HEADER).add_modifier(Modifier::BOLD))),
        Line::from("    b / Bksp        Back"),
        Line::from("    f               Forward"),
        Line::from("    u / -           Up one level"),
        Line::from("    r               Refresh current view"),
        Line::from(""),
        Line::from(Span::styled("  Other:", Style::default().fg(COLOR_HELP_HEADER).add_modifier(Modifier::BOLD))),
        Line::from("    ?               Toggle this help"),
        Line::from("    q / Esc         Quit"),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", Style::default().fg(COLOR_HELP_HINT))),
        Line::from(""),
    ];

    let help_height = help_text.len() as u16 + 2;
    let help_area = centered(f.area(), 46, help_height);

    f.render_widget(Clear, help_area);
    let help_block = Paragraph::new(help_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(Color::Black)))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    f.render_widget(help_block, help_area);
}
