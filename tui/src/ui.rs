//! Rendering.
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  file, reference date, row and agent totals                         │
//!   ├─── agents ──────────────────────┬─── rows ──────────────────────────┤
//!   │  one line per agent, by risk    │  filtered rows, selectable        │
//!   ├─────────────────────────────────┴───────────────────────────────────┤
//!   │  reasons and flags of the selected row                              │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use agentguard_contracts::{
    report::ScreenedRow,
    risk::{AmlFlag, FrequencyFlag, KycFlag, RiskStatus},
};

use crate::app::App;

pub fn ui(f: &mut Frame, app: &App) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // header
            Constraint::Min(8),     // agents + rows
            Constraint::Length(9),  // detail
            Constraint::Length(3),  // footer
        ])
        .split(f.area());

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(outer_chunks[1]);

    render_agents(f, mid_chunks[0], app);
    render_rows(f, mid_chunks[1], app);
    render_detail(f, outer_chunks[2], app);
    render_footer(f, outer_chunks[3], app);
}

fn risk_color(status: RiskStatus) -> Color {
    match status {
        RiskStatus::Red => Color::Red,
        RiskStatus::Yellow => Color::Yellow,
        RiskStatus::Green => Color::Green,
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let report = &app.report;
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let first = Line::from(vec![
        Span::styled("AgentGuard Screening    ", title_style),
        Span::raw(truncate(&app.source.file.display().to_string(), 48)),
        Span::styled(
            format!("    as of {}", report.reference_date),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let second = Line::from(vec![
        label("Rows "),
        Span::raw(format!("{}  ", report.total())),
        label("valid "),
        Span::styled(
            format!("{}  ", report.valid()),
            Style::default().fg(Color::Green),
        ),
        label("invalid "),
        Span::styled(
            format!("{}  ", report.invalid()),
            Style::default().fg(Color::Red),
        ),
        label("flagged "),
        Span::styled(
            format!("{}    ", report.flagged()),
            Style::default().fg(Color::Yellow),
        ),
        label("Agents "),
        Span::styled(
            format!("{} RED ", report.agents_with(RiskStatus::Red)),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!("{} YELLOW ", report.agents_with(RiskStatus::Yellow)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{} GREEN", report.agents_with(RiskStatus::Green)),
            Style::default().fg(Color::Green),
        ),
    ]);

    let header = Paragraph::new(vec![first, second]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_agents(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.report.agents.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No agent has a valid transaction",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.report
            .agents
            .iter()
            .map(|agent| {
                let color = risk_color(agent.risk_status);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {:<7}", agent.risk_status.as_str()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("{:<10} ", truncate(&agent.agent_id, 10))),
                    Span::styled(
                        format!("{:<20} ", truncate(&agent.agent_name, 20)),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{}/{}", agent.flagged_transactions, agent.transactions),
                        Style::default().fg(Color::Gray),
                    ),
                ]))
            })
            .collect()
    };

    f.render_widget(List::new(items).block(panel(" Agents (flagged/txns) ")), area);
}

fn row_status(row: &ScreenedRow) -> (&'static str, Color) {
    if !row.verdict.is_valid {
        ("INVALID", Color::Red)
    } else if row.verdict.is_flagged {
        ("FLAGGED", Color::Yellow)
    } else {
        ("OK", Color::Green)
    }
}

fn render_rows(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.visible_rows();
    let title = format!(" Rows [{}] {} ", app.filter.label(), rows.len());

    if rows.is_empty() {
        let p = Paragraph::new(Span::styled(
            "  No rows match the current filter.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(panel(&title));
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let (status, color) = row_status(row);
            let first_reason = row.verdict.reasons.first().map(String::as_str).unwrap_or("");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<5}", row.line),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!(
                    "{:<10} ",
                    truncate(row.agent_id.as_deref().unwrap_or("-"), 10)
                )),
                Span::styled(
                    format!("{:<8}", status),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(truncate(first_reason, 40), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel(&title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(" Selected Row ");

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &app.error {
        lines.push(Line::from(vec![
            label("  Re-screen failed: "),
            Span::styled(truncate(error, 80), Style::default().fg(Color::Red)),
        ]));
    }

    let Some(row) = app.selected_row() else {
        lines.push(Line::from(Span::styled(
            "  Nothing selected.",
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let (status, color) = row_status(row);
    lines.push(Line::from(vec![
        label("  Line:      "),
        Span::raw(format!("{}   ", row.line)),
        label("Agent: "),
        Span::raw(format!("{}   ", row.agent_id.as_deref().unwrap_or("-"))),
        Span::styled(status, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]));

    if let Some(flags) = row.flags {
        let (kyc, kyc_color) = match flags.kyc {
            KycFlag::Ok => ("OK", Color::Green),
            KycFlag::Incomplete => ("INCOMPLETE", Color::Yellow),
            KycFlag::Expired => ("EXPIRED", Color::Red),
        };
        let (aml, aml_color) = match flags.aml {
            AmlFlag::Ok => ("OK", Color::Green),
            AmlFlag::Alert => ("ALERT", Color::Red),
        };
        let (freq, freq_color) = match flags.frequency {
            FrequencyFlag::Ok => ("OK", Color::Green),
            FrequencyFlag::Alert => ("ALERT", Color::Red),
        };
        lines.push(Line::from(vec![
            label("  Flags:     "),
            Span::raw("KYC "),
            Span::styled(format!("{}  ", kyc), Style::default().fg(kyc_color)),
            Span::raw("AML "),
            Span::styled(format!("{}  ", aml), Style::default().fg(aml_color)),
            Span::raw("Frequency "),
            Span::styled(freq, Style::default().fg(freq_color)),
            Span::styled(
                format!(
                    "  ({} txn(s) in window)",
                    row.txns_in_window.unwrap_or_default()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    if row.verdict.reasons.is_empty() {
        lines.push(Line::from(vec![
            label("  Reasons:   "),
            Span::styled("none", Style::default().fg(Color::Green)),
        ]));
    } else {
        for (i, reason) in row.verdict.reasons.iter().enumerate() {
            let prefix = if i == 0 { "  Reasons:   " } else { "             " };
            lines.push(Line::from(vec![
                label(prefix),
                Span::styled(format!("- {}", reason), Style::default().fg(color)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let spans: Vec<Span> = vec![
        Span::styled(" [↑/↓ k/j] ", Style::default().fg(Color::Cyan)),
        Span::raw("Move  "),
        Span::styled("[f] ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("Filter: {}  ", app.filter.label())),
        Span::styled("[r] ", Style::default().fg(Color::Cyan)),
        Span::raw("Re-screen  "),
        Span::styled("[q] ", Style::default().fg(Color::Cyan)),
        Span::raw("Quit"),
    ];

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
