use itertools::Itertools;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use roster_core::User;

use crate::columns::CellStyles;
use crate::detail::DetailStatus;
use crate::ui_theme::UiTheme;

const MISSING: &str = "N/A";

pub fn render_detail(frame: &mut Frame, area: Rect, status: DetailStatus<'_>, palette: &UiTheme) {
    match status {
        DetailStatus::Idle => {}
        DetailStatus::Pending(id) => {
            let text = vec![
                Line::default(),
                Line::styled(format!("Loading record {id}…"), palette.accent()),
            ];
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
        }
        DetailStatus::NotFound { id, error } => {
            let mut text = vec![
                Line::default(),
                Line::styled("Record not found", palette.accent()),
                Line::styled(format!("No record with id {id}"), palette.muted()),
            ];
            if let Some(error) = error {
                text.push(Line::styled(
                    error.to_string(),
                    Style::default().fg(palette.error_fg),
                ));
            }
            text.push(Line::default());
            text.push(Line::styled("← esc back to records", palette.muted()));
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        DetailStatus::Found(user) => render_profile(frame, area, user, palette),
    }
}

fn render_profile(frame: &mut Frame, area: Rect, user: &User, palette: &UiTheme) {
    let [head, body] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .areas(area);

    let chip = CellStyles::from_theme(palette).chip(&user.role);
    let header = vec![
        Line::styled("← esc back", palette.muted()),
        Line::from(vec![
            Span::styled(
                format!(" {} ", user.initials()),
                palette.accent().patch(palette.selected()),
            ),
            Span::raw(" "),
            Span::styled(or_missing(&user.full_name()), palette.accent()),
            Span::raw("  "),
            Span::styled(format!(" {} ", or_missing(&user.role)), chip),
        ]),
        Line::from(vec![
            Span::styled(or_missing(&user.email), Style::default().fg(palette.accent_fg)),
            Span::raw("   "),
            Span::styled(or_missing(&user.phone), palette.muted()),
        ]),
    ];
    frame.render_widget(Paragraph::new(header), head);

    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .spacing(1)
        .areas(body);

    let left_sections = [personal(user), address(user), company(user)];
    let right_sections = [bank(user), crypto(user)];
    render_sections(frame, left, &left_sections, palette);
    render_sections(frame, right, &right_sections, palette);
}

type Section = (&'static str, Vec<(&'static str, String)>);

fn render_sections(frame: &mut Frame, area: Rect, sections: &[Section], palette: &UiTheme) {
    let mut lines = Vec::new();
    for (title, fields) in sections {
        lines.push(Line::styled(*title, palette.accent()));
        for (label, value) in fields {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<14}"), palette.muted()),
                Span::raw(value.clone()),
            ]));
        }
        lines.push(Line::default());
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).border_style(palette.border())),
        area,
    );
}

fn personal(user: &User) -> Section {
    (
        "Personal",
        vec![
            ("Username", or_missing(&user.username)),
            ("Maiden name", or_missing(&user.maiden_name)),
            ("Age", opt(user.age)),
            ("Gender", or_missing(&user.gender)),
            ("Birth date", or_missing(&user.birth_date)),
            ("Blood group", or_missing(&user.blood_group)),
            ("Height", opt(user.height.map(|h| format!("{h:.1} cm")))),
            ("Weight", opt(user.weight.map(|w| format!("{w:.1} kg")))),
            ("Eye color", or_missing(&user.eye_color)),
            (
                "Hair",
                joined(&[user.hair.color.as_str(), user.hair.kind.as_str()], ", "),
            ),
            ("University", or_missing(&user.university)),
        ],
    )
}

fn address(user: &User) -> Section {
    let a = &user.address;
    let coordinates = if a.coordinates.lat == 0.0 && a.coordinates.lng == 0.0 {
        MISSING.to_string()
    } else {
        format!("{:.5}, {:.5}", a.coordinates.lat, a.coordinates.lng)
    };
    (
        "Address",
        vec![
            ("Street", or_missing(&a.address)),
            ("City", or_missing(&a.city)),
            (
                "State",
                joined(&[a.state.as_str(), a.state_code.as_str()], " "),
            ),
            ("Postal code", or_missing(&a.postal_code)),
            ("Country", or_missing(&a.country)),
            ("Coordinates", coordinates),
        ],
    )
}

fn company(user: &User) -> Section {
    let c = &user.company;
    (
        "Company",
        vec![
            ("Name", or_missing(&c.name)),
            ("Department", or_missing(&c.department)),
            ("Title", or_missing(&c.title)),
            (
                "Address",
                joined(&[c.address.address.as_str(), c.address.city.as_str()], ", "),
            ),
        ],
    )
}

fn bank(user: &User) -> Section {
    let b = &user.bank;
    (
        "Bank",
        vec![
            ("Card type", or_missing(&b.card_type)),
            ("Card number", or_missing(&b.card_number)),
            ("Expires", or_missing(&b.card_expire)),
            ("Currency", or_missing(&b.currency)),
            ("IBAN", or_missing(&b.iban)),
        ],
    )
}

fn crypto(user: &User) -> Section {
    let c = &user.crypto;
    (
        "Crypto",
        vec![
            ("Coin", or_missing(&c.coin)),
            ("Network", or_missing(&c.network)),
            ("Wallet", or_missing(&c.wallet)),
        ],
    )
}

fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn joined(parts: &[&str], sep: &str) -> String {
    let present = parts.iter().filter(|p| !p.trim().is_empty()).join(sep);
    if present.is_empty() {
        MISSING.to_string()
    } else {
        present
    }
}
