//! Column projection shared by the table and the card grid.
//!
//! Columns are plain descriptors: an accessor that pulls a string out of a
//! record and a renderer that turns it into a styled line. Styles come from
//! the active palette, so the projection is rebuilt when the theme mode
//! changes and handed out unchanged otherwise.

use std::sync::Arc;

use ratatui::layout::Constraint;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use roster_core::{ThemeMode, User};

use crate::ui_theme::UiTheme;

pub type Accessor = fn(&User) -> String;
pub type CellRenderer = fn(&str, &User, &CellStyles) -> Line<'static>;

#[derive(Debug, Clone)]
pub struct Column {
    pub id: &'static str,
    pub header: &'static str,
    pub accessor: Accessor,
    pub render: CellRenderer,
    pub width: Constraint,
}

/// Palette-derived styles used by the cell renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyles {
    pub avatar: Style,
    pub text: Style,
    pub link: Style,
    pub muted: Style,
    pub chip_admin: Style,
    pub chip_moderator: Style,
    pub chip_user: Style,
}

impl CellStyles {
    pub fn from_theme(theme: &UiTheme) -> Self {
        let chip = |bg| {
            Style::default()
                .fg(theme.chip_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        };
        Self {
            avatar: Style::default()
                .fg(theme.header_fg)
                .bg(theme.accent_fg)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(theme.fg),
            link: Style::default().fg(theme.accent_fg),
            muted: theme.muted(),
            chip_admin: chip(theme.chip_admin),
            chip_moderator: chip(theme.chip_moderator),
            chip_user: chip(theme.chip_user),
        }
    }

    pub fn chip(&self, role: &str) -> Style {
        match role {
            "admin" => self.chip_admin,
            "moderator" => self.chip_moderator,
            _ => self.chip_user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub mode: ThemeMode,
    pub columns: Vec<Column>,
    pub styles: CellStyles,
}

impl Projection {
    pub fn new(theme: &UiTheme) -> Self {
        Self {
            mode: theme.mode,
            columns: record_columns(),
            styles: CellStyles::from_theme(theme),
        }
    }

    pub fn cell(&self, column: &Column, user: &User) -> Line<'static> {
        let value = (column.accessor)(user);
        (column.render)(&value, user, &self.styles)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }
}

fn record_columns() -> Vec<Column> {
    vec![
        Column {
            id: "name",
            header: "Name",
            accessor: |u| u.full_name(),
            render: render_name,
            width: Constraint::Fill(3),
        },
        Column {
            id: "company.name",
            header: "Company",
            accessor: |u| u.company.name.clone(),
            render: |v, _, s| Line::from(Span::styled(v.to_string(), s.text)),
            width: Constraint::Fill(3),
        },
        Column {
            id: "email",
            header: "Email",
            accessor: |u| u.email.clone(),
            render: |v, _, s| Line::from(Span::styled(v.to_string(), s.link)),
            width: Constraint::Fill(3),
        },
        Column {
            id: "phone",
            header: "Phone",
            accessor: |u| u.phone.clone(),
            render: |v, _, s| Line::from(Span::styled(v.to_string(), s.muted)),
            width: Constraint::Fill(2),
        },
        Column {
            id: "role",
            header: "Role",
            accessor: |u| u.role.clone(),
            render: render_role,
            width: Constraint::Length(12),
        },
    ]
}

fn render_name(value: &str, user: &User, styles: &CellStyles) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {} ", user.initials()), styles.avatar),
        Span::raw(" "),
        Span::styled(value.to_string(), styles.text),
    ])
}

fn render_role(value: &str, _user: &User, styles: &CellStyles) -> Line<'static> {
    if value.is_empty() {
        return Line::default();
    }
    Line::from(Span::styled(format!(" {value} "), styles.chip(value)))
}

/// Hands back the same projection until the theme mode changes.
#[derive(Debug, Default)]
pub struct ColumnCache {
    cached: Option<Arc<Projection>>,
}

impl ColumnCache {
    pub fn get(&mut self, theme: &UiTheme) -> Arc<Projection> {
        match &self.cached {
            Some(projection) if projection.mode == theme.mode => Arc::clone(projection),
            _ => {
                let projection = Arc::new(Projection::new(theme));
                self.cached = Some(Arc::clone(&projection));
                projection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_test_utils::user;

    #[test]
    fn columns_are_ordered() {
        let projection = Projection::new(&UiTheme::light());
        let ids: Vec<_> = projection.columns.iter().map(|c| c.id).collect();
        assert_eq!(ids, ["name", "company.name", "email", "phone", "role"]);
    }

    #[test]
    fn name_cell_carries_avatar_initials() {
        let projection = Projection::new(&UiTheme::light());
        let line = projection.cell(&projection.columns[0], &user(4));
        assert_eq!(line.spans[0].content, " FL ");
        assert_eq!(line.spans[2].content, "First4 Last4");
    }

    #[test]
    fn role_chip_colour_follows_role() {
        let projection = Projection::new(&UiTheme::dark());
        let role = projection.column("role").unwrap();
        let mut admin = user(3);
        admin.role = "admin".into();
        let line = projection.cell(role, &admin);
        assert_eq!(line.spans[0].content, " admin ");
        assert_eq!(line.spans[0].style.bg, Some(UiTheme::dark().chip_admin));
    }

    #[test]
    fn cache_is_pointer_stable_per_mode() {
        let mut cache = ColumnCache::default();
        let light = UiTheme::light();
        let a = cache.get(&light);
        let b = cache.get(&light);
        assert!(Arc::ptr_eq(&a, &b));

        let c = cache.get(&UiTheme::dark());
        assert!(!Arc::ptr_eq(&a, &c));
        assert_ne!(a.styles, c.styles);
    }
}
