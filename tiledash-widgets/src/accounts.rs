// tiledash-widgets/src/accounts.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use serde_json::Value;
use tiledash_core::{Props, Size, Widget};

use crate::common::{focus_color, format_currency, prop_str, truncate};
use crate::sample;

#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub name: String,
    pub iban: String,
    pub balance: f64,
}

/// Balances of the current and term-deposit accounts
///
/// # Props
/// - `title` - list title
/// - `accounts` - `[{"name": .., "iban": .., "balance": ..}, ...]`
pub struct AccountsWidget {
    title: String,
    accounts: Vec<AccountSummary>,
}

impl AccountsWidget {
    pub fn from_props(props: &Props) -> Self {
        Self {
            title: prop_str(props, "title", "Accounts"),
            accounts: parse_accounts(props.get("accounts")).unwrap_or_else(sample_accounts),
        }
    }

    pub fn total(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

fn sample_accounts() -> Vec<AccountSummary> {
    sample::ACCOUNTS
        .iter()
        .map(|(name, iban, balance)| AccountSummary {
            name: name.to_string(),
            iban: iban.to_string(),
            balance: *balance,
        })
        .collect()
}

fn parse_accounts(value: Option<&Value>) -> Option<Vec<AccountSummary>> {
    value?
        .as_array()?
        .iter()
        .map(|entry| {
            Some(AccountSummary {
                name: entry.get("name")?.as_str()?.to_string(),
                iban: entry
                    .get("iban")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                balance: entry.get("balance")?.as_f64()?,
            })
        })
        .collect()
}

impl Widget for AccountsWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} · {} ", self.title, format_currency(self.total())))
            .border_style(Style::default().fg(focus_color(focused)));
        let name_width = usize::from(block.inner(area).width.saturating_sub(16)).max(4);

        let items: Vec<ListItem> = self
            .accounts
            .iter()
            .map(|account| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("{:<w$}", truncate(&account.name, name_width), w = name_width),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!("{:>15}", format_currency(account.balance))),
                    ]),
                    Line::from(Span::styled(
                        account.iban.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        RatatuiWidget::render(List::new(items).block(block), area, buf);
    }

    fn preferred_size(&self) -> Option<Size> {
        Some(Size {
            width: 40,
            height: (self.accounts.len() as u16 * 2).saturating_add(2),
        })
    }
}
