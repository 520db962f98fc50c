pub mod accounts;
pub mod bar_chart;
pub mod common;
pub mod doughnut;
pub mod line_chart;
pub mod sample;
pub mod stats;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use accounts::{AccountSummary, AccountsWidget};
pub use bar_chart::BarChartWidget;
pub use common::*;
pub use doughnut::DoughnutChartWidget;
pub use line_chart::LineChartWidget;
pub use stats::{StatKind, StatsWidget};
pub use table::TableWidget;

use tiledash_core::{GridSpan, Props, Widget, WidgetRegistry, register_widget};

/// Registry with every built-in banking widget, in catalog order
pub fn builtin_registry() -> WidgetRegistry {
    let mut registry = WidgetRegistry::new();

    for kind in [
        StatKind::Balance,
        StatKind::Income,
        StatKind::Expenses,
        StatKind::Savings,
    ] {
        registry.register(
            kind.widget_type(),
            kind.label(),
            GridSpan::QUARTER,
            Box::new(move |props: &Props| -> Box<dyn Widget> {
                Box::new(StatsWidget::from_props(kind, props))
            }),
        );
    }

    register_widget!(registry, "line-chart", "Balance history", GridSpan::TWO_THIRDS, LineChartWidget);
    register_widget!(registry, "doughnut-chart", "Spending by category", GridSpan::THIRD, DoughnutChartWidget);
    register_widget!(registry, "bar-chart", "Monthly cash flow", GridSpan::HALF, BarChartWidget);
    register_widget!(registry, "accounts-overview", "Accounts", GridSpan::HALF, AccountsWidget);

    registry.register(
        "table",
        "Recent transactions",
        GridSpan::FULL,
        Box::new(|props: &Props| -> Box<dyn Widget> { Box::new(TableWidget::transactions(props)) }),
    );
    registry.register(
        "scheduled-transfers",
        "Scheduled transfers",
        GridSpan::FULL,
        Box::new(|props: &Props| -> Box<dyn Widget> {
            Box::new(TableWidget::scheduled_transfers(props))
        }),
    );

    registry
}
