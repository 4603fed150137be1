//! Chart generation and rendering for the home and reports pages.
//!
//! This module turns aggregator output into ECharts options:
//! - **Expenses by category**: a doughnut chart coloured with the category colours
//! - **Monthly expenses**: a bar, line or pie chart of expenses per month
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;

use crate::{
    dashboard::aggregation::{CategoryTotal, MonthlyTotal},
    html::HeadElement,
};

/// The colour ECharts uses for the monthly series.
const MONTHLY_SERIES_COLOR: &str = "#F9A8D4";

/// A chart with its HTML container ID and ECharts configuration.
pub(crate) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// How the monthly expenses are drawn on the reports page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl MonthlyChartKind {
    pub const ALL: [MonthlyChartKind; 3] = [
        MonthlyChartKind::Bar,
        MonthlyChartKind::Line,
        MonthlyChartKind::Pie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MonthlyChartKind::Bar => "bar",
            MonthlyChartKind::Line => "line",
            MonthlyChartKind::Pie => "pie",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MonthlyChartKind::Bar => "Bar",
            MonthlyChartKind::Line => "Line",
            MonthlyChartKind::Pie => "Pie",
        }
    }
}

/// Renders the HTML containers for charts.
pub(crate) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[340px] rounded-2xl bg-white dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(crate) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A doughnut chart of expenses per category, using each category's colour.
pub(crate) fn category_chart(category_totals: &[CategoryTotal]) -> Chart {
    let colors: Vec<Color> = category_totals
        .iter()
        .map(|total| Color::from(total.color.as_str()))
        .collect();
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|total| (total.amount, total.name.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by category").left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0"))
        .color(colors)
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

/// A chart of total expenses per month, drawn as `kind`.
pub(crate) fn monthly_chart(monthly_totals: &[MonthlyTotal], kind: MonthlyChartKind) -> Chart {
    let labels: Vec<String> = monthly_totals
        .iter()
        .map(|total| total.label.clone())
        .collect();
    let values: Vec<f64> = monthly_totals.iter().map(|total| total.amount).collect();

    let chart = Chart::new().title(Title::new().text("Monthly expenses").left("center"));

    match kind {
        MonthlyChartKind::Pie => {
            let data: Vec<(f64, &str)> = monthly_totals
                .iter()
                .map(|total| (total.amount, total.label.as_str()))
                .collect();

            chart
                .tooltip(
                    Tooltip::new()
                        .trigger(Trigger::Item)
                        .value_formatter(currency_formatter()),
                )
                .legend(Legend::new().bottom("0"))
                .series(Pie::new().name("Expenses").radius("65%").data(data))
        }
        MonthlyChartKind::Bar | MonthlyChartKind::Line => {
            let chart = chart
                .tooltip(currency_tooltip())
                .color(vec![Color::from(MONTHLY_SERIES_COLOR)])
                .grid(
                    Grid::new()
                        .left("3%")
                        .right("4%")
                        .bottom("3%")
                        .contain_label(true),
                )
                .x_axis(Axis::new().type_(AxisType::Category).data(labels))
                .y_axis(
                    Axis::new()
                        .type_(AxisType::Value)
                        .axis_label(AxisLabel::new().formatter(currency_formatter())),
                );

            if kind == MonthlyChartKind::Line {
                chart.series(Line::new().name("Expenses").data(values))
            } else {
                chart.series(bar::Bar::new().name("Expenses").data(values))
            }
        }
    }
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('th-TH', {
              style: 'currency',
              currency: 'THB'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod charts_tests {
    use time::macros::date;

    use crate::dashboard::{
        aggregation::{CategoryTotal, MonthlyTotal},
        charts::{
            DashboardChart, MonthlyChartKind, category_chart, charts_script, monthly_chart,
        },
    };

    fn monthly_totals() -> Vec<MonthlyTotal> {
        vec![
            MonthlyTotal {
                month: date!(2024 - 01 - 01),
                label: "Jan 2024".to_owned(),
                amount: 25.0,
            },
            MonthlyTotal {
                month: date!(2024 - 02 - 01),
                label: "Feb 2024".to_owned(),
                amount: 5.0,
            },
        ]
    }

    #[test]
    fn category_chart_uses_category_colors_and_names() {
        let totals = vec![CategoryTotal {
            category_id: "food".to_owned(),
            name: "🍽️ Food".to_owned(),
            amount: 50.0,
            color: "#FFD6EC".to_owned(),
            icon: "fa-utensils".to_owned(),
        }];

        let options = category_chart(&totals).to_string();

        assert!(options.contains("#FFD6EC"), "got {options}");
        assert!(options.contains("🍽️ Food"), "got {options}");
        assert!(options.contains("\"pie\""), "got {options}");
    }

    #[test]
    fn monthly_chart_series_type_follows_kind() {
        for (kind, series_type) in [
            (MonthlyChartKind::Bar, "\"bar\""),
            (MonthlyChartKind::Line, "\"line\""),
            (MonthlyChartKind::Pie, "\"pie\""),
        ] {
            let options = monthly_chart(&monthly_totals(), kind).to_string();

            assert!(
                options.contains(series_type),
                "want series type {series_type} for {kind:?}, got {options}"
            );
            assert!(options.contains("Jan 2024"));
        }
    }

    #[test]
    fn chart_kind_parses_from_query() {
        let kind: MonthlyChartKind = serde_json::from_str("\"line\"").unwrap();

        assert_eq!(kind, MonthlyChartKind::Line);
        assert_eq!(MonthlyChartKind::default(), MonthlyChartKind::Bar);
    }

    #[test]
    fn script_initialises_each_chart() {
        let charts = [
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let crate::html::HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("want a script source");
        };

        assert!(script.0.contains("getElementById(\"first-chart\")"));
        assert!(script.0.contains("getElementById(\"second-chart\")"));
    }
}
