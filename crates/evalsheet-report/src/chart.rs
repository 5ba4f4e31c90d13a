//! SVG bar chart of a judgment distribution.

use serde::{Deserialize, Serialize};

use evalsheet_core::model::JudgmentCategory;
use evalsheet_core::statistics::AggregationResult;

use crate::html::html_escape;

/// One bar: a judgment category, its count, and its share of the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub category: JudgmentCategory,
    pub count: usize,
    /// Percentage, 0-100.
    pub share: f64,
}

/// Bars for every category present in `result`, in reporting order.
pub fn distribution(result: &AggregationResult) -> Vec<Bar> {
    result
        .counts_by_judgment
        .iter()
        .map(|(&category, &count)| Bar {
            category,
            count,
            share: result.share(category),
        })
        .collect()
}

fn color(category: JudgmentCategory) -> &'static str {
    match category {
        JudgmentCategory::Approved => "#22c55e",
        JudgmentCategory::Pending => "#eab308",
        JudgmentCategory::NotApproved => "#ef4444",
        JudgmentCategory::Other => "#9ca3af",
    }
}

/// Render a horizontal bar chart with count and percentage labels.
pub fn generate_bar_chart(title: &str, bars: &[Bar]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 140;
    let title_height = 30;

    let total_height = title_height + bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 120,
        total_height
    );
    svg.push_str(&format!(
        "  <text x=\"{padding}\" y=\"20\" font-size=\"16\" font-weight=\"bold\" fill=\"currentColor\">{}</text>\n",
        html_escape(title)
    ));

    for (i, bar) in bars.iter().enumerate() {
        let y = title_height + i * (bar_height + padding) + padding;
        let width = (bar.share / 100.0 * max_width as f64).round() as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            bar.category.label()
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            color(bar.category)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{} ({:.1}%)</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            bar.count,
            bar.share
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
