//! Horizontal bar chart of feature importances as inline SVG

use crate::predict::FeatureImportance;

use super::escape_html;

const WIDTH: f64 = 640.0;
const LABEL_WIDTH: f64 = 200.0;
const VALUE_WIDTH: f64 = 60.0;
const BAR_HEIGHT: f64 = 22.0;
const BAR_GAP: f64 = 8.0;
const PADDING: f64 = 10.0;

/// Render `importances` (ascending) with the largest bar at the top
pub fn render_importance_chart(importances: &[FeatureImportance]) -> String {
    let rows = importances.len() as f64;
    let height = PADDING * 2.0 + rows * (BAR_HEIGHT + BAR_GAP);
    let track = WIDTH - LABEL_WIDTH - VALUE_WIDTH - PADDING * 2.0;

    let max = importances
        .iter()
        .map(|i| i.score)
        .filter(|s| s.is_finite())
        .fold(0.0_f64, f64::max);

    let mut bars = String::new();
    for (row, item) in importances.iter().rev().enumerate() {
        let y = PADDING + row as f64 * (BAR_HEIGHT + BAR_GAP);
        let width = if max > 0.0 && item.score.is_finite() {
            (item.score.max(0.0) / max) * track
        } else {
            0.0
        };
        let label = escape_html(&item.feature);

        bars.push_str(&format!(
            r##"
    <g class="bar">
        <text x="{lx:.1}" y="{ty:.1}" text-anchor="end" font-size="13">{label}</text>
        <rect x="{bx:.1}" y="{y:.1}" width="{width:.1}" height="{BAR_HEIGHT:.1}" fill="#1f77b4"><title>{label}: {score:.4}</title></rect>
        <text x="{vx:.1}" y="{ty:.1}" font-size="12" fill="#495057">{score:.3}</text>
    </g>"##,
            lx = LABEL_WIDTH - 6.0,
            ty = y + BAR_HEIGHT * 0.7,
            bx = LABEL_WIDTH,
            vx = LABEL_WIDTH + width + 6.0,
            score = item.score,
        ));
    }

    format!(
        r#"<svg class="importance-chart" xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{height:.0}" viewBox="0 0 {WIDTH:.0} {height:.0}" role="img" aria-label="Importance des variables">{bars}
</svg>"#
    )
}
