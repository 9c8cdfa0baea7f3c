use std::fmt::{self, Display, Formatter};

use maud::{html, Markup, Render};

use crate::api::tomato::BattleRecord;

/// Mark of excellence change badge.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoeDiff(Option<f64>);

impl From<Option<f64>> for MoeDiff {
    fn from(value: Option<f64>) -> Self {
        Self(value.filter(|value| value.is_finite()))
    }
}

impl From<f64> for MoeDiff {
    fn from(value: f64) -> Self {
        Self::from(Some(value))
    }
}

impl Display for MoeDiff {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) if value > 0.0 => write!(formatter, "+{:.2}", value),
            Some(value) if value < 0.0 => write!(formatter, "{:.2}", value),
            Some(_) => formatter.write_str("0.00"),
            None => formatter.write_str("n/a"),
        }
    }
}

impl Render for MoeDiff {
    fn render(&self) -> Markup {
        match self.0 {
            Some(value) if value > 0.0 => html! {
                span.tag.is-success.moe-diff-up { "▲ " (self.to_string()) }
            },
            Some(value) if value < 0.0 => html! {
                span.tag.is-danger.moe-diff-down { "▼ " (self.to_string()) }
            },
            _ => html! { span.tag.is-dark { (self.to_string()) } },
        }
    }
}

/// Renders the badge for the decoded upstream value.
///
/// The text parsing happens while decoding the battle, see [`crate::serde::deserialize_lenient_f64`],
/// so a non-numeric value arrives here as `None` and becomes `n/a`.
pub fn format_moe_diff(value: Option<f64>) -> Markup {
    MoeDiff::from(value).render()
}

/// Current mark of excellence percentage and its last change, like `91.99% (Δ -0.42%)`.
pub fn format_progress(latest_battle: Option<&BattleRecord>) -> String {
    match latest_battle {
        Some(battle) => format!(
            "{:.2}% (Δ {:+.2}%)",
            battle.moe_percent.unwrap_or_default(),
            battle.moe_diff.unwrap_or_default(),
        ),
        None => "0.00% (Δ 0.00%)".to_string(),
    }
}
