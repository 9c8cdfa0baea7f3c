use chrono::{DateTime, Utc};
use chrono_humanize::{Accuracy, HumanTime, Tense};
use maud::{html, Markup, PreEscaped};

pub use self::float::*;
pub use self::marks::*;
pub use self::moe::*;

mod float;
mod marks;
mod moe;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.3/css/all.min.css" integrity="sha512-iBBXm8fW90+nuLcSKlbmrPcLa0OT92xO1BIsZ+ywDWZCvqsWgccV3gFoRBv0z+8dLJgyAHIhR35VZc2oM/gI1w==" crossorigin="anonymous" referrerpolicy="no-referrer";
        style { (PreEscaped(THEME_CSS)) }
    }
}

const THEME_CSS: &str = r#"
body { background: #0f1115; color: #fff; min-height: 100vh; }
.title, .subtitle, strong { color: inherit; }
.page-wrapper { display: flex; gap: 20px; align-items: flex-start; flex-wrap: wrap; }
.left-widget { width: 250px; background: #1a1d25; border-radius: 12px; padding: 20px; text-align: center; flex-shrink: 0; }
.left-widget img { width: 150px; margin-bottom: 10px; border-radius: 8px; }
.left-widget .progress-text { font-size: 18px; font-weight: bold; margin-top: 8px; color: #ffd700; }
.left-widget .three-marks { font-size: 16px; margin-top: 6px; color: #00ff00; }
.battle-card { background: #1a1d25; border-radius: 12px; padding: 12px; margin-bottom: 12px; display: flex; align-items: center; }
.battle-card .tank { width: 140px; text-align: center; }
.battle-card .tank img { width: 110px; }
.battle-card .main { flex-grow: 1; padding-left: 15px; }
.battle-card .right { width: 200px; text-align: right; font-size: 14px; color: #9aa4b2; }
.win { color: #4caf50; }
.loss { color: #f44336; }
.statline { font-size: 14px; color: #b0bac8; }
"#;

/// Renders the upstream battle time: humanized when it is an RFC 3339 timestamp, verbatim otherwise.
pub fn battle_time(value: &str) -> Markup {
    match DateTime::parse_from_rfc3339(value) {
        Ok(value) => datetime(value.with_timezone(&Utc), Tense::Past),
        Err(_) => html! { (value) },
    }
}

pub fn datetime(value: DateTime<Utc>, tense: Tense) -> Markup {
    html! {
        time
            datetime=(value.to_rfc3339())
            title=(value.to_string()) { (HumanTime::from(value).to_text_en(Accuracy::Rough, tense)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_time_rfc3339_ok() {
        let markup = battle_time("2024-05-01T18:21:07.000Z").into_string();
        assert!(markup.starts_with(r#"<time datetime="2024-05-01T18:21:07+00:00""#), "{}", markup);
        assert!(markup.contains(r#"title="2024-05-01 18:21:07 UTC""#), "{}", markup);
    }

    #[test]
    fn battle_time_verbatim_ok() {
        assert_eq!(battle_time("yesterday <b>").into_string(), "yesterday &lt;b&gt;");
    }
}
