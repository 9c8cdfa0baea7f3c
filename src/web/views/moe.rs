use maud::{html, Markup, DOCTYPE};
use poem::web::{Data, Html};
use poem::{handler, IntoResponse};

use self::view_model::ViewModel;
use crate::api::tomato::BattleRecord;
use crate::prelude::*;
use crate::web::partials::{battle_time, format_moe_diff, headers, Float};
use crate::web::State;

pub mod view_model;

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(state: Data<&State>) -> Result<impl IntoResponse> {
    let start_instant = Instant::now();
    let model = ViewModel::new(&state).await;
    let player_name = &state.identities.player.name;
    let tank_name = &state.identities.tank.short_name;

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "MOE Dashboard" }
            }
            body {
                div.container."py-4"."px-3" {
                    a.button.is-dark."mb-3" href="/" { "← Back" }
                    h3.title."is-4" { "Recent Battles — " (player_name) " (" (tank_name) ")" }

                    div.page-wrapper {
                        div.left-widget {
                            img src=(model.tank_image()) alt=(tank_name);
                            div { (tank_name) }
                            div.progress-text { (model.progress_text()) }
                            div.marks { (model.marks_text()) }
                            @if model.mastery.mastery_level != 0 {
                                div.has-text-grey { "Mastery badge: " (model.mastery.mastery_level) }
                            }
                            div.three-marks { "3 marks? " (model.three_marks_answer()) }
                        }

                        div."is-flex-grow-1" {
                            @match &model.battles {
                                Some(battles) if battles.is_empty() => {
                                    div.notification.is-dark { "No recent battles in this tank." }
                                }
                                Some(battles) => {
                                    @for battle in battles {
                                        (battle_card(battle))
                                    }
                                }
                                None => {
                                    div.notification.is-warning {
                                        "Battle data is currently unavailable, please try again later."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    debug!(elapsed = ?start_instant.elapsed(), "rendered");
    Ok(Html(markup.into_string()))
}

fn battle_card(battle: &BattleRecord) -> Markup {
    html! {
        div.battle-card {
            div.tank {
                img src=(battle.tank_image) alt=(battle.short_name);
                div { (battle.short_name) }
                div.has-text-grey { "Tier " (battle.tier) }
            }

            div.main {
                div { strong { (battle.map_name) } }
                @if battle.won {
                    div.win { "Victory" }
                } @else {
                    div.loss { "Defeat" }
                }
                div.statline {
                    "Damage: " (battle.damage)
                    " | Frags: " (battle.frags)
                    " | Assist: " (battle.assist())
                }
                div.statline {
                    @if battle.survived { "Survived" } @else { "Destroyed" }
                    " • " (battle_time(&battle.battle_time))
                }
            }

            div.right {
                div {
                    "MOE: "
                    @match battle.moe_percent {
                        Some(moe_percent) => { (Float::from(moe_percent).precision(2)) "%" }
                        None => { "n/a" }
                    }
                }
                div { "Δ MOE: " (format_moe_diff(battle.moe_diff)) }
                div {
                    "WN8: "
                    @match battle.wn8 {
                        Some(wn8) => { (Float::from(wn8)) }
                        None => { "n/a" }
                    }
                }
                div { "XP: " (battle.base_xp) }
                div { "Credits: " (battle.net_credit_earnings) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_card_ok() {
        let battle = BattleRecord {
            map_name: "Prokhorovka".to_string(),
            won: true,
            survived: false,
            damage: 4210,
            frags: 2,
            spotting_assist: 1800,
            tracking_assist: 150,
            moe_percent: Some(91.99),
            moe_diff: Some(-0.42),
            short_name: "EBR 105".to_string(),
            tier: 10,
            ..Default::default()
        };
        let markup = battle_card(&battle).into_string();
        assert!(markup.contains("<strong>Prokhorovka</strong>"), "{}", markup);
        assert!(markup.contains("Victory"));
        assert!(markup.contains("Destroyed"));
        assert!(markup.contains("Assist: 1950"));
        assert!(markup.contains("Tier 10"));
        assert!(markup.contains(r#"<span class="tag is-danger moe-diff-down">▼ -0.42</span>"#));
        assert!(markup.contains("WN8: n/a"));
    }

    #[test]
    fn battle_card_escapes_ok() {
        let battle = BattleRecord {
            map_name: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };
        let markup = battle_card(&battle).into_string();
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
    }
}
