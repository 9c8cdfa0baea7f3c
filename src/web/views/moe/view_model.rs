use crate::api::tomato::{BattleRecord, TankMasteryStats};
use crate::prelude::*;
use crate::web::partials::{format_marks, format_progress, three_marks_answer};
use crate::web::State;

pub struct ViewModel {
    /// Recent battles, newest first, or `None` when the history is unavailable.
    pub battles: Option<Vec<BattleRecord>>,

    pub mastery: TankMasteryStats,
}

impl ViewModel {
    /// Fetches fresh data on every call, upstream failures degrade instead of failing the page.
    pub async fn new(state: &State) -> Self {
        let player = &state.identities.player;
        let tank = &state.identities.tank;

        let battles = match state
            .tomato
            .fetch_recent_battles(player.id, tank.id, state.page_size)
            .await
        {
            Ok(battles) => Some(battles),
            Err(error) => {
                warn!("battle history is unavailable: {:#}", anyhow::Error::new(error));
                None
            }
        };
        let mastery = state
            .tomato
            .get_tank_moe(&player.name, player.id, tank.id)
            .await;

        Self { battles, mastery }
    }

    /// The first battle with non-zero MOE.
    ///
    /// The newest battles sometimes come with zero MOE from tomato.gg until it catches up,
    /// hence not just the first battle. This depends on the upstream behaviour.
    pub fn latest_battle(&self) -> Option<&BattleRecord> {
        self.battles
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|battle| battle.has_moe())
    }

    pub fn progress_text(&self) -> String {
        format_progress(self.latest_battle())
    }

    pub const fn marks_text(&self) -> &'static str {
        format_marks(self.mastery.moe_marks)
    }

    pub const fn three_marks_answer(&self) -> &'static str {
        three_marks_answer(self.mastery.moe_marks)
    }

    /// Tank image from the overall stats, or from the battles if the former is missing.
    pub fn tank_image(&self) -> &str {
        if !self.mastery.tank_image_url.is_empty() {
            return &self.mastery.tank_image_url;
        }
        self.battles
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|battle| battle.tank_image.as_str())
            .find(|image| !image.is_empty())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battle(moe_percent: f64, moe_diff: f64) -> BattleRecord {
        BattleRecord {
            moe_percent: Some(moe_percent),
            moe_diff: Some(moe_diff),
            ..Default::default()
        }
    }

    #[test]
    fn latest_battle_skips_zero_moe_ok() {
        let model = ViewModel {
            battles: Some(vec![battle(0.0, 0.0), battle(0.0, 0.0), battle(91.99, -0.42)]),
            mastery: TankMasteryStats::default(),
        };
        assert_eq!(model.latest_battle(), Some(&battle(91.99, -0.42)));
        assert_eq!(model.progress_text(), "91.99% (Δ -0.42%)");
    }

    #[test]
    fn latest_battle_all_zero_ok() {
        let model = ViewModel {
            battles: Some(vec![battle(0.0, 0.0)]),
            mastery: TankMasteryStats::default(),
        };
        assert_eq!(model.latest_battle(), None);
        assert_eq!(model.progress_text(), "0.00% (Δ 0.00%)");
    }

    #[test]
    fn latest_battle_unavailable_ok() {
        let model = ViewModel {
            battles: None,
            mastery: TankMasteryStats::default(),
        };
        assert_eq!(model.latest_battle(), None);
        assert_eq!(model.progress_text(), "0.00% (Δ 0.00%)");
        assert_eq!(model.tank_image(), "");
    }

    #[test]
    fn three_marks_ok() {
        let model = ViewModel {
            battles: Some(Vec::new()),
            mastery: TankMasteryStats {
                moe_marks: 3,
                ..Default::default()
            },
        };
        assert_eq!(model.three_marks_answer(), "Yes");
        assert_eq!(model.marks_text(), "*** (3 Marks)");
    }

    #[test]
    fn two_marks_ok() {
        let model = ViewModel {
            battles: Some(Vec::new()),
            mastery: TankMasteryStats {
                moe_marks: 2,
                ..Default::default()
            },
        };
        assert_eq!(model.three_marks_answer(), "No");
        assert_eq!(model.marks_text(), "** (2 Marks)");
    }

    #[test]
    fn tank_image_fallback_ok() {
        let model = ViewModel {
            battles: Some(vec![BattleRecord {
                tank_image: "https://tomato.gg/ebr.png".to_string(),
                ..Default::default()
            }]),
            mastery: TankMasteryStats::default(),
        };
        assert_eq!(model.tank_image(), "https://tomato.gg/ebr.png");
    }
}
