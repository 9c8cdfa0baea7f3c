use serde::Deserialize;
use serde_with::DefaultOnError;

use crate::api::wargaming::TankId;
use crate::serde::{deserialize_lenient_f64, deserialize_lenient_i64};

/// Combined battle history response.
#[derive(Deserialize, Debug)]
pub struct CombinedBattles {
    #[serde(default)]
    pub data: Option<Vec<BattleRecord>>,
}

/// Single battle as reported by tomato.gg.
///
/// A `null` or mistyped field falls back to its default instead of failing the whole page.
#[serde_with::serde_as]
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BattleRecord {
    #[serde(rename = "map")]
    #[serde_as(as = "DefaultOnError")]
    pub map_name: String,

    #[serde_as(as = "DefaultOnError")]
    pub won: bool,

    #[serde_as(as = "DefaultOnError")]
    pub survived: bool,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub damage: i64,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub frags: i64,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub spotting_assist: i64,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub tracking_assist: i64,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub base_xp: i64,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub net_credit_earnings: i64,

    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub wn8: Option<f64>,

    /// Mark of excellence percentage after the battle.
    #[serde(rename = "moe", deserialize_with = "deserialize_lenient_f64")]
    pub moe_percent: Option<f64>,

    /// Mark of excellence percentage change in the battle.
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub moe_diff: Option<f64>,

    #[serde_as(as = "DefaultOnError")]
    pub battle_time: String,

    #[serde(rename = "image")]
    #[serde_as(as = "DefaultOnError")]
    pub tank_image: String,

    #[serde_as(as = "DefaultOnError")]
    pub short_name: String,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub tier: i64,
}

impl BattleRecord {
    /// Total assisted damage.
    pub const fn assist(&self) -> i64 {
        self.spotting_assist + self.tracking_assist
    }

    pub fn has_moe(&self) -> bool {
        self.moe_percent.unwrap_or_default() != 0.0
    }
}

/// Player stats page data. Every level is optional, tomato.gg does not guarantee the schema.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub page_props: Option<PageProps>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PageProps {
    pub overall_stats: Option<OverallStats>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OverallStats {
    pub data: Option<OverallStatsData>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OverallStatsData {
    pub tanks: Option<Vec<TankStats>>,
}

#[serde_with::serde_as]
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TankStats {
    #[serde_as(as = "DefaultOnError")]
    pub id: Option<TankId>,

    #[serde_as(as = "DefaultOnError")]
    pub moe: Option<i32>,

    #[serde_as(as = "DefaultOnError")]
    pub mastery: Option<i32>,

    #[serde_as(as = "DefaultOnError")]
    pub big_image: Option<String>,

    #[serde_as(as = "DefaultOnError")]
    pub image: Option<String>,
}

/// Overall tank achievements.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct TankMasteryStats {
    /// Number of marks of excellence, 0 to 3.
    pub moe_marks: i32,

    pub mastery_level: i32,
    pub tank_image_url: String,
}

impl PlayerStats {
    /// Looks up the tank, `None` when any level of the document is missing.
    pub fn tank_mastery(&self, tank_id: TankId) -> Option<TankMasteryStats> {
        let tank = self
            .page_props
            .as_ref()?
            .overall_stats
            .as_ref()?
            .data
            .as_ref()?
            .tanks
            .as_ref()?
            .iter()
            .find(|tank| tank.id == Some(tank_id))?;
        Some(TankMasteryStats {
            moe_marks: tank.moe.unwrap_or_default(),
            mastery_level: tank.mastery.unwrap_or_default(),
            tank_image_url: tank
                .big_image
                .as_ref()
                .filter(|image| !image.is_empty())
                .or(tank.image.as_ref())
                .cloned()
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn parse_combined_battles_ok() -> Result {
        let battles: CombinedBattles = serde_json::from_str(
            // language=json
            r#"{"data":[{"arena_id":"1","map":"Prokhorovka","won":true,"survived":false,"damage":4210,"frags":2,"spotting_assist":1800,"tracking_assist":150,"base_xp":1120,"net_credit_earnings":35120,"wn8":3120.5,"moe":"91.99","moe_diff":"-0.42","battle_time":"2024-05-01T18:21:07.000Z","image":"https://tomato.gg/ebr.png","short_name":"EBR 105","tier":10}],"meta":{"total":1}}"#,
        )?;
        let battle = &battles.data.context("no data")?[0];
        assert_eq!(battle.map_name, "Prokhorovka");
        assert!(battle.won);
        assert!(!battle.survived);
        assert_eq!(battle.assist(), 1950);
        assert_eq!(battle.moe_percent, Some(91.99));
        assert_eq!(battle.moe_diff, Some(-0.42));
        assert_eq!(battle.wn8, Some(3120.5));
        assert_eq!(battle.tier, 10);
        assert!(battle.has_moe());
        Ok(())
    }

    #[test]
    fn parse_combined_battles_partially_broken_ok() -> Result {
        let battles: CombinedBattles = serde_json::from_str(
            // language=json
            r#"{"data":[{"map":"Prokhorovka","damage":4210,"moe":"91.99","tier":10},{"map":null,"won":null,"damage":null,"frags":1.0,"base_xp":1000.0,"net_credit_earnings":"35120","moe":null,"battle_time":null,"image":null,"short_name":7,"tier":"10"}]}"#,
        )?;
        let battles = battles.data.context("no data")?;
        assert_eq!(battles.len(), 2);
        assert_eq!(battles[0].map_name, "Prokhorovka");
        assert_eq!(battles[0].damage, 4210);

        let battle = &battles[1];
        assert_eq!(battle.map_name, "");
        assert!(!battle.won);
        assert_eq!(battle.damage, 0);
        assert_eq!(battle.frags, 1);
        assert_eq!(battle.base_xp, 1000);
        assert_eq!(battle.net_credit_earnings, 35120);
        assert_eq!(battle.moe_percent, None);
        assert_eq!(battle.battle_time, "");
        assert_eq!(battle.tank_image, "");
        assert_eq!(battle.short_name, "");
        assert_eq!(battle.tier, 10);
        Ok(())
    }

    #[test]
    fn parse_combined_battles_missing_data_ok() -> Result {
        let battles: CombinedBattles = serde_json::from_str(r#"{"error":"rate limited"}"#)?;
        assert!(battles.data.is_none());
        Ok(())
    }

    #[test]
    fn zero_moe_ok() -> Result {
        let battle: BattleRecord = serde_json::from_str(r#"{"moe":0}"#)?;
        assert!(!battle.has_moe());
        let battle: BattleRecord = serde_json::from_str(r#"{}"#)?;
        assert!(!battle.has_moe());
        Ok(())
    }

    #[test]
    fn tank_mastery_ok() -> Result {
        let stats: PlayerStats = serde_json::from_str(
            // language=json
            r#"{"pageProps":{"overallStats":{"data":{"tanks":[{"id":1,"moe":1},{"id":6193,"moe":3,"mastery":4,"bigImage":"https://tomato.gg/big.png","image":"https://tomato.gg/small.png"}]}}}}"#,
        )?;
        assert_eq!(
            stats.tank_mastery(6193),
            Some(TankMasteryStats {
                moe_marks: 3,
                mastery_level: 4,
                tank_image_url: "https://tomato.gg/big.png".to_string(),
            }),
        );
        Ok(())
    }

    #[test]
    fn tank_mastery_image_fallback_ok() -> Result {
        let stats: PlayerStats = serde_json::from_str(
            // language=json
            r#"{"pageProps":{"overallStats":{"data":{"tanks":[{"id":6193,"moe":2,"image":"https://tomato.gg/small.png"}]}}}}"#,
        )?;
        let mastery = stats.tank_mastery(6193).context("the tank is missing")?;
        assert_eq!(mastery.tank_image_url, "https://tomato.gg/small.png");
        assert_eq!(mastery.mastery_level, 0);
        Ok(())
    }

    #[test]
    fn tank_mastery_missing_tanks_ok() -> Result {
        let stats: PlayerStats = serde_json::from_str(
            // language=json
            r#"{"pageProps":{"overallStats":{"data":{}}}}"#,
        )?;
        assert_eq!(stats.tank_mastery(6193), None);
        let stats: PlayerStats = serde_json::from_str(r#"{"pageProps":{}}"#)?;
        assert_eq!(stats.tank_mastery(6193), None);
        let stats: PlayerStats = serde_json::from_str(r#"{"__N_SSP":true}"#)?;
        assert_eq!(stats.tank_mastery(6193), None);
        Ok(())
    }

    #[test]
    fn tank_mastery_mistyped_fields_ok() -> Result {
        let stats: PlayerStats = serde_json::from_str(
            // language=json
            r#"{"pageProps":{"overallStats":{"data":{"tanks":[{"id":6193,"moe":"3","mastery":null,"bigImage":null,"image":"https://tomato.gg/small.png"}]}}}}"#,
        )?;
        let mastery = stats.tank_mastery(6193).context("the tank is missing")?;
        assert_eq!(mastery.moe_marks, 0);
        assert_eq!(mastery.mastery_level, 0);
        assert_eq!(mastery.tank_image_url, "https://tomato.gg/small.png");
        Ok(())
    }

    #[test]
    fn tank_mastery_other_tank_ok() -> Result {
        let stats: PlayerStats = serde_json::from_str(
            // language=json
            r#"{"pageProps":{"overallStats":{"data":{"tanks":[{"id":1,"moe":3}]}}}}"#,
        )?;
        assert_eq!(stats.tank_mastery(6193), None);
        Ok(())
    }
}
