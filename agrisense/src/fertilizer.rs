//! Fertilizer Recommendation
//!
//! The nutrient-deficiency decision: compare measured N/P/K against the
//! crop's reference profile and name the nutrient most off-target,
//! together with the direction of the correction. Pure functions only;
//! safe for unlimited concurrent invocation.

use serde::{Deserialize, Serialize};

/// The three macronutrients tracked by the reference table.
///
/// Declaration order is the tie-break priority: when two deltas have equal
/// magnitude, the earlier nutrient wins (N > P > K).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    pub fn symbol(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P",
            Nutrient::Potassium => "K",
        }
    }
}

/// Reference optimal N/P/K levels for a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub n: i64,
    pub p: i64,
    pub k: i64,
}

/// Signed difference between reference and measured nutrient levels.
///
/// Positive means the soil is short of the nutrient, negative means excess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutrientDelta {
    pub n: i64,
    pub p: i64,
    pub k: i64,
}

impl NutrientDelta {
    /// Deltas of reference minus measured values
    pub fn between(profile: &NutrientProfile, measured_n: i64, measured_p: i64, measured_k: i64) -> Self {
        Self {
            n: profile.n - measured_n,
            p: profile.p - measured_p,
            k: profile.k - measured_k,
        }
    }

    /// The nutrient whose delta has the largest absolute value, with its
    /// delta. Ties resolve by the fixed priority N > P > K.
    pub fn dominant(&self) -> (Nutrient, i64) {
        let mut dominant = (Nutrient::Nitrogen, self.n);
        for candidate in [(Nutrient::Phosphorus, self.p), (Nutrient::Potassium, self.k)] {
            if candidate.1.abs() > dominant.1.abs() {
                dominant = candidate;
            }
        }
        dominant
    }

    /// The categorical verdict for this delta
    pub fn verdict(&self) -> DeficiencyVerdict {
        let (nutrient, delta) = self.dominant();
        DeficiencyVerdict::new(nutrient, delta)
    }
}

/// Which nutrient is most off-target, and in which direction.
///
/// The wire keys (`NHigh`, `Nlow`, ...) are the keys of the verdict
/// explanation table and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeficiencyVerdict {
    #[serde(rename = "NHigh")]
    NHigh,
    #[serde(rename = "Nlow")]
    NLow,
    #[serde(rename = "PHigh")]
    PHigh,
    #[serde(rename = "Plow")]
    PLow,
    #[serde(rename = "KHigh")]
    KHigh,
    #[serde(rename = "Klow")]
    KLow,
}

/// All verdict keys, used to validate the explanation table at load time
pub const VERDICT_KEYS: [DeficiencyVerdict; 6] = [
    DeficiencyVerdict::NHigh,
    DeficiencyVerdict::NLow,
    DeficiencyVerdict::PHigh,
    DeficiencyVerdict::PLow,
    DeficiencyVerdict::KHigh,
    DeficiencyVerdict::KLow,
];

impl DeficiencyVerdict {
    /// Measured above reference (negative delta) reads High, otherwise low.
    fn new(nutrient: Nutrient, delta: i64) -> Self {
        match (nutrient, delta < 0) {
            (Nutrient::Nitrogen, true) => Self::NHigh,
            (Nutrient::Nitrogen, false) => Self::NLow,
            (Nutrient::Phosphorus, true) => Self::PHigh,
            (Nutrient::Phosphorus, false) => Self::PLow,
            (Nutrient::Potassium, true) => Self::KHigh,
            (Nutrient::Potassium, false) => Self::KLow,
        }
    }

    /// Stable table key, matching the verdict explanation table
    pub fn key(&self) -> &'static str {
        match self {
            Self::NHigh => "NHigh",
            Self::NLow => "Nlow",
            Self::PHigh => "PHigh",
            Self::PLow => "Plow",
            Self::KHigh => "KHigh",
            Self::KLow => "Klow",
        }
    }
}

impl std::fmt::Display for DeficiencyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RICE: NutrientProfile = NutrientProfile { n: 80, p: 40, k: 40 };

    #[test]
    fn test_rice_nitrogen_excess() {
        // measured 90/42/43 against 80/40/40: deltas -10/-2/-3, N dominates
        let delta = NutrientDelta::between(&RICE, 90, 42, 43);
        assert_eq!(delta, NutrientDelta { n: -10, p: -2, k: -3 });
        assert_eq!(delta.dominant(), (Nutrient::Nitrogen, -10));
        assert_eq!(delta.verdict(), DeficiencyVerdict::NHigh);
    }

    #[test]
    fn test_nitrogen_deficit() {
        let delta = NutrientDelta::between(&RICE, 50, 39, 41);
        assert_eq!(delta.verdict(), DeficiencyVerdict::NLow);
    }

    #[test]
    fn test_phosphorus_dominates() {
        let delta = NutrientDelta::between(&RICE, 81, 10, 41);
        assert_eq!(delta.dominant().0, Nutrient::Phosphorus);
        assert_eq!(delta.verdict(), DeficiencyVerdict::PLow);
    }

    #[test]
    fn test_potassium_excess() {
        let delta = NutrientDelta::between(&RICE, 81, 41, 90);
        assert_eq!(delta.verdict(), DeficiencyVerdict::KHigh);
    }

    #[test]
    fn test_tie_prefers_nitrogen() {
        // |n| == |p| == |k|: the fixed priority picks N
        let delta = NutrientDelta::between(&RICE, 70, 30, 50);
        assert_eq!(delta, NutrientDelta { n: 10, p: 10, k: -10 });
        assert_eq!(delta.dominant(), (Nutrient::Nitrogen, 10));
        assert_eq!(delta.verdict(), DeficiencyVerdict::NLow);
    }

    #[test]
    fn test_tie_prefers_phosphorus_over_potassium() {
        let delta = NutrientDelta::between(&RICE, 80, 30, 50);
        assert_eq!(delta, NutrientDelta { n: 0, p: 10, k: -10 });
        assert_eq!(delta.dominant(), (Nutrient::Phosphorus, 10));
    }

    #[test]
    fn test_all_deltas_zero_reads_as_nitrogen_low() {
        // Perfectly balanced soil still produces a verdict; sign >= 0 reads low
        let delta = NutrientDelta::between(&RICE, 80, 40, 40);
        assert_eq!(delta.verdict(), DeficiencyVerdict::NLow);
    }

    #[test]
    fn test_verdict_keys_are_stable() {
        assert_eq!(DeficiencyVerdict::NHigh.key(), "NHigh");
        assert_eq!(DeficiencyVerdict::NLow.key(), "Nlow");
        assert_eq!(DeficiencyVerdict::KLow.to_string(), "Klow");
    }

    #[test]
    fn test_verdict_serde_round_trip() {
        for verdict in VERDICT_KEYS {
            let json = serde_json::to_string(&verdict).unwrap();
            assert_eq!(json, format!("\"{}\"", verdict.key()));
            let back: DeficiencyVerdict = serde_json::from_str(&json).unwrap();
            assert_eq!(back, verdict);
        }
    }

    #[test]
    fn test_nutrient_symbols() {
        assert_eq!(Nutrient::Nitrogen.symbol(), "N");
        assert_eq!(Nutrient::Phosphorus.symbol(), "P");
        assert_eq!(Nutrient::Potassium.symbol(), "K");
    }
}
