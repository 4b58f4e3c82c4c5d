//! Muhurta rules and activity presets.

use chrono::Weekday;
use kaal_oracle::Body;
use kaal_vedic_base::{Graha, Kalam, combustion_threshold};
use serde::Serialize;

/// Sign allow-list for one body's longitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignConstraint {
    pub body: Body,
    /// 1-based rashi ordinals (1 = Mesha).
    pub signs: Vec<u8>,
}

/// Fails a step when two bodies are closer than `orb_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProximityExclusion {
    pub body: Body,
    pub other: Body,
    pub orb_deg: f64,
}

impl ProximityExclusion {
    /// Exclusion while `graha` is combust; `None` for grahas that never are.
    pub fn combustion(graha: Graha) -> Option<Self> {
        combustion_threshold(graha).map(|orb_deg| Self {
            body: graha.body(),
            other: Body::Sun,
            orb_deg,
        })
    }
}

/// Conjunction of allow-lists and exclusions evaluated per scan step.
///
/// Empty allow-lists place no restriction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MuhurtaRule {
    /// Weekdays of the Vedic (sunrise-based) day.
    pub weekdays: Vec<Weekday>,
    /// Tithi ordinals 1..=30 (16..=30 are the waning half).
    pub tithis: Vec<u8>,
    /// Moon nakshatra ordinals 1..=27.
    pub nakshatras: Vec<u8>,
    /// Rashi ordinals of the ascendant.
    pub ascendant_signs: Vec<u8>,
    pub body_signs: Vec<SignConstraint>,
    /// Daily inauspicious segments a window may not touch.
    pub exclude_kalams: Vec<Kalam>,
    pub proximity_exclusions: Vec<ProximityExclusion>,
}

impl MuhurtaRule {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.tithis.iter().any(|t| !(1..=30).contains(t)) {
            return Err("tithi ordinals must be in [1, 30]");
        }
        if self.nakshatras.iter().any(|n| !(1..=27).contains(n)) {
            return Err("nakshatra ordinals must be in [1, 27]");
        }
        let bad_sign = |s: &u8| !(1..=12).contains(s);
        if self.ascendant_signs.iter().any(bad_sign)
            || self.body_signs.iter().any(|c| c.signs.iter().any(bad_sign))
        {
            return Err("rashi ordinals must be in [1, 12]");
        }
        if self
            .proximity_exclusions
            .iter()
            .any(|p| !p.orb_deg.is_finite() || p.orb_deg <= 0.0 || p.orb_deg >= 180.0)
        {
            return Err("proximity orb must be in (0, 180)");
        }
        Ok(())
    }
}

/// The same ordinals in both lunar halves.
fn both_pakshas(tithis: &[u8]) -> Vec<u8> {
    tithis
        .iter()
        .copied()
        .chain(tithis.iter().map(|t| t + 15))
        .collect()
}

fn combust_free(grahas: &[Graha]) -> Vec<ProximityExclusion> {
    grahas
        .iter()
        .filter_map(|g| ProximityExclusion::combustion(*g))
        .collect()
}

/// Activities with a predefined rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MuhurtaActivity {
    VehiclePurchase,
    Marriage,
    GrihaPravesh,
    NewBusiness,
    Namakarana,
    PropertyPurchase,
}

pub const ALL_ACTIVITIES: [MuhurtaActivity; 6] = [
    MuhurtaActivity::VehiclePurchase,
    MuhurtaActivity::Marriage,
    MuhurtaActivity::GrihaPravesh,
    MuhurtaActivity::NewBusiness,
    MuhurtaActivity::Namakarana,
    MuhurtaActivity::PropertyPurchase,
];

impl MuhurtaActivity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::VehiclePurchase => "vehicle-purchase",
            Self::Marriage => "marriage",
            Self::GrihaPravesh => "griha-pravesh",
            Self::NewBusiness => "new-business",
            Self::Namakarana => "namakarana",
            Self::PropertyPurchase => "property-purchase",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_ACTIVITIES.iter().copied().find(|a| a.name() == name)
    }

    pub fn rule(self) -> MuhurtaRule {
        use Weekday::{Fri, Mon, Thu, Wed};
        match self {
            Self::VehiclePurchase => MuhurtaRule {
                weekdays: vec![Mon, Wed, Thu, Fri],
                tithis: both_pakshas(&[2, 3, 5, 7, 10, 11, 13]),
                nakshatras: vec![1, 4, 5, 7, 8, 13, 14, 15, 17, 22, 23, 24, 27],
                exclude_kalams: vec![Kalam::RahuKalam],
                ..MuhurtaRule::default()
            },
            Self::Marriage => MuhurtaRule {
                weekdays: vec![Mon, Wed, Thu, Fri],
                nakshatras: vec![4, 5, 10, 12, 13, 15, 17, 19, 21, 26, 27],
                ascendant_signs: vec![3, 6, 7],
                exclude_kalams: vec![Kalam::RahuKalam, Kalam::Yamagandam, Kalam::GulikaKalam],
                proximity_exclusions: combust_free(&[Graha::Shukra, Graha::Guru]),
                ..MuhurtaRule::default()
            },
            Self::GrihaPravesh => MuhurtaRule {
                nakshatras: vec![4, 5, 12, 14, 17, 21, 26, 27],
                body_signs: vec![SignConstraint {
                    body: Body::Sun,
                    signs: vec![1, 2, 3, 11],
                }],
                exclude_kalams: vec![Kalam::RahuKalam, Kalam::Yamagandam],
                proximity_exclusions: combust_free(&[Graha::Guru]),
                ..MuhurtaRule::default()
            },
            Self::NewBusiness => MuhurtaRule {
                weekdays: vec![Wed, Thu, Fri],
                exclude_kalams: vec![Kalam::RahuKalam],
                proximity_exclusions: combust_free(&[Graha::Buddh]),
                ..MuhurtaRule::default()
            },
            Self::Namakarana => MuhurtaRule {
                weekdays: vec![Mon, Wed, Thu, Fri],
                tithis: both_pakshas(&[1, 2, 3, 5, 6, 7, 10, 11, 12, 13]),
                nakshatras: vec![1, 4, 5, 7, 8, 12, 13, 14, 15, 17, 21, 22, 23, 24, 26, 27],
                exclude_kalams: vec![Kalam::RahuKalam],
                ..MuhurtaRule::default()
            },
            Self::PropertyPurchase => MuhurtaRule {
                weekdays: vec![Thu, Fri],
                nakshatras: vec![5, 7, 9, 10, 16, 17, 19, 27],
                exclude_kalams: vec![Kalam::RahuKalam],
                ..MuhurtaRule::default()
            },
        }
    }
}

impl std::fmt::Display for MuhurtaActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
