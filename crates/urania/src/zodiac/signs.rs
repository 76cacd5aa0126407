//! Sign lookup for the two zodiac frames.
//!
//! The tropical zodiac is twelve uniform 30 degree signs. The sidereal
//! zodiac follows the constellation boundaries, so its thirteen arcs have
//! uneven widths and Ophiuchus sits between Scorpio and Sagittarius.

use crate::geometry::normalize_degrees;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];

    pub fn name(self) -> &'static str {
        match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TropicalSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl TropicalSign {
    pub const ALL: [TropicalSign; 12] = [
        TropicalSign::Aries,
        TropicalSign::Taurus,
        TropicalSign::Gemini,
        TropicalSign::Cancer,
        TropicalSign::Leo,
        TropicalSign::Virgo,
        TropicalSign::Libra,
        TropicalSign::Scorpio,
        TropicalSign::Sagittarius,
        TropicalSign::Capricorn,
        TropicalSign::Aquarius,
        TropicalSign::Pisces,
    ];

    /// Sign containing the longitude: `floor(longitude / 30)`.
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize_degrees(longitude) / 30.0).floor() as usize;
        Self::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn start(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn name(self) -> &'static str {
        match self {
            TropicalSign::Aries => "Aries",
            TropicalSign::Taurus => "Taurus",
            TropicalSign::Gemini => "Gemini",
            TropicalSign::Cancer => "Cancer",
            TropicalSign::Leo => "Leo",
            TropicalSign::Virgo => "Virgo",
            TropicalSign::Libra => "Libra",
            TropicalSign::Scorpio => "Scorpio",
            TropicalSign::Sagittarius => "Sagittarius",
            TropicalSign::Capricorn => "Capricorn",
            TropicalSign::Aquarius => "Aquarius",
            TropicalSign::Pisces => "Pisces",
        }
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiderealSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Ophiuchus,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// One sidereal sign's half-open span `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignArc {
    pub sign: SiderealSign,
    pub start: f64,
    pub end: f64,
}

impl SignArc {
    pub fn contains(&self, longitude: f64) -> bool {
        self.start <= longitude && longitude < self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Sidereal sign arcs. Consecutive arcs share boundaries and together tile
/// [0, 360).
pub const SIDEREAL_ARCS: [SignArc; 13] = [
    SignArc { sign: SiderealSign::Aries, start: 0.0, end: 24.4 },
    SignArc { sign: SiderealSign::Taurus, start: 24.4, end: 61.3 },
    SignArc { sign: SiderealSign::Gemini, start: 61.3, end: 89.2 },
    SignArc { sign: SiderealSign::Cancer, start: 89.2, end: 109.1 },
    SignArc { sign: SiderealSign::Leo, start: 109.1, end: 145.1 },
    SignArc { sign: SiderealSign::Virgo, start: 145.1, end: 188.9 },
    SignArc { sign: SiderealSign::Libra, start: 188.9, end: 211.9 },
    SignArc { sign: SiderealSign::Scorpio, start: 211.9, end: 218.6 },
    SignArc { sign: SiderealSign::Ophiuchus, start: 218.6, end: 237.2 },
    SignArc { sign: SiderealSign::Sagittarius, start: 237.2, end: 270.6 },
    SignArc { sign: SiderealSign::Capricorn, start: 270.6, end: 298.8 },
    SignArc { sign: SiderealSign::Aquarius, start: 298.8, end: 322.5 },
    SignArc { sign: SiderealSign::Pisces, start: 322.5, end: 360.0 },
];

/// Arc containing a sidereal longitude.
pub fn sidereal_arc(longitude: f64) -> &'static SignArc {
    let lon = normalize_degrees(longitude);
    SIDEREAL_ARCS
        .iter()
        .find(|arc| arc.contains(lon))
        // Only reachable for NaN input
        .unwrap_or(&SIDEREAL_ARCS[0])
}

impl SiderealSign {
    pub const ALL: [SiderealSign; 13] = [
        SiderealSign::Aries,
        SiderealSign::Taurus,
        SiderealSign::Gemini,
        SiderealSign::Cancer,
        SiderealSign::Leo,
        SiderealSign::Virgo,
        SiderealSign::Libra,
        SiderealSign::Scorpio,
        SiderealSign::Ophiuchus,
        SiderealSign::Sagittarius,
        SiderealSign::Capricorn,
        SiderealSign::Aquarius,
        SiderealSign::Pisces,
    ];

    pub fn from_longitude(longitude: f64) -> Self {
        sidereal_arc(longitude).sign
    }

    pub fn arc(self) -> &'static SignArc {
        &SIDEREAL_ARCS[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            SiderealSign::Ophiuchus => "Ophiuchus",
            other => other.classical().map(TropicalSign::name).unwrap_or("Ophiuchus"),
        }
    }

    /// The twelve-sign counterpart; Ophiuchus has none.
    pub fn classical(self) -> Option<TropicalSign> {
        match self {
            SiderealSign::Aries => Some(TropicalSign::Aries),
            SiderealSign::Taurus => Some(TropicalSign::Taurus),
            SiderealSign::Gemini => Some(TropicalSign::Gemini),
            SiderealSign::Cancer => Some(TropicalSign::Cancer),
            SiderealSign::Leo => Some(TropicalSign::Leo),
            SiderealSign::Virgo => Some(TropicalSign::Virgo),
            SiderealSign::Libra => Some(TropicalSign::Libra),
            SiderealSign::Scorpio => Some(TropicalSign::Scorpio),
            SiderealSign::Ophiuchus => None,
            SiderealSign::Sagittarius => Some(TropicalSign::Sagittarius),
            SiderealSign::Capricorn => Some(TropicalSign::Capricorn),
            SiderealSign::Aquarius => Some(TropicalSign::Aquarius),
            SiderealSign::Pisces => Some(TropicalSign::Pisces),
        }
    }

    pub fn element(self) -> Element {
        self.classical().map(TropicalSign::element).unwrap_or(Element::Water)
    }

    pub fn modality(self) -> Modality {
        self.classical().map(TropicalSign::modality).unwrap_or(Modality::Fixed)
    }
}

/// Which zodiac a longitude is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacFrame {
    Tropical,
    Sidereal,
}

/// A sign in either frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "frame", content = "sign", rename_all = "lowercase")]
pub enum ZodiacSign {
    Tropical(TropicalSign),
    Sidereal(SiderealSign),
}

impl ZodiacSign {
    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Tropical(sign) => sign.name(),
            ZodiacSign::Sidereal(sign) => sign.name(),
        }
    }

    pub fn element(self) -> Element {
        match self {
            ZodiacSign::Tropical(sign) => sign.element(),
            ZodiacSign::Sidereal(sign) => sign.element(),
        }
    }

    pub fn modality(self) -> Modality {
        match self {
            ZodiacSign::Tropical(sign) => sign.modality(),
            ZodiacSign::Sidereal(sign) => sign.modality(),
        }
    }
}

impl ZodiacFrame {
    /// Signs of this frame in zodiac order.
    pub fn signs(self) -> Vec<ZodiacSign> {
        match self {
            ZodiacFrame::Tropical => TropicalSign::ALL.into_iter().map(ZodiacSign::Tropical).collect(),
            ZodiacFrame::Sidereal => SiderealSign::ALL.into_iter().map(ZodiacSign::Sidereal).collect(),
        }
    }

    pub fn sign_of(self, longitude: f64) -> ZodiacSign {
        match self {
            ZodiacFrame::Tropical => ZodiacSign::Tropical(TropicalSign::from_longitude(longitude)),
            ZodiacFrame::Sidereal => ZodiacSign::Sidereal(SiderealSign::from_longitude(longitude)),
        }
    }

    /// Degrees past the start of the sign holding `longitude`.
    pub fn degrees_in_sign(self, longitude: f64) -> f64 {
        let lon = normalize_degrees(longitude);
        match self {
            ZodiacFrame::Tropical => lon - TropicalSign::from_longitude(lon).start(),
            ZodiacFrame::Sidereal => lon - sidereal_arc(lon).start,
        }
    }

    /// Width of the sign holding `longitude`, degrees.
    pub fn sign_width(self, longitude: f64) -> f64 {
        match self {
            ZodiacFrame::Tropical => 30.0,
            ZodiacFrame::Sidereal => sidereal_arc(longitude).width(),
        }
    }

    /// Percentage of the sign already traversed, in [0, 100).
    pub fn sign_percentage(self, longitude: f64) -> f64 {
        self.degrees_in_sign(longitude) / self.sign_width(longitude) * 100.0
    }
}
