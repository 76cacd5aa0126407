use crate::aspects::types::{Aspect, AspectObjectRef, AspectType, OrbTable};
use crate::bodies::{CelestialBody, Point, ResolvedPoint};
use crate::geometry::angular_separation;
use crate::zodiac::ZodiacFrame;
use serde::{Deserialize, Serialize};

/// A point offered to the aspect engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectPoint {
    pub point: Point,
    pub longitude: f64,
}

impl AspectPoint {
    pub fn new(point: Point, longitude: f64) -> Self {
        Self { point, longitude }
    }

    pub fn from_body(body: &CelestialBody) -> Self {
        Self::new(body.point, body.longitude)
    }

    pub fn from_resolved(resolved: &ResolvedPoint, frame: ZodiacFrame) -> Self {
        Self::new(resolved.point, resolved.longitude(frame))
    }
}

/// Which pairs of points are tested
#[derive(Debug, Clone, Copy)]
pub enum PointPairing<'a> {
    /// Every unordered pair inside one set
    Within {
        layer_id: &'a str,
        points: &'a [AspectPoint],
    },
    /// Every point of one set against every point of another
    Across {
        from_layer: &'a str,
        from: &'a [AspectPoint],
        to_layer: &'a str,
        to: &'a [AspectPoint],
    },
}

/// Orb-based aspect finder shared by natal, synastry, composite, transit and
/// progression analysis
#[derive(Debug, Clone, Copy)]
pub struct AspectEngine<'t> {
    table: &'t OrbTable,
    luminary_overrides: bool,
}

impl AspectEngine<'static> {
    /// Standard orbs with luminary overrides
    pub fn standard() -> Self {
        Self::new(OrbTable::standard())
    }
}

impl<'t> AspectEngine<'t> {
    pub fn new(table: &'t OrbTable) -> Self {
        Self {
            table,
            luminary_overrides: true,
        }
    }

    /// Use base orbs even when the Sun or Moon takes part.
    pub fn without_luminary_overrides(mut self) -> Self {
        self.luminary_overrides = false;
        self
    }

    pub fn table(&self) -> &'t OrbTable {
        self.table
    }

    /// Find every aspect for a pairing, strongest first.
    pub fn find_aspects(&self, pairing: PointPairing<'_>) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        match pairing {
            PointPairing::Within { layer_id, points } => {
                for i in 0..points.len() {
                    for j in (i + 1)..points.len() {
                        self.collect_pair(layer_id, &points[i], layer_id, &points[j], &mut aspects);
                    }
                }
            }
            PointPairing::Across {
                from_layer,
                from,
                to_layer,
                to,
            } => {
                for a in from {
                    for b in to {
                        self.collect_pair(from_layer, a, to_layer, b, &mut aspects);
                    }
                }
            }
        }
        aspects.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        aspects
    }

    pub fn within(&self, layer_id: &str, points: &[AspectPoint]) -> Vec<Aspect> {
        self.find_aspects(PointPairing::Within { layer_id, points })
    }

    pub fn across(
        &self,
        from_layer: &str,
        from: &[AspectPoint],
        to_layer: &str,
        to: &[AspectPoint],
    ) -> Vec<Aspect> {
        self.find_aspects(PointPairing::Across {
            from_layer,
            from,
            to_layer,
            to,
        })
    }

    /// Orb allowed for an aspect type between two points
    pub fn orb_for(&self, aspect_type: AspectType, a: Point, b: Point, base_orb: f64) -> f64 {
        if self.luminary_overrides && (a.is_luminary() || b.is_luminary()) {
            self.table.luminary_orb(aspect_type).unwrap_or(base_orb)
        } else {
            base_orb
        }
    }

    /// Every aspect type matching one pair. Overlapping orb windows may
    /// yield more than one.
    pub fn match_pair(&self, a: &AspectPoint, b: &AspectPoint) -> Vec<(AspectType, f64, f64, f64)> {
        let separation = angular_separation(a.longitude, b.longitude);
        self.table
            .definitions
            .iter()
            .filter_map(|def| {
                let orb = self.orb_for(def.aspect_type, a.point, b.point, def.orb);
                let deviation = separation - def.angle;
                if deviation.abs() <= orb {
                    Some((def.aspect_type, def.angle, deviation, def.weight / (1.0 + deviation.abs())))
                } else {
                    None
                }
            })
            .collect()
    }

    fn collect_pair(
        &self,
        from_layer: &str,
        a: &AspectPoint,
        to_layer: &str,
        b: &AspectPoint,
        out: &mut Vec<Aspect>,
    ) {
        let separation = angular_separation(a.longitude, b.longitude);
        for (aspect_type, exact_angle, orb, strength) in self.match_pair(a, b) {
            out.push(Aspect {
                from: object_ref(from_layer, a),
                to: object_ref(to_layer, b),
                aspect_type,
                exact_angle,
                separation,
                orb,
                strength,
            });
        }
    }
}

impl Default for AspectEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

fn object_ref(layer_id: &str, p: &AspectPoint) -> AspectObjectRef {
    AspectObjectRef {
        layer_id: layer_id.to_string(),
        point: p.point,
        name: p.point.name().to_string(),
        longitude: p.longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::Body;

    fn pt(body: Body, lon: f64) -> AspectPoint {
        AspectPoint::new(body.into(), lon)
    }

    #[test]
    fn test_conjunction_within_orb() {
        let engine = AspectEngine::standard();
        let matches = engine.match_pair(&pt(Body::Mars, 100.0), &pt(Body::Venus, 102.0));
        assert_eq!(matches.len(), 1);
        let (aspect_type, angle, orb, strength) = matches[0];
        assert_eq!(aspect_type, AspectType::Conjunction);
        assert_eq!(angle, 0.0);
        assert!((orb - 2.0).abs() < 1e-9);
        assert!((strength - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_signed_orb() {
        let engine = AspectEngine::standard();
        let matches = engine.match_pair(&pt(Body::Mars, 0.0), &pt(Body::Saturn, 87.0));
        let square = matches.iter().find(|m| m.0 == AspectType::Square).unwrap();
        assert!((square.2 + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_luminary_override_widens_orb() {
        let engine = AspectEngine::standard();
        // 9 degrees off a conjunction: beyond the base 8, inside the Sun's 10
        let with_sun = engine.match_pair(&pt(Body::Sun, 10.0), &pt(Body::Mars, 19.0));
        assert!(with_sun.iter().any(|m| m.0 == AspectType::Conjunction));

        let without_sun = engine.match_pair(&pt(Body::Venus, 10.0), &pt(Body::Mars, 19.0));
        assert!(!without_sun.iter().any(|m| m.0 == AspectType::Conjunction));

        let no_override = engine.without_luminary_overrides();
        let base = no_override.match_pair(&pt(Body::Sun, 10.0), &pt(Body::Mars, 19.0));
        assert!(!base.iter().any(|m| m.0 == AspectType::Conjunction));
    }

    #[test]
    fn test_overlapping_windows_yield_two_aspects() {
        let mut table = OrbTable::standard().clone();
        for def in table.definitions.iter_mut() {
            if def.aspect_type == AspectType::Quincunx || def.aspect_type == AspectType::BiQuintile {
                def.orb = 5.0;
            }
        }
        let engine = AspectEngine::new(&table);
        let matches = engine.match_pair(&pt(Body::Mars, 0.0), &pt(Body::Jupiter, 147.0));
        let types: Vec<AspectType> = matches.iter().map(|m| m.0).collect();
        assert!(types.contains(&AspectType::Quincunx));
        assert!(types.contains(&AspectType::BiQuintile));
    }

    #[test]
    fn test_quincunx_orb_boundary() {
        let engine = AspectEngine::standard();
        let matches = engine.match_pair(&pt(Body::Mars, 0.0), &pt(Body::Jupiter, 147.0));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, AspectType::Quincunx);
        let matches = engine.match_pair(&pt(Body::Mars, 0.0), &pt(Body::Jupiter, 146.5));
        assert!(matches.is_empty());
        // Luminary trine orb is 10, so 129 still counts with the Sun
        let matches = engine.match_pair(&pt(Body::Sun, 0.0), &pt(Body::Moon, 129.0));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, AspectType::Trine);
    }

    #[test]
    fn test_within_sorted_by_strength() {
        let points = vec![
            pt(Body::Sun, 0.0),
            pt(Body::Moon, 1.0),
            pt(Body::Mars, 95.0),
            pt(Body::Venus, 180.0),
        ];
        let aspects = AspectEngine::standard().within("natal", &points);
        assert!(!aspects.is_empty());
        for pair in aspects.windows(2) {
            assert!(pair[0].strength >= pair[1].strength);
        }
        assert_eq!(aspects[0].aspect_type, AspectType::Conjunction);
        assert!(aspects[0].connects(Body::Sun.into(), Body::Moon.into()));
        assert_eq!(aspects[0].from.layer_id, "natal");
    }

    #[test]
    fn test_across_includes_same_body() {
        let a = vec![pt(Body::Sun, 10.0)];
        let b = vec![pt(Body::Sun, 12.0), pt(Body::Moon, 190.0)];
        let aspects = AspectEngine::standard().across("natal", &a, "partner", &b);
        assert_eq!(aspects.len(), 2);
        assert!(aspects.iter().all(|x| x.from.layer_id == "natal" && x.to.layer_id == "partner"));
    }
}
