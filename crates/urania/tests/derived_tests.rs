mod common;

use chrono::{Duration, TimeZone, Utc};
use common::StubEphemeris;
use urania::aspects::AspectType;
use urania::bodies::Point;
use urania::angles::ayanamsa_for_year;
use urania::derived::{birthday_anchor, CompatibilityBand};
use urania::ephemeris::Body;
use urania::{
    compute_chart, compute_composite, compute_progressions, compute_solar_return,
    compute_synastry, compute_transits, AnalysisSettings, ChartInput, NatalChart, ZodiacFrame,
};

const J2000: f64 = 2_451_545.0;

fn chart(stub: &StubEphemeris, time_known: bool) -> NatalChart {
    let input = ChartInput::from_utc(2000, 1, 1, 12, 0, 51.5, 0.0, time_known).unwrap();
    compute_chart(stub, &input).unwrap()
}

#[test]
fn test_synastry_ignores_luminary_orbs() {
    let a = chart(&StubEphemeris::new(J2000).with_body(Body::Sun, 0.0), true);
    let b = chart(&StubEphemeris::new(J2000).with_body(Body::Mars, 9.0), true);
    let result = compute_synastry(&a, &b, ZodiacFrame::Tropical);

    assert!(result.aspects.is_empty());
    assert_eq!(result.compatibility_score, 0.0);
    assert_eq!(result.compatibility, CompatibilityBand::Difficult);
}

#[test]
fn test_synastry_pairs_major_planets_only() {
    // Chiron, the North Node and the Ascendant all sit exactly on the partner's Mars
    let primary = chart(
        &StubEphemeris::new(J2000)
            .with_body(Body::Sun, 0.0)
            .with_body(Body::Chiron, 50.0)
            .with_body(Body::NorthNode, 50.0)
            .with_angles(50.0, 320.0),
        true,
    );
    // Moon 129 is a trine 9 degrees wide: inside the luminary orb, outside the base 8
    let partner = chart(
        &StubEphemeris::new(J2000)
            .with_body(Body::Mars, 50.0)
            .with_body(Body::Moon, 129.0),
        true,
    );
    assert_eq!(primary.tropical.ascendant, Some(50.0));

    let result = compute_synastry(&primary, &partner, ZodiacFrame::Tropical);
    assert!(result.aspects.is_empty(), "{:?}", result.aspects);

    // The same Sun-Moon pair inside one natal chart does form a trine
    let natal = chart(
        &StubEphemeris::new(J2000)
            .with_body(Body::Sun, 0.0)
            .with_body(Body::Moon, 129.0),
        true,
    );
    assert!(natal.tropical.aspects.iter().any(|a| a.aspect_type == AspectType::Trine
        && a.connects(Point::Body(Body::Sun), Point::Body(Body::Moon))));
}

#[test]
fn test_synastry_score() {
    let stub = StubEphemeris::new(J2000)
        .with_body(Body::Sun, 0.0)
        .with_body(Body::Moon, 120.0);
    let a = chart(&stub, true);
    let b = chart(&stub, true);
    let result = compute_synastry(&a, &b, ZodiacFrame::Tropical);

    // Two exact conjunctions (10) and two exact trines (8)
    assert_eq!(result.aspects.len(), 4);
    assert!(result.aspects.iter().all(|x| x.aspect_type.is_harmonious()));
    assert!((result.compatibility_score - 90.0).abs() < 1e-9);
    assert_eq!(result.compatibility, CompatibilityBand::Exceptional);
}

#[test]
fn test_synastry_house_overlays() {
    let a = chart(
        &StubEphemeris::new(J2000).with_body(Body::Sun, 0.0).with_angles(0.0, 270.0),
        true,
    );
    let b = chart(
        &StubEphemeris::new(J2000).with_body(Body::Mars, 45.0).with_angles(300.0, 210.0),
        true,
    );
    let result = compute_synastry(&a, &b, ZodiacFrame::Tropical);

    let partner_in_primary = result.partner_in_primary_houses.unwrap();
    assert_eq!(partner_in_primary.len(), 1);
    assert_eq!(partner_in_primary[0].point, Point::Body(Body::Mars));
    assert_eq!(partner_in_primary[0].placement.house, 2);

    let primary_in_partner = result.primary_in_partner_houses.unwrap();
    assert_eq!(primary_in_partner[0].placement.house, 3);

    let unknown = chart(&StubEphemeris::new(J2000).with_body(Body::Sun, 0.0), false);
    let result = compute_synastry(&unknown, &b, ZodiacFrame::Tropical);
    assert!(result.partner_in_primary_houses.is_none());
    assert!(result.primary_in_partner_houses.is_some());
}

#[test]
fn test_composite_midpoints_wrap() {
    let a = chart(
        &StubEphemeris::new(J2000).with_body(Body::Sun, 350.0).with_angles(0.0, 270.0),
        true,
    );
    let b = chart(
        &StubEphemeris::new(J2000).with_body(Body::Sun, 10.0).with_angles(20.0, 290.0),
        true,
    );
    let result = compute_composite(&a, &b, ZodiacFrame::Tropical);

    assert_eq!(result.ascendant, Some(10.0));
    let sun = result.bodies.iter().find(|x| x.point == Point::Body(Body::Sun)).unwrap();
    assert!(sun.longitude < 1e-9 || sun.longitude > 360.0 - 1e-9);
    assert_eq!(sun.house.unwrap().house, 12);

    assert_eq!(result.aspects.len(), 1);
    let aspect = &result.aspects[0];
    assert_eq!(aspect.aspect_type, AspectType::Conjunction);
    assert_eq!(aspect.from.layer_id, "composite");
    assert!(aspect.connects(Point::Body(Body::Sun), Point::ASCENDANT));
}

#[test]
fn test_transits_against_natal() {
    let stub = StubEphemeris::new(J2000)
        .with_body(Body::Sun, 100.0)
        .with_speed(Body::Sun, 1.0)
        .with_body(Body::Jupiter, 200.0)
        .with_speed(Body::Jupiter, 0.1);
    let natal = chart(&stub, true);
    let target = natal.context.datetime + Duration::days(60);
    let result = compute_transits(&stub, &natal, Some(target), &AnalysisSettings::default());

    assert_eq!(result.target, target);
    assert_eq!(result.positions.len(), 2);
    assert!(result.positions.iter().all(|p| p.frame == ZodiacFrame::Sidereal));
    assert!(result.positions.iter().all(|p| p.house.is_some()));

    let sun = Point::Body(Body::Sun);
    let sextile = result
        .active
        .iter()
        .find(|a| a.aspect_type == AspectType::Sextile && a.connects(sun, sun))
        .unwrap();
    assert_eq!(sextile.from.layer_id, "transit");
    assert_eq!(sextile.to.layer_id, "natal");

    let jupiter = Point::Body(Body::Jupiter);
    let wide = result
        .aspects
        .iter()
        .find(|a| a.aspect_type == AspectType::Conjunction && a.connects(jupiter, jupiter))
        .unwrap();
    assert!((wide.abs_orb() - 6.0).abs() < 1e-6);
    assert!(!result.active.contains(wide));
    assert!(result.active.iter().all(|a| a.abs_orb() <= 2.0));
}

#[test]
fn test_transits_decades_later_keep_natal_ayanamsa() {
    let stub = StubEphemeris::new(J2000).with_body(Body::Sun, 100.0);
    let natal = chart(&stub, true);
    let target = Utc.with_ymd_and_hms(2072, 1, 1, 12, 0, 0).unwrap();
    let result = compute_transits(&stub, &natal, Some(target), &AnalysisSettings::default());

    let natal_ayanamsa = natal.context.ayanamsa;
    let target_ayanamsa = ayanamsa_for_year(2072);
    assert!((target_ayanamsa - natal_ayanamsa - 1.0).abs() < 1e-9);

    let sun = Point::Body(Body::Sun);
    let transiting = result.positions.iter().find(|p| p.point == sun).unwrap();
    assert!((transiting.longitude - (100.0 - natal_ayanamsa)).abs() < 1e-9);
    assert!((transiting.longitude - (100.0 - target_ayanamsa)).abs() > 0.5);

    let conjunction = result
        .aspects
        .iter()
        .find(|a| a.aspect_type == AspectType::Conjunction && a.connects(sun, sun))
        .unwrap();
    assert!(conjunction.abs_orb() < 1e-9);
}

#[test]
fn test_transit_active_orb_setting() {
    let stub = StubEphemeris::new(J2000)
        .with_body(Body::Jupiter, 200.0)
        .with_speed(Body::Jupiter, 0.1);
    let natal = chart(&stub, true);
    let target = natal.context.datetime + Duration::days(60);
    let settings = AnalysisSettings {
        transit_active_orb: 7.0,
        ..AnalysisSettings::default()
    };
    let result = compute_transits(&stub, &natal, Some(target), &settings);
    assert_eq!(result.active.len(), 1);
}

#[test]
fn test_progressions_day_for_year() {
    let stub = StubEphemeris::new(J2000)
        .with_body(Body::Sun, 100.0)
        .with_speed(Body::Sun, 1.0)
        .with_body(Body::Moon, 250.0)
        .with_speed(Body::Moon, 13.0);
    let natal = chart(&stub, true);
    let target = natal.context.datetime + Duration::days(3652);
    let result = compute_progressions(&stub, &natal, target);

    assert_eq!(result.elapsed_days, 3652);
    let offset = 3652.0 / 365.25;
    assert!((result.offset_days - offset).abs() < 1e-12);
    assert!((result.progressed_julian_day - (J2000 + offset)).abs() < 1e-9);

    let sun = result
        .movements
        .iter()
        .find(|m| m.point == Point::Body(Body::Sun))
        .unwrap();
    assert!((sun.delta - offset).abs() < 1e-6);
    assert!(!sun.sign_changed);

    let moon = result
        .movements
        .iter()
        .find(|m| m.point == Point::Body(Body::Moon))
        .unwrap();
    assert!((moon.delta - 13.0 * offset).abs() < 1e-6);
    assert!(moon.sign_changed);

    assert!(result.angles.is_some());
    assert!(result.aspects.iter().all(|a| a.from.layer_id == "progressed"));
}

#[test]
fn test_progressions_without_birth_time() {
    let stub = StubEphemeris::new(J2000).with_body(Body::Sun, 100.0);
    let natal = chart(&stub, false);
    let target = natal.context.datetime + Duration::days(400);
    let result = compute_progressions(&stub, &natal, target);

    assert!(result.angles.is_none());
    assert!(result.positions.iter().all(|p| p.house.is_none()));
}

#[test]
fn test_solar_return_finds_closest_day() {
    let stub = StubEphemeris::new(J2000)
        .with_body(Body::Sun, 280.0)
        .with_speed(Body::Sun, 360.0 / 365.0);
    let natal = chart(&stub, true);
    let result = compute_solar_return(&stub, &natal, 2001, &AnalysisSettings::default());

    assert_eq!(result.date, Utc.with_ymd_and_hms(2000, 12, 31, 12, 0, 0).unwrap());
    assert!(result.difference.unwrap() < 1e-6);
    let chart = result.chart.unwrap();
    assert_eq!(chart.context.datetime, result.date);
    assert_eq!(chart.context.location, natal.context.location);
}

#[test]
fn test_solar_return_earliest_tie_wins() {
    let stub = StubEphemeris::new(J2000).with_body(Body::Sun, 280.0);
    let natal = chart(&stub, true);

    let result = compute_solar_return(&stub, &natal, 2005, &AnalysisSettings::default());
    assert_eq!(result.date, Utc.with_ymd_and_hms(2004, 12, 2, 12, 0, 0).unwrap());

    let settings = AnalysisSettings {
        solar_return_window_days: 0,
        ..AnalysisSettings::default()
    };
    let result = compute_solar_return(&stub, &natal, 2005, &settings);
    assert_eq!(result.date, Utc.with_ymd_and_hms(2005, 1, 1, 12, 0, 0).unwrap());
}

#[test]
fn test_solar_return_without_natal_sun() {
    let stub = StubEphemeris::new(J2000).with_body(Body::Moon, 10.0);
    let natal = chart(&stub, true);
    let result = compute_solar_return(&stub, &natal, 2001, &AnalysisSettings::default());

    assert_eq!(result.date, Utc.with_ymd_and_hms(2001, 1, 1, 12, 0, 0).unwrap());
    assert!(result.natal_sun.is_none());
    assert!(result.return_sun.is_none());
    assert!(result.difference.is_none());
    assert!(result.chart.is_none());
}

#[test]
fn test_solar_return_when_no_day_computes() {
    let natal = chart(&StubEphemeris::new(J2000).with_body(Body::Sun, 280.0), true);
    let blind = StubEphemeris::new(J2000).with_body(Body::Moon, 10.0);
    let result = compute_solar_return(&blind, &natal, 2001, &AnalysisSettings::default());

    assert_eq!(result.date, Utc.with_ymd_and_hms(2001, 1, 1, 12, 0, 0).unwrap());
    assert!(result.natal_sun.is_some());
    assert!(result.return_sun.is_none());
    assert!(result.chart.is_none());
}

#[test]
fn test_leap_day_birthday_anchor() {
    let stub = StubEphemeris::new(J2000).with_body(Body::Sun, 340.0);
    let input = ChartInput::from_utc(2000, 2, 29, 12, 0, 51.5, 0.0, true).unwrap();
    let natal = compute_chart(&stub, &input).unwrap();

    assert_eq!(
        birthday_anchor(&natal, 2001),
        Utc.with_ymd_and_hms(2001, 2, 28, 12, 0, 0).unwrap()
    );
    assert_eq!(
        birthday_anchor(&natal, 2004),
        Utc.with_ymd_and_hms(2004, 2, 29, 12, 0, 0).unwrap()
    );
}
