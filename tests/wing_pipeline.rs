use approx::assert_relative_eq;
use cadwing::surface::rectangle_outline;
use cadwing::{
    AdaptiveSpacing, BoundedFace, ChordlineMarcher, CylinderMapping, MarchParams, Orientation,
    Point3, ProfileFormat, SpacingPlan, SurfacePoint3, Termination, Vector3, Wing, WingExport,
};

fn data_file(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn bent_face() -> BoundedFace<CylinderMapping> {
    let mapping =
        CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 20.0).unwrap();
    BoundedFace::new(mapping, rectangle_outline(30.0, 40.0)).unwrap()
}

fn root() -> SurfacePoint3 {
    SurfacePoint3::new_normalize(Point3::new(15.0, 0.0, 0.0), -Vector3::y())
}

#[test]
fn profile_table_to_placed_sections() {
    let mut wing = Wing::new("bent");
    let name = wing
        .load_profile(data_file("biconvex.dat"), Some("biconvex"), &ProfileFormat::default())
        .unwrap();
    assert_eq!(name, "biconvex");

    let profile = wing.profile("biconvex").unwrap();
    assert_eq!(profile.leading_edge_idx(), 10);
    assert_eq!(profile.trailing_edge_idx(), 0);

    let face = bent_face();
    let params = MarchParams::from_json_str(r#"{"min_tip_distance": 0.5}"#).unwrap();
    let marcher = ChordlineMarcher::new(&face, params).unwrap();
    let march = marcher
        .march_adaptive(&root(), &AdaptiveSpacing::new(5.0, 1.0))
        .unwrap();
    assert_eq!(march.termination, Termination::Tip);

    wing.add_chordlines("biconvex", &march.samples, Orientation::Positive, true)
        .unwrap();
    assert_eq!(wing.len(), march.len());

    for (section, sample) in wing.sections().zip(&march.samples) {
        assert_relative_eq!(section.lead_pos(), sample.leading, epsilon = 1e-9);
        assert_relative_eq!(section.trail_pos(), sample.trailing, epsilon = 1e-9);
        assert_relative_eq!(section.chord(), 30.0, epsilon = 1e-6);

        // Every point of the outline lies in the cutting plane of its station
        let normal = sample.normal();
        for p in section.xyz() {
            assert_relative_eq!(normal.dot(&(p - sample.leading)), 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn estimated_normals_match_march_normals() {
    let face = bent_face();
    let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
    let plan = SpacingPlan::new(&[(0.0, 4.0), (10.0, 2.0)]).unwrap();
    let march = marcher.march_scheduled(&root(), &plan).unwrap();
    assert!(march.reached_tip());

    let mut from_march = Wing::new("a");
    let mut estimated = Wing::new("b");
    for wing in [&mut from_march, &mut estimated] {
        wing.load_profile(data_file("biconvex.dat"), Some("p"), &ProfileFormat::default())
            .unwrap();
    }
    from_march
        .add_chordlines("p", &march.samples, Orientation::Negative, true)
        .unwrap();
    estimated
        .add_chordlines("p", &march.samples, Orientation::Positive, false)
        .unwrap();

    // The march normals point back towards the root while the estimated normals follow the span,
    // so the two agree once the march normals are flipped.
    for (a, b) in from_march.sections().zip(estimated.sections()) {
        assert!(a.normal().dot(&b.normal()) > 0.95);
    }
}

#[test]
fn export_round_trips_through_json() {
    let face = bent_face();
    let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
    let march = marcher
        .march_adaptive(&root(), &AdaptiveSpacing::new(8.0, 0.0))
        .unwrap();

    let mut wing = Wing::new("bent");
    let name = wing
        .load_profile(data_file("biconvex.dat"), None, &ProfileFormat::default())
        .unwrap();
    wing.add_chordlines(&name, &march.samples, Orientation::Positive, true)
        .unwrap();

    let runs = wing.segmented_sections(2).unwrap();
    assert_eq!(runs.len(), march.len());
    assert!(runs.iter().all(|r| r.len() == 4));

    let export = wing.export();
    let back: WingExport = serde_json::from_str(&wing.to_json().unwrap()).unwrap();
    assert_eq!(back.name, "bent");
    assert_eq!(back.sections.len(), export.sections.len());
    for (a, b) in back.sections.iter().zip(&export.sections) {
        assert_eq!(a.profile, name);
        assert_relative_eq!(a.chord, b.chord, epsilon = 1e-9);
        assert_relative_eq!(a.lead, b.lead, epsilon = 1e-9);
        assert_eq!(a.points.len(), b.points.len());
    }
}
