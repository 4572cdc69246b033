use nalgebra::Point2;

use sidrift_rs::discretization::generator::create_regular_2d_lattice;
use sidrift_rs::physics::bc::{
    BACK_PLANE, CENTRAL_STRIP, FieldRegime, NEIGHBOUR_STRIPS, SubdomainRule,
};
use sidrift_rs::physics::{
    BoundaryRegion, DeviceGeometry, DomainBounds, PeriodicLateral, StripGeometry,
};

fn count(marks: &[Option<&SubdomainRule>], label: &str) -> usize {
    marks
        .iter()
        .flatten()
        .filter(|r| r.label.as_str() == label)
        .count()
}

fn strips() -> StripGeometry {
    StripGeometry::new(80.0, 20.0, 1).expect("valid strip geometry")
}

#[test]
fn verify_strip_window_edges() {
    let strips = strips();
    assert_eq!(strips.left_limit(), 30.0);
    assert_eq!(strips.right_limit(), 50.0);

    let central = BoundaryRegion::CentralStrip(strips);
    // translated x = 30, the left edge itself is inside thanks to the (1 - eps) widening
    assert!(central.classify(&Point2::new(110.0, 0.0), true));
    // translated x = 50, the right edge
    assert!(central.classify(&Point2::new(130.0, 0.0), true));
    // translated x = 51 and -1
    assert!(!central.classify(&Point2::new(131.0, 0.0), true));
    assert!(!central.classify(&Point2::new(79.0, 0.0), true));
}

#[test]
fn verify_neighbour_slots() {
    let strips = StripGeometry::new(80.0, 20.0, 2).unwrap();
    let neighbours = BoundaryRegion::NeighbourStrip(strips);
    let central = BoundaryRegion::CentralStrip(strips);

    let hits: Vec<u32> = (0..strips.strip_count())
        .filter(|&slot| {
            let x = 80.0 * f64::from(slot) + 40.0;
            neighbours.classify(&Point2::new(x, 0.0), true)
        })
        .collect();
    assert_eq!(hits, vec![0, 1, 3, 4]);
    assert!(central.classify(&Point2::new(200.0, 0.0), true));
}

#[test]
fn verify_back_plane_asymmetry() {
    let bounds = DomainBounds::new(0.0, 240.0, 300.0).unwrap();
    let electric = BoundaryRegion::BackPlane(bounds);
    let weighting = BoundaryRegion::BackPlaneWeighting(bounds);

    // y condition met, x outside the lateral range
    let outside = Point2::new(400.0, 300.0);
    assert!(!electric.classify(&outside, true));
    assert!(weighting.classify(&outside, true));

    // y condition met, point not flagged as mesh boundary
    let interior = Point2::new(100.0, 300.0);
    assert!(!electric.classify(&interior, false));
    assert!(weighting.classify(&interior, false));

    // both agree on a proper back-plane vertex
    let on_plane = Point2::new(100.0, 300.0);
    assert!(electric.classify(&on_plane, true));
    assert!(weighting.classify(&on_plane, true));
}

#[test]
fn verify_weighting_strips_follow_depletion_width() {
    let strips = strips();
    let central = BoundaryRegion::CentralStripWeighting {
        strips,
        depletion_width: 150.0,
    };
    let neighbours = BoundaryRegion::NeighbourStripWeighting {
        strips,
        depletion_width: 150.0,
    };

    assert!(central.classify(&Point2::new(120.0, 0.0), true));
    assert!(!central.classify(&Point2::new(120.0, 0.0), false));
    assert!(!central.classify(&Point2::new(120.0, 150.0), true));
    assert!(neighbours.classify(&Point2::new(40.0, 0.0), true));
    assert!(!neighbours.classify(&Point2::new(120.0, 0.0), true));
}

#[test]
fn verify_periodic_identification() {
    let periodic = PeriodicLateral::new(DomainBounds::new(0.0, 240.0, 300.0).unwrap());
    for y in [0.0, 12.5, 150.0, 300.0] {
        let image = periodic.map(&Point2::new(240.0, y));
        assert_eq!(image.x, 0.0);
        assert_eq!(image.y, y);
        assert!(periodic.inside(&image, false));
    }
}

#[test]
fn verify_lattice_marking_per_regime() {
    println!("Test: marking a 5 µm lattice for both field regimes");
    let device = DeviceGeometry::new(80.0, 20.0, 1, 300.0)
        .unwrap()
        .with_depletion_width(200.0)
        .unwrap()
        .with_voltages(0.0, 150.0);
    let mesh = create_regular_2d_lattice([0.0, device.x_max()], device.depth, 48, 60);

    let electric = device.registry(FieldRegime::Electric);
    let weighting = device.registry(FieldRegime::Weighting);

    let e_marks = electric.mark(&mesh);
    assert_eq!(count(&e_marks, CENTRAL_STRIP), 5);
    assert_eq!(count(&e_marks, NEIGHBOUR_STRIPS), 10);
    assert_eq!(count(&e_marks, BACK_PLANE), 49);

    // the weighting back plane sits at the depletion edge and ignores the boundary flag
    let w_marks = weighting.mark(&mesh);
    assert_eq!(count(&w_marks, CENTRAL_STRIP), 5);
    assert_eq!(count(&w_marks, NEIGHBOUR_STRIPS), 10);
    let rows_beyond_depletion = 60 - 40 + 1;
    assert_eq!(count(&w_marks, BACK_PLANE), 49 * rows_beyond_depletion);

    let w_values = weighting.dirichlet_values(&mesh);
    assert_eq!(w_values.iter().flatten().filter(|v| **v == 1.0).count(), 5);
}
