use super::*;

#[test]
fn pointer_center_is_origin_and_edges_are_unit() {
    let center = PointerOffset::from_client(500.0, 400.0, 1000.0, 800.0);
    assert_eq!(center, PointerOffset { x: 0.0, y: 0.0 });

    let corner = PointerOffset::from_client(1000.0, 0.0, 1000.0, 800.0);
    assert_eq!(corner, PointerOffset { x: 1.0, y: -1.0 });
}

#[test]
fn pointer_with_empty_viewport_is_neutral() {
    let p = PointerOffset::from_client(10.0, 10.0, 0.0, 0.0);
    assert_eq!(p, PointerOffset::default());
}

#[test]
fn shadow_opposes_parallax() {
    let p = PointerOffset { x: 0.5, y: -1.0 };
    assert_eq!(p.parallax(), (6.0, -12.0));
    assert_eq!(p.shadow(), (-7.5, 15.0));
}

#[test]
fn hero_layers_drift_apart_on_scroll() {
    let still = PointerOffset::default();
    assert_eq!(lead_layer_transform(200.0, still), "translate3d(-20.00px, 0.00px, 0)");
    assert!(counter_layer_transform(200.0, still).starts_with("translate3d(20.00px,"));
}

#[test]
fn counter_layer_moves_against_pointer() {
    let p = PointerOffset { x: 1.0, y: 1.0 };
    assert_eq!(counter_layer_transform(0.0, p), "translate3d(-14.40px, -14.40px, 0)");
}

#[test]
fn headline_shadow_has_two_layers() {
    let shadow = headline_shadow(PointerOffset { x: 1.0, y: -1.0 });
    assert_eq!(
        shadow,
        "-15.00px 15.00px 10px rgba(0, 0, 0, 0.4), -22.50px 22.50px 30px rgba(0, 0, 0, 0.2)"
    );
}

#[test]
fn card_tilt_leans_toward_pointer() {
    let flat = CardTilt::from_local(150.0, 100.0, 300.0, 200.0);
    assert_eq!(flat, CardTilt { rotate_x: 0.0, rotate_y: 0.0 });

    let top_left = CardTilt::from_local(0.0, 0.0, 300.0, 200.0);
    assert_eq!(top_left, CardTilt { rotate_x: -10.0, rotate_y: 15.0 });
}

#[test]
fn card_transform_resets_without_hover() {
    assert_eq!(card_transform(None), "rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)");
    let hovered = card_transform(Some(CardTilt { rotate_x: 1.0, rotate_y: -2.0 }));
    assert!(hovered.starts_with("rotateX(1.00deg) rotateY(-2.00deg)"));
    assert!(hovered.ends_with("scale3d(1.05, 1.05, 1.05)"));
}

#[test]
fn latency_label_stays_in_band() {
    assert_eq!(latency_label(0.0), "0.002");
    assert_eq!(latency_label(0.5), "0.003");
    assert_eq!(latency_label(f64::NAN), "0.002");
}
