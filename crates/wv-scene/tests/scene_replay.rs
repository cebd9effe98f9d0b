//! End-to-end replay of scripted input through a full scene.

use pretty_assertions::assert_eq;
use wv_core::{InputEvent, KeyCode, KeyEvent, Modifiers, PointerEvent};
use wv_model::{Point, PointId};
use wv_scene::{
    ControlOp, Emphasis, GeneratorKind, Scene, SceneConfig, ScriptStep, default_control_handles,
    parse_script, replay,
};

fn seeded() -> SceneConfig {
    SceneConfig {
        seed: Some(42),
        ..SceneConfig::default()
    }
}

fn scene_with(subjects: &[(f64, f64)]) -> Scene {
    let mut points: Vec<Point> = subjects
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Point::subject(1001 + i as u32, x, y))
        .collect();
    points.extend(default_control_handles());
    Scene::with_points(seeded(), points).unwrap()
}

/// Model position to device pixels on the default 800x600 surface.
fn at(x: f64, y: f64) -> (f64, f64) {
    (x + 400.0, y + 300.0)
}

fn input(ev: PointerEvent) -> ScriptStep {
    ScriptStep::Input(InputEvent::Pointer(ev))
}

// ═══════════════════════════════════════════════════════════════════════════
// Selection
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn lasso_script_selects_enclosed_points() {
    let mut scene = scene_with(&[(0.0, 0.0), (20.0, 20.0), (200.0, 0.0)]);
    let (x0, y0) = at(-50.0, -50.0);
    let (x1, y1) = at(60.0, 60.0);
    let steps = [
        input(PointerEvent::down(x0, y0)),
        input(PointerEvent::moved(x0 + 20.0, y0 + 20.0)),
        input(PointerEvent::moved(x1, y1)),
        input(PointerEvent::up(x1, y1)),
    ];
    let report = replay(&mut scene, &steps);

    assert_eq!(scene.registry().selected_ids(), vec![PointId(1001), PointId(1002)]);
    assert!(!report.final_frame.lasso.active);
    assert_eq!(report.final_frame.lasso.width, 110.0);
    assert_eq!(report.final_frame.lasso.height, 110.0);
}

#[test]
fn ctrl_click_adds_to_selection_then_drag_moves_both() {
    let mut scene = scene_with(&[(0.0, 0.0), (100.0, 0.0)]);
    let (ax, ay) = at(0.0, 0.0);
    let (bx, by) = at(100.0, 0.0);
    let steps = [
        input(PointerEvent::down(ax, ay)),
        input(PointerEvent::up(ax, ay)),
        input(PointerEvent::down(bx, by).with_modifiers(Modifiers::CTRL)),
        input(PointerEvent::up(bx, by).with_modifiers(Modifiers::CTRL)),
        input(PointerEvent::down(bx, by)),
        input(PointerEvent::moved(bx, by + 30.0)),
        input(PointerEvent::moved(bx, by + 50.0)),
        input(PointerEvent::up(bx, by + 50.0)),
    ];
    replay(&mut scene, &steps);

    let reg = scene.registry();
    assert_eq!(reg.selected_ids(), vec![PointId(1001), PointId(1002)]);
    assert_eq!(reg.position_of(PointId(1001)).map(|p| (p.x, p.y)), Some((0.0, 50.0)));
    assert_eq!(reg.position_of(PointId(1002)).map(|p| (p.x, p.y)), Some((100.0, 50.0)));
}

#[test]
fn focus_loss_mid_drag_rolls_back() {
    let mut scene = scene_with(&[(0.0, 0.0)]);
    let (x, y) = at(0.0, 0.0);
    let steps = [
        input(PointerEvent::down(x, y)),
        input(PointerEvent::moved(x + 40.0, y)),
        input(PointerEvent::moved(x + 80.0, y)),
        ScriptStep::Input(InputEvent::Focus { gained: false }),
        input(PointerEvent::moved(x + 120.0, y)),
        input(PointerEvent::up(x + 120.0, y)),
    ];
    replay(&mut scene, &steps);
    assert_eq!(
        scene.registry().position_of(PointId(1001)).map(|p| (p.x, p.y)),
        Some((0.0, 0.0))
    );
    assert!(!scene.registry().is_pressed());
}

// ═══════════════════════════════════════════════════════════════════════════
// Frustum and indicators
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn far_edge_drag_widens_wedge_and_reports_counts() {
    // (-100, -60) sits at about -149 degrees, outside the default wedge.
    let mut scene = scene_with(&[(0.0, -100.0), (-100.0, -60.0)]);
    assert_eq!(scene.indicators().in_frustum, 1);

    let far = scene.registry().position_of(PointId(2)).unwrap();
    let (x0, y0) = at(far.x, far.y);
    let (x1, y1) = at(-120.0, -20.0);
    let steps = [
        input(PointerEvent::down(x0, y0)),
        input(PointerEvent::moved(x0 - 10.0, y0)),
        input(PointerEvent::moved(x1, y1)),
        input(PointerEvent::up(x1, y1)),
    ];
    let report = replay(&mut scene, &steps);

    assert_eq!(report.count_changes, vec![2]);
    let ind = report.final_frame.indicators;
    assert_eq!(ind.in_frustum, 2);
    assert_eq!(ind.max_in_frustum, 2);
    // Near edge untouched at about -72 degrees; far edge now near -171.
    assert_eq!(ind.alpha_degrees, 99);
    assert_eq!(ind.beta_degrees, 72);
}

#[test]
fn escape_after_view_drag_restores_readouts() {
    let mut scene = scene_with(&[(0.0, -100.0)]);
    let before = scene.snapshot();
    let view = scene.registry().position_of(PointId(3)).unwrap();
    let (x0, y0) = at(view.x, view.y);
    let steps = [
        input(PointerEvent::down(x0, y0)),
        input(PointerEvent::moved(x0 + 20.0, y0 + 20.0)),
        input(PointerEvent::moved(x0 + 150.0, y0 + 150.0)),
        ScriptStep::Input(InputEvent::Key(KeyEvent::new(KeyCode::Escape))),
        input(PointerEvent::up(x0 + 150.0, y0 + 150.0)),
    ];
    let report = replay(&mut scene, &steps);

    assert_eq!(report.final_frame.frustum, before.frustum);
    assert_eq!(report.final_frame.indicators.in_frustum, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Controls
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn control_ops_drive_generation() {
    let mut scene = Scene::new(seeded()).unwrap();
    let steps = [
        ScriptStep::Control(ControlOp::SetTreeCount { count: 4 }),
        ScriptStep::Control(ControlOp::SetContinuousGeneration { enabled: true }),
        ScriptStep::Control(ControlOp::SetGenerator {
            generator: GeneratorKind::Circle,
        }),
        ScriptStep::Control(ControlOp::SetEmphasis {
            emphasis: Emphasis::None,
        }),
        ScriptStep::Control(ControlOp::SetEmphasisAlpha { alpha: 0.01 }),
    ];
    let report = replay(&mut scene, &steps);

    let frame = report.final_frame;
    assert_eq!(frame.points.len(), 7);
    assert_eq!(frame.emphasis, Emphasis::None);
    assert_eq!(frame.emphasis_alpha, 0.05);
    let subjects: Vec<_> = frame.points.iter().filter(|p| p.role == "subject").collect();
    assert_eq!(subjects.len(), 4);
    for p in subjects {
        assert!(((p.x * p.x + p.y * p.y).sqrt() - 150.0).abs() < 1e-9);
    }
}

#[test]
fn seeded_replays_are_deterministic() {
    let script = r#"[
        {"type": "pointer", "kind": "down", "x": 10.0, "y": 10.0},
        {"type": "pointer", "kind": "move", "x": 500.0, "y": 400.0},
        {"type": "pointer", "kind": "move", "x": 700.0, "y": 500.0},
        {"type": "pointer", "kind": "up", "x": 700.0, "y": 500.0},
        {"op": "regenerate"},
        {"type": "pointer", "kind": "move", "x": 400.0, "y": 300.0}
    ]"#;
    let steps = parse_script(script).unwrap();

    let mut a = Scene::new(seeded()).unwrap();
    let mut b = Scene::new(seeded()).unwrap();
    assert_eq!(replay(&mut a, &steps), replay(&mut b, &steps));
}

#[test]
fn snapshot_serializes_renderer_contract() {
    let scene = scene_with(&[(0.0, -100.0)]);
    let json = serde_json::to_value(scene.snapshot()).unwrap();

    assert_eq!(json["surface"]["width"], 800.0);
    assert_eq!(json["emphasis"], "inner");
    assert_eq!(json["indicators"]["in_frustum"], 1);
    let roles: Vec<&str> = json["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, ["subject", "near-edge", "far-edge", "view-direction"]);
    assert_eq!(json["points"][0]["in_frustum"], true);
    assert_eq!(json["points"][0]["radius"], 5.0);
}
