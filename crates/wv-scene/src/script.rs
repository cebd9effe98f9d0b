#![forbid(unsafe_code)]

//! Scripted input for headless replay.
//!
//! A script is a JSON array. Each step is either a raw [`InputEvent`]
//! (tagged by `"type"`) or a scene control operation (tagged by `"op"`):
//!
//! ```json
//! [
//!   { "type": "pointer", "kind": "down", "x": 400.0, "y": 300.0 },
//!   { "type": "pointer", "kind": "up", "x": 400.0, "y": 300.0 },
//!   { "op": "set_tree_count", "count": 12 },
//!   { "op": "regenerate" }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wv_core::InputEvent;

use crate::config::{Emphasis, GeneratorKind};
use crate::error::{Result, SceneError};
use crate::scene::Scene;
use crate::snapshot::FrameSnapshot;

/// Scene controls a host UI would normally drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ControlOp {
    Regenerate,
    SetTreeCount { count: u32 },
    SetGenerator { generator: GeneratorKind },
    SetContinuousGeneration { enabled: bool },
    SetEmphasis { emphasis: Emphasis },
    SetEmphasisAlpha { alpha: f64 },
    ClearMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Input(InputEvent),
    Control(ControlOp),
}

/// Parse a script from its JSON text.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a script file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<ScriptStep>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SceneError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json)
}

/// Summary of one replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: usize,
    /// Every in-frustum count notification, in order.
    pub count_changes: Vec<usize>,
    #[serde(rename = "final")]
    pub final_frame: FrameSnapshot,
}

/// Apply every step to `scene` in order.
pub fn replay(scene: &mut Scene, steps: &[ScriptStep]) -> ReplayReport {
    let mut count_changes = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        match *step {
            ScriptStep::Input(ref event) => {
                let dispatch = scene.handle_input(event);
                debug!(
                    message = "replay.input",
                    index,
                    gestures = dispatch.gestures.len(),
                    capture = ?dispatch.capture
                );
                count_changes.extend(dispatch.count_changes);
            }
            ScriptStep::Control(op) => {
                debug!(message = "replay.control", index, op = ?op);
                let change = match op {
                    ControlOp::Regenerate => scene.regenerate(),
                    ControlOp::SetTreeCount { count } => scene.set_tree_count(count),
                    ControlOp::SetGenerator { generator } => scene.set_generator(generator),
                    ControlOp::SetContinuousGeneration { enabled } => {
                        scene.set_continuous_generation(enabled)
                    }
                    ControlOp::SetEmphasis { emphasis } => {
                        scene.set_emphasis(emphasis);
                        None
                    }
                    ControlOp::SetEmphasisAlpha { alpha } => {
                        scene.set_emphasis_alpha(alpha);
                        None
                    }
                    ControlOp::ClearMax => {
                        scene.clear_max();
                        None
                    }
                };
                count_changes.extend(change.map(|c| c.count));
            }
        }
    }
    ReplayReport {
        steps: steps.len(),
        count_changes,
        final_frame: scene.snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wv_core::{Modifiers, PointerEvent, PointerEventKind};

    #[test]
    fn parses_inputs_and_controls() {
        let steps = parse_script(
            r#"[
                {"type": "pointer", "kind": "down", "x": 1.0, "y": 2.0},
                {"type": "resize", "width": 640.0, "height": 480.0},
                {"op": "set_tree_count", "count": 12},
                {"op": "set_generator", "generator": "circle"},
                {"op": "clear_max"}
            ]"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 5);
        match steps[0] {
            ScriptStep::Input(InputEvent::Pointer(PointerEvent { kind, x, y, .. })) => {
                assert_eq!(kind, PointerEventKind::Down);
                assert_eq!((x, y), (1.0, 2.0));
            }
            ref other => panic!("expected pointer input, got {other:?}"),
        }
        assert_eq!(
            steps[2],
            ScriptStep::Control(ControlOp::SetTreeCount { count: 12 })
        );
        assert_eq!(
            steps[3],
            ScriptStep::Control(ControlOp::SetGenerator {
                generator: GeneratorKind::Circle
            })
        );
    }

    #[test]
    fn pointer_modifiers_parse_and_round_trip() {
        let steps = parse_script(
            r#"[
                {"type": "pointer", "kind": "down", "x": 1.0, "y": 2.0, "modifiers": "CTRL | SHIFT"},
                {"type": "key", "code": "escape", "modifiers": "ALT"}
            ]"#,
        )
        .unwrap();
        match steps[0] {
            ScriptStep::Input(InputEvent::Pointer(p)) => {
                assert_eq!(p.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
            }
            ref other => panic!("expected pointer input, got {other:?}"),
        }
        match steps[1] {
            ScriptStep::Input(InputEvent::Key(k)) => {
                assert_eq!(k.modifiers, Modifiers::ALT);
                assert!(k.is_escape_press());
            }
            ref other => panic!("expected key input, got {other:?}"),
        }

        let json = serde_json::to_string(&steps).unwrap();
        assert_eq!(parse_script(&json).unwrap(), steps);
    }

    #[test]
    fn malformed_script_is_a_json_error() {
        let err = parse_script(r#"[{"op": "explode"}]"#).unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_script_reports_path() {
        let err = load_script("/nonexistent/wedgeview-script.json").unwrap_err();
        match err {
            SceneError::Script { path, .. } => {
                assert!(path.ends_with("wedgeview-script.json"));
            }
            other => panic!("expected Script error, got {other}"),
        }
    }
}
