//! Integration tests for the JSON command protocol.
//!
//! Pixel coordinates assume the harness camera: origin at (400, 300),
//! 20 px per world unit, screen y pointing to +Z.

use sketch_engine::harness::TestHarness;

#[test]
fn test_batch_rectangle_square_snap() {
    let mut h = TestHarness::new();
    let responses = h
        .execute_json_batch(
            r#"[
                {"command": "set_tool", "tool": "rectangle"},
                {"command": "pointer_down", "x": 400, "y": 300},
                {"command": "pointer_move", "x": 430, "y": 332},
                {"command": "pointer_move", "x": 460, "y": 364},
                {"command": "pointer_up", "x": 460, "y": 364},
                {"command": "inspect"}
            ]"#,
        )
        .unwrap();

    assert_eq!(responses.len(), 6);
    assert!(responses.iter().all(|r| r.success));

    let data = responses[5].data.as_ref().unwrap();
    assert_eq!(data["tool"], "rectangle");
    assert_eq!(data["placed"], 5);
    assert_eq!(data["selectable"], 5);
    assert_eq!(h.face_count(), 1);
}

#[test]
fn test_batch_draw_triangle() {
    let mut h = TestHarness::new();
    let responses = h
        .execute_json_batch(
            r#"[
                {"command": "set_tool", "tool": "draw"},
                {"command": "click", "x": 400, "y": 300},
                {"command": "click", "x": 460, "y": 300},
                {"command": "click", "x": 430, "y": 350},
                {"command": "click", "x": 401, "y": 301}
            ]"#,
        )
        .unwrap();

    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[3].data.as_ref().unwrap()["path_len"], 3);
    assert_eq!(responses[4].data.as_ref().unwrap()["path_len"], 0);
    assert_eq!(h.edge_count(), 3);
    assert_eq!(h.face_count(), 1);
}

#[test]
fn test_click_outside_draw_tool_is_error() {
    let mut h = TestHarness::new();
    let r = h
        .execute_json(r#"{"command": "click", "x": 10, "y": 10}"#)
        .unwrap();
    assert!(!r.success);
    assert!(r.error.unwrap().contains("draw tool"));
    assert_eq!(h.placed_count(), 0);
}

#[test]
fn test_undo_redo_commands() {
    let mut h = TestHarness::new();
    h.execute_json_batch(
        r#"[
            {"command": "set_tool", "tool": "rectangle"},
            {"command": "pointer_down", "x": 400, "y": 300},
            {"command": "pointer_up", "x": 480, "y": 340}
        ]"#,
    )
    .unwrap();

    let r = h.execute_json(r#"{"command": "undo"}"#).unwrap();
    assert_eq!(r.data.unwrap()["undone"], true);
    assert_eq!(h.face_count(), 0);

    let r = h.execute_json(r#"{"command": "redo"}"#).unwrap();
    assert_eq!(r.data.unwrap()["redone"], true);
    assert_eq!(h.face_count(), 1);

    let r = h.execute_json(r#"{"command": "redo"}"#).unwrap();
    assert_eq!(r.data.unwrap()["redone"], false);
}

#[test]
fn test_cancel_command_discards_path() {
    let mut h = TestHarness::new();
    let responses = h
        .execute_json_batch(
            r#"[
                {"command": "set_tool", "tool": "draw"},
                {"command": "click", "x": 400, "y": 300},
                {"command": "click", "x": 460, "y": 300},
                {"command": "cancel"},
                {"command": "inspect"}
            ]"#,
        )
        .unwrap();

    let data = responses[4].data.as_ref().unwrap();
    assert_eq!(data["path_len"], 0);
    assert_eq!(data["placed"], 1);
}

#[test]
fn test_export_scene_command() {
    let mut h = TestHarness::new();
    h.execute_json_batch(
        r#"[
            {"command": "set_tool", "tool": "draw"},
            {"command": "click", "x": 400, "y": 300},
            {"command": "click", "x": 460, "y": 300}
        ]"#,
    )
    .unwrap();

    let r = h.execute_json(r#"{"command": "export_scene"}"#).unwrap();
    let scene = r.data.unwrap()["scene_json"].as_str().unwrap().to_string();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&scene).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["type"], "edge");
    assert_eq!(parsed[0]["selectable"], true);
}

#[test]
fn test_secondary_button_ignored() {
    let mut h = TestHarness::new();
    h.execute_json_batch(
        r#"[
            {"command": "set_tool", "tool": "rectangle"},
            {"command": "pointer_down", "x": 400, "y": 300, "button": "secondary"},
            {"command": "pointer_up", "x": 480, "y": 340}
        ]"#,
    )
    .unwrap();
    assert_eq!(h.placed_count(), 0);
}

#[test]
fn test_invalid_batch_is_error() {
    let mut h = TestHarness::new();
    let err = h
        .execute_json_batch(r#"[{"command": "teleport"}]"#)
        .unwrap_err();
    assert!(err.contains("Invalid commands JSON"));
    assert_eq!(h.placed_count(), 0);
}
