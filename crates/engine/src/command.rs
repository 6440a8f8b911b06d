//! JSON command protocol for scripted sessions.
//!
//! Drives an `AppState` with the same pointer events a host would send.
//! Coordinates are client pixels.

use serde::{Deserialize, Serialize};
use shared::{PointerButton, ToolKind};

use crate::state::AppState;
use crate::tools::PointerEvent;

/// A command a script or agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Switch the active tool
    SetTool { tool: ToolKind },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    /// Click (draw tool input)
    Click { x: f64, y: f64 },
    /// Undo the last placement.
    Undo,
    /// Redo the last undone placement.
    Redo,
    /// Abort the active tool's gesture.
    Cancel,
    /// Inspect the scene: counts and the active tool.
    Inspect,
    /// Export the live scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    /// Serialize for hosts that pass strings across a boundary
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":"Response serialization failed: {e}"}}"#)
        })
    }
}

fn event(x: f64, y: f64, button: PointerButton) -> PointerEvent {
    PointerEvent::new(x, y).with_button(button)
}

/// Execute a single command on the state.
pub fn execute_command(state: &mut AppState, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::SetTool { tool } => {
            state.set_tool(tool);
            CommandResponse::ok_with_data(serde_json::json!({ "tool": state.tool() }))
        }

        AgentCommand::PointerDown { x, y, button } => {
            state.pointer_down(event(x, y, button));
            CommandResponse::ok()
        }

        AgentCommand::PointerMove { x, y } => {
            state.pointer_move(event(x, y, PointerButton::Primary));
            CommandResponse::ok()
        }

        AgentCommand::PointerUp { x, y, button } => {
            state.pointer_up(event(x, y, button));
            CommandResponse::ok()
        }

        AgentCommand::Click { x, y } => {
            if state.tool() != ToolKind::Draw {
                return CommandResponse::err(format!(
                    "Click is handled by the draw tool, active tool is {}",
                    state.tool()
                ));
            }
            state.click(event(x, y, PointerButton::Primary));
            CommandResponse::ok_with_data(serde_json::json!({
                "path_len": state.draw_path().len(),
            }))
        }

        AgentCommand::Undo => {
            let success = state.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = state.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Cancel => {
            state.cancel();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = state
                .registry
                .live_objects()
                .map(|o| {
                    serde_json::json!({
                        "id": o.id,
                        "type": o.kind.label(),
                        "color": format!("#{:06x}", o.color.0),
                        "selected": state.selection.is_selected(o.id),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "tool": state.tool(),
                "placed": state.registry.placed().len(),
                "redo": state.registry.redo_stack().len(),
                "selectable": state.registry.selectable().len(),
                "selected": state.selection.count(),
                "path_len": state.draw_path().len(),
                "objects": objects,
            }))
        }

        AgentCommand::ExportScene => match serde_json::to_string_pretty(&state.describe_scene()) {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(format!("Scene export failed: {e}")),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(state: &mut AppState, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(state, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    state: &mut AppState,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(state, cmd))
        .collect())
}
