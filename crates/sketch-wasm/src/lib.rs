//! Browser bridge: a `SketchSession` the page's renderer drives.
//!
//! The page owns rendering and the camera. It pushes the camera matrix and
//! canvas rect, forwards pointer events, and reads scene and preview JSON back.

use glam::DMat4;
use wasm_bindgen::prelude::*;

use shared::{PointerButton, ToolKind};
use sketch_engine::command;
use sketch_engine::state::{AppSettings, AppState};
use sketch_engine::tools::PointerEvent;
use sketch_engine::viewport::{ScreenRect, ViewContext};

/// Сообщение в консоль браузера (вне wasm не выводится)
fn console_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn js_error(message: String) -> JsError {
    JsError::new(&message)
}

/// Инициализация модуля: panic hook и логирование в консоль
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Sketch engine initialized");
}

/// Интерактивная сессия редактора для страницы
#[wasm_bindgen]
pub struct SketchSession {
    state: AppState,
}

#[wasm_bindgen]
impl SketchSession {
    /// Создаёт сессию; `settings_json` может содержать только часть настроек
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<SketchSession, JsError> {
        Self::from_settings(settings_json.as_deref()).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Переключает инструмент ("select", "draw", "rectangle", "erase", "push_pull")
    pub fn set_tool(&mut self, name: &str) -> Result<(), JsError> {
        let tool: ToolKind = name.parse().map_err(js_error)?;
        self.state.set_tool(tool);
        Ok(())
    }

    /// Имя активного инструмента
    pub fn tool(&self) -> String {
        serde_json::to_value(self.state.tool())
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    /// Матрица view-projection (16 чисел по столбцам) и прямоугольник canvas в координатах клиента
    pub fn set_camera(
        &mut self,
        view_projection: &[f64],
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsError> {
        self.apply_camera(view_projection, ScreenRect::new(left, top, width, height))
            .map_err(js_error)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) {
        self.state
            .pointer_down(PointerEvent::new(x, y).with_button(PointerButton::from_dom(button)));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.state.pointer_move(PointerEvent::new(x, y));
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) {
        self.state
            .pointer_up(PointerEvent::new(x, y).with_button(PointerButton::from_dom(button)));
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.state.click(PointerEvent::new(x, y));
    }

    pub fn undo(&mut self) -> bool {
        self.state.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.state.redo()
    }

    /// Escape: прервать жест активного инструмента
    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Счётчик изменений реестра (перезагрузить геометрию, если изменился)
    pub fn scene_version(&self) -> f64 {
        self.state.registry.version() as f64
    }

    pub fn preview_version(&self) -> f64 {
        self.state.preview.version() as f64
    }

    /// Живые объекты сцены в порядке размещения
    pub fn scene_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.state.describe_scene())
            .map_err(|e| js_error(format!("Scene export failed: {e}")))
    }

    /// То же, что `scene_json`, но сразу JS-объектом
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.describe_scene()).map_err(JsValue::from)
    }

    pub fn preview_json(&self) -> String {
        self.state.preview.to_json()
    }

    /// Выполняет JSON-команду (объект) или пакет команд (массив)
    pub fn execute(&mut self, command_json: &str) -> Result<String, JsError> {
        self.run(command_json).map_err(js_error)
    }
}

impl SketchSession {
    fn from_settings(settings_json: Option<&str>) -> Result<Self, String> {
        let settings = match settings_json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(json) => AppSettings::from_json(json)?,
            None => AppSettings::default(),
        };
        console_log(&format!(
            "sketch session created (snap: {}, redo policy: {:?})",
            settings.snap.enabled, settings.history.redo_policy
        ));
        Ok(Self {
            state: AppState::new(settings),
        })
    }

    fn apply_camera(
        &mut self,
        view_projection: &[f64],
        viewport: ScreenRect,
    ) -> Result<(), String> {
        if view_projection.len() != 16 {
            return Err(format!(
                "Camera matrix must have 16 elements, got {}",
                view_projection.len()
            ));
        }
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(format!(
                "Canvas size must be positive, got {} x {}",
                viewport.width, viewport.height
            ));
        }
        let matrix = DMat4::from_cols_slice(view_projection);
        self.state.set_view(ViewContext::new(matrix, viewport));
        Ok(())
    }

    fn run(&mut self, json: &str) -> Result<String, String> {
        if json.trim_start().starts_with('[') {
            let responses = command::execute_json_batch(&mut self.state, json)?;
            serde_json::to_string(&responses).map_err(|e| format!("Response encoding failed: {e}"))
        } else {
            Ok(command::execute_json(&mut self.state, json)?.to_json())
        }
    }
}
