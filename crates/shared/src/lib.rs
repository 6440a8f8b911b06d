use std::fmt;
use std::str::FromStr;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

// ============================================================================
// Идентификаторы и цвета
// ============================================================================

/// Уникальный идентификатор объекта в реестре сцены.
///
/// Выдаётся реестром по возрастанию, поэтому порядок идентификаторов
/// совпадает с порядком создания.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Цвет материала в формате 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Компоненты в диапазоне 0..1 (для вершинных буферов)
    pub fn to_f32_array(self) -> [f32; 3] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
        ]
    }
}

// ============================================================================
// Точки на плоскости земли
// ============================================================================

/// Точка на горизонтальной опорной плоскости (y = 0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f64,
    pub z: f64,
}

impl GroundPoint {
    pub const ORIGIN: GroundPoint = GroundPoint { x: 0.0, z: 0.0 };

    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Плоские координаты (x, z) как 2D-вектор
    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }

    pub fn from_vec2(v: DVec2) -> Self {
        Self { x: v.x, z: v.y }
    }

    /// Мировая позиция с высотой 0
    pub fn to_vec3(self) -> DVec3 {
        DVec3::new(self.x, 0.0, self.z)
    }

    /// Проекция мировой точки на плоскость земли (высота отбрасывается)
    pub fn from_vec3(v: DVec3) -> Self {
        Self { x: v.x, z: v.z }
    }

    pub fn distance_to(self, other: GroundPoint) -> f64 {
        (other.to_vec2() - self.to_vec2()).length()
    }
}

// ============================================================================
// Объекты сцены
// ============================================================================

/// Геометрия объекта реестра
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Отрезок
    Edge { start: GroundPoint, end: GroundPoint },
    /// Плоский замкнутый многоугольник, пригодный для выдавливания
    Face {
        contour: Vec<GroundPoint>,
        base: GroundPoint,
    },
    /// Призма, полученная выдавливанием грани на знаковую высоту
    Prism {
        contour: Vec<GroundPoint>,
        base: GroundPoint,
        height: f64,
    },
}

/// Метаданные грани, которые нужны Push/Pull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRef<'a> {
    pub contour: &'a [GroundPoint],
    pub base: GroundPoint,
}

impl ObjectKind {
    pub fn is_face(&self) -> bool {
        matches!(self, ObjectKind::Face { .. })
    }

    /// Контур и базовая точка, если объект помечен как грань
    pub fn as_face(&self) -> Option<FaceRef<'_>> {
        match self {
            ObjectKind::Face { contour, base } => Some(FaceRef {
                contour,
                base: *base,
            }),
            _ => None,
        }
    }

    /// Опорная точка объекта (для выбора рамкой)
    pub fn anchor(&self) -> DVec3 {
        match self {
            ObjectKind::Edge { start, end } => (start.to_vec3() + end.to_vec3()) * 0.5,
            ObjectKind::Face { base, .. } | ObjectKind::Prism { base, .. } => base.to_vec3(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Edge { .. } => "edge",
            ObjectKind::Face { .. } => "face",
            ObjectKind::Prism { .. } => "prism",
        }
    }
}

/// Снимок объекта для хоста (рендер / отладка)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    pub color: Rgb,
    pub selectable: bool,
}

// ============================================================================
// Инструменты и ввод
// ============================================================================

/// Активный инструмент
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Draw,
    Rectangle,
    Erase,
    PushPull,
}

impl ToolKind {
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Draw,
            ToolKind::Rectangle,
            ToolKind::Erase,
            ToolKind::PushPull,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Draw => "Draw",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Erase => "Erase",
            ToolKind::PushPull => "Push/Pull",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" | "mouse" => Ok(ToolKind::Select),
            "draw" | "line" => Ok(ToolKind::Draw),
            "rectangle" | "rect" => Ok(ToolKind::Rectangle),
            "erase" | "eraser" => Ok(ToolKind::Erase),
            "push_pull" | "push/pull" | "pushpull" => Ok(ToolKind::PushPull),
            other => Err(format!("Unknown tool '{other}'")),
        }
    }
}

/// Кнопка указателя (коды DOM: 0 = левая, 1 = средняя, 2 = правая)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            _ => PointerButton::Secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_point_distance() {
        let a = GroundPoint::new(0.0, 0.0);
        let b = GroundPoint::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_ground_point_from_vec3_drops_height() {
        let p = GroundPoint::from_vec3(DVec3::new(1.5, 7.0, -2.0));
        assert_eq!(p, GroundPoint::new(1.5, -2.0));
        assert_eq!(p.to_vec3().y, 0.0);
    }

    #[test]
    fn test_rgb_components() {
        let c = Rgb(0x03045e);
        assert_eq!((c.r(), c.g(), c.b()), (0x03, 0x04, 0x5e));
        assert_eq!(Rgb::WHITE.to_f32_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_object_kind_serde_tag() {
        let kind = ObjectKind::Prism {
            contour: vec![
                GroundPoint::new(0.0, 0.0),
                GroundPoint::new(1.0, 0.0),
                GroundPoint::new(0.0, 1.0),
            ],
            base: GroundPoint::new(0.0, 0.0),
            height: 1.5,
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains(r#""type":"prism""#));
        let back: ObjectKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_as_face_only_for_faces() {
        let face = ObjectKind::Face {
            contour: vec![
                GroundPoint::new(1.0, 1.0),
                GroundPoint::new(2.0, 1.0),
                GroundPoint::new(2.0, 2.0),
            ],
            base: GroundPoint::new(1.0, 1.0),
        };
        let meta = face.as_face().unwrap();
        assert_eq!(meta.contour.len(), 3);
        assert_eq!(meta.base, GroundPoint::new(1.0, 1.0));

        let edge = ObjectKind::Edge {
            start: GroundPoint::ORIGIN,
            end: GroundPoint::new(1.0, 0.0),
        };
        assert!(edge.as_face().is_none());
        assert!(!edge.is_face());
    }

    #[test]
    fn test_edge_anchor_is_midpoint() {
        let edge = ObjectKind::Edge {
            start: GroundPoint::new(0.0, 0.0),
            end: GroundPoint::new(2.0, 4.0),
        };
        assert_eq!(edge.anchor(), DVec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_tool_kind_parse() {
        assert_eq!("push/pull".parse::<ToolKind>().unwrap(), ToolKind::PushPull);
        assert_eq!("Rectangle".parse::<ToolKind>().unwrap(), ToolKind::Rectangle);
        assert!("lasso".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_tool_kind_serde() {
        let json = serde_json::to_string(&ToolKind::PushPull).unwrap();
        assert_eq!(json, r#""push_pull""#);
    }

    #[test]
    fn test_pointer_button_from_dom() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(1), PointerButton::Middle);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
    }
}
