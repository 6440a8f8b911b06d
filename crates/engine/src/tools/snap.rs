//! Snap resolver
//!
//! Stateless: every rule reads the committed path and the raw candidate
//! point and may replace the candidate. Committed geometry is never touched.

use glam::DVec2;
use shared::GroundPoint;

use crate::state::settings::SnapSettings;

// ============================================================================
// Привязки при рисовании контура
// ============================================================================

/// Направление, к которому притянулся отрезок
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    /// Продолжение предыдущего отрезка
    Collinear,
    /// ±90° к предыдущему отрезку
    Perpendicular,
    /// Мировая ось X (в любую сторону)
    AxisX,
    /// Мировая ось Z (в любую сторону)
    AxisZ,
}

/// Результат привязки точки контура
#[derive(Debug, Clone, PartialEq)]
pub struct PathSnap {
    /// Итоговая точка
    pub point: GroundPoint,
    /// Сработавшая угловая привязка
    pub direction: Option<SnapDirection>,
    /// Длина отрезка приравнена к первой стороне
    pub length_locked: bool,
    /// Точка совпала с кандидатом «от точки»
    pub from_point: bool,
    /// Направляющая от последней точки к итоговой (при угловой привязке)
    pub guide: Option<(GroundPoint, GroundPoint)>,
    /// Пунктир от начала контура к кандидату «от точки»
    pub from_point_guide: Option<(GroundPoint, GroundPoint)>,
}

impl PathSnap {
    fn unsnapped(point: GroundPoint) -> Self {
        Self {
            point,
            direction: None,
            length_locked: false,
            from_point: false,
            guide: None,
            from_point_guide: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.direction.is_some() || self.length_locked || self.from_point
    }
}

fn rotate_ccw(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

fn rotate_cw(v: DVec2) -> DVec2 {
    DVec2::new(v.y, -v.x)
}

/// Кандидаты направлений: вдоль предыдущего отрезка, ±90° к нему, четыре оси
fn candidate_directions(path: &[GroundPoint]) -> Vec<(DVec2, SnapDirection)> {
    let mut out = Vec::with_capacity(7);

    if path.len() >= 2 {
        let last = path[path.len() - 1].to_vec2();
        let prev = path[path.len() - 2].to_vec2();
        let prev_dir = last - prev;
        let prev_len = prev_dir.length();
        if prev_len > 1e-4 {
            let n = prev_dir / prev_len;
            out.push((n, SnapDirection::Collinear));
            out.push((rotate_ccw(n), SnapDirection::Perpendicular));
            out.push((rotate_cw(n), SnapDirection::Perpendicular));
        }
    }

    out.push((DVec2::X, SnapDirection::AxisX));
    out.push((DVec2::NEG_X, SnapDirection::AxisX));
    out.push((DVec2::Y, SnapDirection::AxisZ));
    out.push((DVec2::NEG_Y, SnapDirection::AxisZ));
    out
}

/// Угловая привязка: спроецировать точку на ближайшее по углу направление
fn snap_direction(
    last: DVec2,
    point: DVec2,
    path: &[GroundPoint],
    angle_limit: f64,
) -> Option<(DVec2, SnapDirection)> {
    let dir = point - last;
    let dir_len = dir.length();
    if dir_len <= 1e-4 {
        return None;
    }
    let dir_norm = dir / dir_len;

    let (best, kind, angle) = candidate_directions(path)
        .into_iter()
        .map(|(c, kind)| (c, kind, dir_norm.dot(c).clamp(-1.0, 1.0).acos()))
        .min_by(|a, b| a.2.total_cmp(&b.2))?;

    if angle < angle_limit {
        let proj_len = dir.dot(best);
        Some((last + best * proj_len, kind))
    } else {
        None
    }
}

/// Фиксация длины: текущий отрезок почти равен первой стороне → сделать равным
fn lock_length(last: DVec2, point: DVec2, path: &[GroundPoint], ratio: f64) -> Option<DVec2> {
    let base_len = path[0].distance_to(path[1]);
    if base_len <= 1e-3 {
        return None;
    }
    let curr = point - last;
    let curr_len = curr.length();
    if curr_len <= 1e-4 {
        return None;
    }
    if (curr_len - base_len).abs() < base_len * ratio {
        Some(last + curr * (base_len / curr_len))
    } else {
        None
    }
}

/// Применить привязки к точке-кандидату при рисовании контура.
///
/// Порядок: угол → длина → «от точки». Каждая следующая может
/// переопределить результат предыдущей.
pub fn snap_path_point(
    path: &[GroundPoint],
    raw: GroundPoint,
    settings: &SnapSettings,
) -> PathSnap {
    let mut result = PathSnap::unsnapped(raw);
    if !settings.enabled || path.is_empty() {
        return result;
    }

    let last = path[path.len() - 1].to_vec2();
    let mut point = raw.to_vec2();

    if (point - last).length() > 1e-4 {
        if let Some((snapped, kind)) =
            snap_direction(last, point, path, settings.angle_deg.to_radians())
        {
            point = snapped;
            result.direction = Some(kind);
        }

        if path.len() >= 2 {
            if let Some(locked) = lock_length(last, point, path, settings.length_lock_ratio) {
                point = locked;
                result.length_locked = true;
            }
        }
    }

    if path.len() >= 3 {
        let p0 = path[0].to_vec2();
        let v01 = path[1].to_vec2() - p0;
        let len01 = v01.length();
        if len01 > 1e-4 {
            let candidate = last + v01;
            let tol = settings.from_point_min.max(len01 * settings.from_point_ratio);
            if candidate.distance(point) < tol {
                point = candidate;
                result.from_point = true;
            }
            result.from_point_guide = Some((path[0], GroundPoint::from_vec2(candidate)));
        }
    }

    result.point = GroundPoint::from_vec2(point);
    if result.direction.is_some() {
        result.guide = Some((path[path.len() - 1], result.point));
    }
    if result.is_snapped() {
        tracing::debug!(
            "Path snap: direction={:?} length_locked={} from_point={}",
            result.direction,
            result.length_locked,
            result.from_point
        );
    }
    result
}

// ============================================================================
// Привязка прямоугольника к квадрату
// ============================================================================

/// Стороны прямоугольника после привязки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareSnap {
    pub dx: f64,
    pub dz: f64,
    pub square: bool,
}

fn sign_or_positive(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Если стороны отличаются меньше чем на `square_ratio` от большей,
/// меньшая сторона получает модуль большей (знак сохраняется).
pub fn snap_square(dx: f64, dz: f64, settings: &SnapSettings, min_size: f64) -> SquareSnap {
    let abs_dx = dx.abs();
    let abs_dz = dz.abs();
    let max_side = abs_dx.max(abs_dz);

    if !settings.enabled || max_side <= min_size {
        return SquareSnap {
            dx,
            dz,
            square: false,
        };
    }

    if (abs_dx - abs_dz).abs() < max_side * settings.square_ratio {
        let (dx, dz) = if abs_dx > abs_dz {
            (dx, sign_or_positive(dz) * abs_dx)
        } else {
            (sign_or_positive(dx) * abs_dz, dz)
        };
        return SquareSnap {
            dx,
            dz,
            square: true,
        };
    }

    SquareSnap {
        dx,
        dz,
        square: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gp(x: f64, z: f64) -> GroundPoint {
        GroundPoint::new(x, z)
    }

    fn close(a: GroundPoint, b: GroundPoint) -> bool {
        a.distance_to(b) < 1e-9
    }

    #[test]
    fn test_empty_path_is_unsnapped() {
        let s = snap_path_point(&[], gp(1.3, 2.7), &SnapSettings::default());
        assert!(!s.is_snapped());
        assert_eq!(s.point, gp(1.3, 2.7));
    }

    #[test]
    fn test_axis_snap() {
        let s = snap_path_point(&[gp(0.0, 0.0)], gp(3.0, 0.1), &SnapSettings::default());
        assert_eq!(s.direction, Some(SnapDirection::AxisX));
        assert!(close(s.point, gp(3.0, 0.0)));
        assert_eq!(s.guide, Some((gp(0.0, 0.0), s.point)));
    }

    #[test]
    fn test_no_snap_beyond_angle() {
        let s = snap_path_point(&[gp(0.0, 0.0)], gp(3.0, 1.0), &SnapSettings::default());
        assert!(s.direction.is_none());
        assert!(s.guide.is_none());
        assert_eq!(s.point, gp(3.0, 1.0));
    }

    #[test]
    fn test_perpendicular_snap_on_diagonal_path() {
        let path = [gp(0.0, 0.0), gp(2.0, 2.0)];
        // 90° к диагонали: направление (-1, 1)
        let s = snap_path_point(&path, gp(0.0, 4.05), &SnapSettings::default());
        assert_eq!(s.direction, Some(SnapDirection::Perpendicular));
        let d = s.point.to_vec2() - gp(2.0, 2.0).to_vec2();
        assert!((d.x + d.y).abs() < 1e-9);
    }

    #[test]
    fn test_length_lock() {
        let path = [gp(0.0, 0.0), gp(4.0, 0.0)];
        let s = snap_path_point(&path, gp(4.05, 3.9), &SnapSettings::default());
        assert_eq!(s.direction, Some(SnapDirection::Perpendicular));
        assert!(s.length_locked);
        assert!(close(s.point, gp(4.0, 4.0)));
    }

    #[test]
    fn test_length_lock_out_of_range() {
        let path = [gp(0.0, 0.0), gp(4.0, 0.0)];
        let s = snap_path_point(&path, gp(4.0, 3.0), &SnapSettings::default());
        assert!(!s.length_locked);
        assert!(close(s.point, gp(4.0, 3.0)));
    }

    #[test]
    fn test_from_point_snap() {
        let path = [gp(0.0, 0.0), gp(4.0, 0.0), gp(5.0, 3.0)];
        // кандидат: (5,3) + (4,0) = (9,3); допуск max(0.1, 0.6) = 0.6
        let s = snap_path_point(&path, gp(8.7, 3.2), &SnapSettings::default());
        assert!(s.from_point);
        assert!(close(s.point, gp(9.0, 3.0)));
        assert_eq!(s.from_point_guide, Some((gp(0.0, 0.0), gp(9.0, 3.0))));
    }

    #[test]
    fn test_from_point_guide_without_snap() {
        let path = [gp(0.0, 0.0), gp(4.0, 0.0), gp(4.0, 4.0)];
        let s = snap_path_point(&path, gp(1.0, 7.0), &SnapSettings::default());
        assert!(!s.from_point);
        assert_eq!(s.from_point_guide, Some((gp(0.0, 0.0), gp(8.0, 4.0))));
    }

    #[test]
    fn test_disabled_snapping() {
        let settings = SnapSettings {
            enabled: false,
            ..Default::default()
        };
        let s = snap_path_point(&[gp(0.0, 0.0)], gp(3.0, 0.1), &settings);
        assert_eq!(s.point, gp(3.0, 0.1));
        let sq = snap_square(3.0, 3.2, &settings, 0.02);
        assert!(!sq.square);
    }

    #[test]
    fn test_square_snap() {
        let sq = snap_square(3.0, 3.2, &SnapSettings::default(), 0.02);
        assert!(sq.square);
        assert!((sq.dx - 3.2).abs() < 1e-12);
        assert!((sq.dz - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_square_snap_preserves_sign() {
        let sq = snap_square(-3.0, 3.2, &SnapSettings::default(), 0.02);
        assert!((sq.dx + 3.2).abs() < 1e-12);
        let sq = snap_square(3.2, -3.0, &SnapSettings::default(), 0.02);
        assert!((sq.dz + 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_square_snap_zero_side_counts_positive() {
        let sq = snap_square(0.015, 0.0, &SnapSettings::default(), 0.01);
        assert!(!sq.square);
        let sq = snap_square(0.0, 0.0, &SnapSettings::default(), 0.0);
        assert!(!sq.square);
    }

    #[test]
    fn test_rectangle_not_square() {
        let sq = snap_square(3.0, 4.0, &SnapSettings::default(), 0.02);
        assert!(!sq.square);
        assert_eq!((sq.dx, sq.dz), (3.0, 4.0));
    }
}
