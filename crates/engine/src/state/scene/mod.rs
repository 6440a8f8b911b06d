//! Scene object registry
//!
//! Arena of drawable objects plus the three collections the tools work with:
//! `placed` (ordered, undo source), `redo` (undone objects) and `selectable`.

mod history;

pub use history::HistoryCommand;

use std::collections::{BTreeMap, BTreeSet};

use shared::{GroundPoint, ObjectDescription, ObjectId, ObjectKind, Rgb};

use crate::state::settings::RedoPolicy;
use crate::viewport::mesh::{face_mesh, prism_mesh, MeshData};
use crate::viewport::picking::{cast, Aabb, Hit, PickShape, Ray};

/// One drawable object owned by the registry
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub color: Rgb,
    /// Triangles for faces and prisms; edges are picked as segments
    pub mesh: Option<MeshData>,
    pub bounds: Aabb,
}

impl SceneObject {
    fn new(id: ObjectId, kind: ObjectKind, color: Rgb) -> Self {
        let mesh = match &kind {
            ObjectKind::Edge { .. } => None,
            ObjectKind::Face { contour, base } => Some(face_mesh(contour, *base, color)),
            ObjectKind::Prism {
                contour,
                base,
                height,
            } => Some(prism_mesh(contour, *base, *height, color)),
        };
        let bounds = match (&kind, &mesh) {
            (ObjectKind::Edge { start, end }, _) => {
                Aabb::from_points([start.to_vec3(), end.to_vec3()])
            }
            (_, Some(mesh)) if mesh.vertex_count() > 0 => Aabb::from_mesh(mesh),
            (_, _) => {
                let anchor = kind.anchor();
                Aabb::from_points([anchor])
            }
        };
        Self {
            id,
            kind,
            color,
            mesh,
            bounds,
        }
    }

    pub fn pick_shape(&self) -> PickShape<'_> {
        match (&self.kind, &self.mesh) {
            (ObjectKind::Edge { start, end }, _) => {
                PickShape::Segment(start.to_vec3(), end.to_vec3())
            }
            (_, Some(mesh)) => PickShape::Mesh(mesh),
            (_, None) => {
                let anchor = self.kind.anchor();
                PickShape::Segment(anchor, anchor)
            }
        }
    }

    /// Face metadata used by Push/Pull
    pub fn face(&self) -> Option<(&[GroundPoint], GroundPoint)> {
        self.kind.as_face().map(|f| (f.contour, f.base))
    }
}

/// Registry of scene objects with undo/redo stacks
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: BTreeMap<ObjectId, SceneObject>,
    placed: Vec<ObjectId>,
    redo: Vec<ObjectId>,
    selectable: BTreeSet<ObjectId>,
    next_id: u64,
    version: u64,
    redo_policy: RedoPolicy,
}

impl SceneRegistry {
    pub fn new(redo_policy: RedoPolicy) -> Self {
        Self {
            redo_policy,
            ..Default::default()
        }
    }

    pub fn redo_policy(&self) -> RedoPolicy {
        self.redo_policy
    }

    pub fn set_redo_policy(&mut self, policy: RedoPolicy) {
        self.redo_policy = policy;
    }

    /// Current registry version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Create an object and add it to `placed` and `selectable` together.
    pub fn insert(&mut self, kind: ObjectKind, color: Rgb) -> ObjectId {
        self.on_edit();
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        tracing::info!("Placed {} {}", kind.label(), id);
        self.objects.insert(id, SceneObject::new(id, kind, color));
        self.placed.push(id);
        self.selectable.insert(id);
        self.bump();
        id
    }

    /// Remove an object from the scene and from every collection.
    ///
    /// This is the only removal path; absent ids are skipped.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.objects.remove(&id)?;
        self.placed.retain(|p| *p != id);
        self.redo.retain(|r| *r != id);
        self.selectable.remove(&id);
        self.on_edit();
        self.bump();
        tracing::debug!("Removed {} {}", object.kind.label(), id);
        Some(object)
    }

    fn on_edit(&mut self) {
        if self.redo_policy == RedoPolicy::ClearOnEdit && !self.redo.is_empty() {
            for id in std::mem::take(&mut self.redo) {
                self.objects.remove(&id);
            }
            tracing::debug!("Redo stack cleared by new edit");
        }
    }

    /// Live object (placed, not undone)
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id).filter(|_| self.is_placed(id))
    }

    /// Change an object's material color. Returns the previous color.
    pub fn set_color(&mut self, id: ObjectId, color: Rgb) -> Option<Rgb> {
        let object = self.objects.get_mut(&id)?;
        let previous = object.color;
        if previous != color {
            object.color = color;
            if let Some(mesh) = object.mesh.as_mut() {
                mesh.set_color(color);
            }
            self.version += 1;
        }
        Some(previous)
    }

    pub fn placed(&self) -> &[ObjectId] {
        &self.placed
    }

    pub fn redo_stack(&self) -> &[ObjectId] {
        &self.redo
    }

    pub fn selectable(&self) -> &BTreeSet<ObjectId> {
        &self.selectable
    }

    pub fn is_placed(&self, id: ObjectId) -> bool {
        self.placed.contains(&id)
    }

    pub fn is_selectable(&self, id: ObjectId) -> bool {
        self.selectable.contains(&id)
    }

    /// Live objects in placement order
    pub fn live_objects(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.placed.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Cast a ray against the given ids; hits sorted nearest first.
    pub fn pick_among<'a>(
        &'a self,
        ray: &Ray,
        ids: impl IntoIterator<Item = &'a ObjectId>,
        line_tolerance: f64,
    ) -> Vec<Hit> {
        let candidates = ids
            .into_iter()
            .filter_map(|id| self.objects.get(id))
            .map(|o| (o.id, o.bounds, o.pick_shape()));
        cast(ray, candidates, line_tolerance)
    }

    /// Nearest hit among `placed`
    pub fn pick_placed(&self, ray: &Ray, line_tolerance: f64) -> Option<Hit> {
        self.pick_among(ray, &self.placed, line_tolerance)
            .into_iter()
            .next()
    }

    /// Nearest hit among `selectable`
    pub fn pick_selectable(&self, ray: &Ray, line_tolerance: f64) -> Option<Hit> {
        self.pick_among(ray, &self.selectable, line_tolerance)
            .into_iter()
            .next()
    }

    /// Read-only snapshot of the live scene
    pub fn describe(&self) -> Vec<ObjectDescription> {
        self.live_objects()
            .map(|o| ObjectDescription {
                id: o.id,
                kind: o.kind.clone(),
                color: o.color,
                selectable: self.selectable.contains(&o.id),
            })
            .collect()
    }

    pub fn count_where(&self, f: impl Fn(&ObjectKind) -> bool) -> usize {
        self.live_objects().filter(|o| f(&o.kind)).count()
    }
}
