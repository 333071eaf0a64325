use crate::deform::{apply_vertex_deform, read_vertex_deform, vertex_deform_len};
use crate::{Error, Mat2D, NodeId, PathPoint, Procedural, Skin, expand_corners};
use std::borrow::Cow;

/// Where a path's points come from.
#[derive(Clone, Debug, PartialEq)]
pub enum PathSource {
    /// Authored point list, editable and skinnable.
    Points(Vec<PathPoint>),
    /// Points generated from parameters on every read.
    Procedural(Procedural),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    source: PathSource,
    closed: bool,
    pub hidden: bool,

    shape: Option<NodeId>,
    is_root_path: bool,

    vertex_deform: Option<Vec<f32>>,
    skin: Option<Skin>,
}

impl Path {
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        Self {
            source: PathSource::Points(points),
            closed,
            hidden: false,
            shape: None,
            is_root_path: false,
            vertex_deform: None,
            skin: None,
        }
    }

    /// Procedural paths are always closed.
    pub fn procedural(procedural: Procedural) -> Self {
        Self {
            source: PathSource::Procedural(procedural),
            ..Self::new(Vec::new(), true)
        }
    }

    pub fn with_skin(mut self, skin: Skin) -> Self {
        self.skin = Some(skin);
        self
    }

    pub fn source(&self) -> &PathSource {
        &self.source
    }

    /// Current points, before skinning and corner expansion.
    pub fn points(&self) -> Cow<'_, [PathPoint]> {
        match &self.source {
            PathSource::Points(points) => Cow::Borrowed(points),
            PathSource::Procedural(p) => Cow::Owned(p.points()),
        }
    }

    /// `None` for procedural paths.
    pub fn points_mut(&mut self) -> Option<&mut Vec<PathPoint>> {
        match &mut self.source {
            PathSource::Points(points) => Some(points),
            PathSource::Procedural(_) => None,
        }
    }

    pub fn procedural_params(&self) -> Option<&Procedural> {
        match &self.source {
            PathSource::Points(_) => None,
            PathSource::Procedural(p) => Some(p),
        }
    }

    pub fn procedural_params_mut(&mut self) -> Option<&mut Procedural> {
        match &mut self.source {
            PathSource::Points(_) => None,
            PathSource::Procedural(p) => Some(p),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Changes the render geometry; [`crate::Scene::set_path_closed`] also redraws the shape.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Nearest enclosing shape, kept in sync by the scene.
    pub fn shape(&self) -> Option<NodeId> {
        self.shape
    }

    /// `true` when the direct parent is the owning shape.
    pub fn is_root_path(&self) -> bool {
        self.is_root_path
    }

    pub(crate) fn set_shape_link(&mut self, shape: Option<NodeId>, is_root_path: bool) {
        self.shape = shape;
        self.is_root_path = is_root_path;
    }

    pub fn skin(&self) -> Option<&Skin> {
        self.skin.as_ref()
    }

    /// Changes the render geometry; [`crate::Scene::set_path_skin`] also redraws the shape.
    pub fn set_skin(&mut self, skin: Option<Skin>) {
        self.skin = skin;
    }

    /// Skinned paths store world-space points.
    pub fn is_connected_to_bones(&self) -> bool {
        matches!(self.source, PathSource::Points(_))
            && self.skin.as_ref().is_some_and(Skin::is_connected)
    }

    /// Points after skinning.
    ///
    /// Without a bone palette, or when the path is not connected to bones, this is exactly
    /// [`Path::points`]. Points without weights keep their authored values.
    pub fn deformed_points(&self, world: &Mat2D, bones: Option<&[Mat2D]>) -> Vec<PathPoint> {
        let points = self.points();
        let Some(bones) = bones.filter(|_| self.is_connected_to_bones()) else {
            return points.into_owned();
        };
        points
            .iter()
            .map(|p| p.skin(world, bones).unwrap_or_else(|| p.clone()))
            .collect()
    }

    /// Render-ready points: skinned, then with rounded corners expanded into cubics.
    pub fn render_points(&self, world: &Mat2D, bones: Option<&[Mat2D]>) -> Vec<PathPoint> {
        expand_corners(&self.deformed_points(world, bones), self.closed)
    }

    /// Creates the vertex-deform buffer from the current points.
    ///
    /// Returns `false` without touching anything when a buffer already exists or the path is
    /// procedural; call [`Path::reset_vertex_deform`] first to re-derive it.
    pub fn make_vertex_deform(&mut self) -> bool {
        if self.vertex_deform.is_some() {
            log::debug!("vertex deform already created; keeping existing buffer");
            return false;
        }
        let PathSource::Points(points) = &self.source else {
            return false;
        };
        self.vertex_deform = Some(read_vertex_deform(points));
        true
    }

    pub fn reset_vertex_deform(&mut self) {
        self.vertex_deform = None;
    }

    pub fn vertex_deform(&self) -> Option<&[f32]> {
        self.vertex_deform.as_deref()
    }

    /// Direct access for animation writes; the length cannot change through this view.
    pub fn vertex_deform_mut(&mut self) -> Option<&mut [f32]> {
        self.vertex_deform.as_deref_mut()
    }

    /// Overwrites the buffer contents. The buffer must already exist.
    pub fn set_vertex_deform(&mut self, values: &[f32]) -> Result<(), Error> {
        let Some(buffer) = self.vertex_deform.as_mut() else {
            return Err(Error::InvalidValue {
                message: "vertex deform buffer has not been created".to_string(),
            });
        };
        if buffer.len() != values.len() {
            return Err(Error::VertexDeformLength {
                expected: buffer.len(),
                actual: values.len(),
            });
        }
        buffer.copy_from_slice(values);
        Ok(())
    }

    /// Number of floats a buffer for the current point layout needs.
    pub fn vertex_deform_layout_len(&self) -> usize {
        vertex_deform_len(&self.points())
    }

    /// Writes the buffer back onto the points. Returns `false` when there is no buffer.
    ///
    /// # Panics
    ///
    /// Panics when the buffer length no longer matches the point layout.
    pub(crate) fn apply_vertex_deform(&mut self) -> bool {
        let (Some(values), PathSource::Points(points)) = (&self.vertex_deform, &mut self.source)
        else {
            return false;
        };
        apply_vertex_deform(points, values);
        true
    }

    /// Copy suitable for a new scene instance: points, flags, skin and vertex-deform buffer
    /// carry over, the shape link does not.
    pub fn make_instance(&self) -> Self {
        Self {
            shape: None,
            is_root_path: false,
            ..self.clone()
        }
    }
}
