use crate::{Aabb, Error, Mat2D, Path, PathPoint, Shape, Skin, path_obb};

/// Local transform changed.
pub const DIRTY_TRANSFORM: u8 = 1 << 0;
/// World transform must be recomputed from the parent.
pub const DIRTY_WORLD_TRANSFORM: u8 = 1 << 1;
/// A path's vertex-deform buffer must be written back onto its points.
pub const DIRTY_VERTEX_DEFORM: u8 = 1 << 2;

/// Handle to a node in a [`Scene`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Plain transform node (groups, bones).
    Group,
    Shape(Shape),
    Path(Path),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Mat2D,
    world: Mat2D,
    dirt: u8,
    kind: NodeKind,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn local_transform(&self) -> &Mat2D {
        &self.local
    }

    /// World transform as of the last [`Scene::update`].
    pub fn world_transform(&self) -> &Mat2D {
        &self.world
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether paths below this node attach to it.
    pub fn is_shape_container(&self) -> bool {
        matches!(self.kind, NodeKind::Shape(_))
    }

    pub fn shape(&self) -> Option<&Shape> {
        match &self.kind {
            NodeKind::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            NodeKind::Path(p) => Some(p),
            _ => None,
        }
    }
}

/// Node tree owning every shape and path.
///
/// Path/shape membership is resolved whenever a path's ancestry changes. Transform and
/// vertex-deform edits are recorded as dirt and applied by [`Scene::update`]; geometry
/// queries always recompute from the current state.
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    dirty: Vec<NodeId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene with a single root group.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "root".to_string(),
                parent: None,
                children: Vec::new(),
                local: Mat2D::IDENTITY,
                world: Mat2D::IDENTITY,
                dirt: 0,
                kind: NodeKind::Group,
            }],
            dirty: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    pub fn shape(&self, id: NodeId) -> Option<&Shape> {
        self.node(id)?.shape()
    }

    pub fn path(&self, id: NodeId) -> Option<&Path> {
        self.node(id)?.path()
    }

    pub fn shape_mut(&mut self, id: NodeId) -> Option<&mut Shape> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Shape(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable path access for point, skin and vertex-deform edits.
    ///
    /// Call [`Scene::invalidate_drawable`] or [`Scene::mark_vertex_deform_dirty`] afterwards so
    /// the owning shape is redrawn.
    pub fn path_mut(&mut self, id: NodeId) -> Option<&mut Path> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn world_transform(&self, id: NodeId) -> Option<Mat2D> {
        self.node(id).map(|n| n.world)
    }

    fn check(&self, id: NodeId) -> Result<(), Error> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::UnknownNode { index: id.index() })
        }
    }

    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Mat2D,
        kind: NodeKind,
    ) -> Result<NodeId, Error> {
        self.check(parent)?;
        let id = NodeId(u32::try_from(self.nodes.len()).map_err(|_| Error::InvalidValue {
            message: "scene node limit reached".to_string(),
        })?);
        let world = self.nodes[parent.index()].world.multiply(&local);
        self.nodes.push(Node {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            local,
            world,
            dirt: 0,
            kind,
        });
        self.nodes[parent.index()].children.push(id);
        if self.nodes[parent.index()].dirt & DIRTY_WORLD_TRANSFORM != 0 {
            self.add_dirt(id, DIRTY_WORLD_TRANSFORM, false);
        }
        if matches!(self.nodes[id.index()].kind, NodeKind::Path(_)) {
            self.resolve_path_shape(id);
        }
        Ok(id)
    }

    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Mat2D,
    ) -> Result<NodeId, Error> {
        self.add_node(parent, name, local, NodeKind::Group)
    }

    pub fn add_shape(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Mat2D,
        shape: Shape,
    ) -> Result<NodeId, Error> {
        self.add_node(parent, name, local, NodeKind::Shape(shape))
    }

    pub fn add_path(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Mat2D,
        path: Path,
    ) -> Result<NodeId, Error> {
        self.add_node(parent, name, local, NodeKind::Path(path))
    }

    /// Adds a copy of `source` (see [`Path::make_instance`]) under `parent`.
    pub fn instance_path(&mut self, source: NodeId, parent: NodeId) -> Result<NodeId, Error> {
        let node = self
            .node(source)
            .ok_or(Error::UnknownNode {
                index: source.index(),
            })?;
        let path = node.path().ok_or(Error::NotAPath {
            index: source.index(),
        })?;
        let instance = path.make_instance();
        let name = node.name.clone();
        let local = node.local;
        self.add_path(parent, name, local, instance)
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes[node.index()].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Moves `node` (with its subtree) under `parent` and relinks every path it contains.
    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) -> Result<(), Error> {
        self.check(node)?;
        self.check(parent)?;
        if self.is_ancestor_or_self(node, parent) {
            return Err(Error::CyclicParent {
                node: node.index(),
                parent: parent.index(),
            });
        }

        if let Some(old) = self.nodes[node.index()].parent {
            self.nodes[old.index()].children.retain(|&c| c != node);
        }
        self.nodes[node.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(node);

        self.add_dirt(node, DIRTY_WORLD_TRANSFORM, true);
        for id in self.subtree(node) {
            if matches!(self.nodes[id.index()].kind, NodeKind::Path(_)) {
                self.resolve_path_shape(id);
            }
        }
        Ok(())
    }

    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }
        out
    }

    /// Nearest ancestor that is a shape container, stopping at the root.
    pub fn nearest_shape(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.node(node)?.parent;
        while let Some(id) = current {
            let n = &self.nodes[id.index()];
            if n.is_shape_container() {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    /// Re-links `path` to its nearest enclosing shape and recomputes its root flag.
    pub fn resolve_path_shape(&mut self, path: NodeId) {
        let Some(previous) = self.path(path).map(Path::shape) else {
            return;
        };
        if let Some(shape) = previous.and_then(|old| self.shape_mut(old)) {
            shape.remove_path(path);
            shape.invalidate();
        }

        let found = self.nearest_shape(path);
        if let Some(shape_id) = found {
            if let Some(shape) = self.shape_mut(shape_id) {
                if !shape.add_path(path) {
                    log::debug!(
                        "path {} already linked to shape {}",
                        path.index(),
                        shape_id.index()
                    );
                }
                shape.invalidate();
            }
        }

        let is_root_path = found.is_some() && found == self.nodes[path.index()].parent;
        if previous != found {
            log::debug!(
                "path {} relinked from {:?} to {:?}",
                path.index(),
                previous.map(NodeId::index),
                found.map(NodeId::index)
            );
        }
        if let Some(p) = self.path_mut(path) {
            p.set_shape_link(found, is_root_path);
        }
    }

    pub fn set_local_transform(&mut self, id: NodeId, local: Mat2D) -> Result<(), Error> {
        self.check(id)?;
        self.nodes[id.index()].local = local;
        self.add_dirt(id, DIRTY_TRANSFORM, false);
        self.add_dirt(id, DIRTY_WORLD_TRANSFORM, true);
        Ok(())
    }

    /// Records `dirt` on a node. Returns `false` when all of those bits were already set.
    pub fn add_dirt(&mut self, id: NodeId, dirt: u8, recurse: bool) -> bool {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return false;
        };
        if node.dirt & dirt == dirt {
            return false;
        }
        if node.dirt == 0 {
            self.dirty.push(id);
        }
        node.dirt |= dirt;
        self.on_dirty(id);

        if recurse {
            let children = self.nodes[id.index()].children.clone();
            for child in children {
                self.add_dirt(child, dirt, true);
            }
        }
        true
    }

    fn on_dirty(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let owner = match &node.kind {
            NodeKind::Path(p) => p.shape(),
            _ => None,
        };
        if let Some(shape) = owner.and_then(|s| self.shape_mut(s)) {
            shape.invalidate();
        }
    }

    pub fn mark_vertex_deform_dirty(&mut self, path: NodeId) -> bool {
        self.add_dirt(path, DIRTY_VERTEX_DEFORM, false)
    }

    /// Flags `path` and its owning shape for re-render.
    pub fn invalidate_drawable(&mut self, path: NodeId) {
        let owner = self.path(path).and_then(Path::shape);
        if let Some(shape) = owner.and_then(|s| self.shape_mut(s)) {
            shape.invalidate();
        }
    }

    /// Replaces an authored path's points.
    pub fn set_path_points(&mut self, path: NodeId, points: Vec<PathPoint>) -> Result<(), Error> {
        let target = self
            .path_mut(path)
            .ok_or(Error::NotAPath {
                index: path.index(),
            })?
            .points_mut()
            .ok_or_else(|| Error::InvalidValue {
                message: format!("path {} is procedural", path.index()),
            })?;
        *target = points;
        self.invalidate_drawable(path);
        Ok(())
    }

    pub fn set_path_closed(&mut self, path: NodeId, closed: bool) -> Result<(), Error> {
        let target = self.path_mut(path).ok_or(Error::NotAPath {
            index: path.index(),
        })?;
        if target.is_closed() != closed {
            target.set_closed(closed);
            self.invalidate_drawable(path);
        }
        Ok(())
    }

    /// Binds or unbinds a skin. The points are skinned from the next query on.
    pub fn set_path_skin(&mut self, path: NodeId, skin: Option<Skin>) -> Result<(), Error> {
        self.path_mut(path)
            .ok_or(Error::NotAPath {
                index: path.index(),
            })?
            .set_skin(skin);
        self.invalidate_drawable(path);
        Ok(())
    }

    /// Resizes a procedural path.
    pub fn set_procedural_size(
        &mut self,
        path: NodeId,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        let params = self
            .path_mut(path)
            .ok_or(Error::NotAPath {
                index: path.index(),
            })?
            .procedural_params_mut()
            .ok_or_else(|| Error::InvalidValue {
                message: format!("path {} is not procedural", path.index()),
            })?;
        let width_changed = params.set_width(width);
        let height_changed = params.set_height(height);
        if width_changed || height_changed {
            self.invalidate_drawable(path);
        }
        Ok(())
    }

    /// Applies pending dirt, parents before children.
    ///
    /// # Panics
    ///
    /// Panics when a dirty vertex-deform buffer no longer matches its path's point layout.
    pub fn update(&mut self) {
        let mut dirty = std::mem::take(&mut self.dirty);
        dirty.sort_by_key(|&id| (self.depth(id), id));

        let mut moved_world = Vec::new();
        for id in dirty {
            let dirt = std::mem::take(&mut self.nodes[id.index()].dirt);
            if dirt & DIRTY_WORLD_TRANSFORM != 0 {
                let node = &self.nodes[id.index()];
                let world = match node.parent {
                    Some(parent) => self.nodes[parent.index()].world.multiply(&node.local),
                    None => node.local,
                };
                self.nodes[id.index()].world = world;
                moved_world.push(id);
            }

            let is_path = match &mut self.nodes[id.index()].kind {
                NodeKind::Path(path) => {
                    if dirt & DIRTY_VERTEX_DEFORM != 0 {
                        path.apply_vertex_deform();
                    }
                    true
                }
                NodeKind::Shape(shape) => {
                    shape.invalidate();
                    false
                }
                NodeKind::Group => false,
            };
            if is_path {
                self.invalidate_drawable(id);
            }
        }

        if moved_world.is_empty() {
            return;
        }
        // Skinned paths follow their bones even when the path node itself did not move.
        let skinned: Vec<NodeId> = self
            .node_ids()
            .filter(|&id| {
                self.path(id)
                    .and_then(Path::skin)
                    .is_some_and(|skin| skin.bones.iter().any(|b| moved_world.contains(&b.node)))
            })
            .collect();
        for id in skinned {
            self.invalidate_drawable(id);
        }
    }

    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.index()].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.index()].parent;
        }
        depth
    }

    /// Shapes flagged for re-render since the last call, with their flags cleared.
    pub fn take_redraw(&mut self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if let NodeKind::Shape(shape) = &mut node.kind {
                if shape.take_redraw() {
                    out.push(NodeId(index as u32));
                }
            }
        }
        out
    }

    fn bone_matrices(&self, path: &Path) -> Option<Vec<Mat2D>> {
        path.skin()
            .filter(|_| path.is_connected_to_bones())
            .map(|skin| skin.bone_matrices(|bone| self.world_transform(bone)))
    }

    /// Skinned points when the path is bound to bones, otherwise the authored points.
    pub fn deformed_points(&self, id: NodeId) -> Option<Vec<PathPoint>> {
        let node = self.node(id)?;
        let path = node.path()?;
        let bones = self.bone_matrices(path);
        Some(path.deformed_points(&node.world, bones.as_deref()))
    }

    /// Render-ready points: skinned and corner-expanded.
    pub fn path_points(&self, id: NodeId) -> Option<Vec<PathPoint>> {
        let node = self.node(id)?;
        let path = node.path()?;
        let bones = self.bone_matrices(path);
        Some(path.render_points(&node.world, bones.as_deref()))
    }

    pub fn path_obb(&self, id: NodeId) -> Option<Aabb> {
        Some(path_obb(&self.path_points(id)?))
    }

    /// Path bounds in the space its shape aggregates in.
    ///
    /// Skinned paths hold world-space points and are brought back into the parent's space.
    /// Paths nested below a shape through intermediate nodes are expressed relative to the
    /// shape's world transform. Everything else uses the path's local transform.
    pub fn path_aabb(&self, id: NodeId) -> Option<Aabb> {
        let node = self.node(id)?;
        let path = node.path()?;
        let obb = self.path_obb(id)?;
        if obb.is_empty() {
            return Some(Aabb::EMPTY);
        }

        let transform = if path.is_connected_to_bones() {
            let parent_world = node
                .parent
                .map_or(Mat2D::IDENTITY, |p| self.nodes[p.index()].world);
            parent_world.invert().unwrap_or_else(|| {
                log::warn!("parent of path {} has a singular world transform", id.index());
                Mat2D::IDENTITY
            })
        } else if let Some(shape) = path.shape().filter(|_| !path.is_root_path()) {
            match self.nodes[shape.index()].world.invert() {
                Some(inverse) => inverse.multiply(&node.world),
                None => {
                    log::warn!("shape {} has a singular world transform", shape.index());
                    Mat2D::IDENTITY
                }
            }
        } else {
            node.local
        };

        Some(obb.transformed(&transform))
    }

    /// World-space bounds of a shape.
    ///
    /// Clipped shapes are bounded by the union of their clip shapes. Otherwise the bounds of
    /// the paths that are direct children are unioned, padded by half the widest stroke and
    /// mapped through the shape's world transform. Paths nested below intermediate nodes do not
    /// contribute. Returns [`Aabb::EMPTY`] when nothing contributes.
    pub fn shape_aabb(&self, id: NodeId) -> Option<Aabb> {
        self.shape(id)?;
        let mut visiting = Vec::new();
        Some(self.shape_aabb_inner(id, &mut visiting))
    }

    fn shape_aabb_inner(&self, id: NodeId, visiting: &mut Vec<NodeId>) -> Aabb {
        let Some(shape) = self.shape(id) else {
            return Aabb::EMPTY;
        };
        if visiting.contains(&id) {
            log::warn!("clip cycle through shape {}", id.index());
            return Aabb::EMPTY;
        }

        if shape.has_clips() {
            visiting.push(id);
            let mut out = Aabb::EMPTY;
            for clip in shape.clip_groups().iter().flatten() {
                out = out.union(&self.shape_aabb_inner(clip.node, visiting));
            }
            visiting.pop();
            return out;
        }

        let mut local = Aabb::EMPTY;
        for &child in &self.nodes[id.index()].children {
            if let Some(bounds) = self.path_aabb(child) {
                local = local.union(&bounds);
            }
        }
        if local.is_empty() {
            return Aabb::EMPTY;
        }

        let padded = local.padded(shape.max_stroke_width() / 2.0);
        padded.transformed(&self.nodes[id.index()].world)
    }
}
