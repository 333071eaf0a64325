use crate::NodeId;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Fill attached to a shape. Paint (color, gradient) lives in the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub fill_rule: FillRule,
    pub opacity: f32,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            fill_rule: FillRule::NonZero,
            opacity: 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub cap: StrokeCap,
    pub join: StrokeJoin,
    pub opacity: f32,
}

impl Stroke {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            cap: StrokeCap::Butt,
            join: StrokeJoin::Miter,
            opacity: 1.0,
        }
    }
}

/// Shape masking another shape. Entries of one clip group are intersected by the renderer;
/// separate groups are unioned.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClipShape {
    pub node: NodeId,
    pub intersect: bool,
}

/// Aggregates the paths, fills, strokes and clips that draw together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    paths: Vec<NodeId>,
    fills: Vec<Fill>,
    strokes: Vec<Stroke>,
    clip_groups: Vec<Vec<ClipShape>>,
    transform_affects_stroke: bool,
    pub hidden: bool,
    pub draw_order: i32,
    needs_redraw: bool,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform_affects_stroke(mut self, value: bool) -> Self {
        self.transform_affects_stroke = value;
        self
    }

    /// Whether stroke width scales with the shape's world transform.
    pub fn transform_affects_stroke(&self) -> bool {
        self.transform_affects_stroke
    }

    /// Linked paths, maintained by [`crate::Scene::resolve_path_shape`].
    pub fn paths(&self) -> &[NodeId] {
        &self.paths
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// First fill added, if any.
    pub fn fill(&self) -> Option<&Fill> {
        self.fills.first()
    }

    /// First stroke added, if any.
    pub fn stroke(&self) -> Option<&Stroke> {
        self.strokes.first()
    }

    pub fn add_fill(&mut self, fill: Fill) {
        self.fills.push(fill);
        self.needs_redraw = true;
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.needs_redraw = true;
    }

    pub fn remove_fill(&mut self, index: usize) -> Option<Fill> {
        (index < self.fills.len()).then(|| {
            self.needs_redraw = true;
            self.fills.remove(index)
        })
    }

    pub fn remove_stroke(&mut self, index: usize) -> Option<Stroke> {
        (index < self.strokes.len()).then(|| {
            self.needs_redraw = true;
            self.strokes.remove(index)
        })
    }

    pub fn max_stroke_width(&self) -> f32 {
        self.strokes
            .iter()
            .fold(0.0f32, |acc, stroke| acc.max(stroke.width))
    }

    pub fn clip_groups(&self) -> &[Vec<ClipShape>] {
        &self.clip_groups
    }

    pub fn add_clip_group(&mut self, group: Vec<ClipShape>) {
        self.clip_groups.push(group);
        self.needs_redraw = true;
    }

    pub fn has_clips(&self) -> bool {
        self.clip_groups.iter().any(|group| !group.is_empty())
    }

    /// Returns `false` when `path` is already a member.
    pub(crate) fn add_path(&mut self, path: NodeId) -> bool {
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    pub(crate) fn remove_path(&mut self, path: NodeId) -> bool {
        let before = self.paths.len();
        self.paths.retain(|&p| p != path);
        self.paths.len() != before
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub(crate) fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
