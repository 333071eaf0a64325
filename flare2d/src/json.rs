//! JSON scene loader.
//!
//! Nodes are listed parents-first; `parent` is the index of an earlier entry in `nodes`, or
//! absent for the scene root. Clip and bone references may point anywhere in the list.

use crate::{
    BoneWeight, ClipShape, CubicPoint, CubicWeights, Error, Fill, FillRule, MAX_PROCEDURAL_POINTS,
    Mat2D, NodeId, NodeKind, Path, PathPoint, PointType, Procedural, Scene, Shape, Skin,
    SkinnedBone, StraightPoint, Stroke, StrokeCap, StrokeJoin,
};
use serde::Deserialize;

fn default_one() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(default)]
    nodes: Vec<NodeDef>,
}

#[derive(Debug, Deserialize)]
struct NodeDef {
    #[serde(default, rename = "type")]
    node_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parent: Option<usize>,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    /// Degrees.
    #[serde(default)]
    rotation: f32,
    #[serde(default = "default_one", rename = "scaleX")]
    scale_x: f32,
    #[serde(default = "default_one", rename = "scaleY")]
    scale_y: f32,
    #[serde(default)]
    hidden: bool,

    // Shapes.
    #[serde(default)]
    fills: Vec<FillDef>,
    #[serde(default)]
    strokes: Vec<StrokeDef>,
    #[serde(default)]
    clips: Vec<Vec<ClipDef>>,
    #[serde(default, rename = "transformAffectsStroke")]
    transform_affects_stroke: bool,
    #[serde(default, rename = "drawOrder")]
    draw_order: i32,

    // Authored paths.
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    points: Vec<PointDef>,
    #[serde(default)]
    skin: Option<SkinDef>,
    #[serde(default, rename = "vertexDeform")]
    vertex_deform: Option<Vec<f32>>,

    // Procedural paths.
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    radius: f32,
    #[serde(default)]
    sides: Option<u32>,
    #[serde(default, rename = "innerRadius")]
    inner_radius: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct FillDef {
    #[serde(default, rename = "fillRule")]
    fill_rule: Option<String>,
    #[serde(default = "default_one")]
    opacity: f32,
}

#[derive(Debug, Deserialize)]
struct StrokeDef {
    #[serde(default)]
    width: f32,
    #[serde(default)]
    cap: Option<String>,
    #[serde(default)]
    join: Option<String>,
    #[serde(default = "default_one")]
    opacity: f32,
}

#[derive(Debug, Deserialize)]
struct ClipDef {
    node: usize,
    #[serde(default = "default_true")]
    intersect: bool,
}

#[derive(Debug, Deserialize)]
struct PointDef {
    #[serde(default, rename = "type")]
    point_type: Option<String>,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    radius: f32,
    #[serde(default, rename = "in")]
    in_point: Option<[f32; 2]>,
    #[serde(default, rename = "out")]
    out_point: Option<[f32; 2]>,
    #[serde(default)]
    weights: Option<WeightsDef>,
}

/// `[bone, weight]` pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeightsDef {
    Single(Vec<(usize, f32)>),
    Cubic {
        translation: Vec<(usize, f32)>,
        #[serde(rename = "in")]
        in_point: Vec<(usize, f32)>,
        #[serde(rename = "out")]
        out_point: Vec<(usize, f32)>,
    },
}

#[derive(Debug, Deserialize)]
struct SkinDef {
    #[serde(default)]
    bones: Vec<SkinBoneDef>,
}

#[derive(Debug, Deserialize)]
struct SkinBoneDef {
    node: usize,
    /// Bind-pose world matrix `[a, b, c, d, tx, ty]`; defaults to the bone's loaded pose.
    #[serde(default)]
    bind: Option<[f32; 6]>,
}

fn weights(pairs: &[(usize, f32)]) -> Vec<BoneWeight> {
    pairs
        .iter()
        .map(|&(bone, weight)| BoneWeight { bone, weight })
        .collect()
}

fn parse_point(node: usize, def: &PointDef) -> Result<PathPoint, Error> {
    let point_type = match def.point_type.as_deref().unwrap_or("straight") {
        "straight" => PointType::Straight,
        "mirrored" => PointType::Mirrored,
        "asymmetric" => PointType::Asymmetric,
        "disconnected" => PointType::Disconnected,
        other => {
            return Err(Error::JsonUnknownPointType {
                node,
                value: other.to_string(),
            });
        }
    };
    let translation = [def.x, def.y];

    if point_type == PointType::Straight {
        let weights = match &def.weights {
            None => None,
            Some(WeightsDef::Single(pairs)) => Some(weights(pairs)),
            Some(WeightsDef::Cubic { translation, .. }) => Some(weights(translation)),
        };
        return Ok(PathPoint::Straight(StraightPoint {
            translation,
            radius: def.radius,
            weights,
        }));
    }

    let weights = match &def.weights {
        None => None,
        Some(WeightsDef::Single(pairs)) => Some(CubicWeights {
            translation: weights(pairs),
            in_point: weights(pairs),
            out_point: weights(pairs),
        }),
        Some(WeightsDef::Cubic {
            translation,
            in_point,
            out_point,
        }) => Some(CubicWeights {
            translation: weights(translation),
            in_point: weights(in_point),
            out_point: weights(out_point),
        }),
    };
    Ok(PathPoint::Cubic(CubicPoint {
        point_type,
        translation,
        in_point: def.in_point.unwrap_or(translation),
        out_point: def.out_point.unwrap_or(translation),
        weights,
    }))
}

fn parse_shape(def: &NodeDef) -> Shape {
    let mut shape = Shape::new().with_transform_affects_stroke(def.transform_affects_stroke);
    shape.hidden = def.hidden;
    shape.draw_order = def.draw_order;
    for fill in &def.fills {
        shape.add_fill(Fill {
            fill_rule: match fill.fill_rule.as_deref() {
                Some("evenOdd") => FillRule::EvenOdd,
                _ => FillRule::NonZero,
            },
            opacity: fill.opacity,
        });
    }
    for stroke in &def.strokes {
        shape.add_stroke(Stroke {
            width: stroke.width,
            cap: match stroke.cap.as_deref() {
                Some("round") => StrokeCap::Round,
                Some("square") => StrokeCap::Square,
                _ => StrokeCap::Butt,
            },
            join: match stroke.join.as_deref() {
                Some("round") => StrokeJoin::Round,
                Some("bevel") => StrokeJoin::Bevel,
                _ => StrokeJoin::Miter,
            },
            opacity: stroke.opacity,
        });
    }
    shape
}

fn parse_kind(index: usize, def: &NodeDef) -> Result<NodeKind, Error> {
    let procedural = |p: Procedural| {
        if p.point_count().is_none() {
            return Err(Error::InvalidValue {
                message: format!(
                    "node {index}: procedural path exceeds {MAX_PROCEDURAL_POINTS} points"
                ),
            });
        }
        let mut path = Path::procedural(p);
        path.hidden = def.hidden;
        Ok(NodeKind::Path(path))
    };
    let (width, height) = (def.width, def.height);

    Ok(match def.node_type.as_deref().unwrap_or("node") {
        "node" => NodeKind::Group,
        "shape" => NodeKind::Shape(parse_shape(def)),
        "path" => {
            let points = def
                .points
                .iter()
                .map(|p| parse_point(index, p))
                .collect::<Result<Vec<_>, _>>()?;
            let mut path = Path::new(points, def.closed);
            path.hidden = def.hidden;
            NodeKind::Path(path)
        }
        "rectangle" => procedural(Procedural::Rectangle {
            width,
            height,
            radius: def.radius,
        })?,
        "ellipse" => procedural(Procedural::Ellipse { width, height })?,
        "triangle" => procedural(Procedural::Triangle { width, height })?,
        "polygon" => procedural(Procedural::Polygon {
            width,
            height,
            sides: def.sides.unwrap_or(5),
        })?,
        "star" => procedural(Procedural::Star {
            width,
            height,
            points: def.sides.unwrap_or(5),
            inner_radius: def.inner_radius.unwrap_or(0.5),
        })?,
        other => {
            return Err(Error::JsonUnknownNodeType {
                node: index,
                value: other.to_string(),
            });
        }
    })
}

impl Scene {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let root: Root = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

        let mut scene = Scene::new();
        let mut ids: Vec<NodeId> = Vec::with_capacity(root.nodes.len());
        for (index, def) in root.nodes.iter().enumerate() {
            let parent = match def.parent {
                None => scene.root(),
                Some(parent) => ids.get(parent).copied().ok_or(Error::JsonUnknownParent {
                    node: index,
                    parent,
                })?,
            };
            let local = Mat2D::from_components(
                def.x,
                def.y,
                def.rotation.to_radians(),
                def.scale_x,
                def.scale_y,
            );
            let name = def.name.clone().unwrap_or_else(|| format!("node{index}"));
            let kind = parse_kind(index, def)?;
            ids.push(scene.add_node(parent, name, local, kind)?);
        }

        let resolve = |node: usize, target: usize, context: &str| {
            ids.get(target)
                .copied()
                .ok_or_else(|| Error::JsonUnknownReference {
                    node,
                    target,
                    context: context.to_string(),
                })
        };

        for (index, def) in root.nodes.iter().enumerate() {
            let id = ids[index];

            for group in &def.clips {
                let clips = group
                    .iter()
                    .map(|clip| {
                        let node = resolve(index, clip.node, "clip")?;
                        if scene.shape(node).is_none() {
                            return Err(Error::NotAShape { index: node.index() });
                        }
                        Ok(ClipShape {
                            node,
                            intersect: clip.intersect,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(shape) = scene.shape_mut(id) {
                    shape.add_clip_group(clips);
                }
            }

            if let Some(skin_def) = &def.skin {
                let mut bones = Vec::with_capacity(skin_def.bones.len());
                for bone in &skin_def.bones {
                    let node = resolve(index, bone.node, "skin")?;
                    let bind = match bone.bind {
                        Some([a, b, c, d, tx, ty]) => Mat2D::new(a, b, c, d, tx, ty),
                        None => scene.world_transform(node).unwrap_or_default(),
                    };
                    bones.push(SkinnedBone::from_bind_pose(node, &bind));
                }
                if let Some(path) = scene.path_mut(id) {
                    path.set_skin(Some(Skin::new(bones)));
                }
            }

            if let Some(values) = &def.vertex_deform {
                let path = scene.path_mut(id).ok_or(Error::NotAPath { index })?;
                path.make_vertex_deform();
                path.set_vertex_deform(values)?;
                scene.mark_vertex_deform_dirty(id);
            }
        }

        scene.update();
        Ok(scene)
    }
}
