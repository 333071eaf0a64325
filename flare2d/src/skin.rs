use crate::{Mat2D, NodeId};

/// A bone bound to a skinned path, with the inverse of its bind-pose world transform.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinnedBone {
    pub node: NodeId,
    pub inverse_bind: Mat2D,
}

impl SkinnedBone {
    /// Binds `node` using the world transform it had when the path was authored.
    pub fn from_bind_pose(node: NodeId, bind: &Mat2D) -> Self {
        Self {
            node,
            inverse_bind: bind.invert().unwrap_or_default(),
        }
    }
}

/// Skin resource connecting a path to bones.
///
/// Point weights index the palette produced by [`Skin::bone_matrices`], where index `0` is
/// always the identity and bone `i` lives at `i + 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Skin {
    pub bones: Vec<SkinnedBone>,
}

impl Skin {
    pub fn new(bones: Vec<SkinnedBone>) -> Self {
        Self { bones }
    }

    pub fn is_connected(&self) -> bool {
        !self.bones.is_empty()
    }

    /// Current palette, from each bone's world transform times its inverse bind matrix.
    ///
    /// Bones that `world_of` cannot resolve keep an identity entry so later indices stay aligned.
    pub fn bone_matrices(&self, mut world_of: impl FnMut(NodeId) -> Option<Mat2D>) -> Vec<Mat2D> {
        let mut out = Vec::with_capacity(self.bones.len() + 1);
        out.push(Mat2D::IDENTITY);
        for bone in &self.bones {
            let m = match world_of(bone.node) {
                Some(world) => world.multiply(&bone.inverse_bind),
                None => Mat2D::IDENTITY,
            };
            out.push(m);
        }
        out
    }
}
