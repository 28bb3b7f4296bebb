use std::collections::BTreeMap;

use crate::coords::{Bounds, Rotation, Vec3};
use crate::geometry::Geometry;
use crate::path::Path;
use crate::render::RenderDifference;

/// Path-keyed geometry map.
///
/// Two co-indexed structures: an insertion-ordered path list (the order
/// elements rendered, which `children_of` preserves) and a path-sorted map
/// (which diffing exploits for a lockstep walk).
#[derive(Debug, Clone, Default)]
pub struct RenderTree {
    insertion_order: Vec<Path>,
    rendered: BTreeMap<Path, Geometry>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no geometry has been rendered for `path` yet.
    pub fn needs_updating(&self, path: &Path) -> bool {
        !self.rendered.contains_key(path)
    }

    /// Stamps or overwrites the geometry at `path`.
    pub fn update(&mut self, path: &Path, geometry: Geometry) {
        if !self.rendered.contains_key(path) {
            self.insertion_order.push(path.clone());
        }
        self.rendered.insert(path.clone(), geometry);
    }

    pub fn get(&self, path: &Path) -> Option<&Geometry> {
        self.rendered.get(path)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// All stored paths in path-sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.rendered.keys()
    }

    /// Union of positioned bounds over the subtree rooted at `path`
    /// (including `path` itself); default bounds when nothing is present.
    pub fn positioned_bounds_of(&self, path: &Path) -> Bounds {
        // Start from the first real bounds rather than the zero box so a
        // subtree based at negative coordinates is not clipped to zero.
        let mut bounds: Option<Bounds> = None;
        for (candidate, geometry) in &self.rendered {
            if candidate.is_descendant_of(path, true) {
                let positioned = geometry.positioned_bounds();
                bounds = Some(match bounds {
                    Some(current) => current + positioned,
                    None => positioned,
                });
            }
        }
        bounds.unwrap_or_default()
    }

    pub fn num_children_of(&self, path: &Path) -> usize {
        self.insertion_order
            .iter()
            .filter(|candidate| candidate.is_child_of(path))
            .count()
    }

    /// Direct children of `path`, in insertion (render) order.
    pub fn children_of(&self, path: &Path) -> Vec<(Path, Geometry)> {
        self.insertion_order
            .iter()
            .filter(|candidate| candidate.is_child_of(path))
            .map(|candidate| (candidate.clone(), self.rendered[candidate].clone()))
            .collect()
    }

    /// The subtree below `path`, in insertion order, optionally including
    /// `path` itself.
    pub fn descendants_of(&self, path: &Path, including: bool) -> Vec<(Path, Geometry)> {
        self.insertion_order
            .iter()
            .filter(|candidate| candidate.is_descendant_of(path, including))
            .map(|candidate| (candidate.clone(), self.rendered[candidate].clone()))
            .collect()
    }

    /// Offsets `path` and its whole subtree.
    pub fn move_parent_and_descendants_by(&mut self, path: &Path, offset: Vec3) {
        self.move_subtree(path, offset, None, false);
    }

    /// Like [`RenderTree::move_parent_and_descendants_by`] but leaves the
    /// subtree under `excluding` (inclusive) in place.
    pub fn move_parent_and_descendants_by_excluding(
        &mut self,
        path: &Path,
        offset: Vec3,
        excluding: &Path,
    ) {
        self.move_subtree(path, offset, Some(excluding), false);
    }

    /// Offsets only the subtree below `path`.
    pub fn move_descendants_by(&mut self, path: &Path, offset: Vec3) {
        self.move_subtree(path, offset, None, true);
    }

    fn move_subtree(
        &mut self,
        path: &Path,
        offset: Vec3,
        excluding: Option<&Path>,
        skip_parent: bool,
    ) {
        for (candidate, geometry) in &mut self.rendered {
            let is_self = candidate == path;
            if is_self && skip_parent {
                continue;
            }
            if !is_self && !candidate.is_descendant_of(path, false) {
                continue;
            }
            if let Some(excluded) = excluding {
                if candidate.is_descendant_of(excluded, true) {
                    continue;
                }
            }
            geometry.offset_pos(offset);
        }
    }

    /// Uniformly scales `path` and its subtree in place.
    pub fn scale_parent_and_descendants_by(&mut self, path: &Path, factor: f32) {
        for (candidate, geometry) in &mut self.rendered {
            if candidate.is_descendant_of(path, true) {
                geometry.scale_by(factor);
            }
        }
    }

    /// Rotates `path` and its subtree around the subtree's centre, then
    /// shifts everything back so the subtree's bottom-left corner stays put.
    pub fn rotate_parent_and_descendants_in_place(&mut self, path: &Path, rotation: &Rotation) {
        let positioned = self.positioned_bounds_of(path);
        let old_corner = positioned.bottom_left();
        let pivot = positioned.center();

        for (candidate, geometry) in &mut self.rendered {
            if candidate.is_descendant_of(path, true) {
                geometry.rotate_around(pivot, rotation);
            }
        }

        let new_corner = self.positioned_bounds_of(path).bottom_left();
        self.move_parent_and_descendants_by(path, old_corner - new_corner);
    }

    /// Drops cached geometry so the affected subtree is re-rendered.
    ///
    /// Currently clears the whole tree: partial invalidation would have to
    /// propagate bounds changes upward through every layout ancestor, and
    /// the full render pass is cheap next to that bookkeeping.
    pub fn invalidate_parent_and_child_pos(&mut self, _path: &Path) {
        self.insertion_order.clear();
        self.rendered.clear();
    }

    /// Per-path differences against another snapshot; see
    /// [`RenderDifference`] for orientation. Output is path-sorted.
    pub fn differences_from(&self, other: &RenderTree) -> Vec<(Path, RenderDifference)> {
        let mut differences = Vec::new();
        let mut ours = self.rendered.iter().peekable();
        let mut theirs = other.rendered.iter().peekable();

        loop {
            match (ours.peek(), theirs.peek()) {
                (Some((our_path, our_geometry)), Some((their_path, their_geometry))) => {
                    if our_path < their_path {
                        differences.push(((*our_path).clone(), RenderDifference::SecondMissing));
                        ours.next();
                    } else if their_path < our_path {
                        differences.push(((*their_path).clone(), RenderDifference::FirstMissing));
                        theirs.next();
                    } else {
                        if our_geometry.pos() != their_geometry.pos() {
                            differences.push(((*our_path).clone(), RenderDifference::Pos));
                        }
                        if our_geometry.bounds() != their_geometry.bounds() {
                            differences.push(((*our_path).clone(), RenderDifference::Bounds));
                        }
                        if our_geometry.color() != their_geometry.color() {
                            differences.push(((*our_path).clone(), RenderDifference::Color));
                        }
                        if our_geometry.text() != their_geometry.text() {
                            differences.push(((*our_path).clone(), RenderDifference::Text));
                        }
                        ours.next();
                        theirs.next();
                    }
                }
                (Some((our_path, _)), None) => {
                    differences.push(((*our_path).clone(), RenderDifference::SecondMissing));
                    ours.next();
                }
                (None, Some((their_path, _))) => {
                    differences.push(((*their_path).clone(), RenderDifference::FirstMissing));
                    theirs.next();
                }
                (None, None) => break,
            }
        }

        differences
    }
}
