use super::error::SasaError;
use super::geometry::SphereSet;
use super::scratch;
use kiddo::{KdTree, SquaredEuclidean};
use tracing::debug;

/// For every active atom, the other active atoms whose inflated spheres intersect its own.
///
/// Candidates come from a k-d tree over the active centers, queried out to the atom's radius
/// plus the largest radius, and are then filtered by the exact overlap test. Lists are stored
/// contiguously: the neighbors of atom `i` are `indices[offsets[i]..offsets[i + 1]]`, in
/// ascending order.
#[derive(Debug)]
pub(crate) struct NeighborList {
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl NeighborList {
    pub fn build(spheres: &SphereSet<'_>) -> Result<Self, SasaError> {
        let n = spheres.len();
        let mut offsets = scratch::with_capacity(n + 1, "neighbor offsets")?;
        offsets.push(0);
        let mut indices = Vec::new();

        if spheres.n_active() == 0 {
            offsets.resize(n + 1, 0);
            return Ok(Self { offsets, indices });
        }

        let mut tree: KdTree<f64, 3> = KdTree::with_capacity(spheres.n_active());
        for i in spheres.active_indices() {
            let c = spheres.center(i);
            tree.add(&[c.x, c.y, c.z], i as u64);
        }
        let max_radius = spheres.max_radius();

        let mut found = Vec::new();
        for i in 0..n {
            if spheres.is_active(i) {
                found.clear();
                let ci = spheres.center(i);
                let ri = spheres.radius(i);
                let search = ri + max_radius;
                for candidate in
                    tree.within_unsorted::<SquaredEuclidean>(&[ci.x, ci.y, ci.z], search * search)
                {
                    let j = candidate.item as usize;
                    if j == i {
                        continue;
                    }
                    let reach = ri + spheres.radius(j);
                    if (spheres.center(j) - ci).norm_squared() < reach * reach {
                        found.push(j);
                    }
                }
                found.sort_unstable();
                scratch::reserve(&mut indices, found.len(), "neighbor indices")?;
                indices.extend_from_slice(&found);
            }
            offsets.push(indices.len());
        }

        debug!(atoms = n, pairs = indices.len(), "Built neighbor list.");
        Ok(Self { offsets, indices })
    }

    #[inline]
    pub fn of(&self, i: usize) -> &[usize] {
        &self.indices[self.offsets[i]..self.offsets[i + 1]]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }
}
