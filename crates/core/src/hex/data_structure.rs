use crate::hex::OffsetPoint;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt::Debug,
};

/// A set of offset points
pub type OffsetPointSet = HashSet<OffsetPoint, FnvBuildHasher>;
/// A map of offset points to some `T`
pub type OffsetPointMap<T> = HashMap<OffsetPoint, T, FnvBuildHasher>;
/// An ORDERED map of offset points to some `T`. This has some extra memory
/// overhead, so we should only use it when we actually need the ordering.
pub type OffsetPointIndexMap<T> = IndexMap<OffsetPoint, T, FnvBuildHasher>;

/// Get the (at most 6) neighbors of a hex that satisfy a predicate. This is
/// the building block for land/water adjacency checks and flood fills.
pub fn neighbors_matching<P: Fn(OffsetPoint) -> bool>(
    point: OffsetPoint,
    predicate: P,
) -> Vec<OffsetPoint> {
    point.adjacents().filter(|adj| predicate(*adj)).collect()
}

/// A cluster is a set of contiguous hexes. All items in a cluster are adjacent
/// to at least one other item in the cluster (unless the cluster is a
/// singular item). Islands and bodies of water are both clusters.
#[derive(Clone, Debug)]
pub struct Cluster<T> {
    tiles: OffsetPointIndexMap<T>,
    adjacents: OffsetPointSet,
}

impl<T: Debug> Cluster<T> {
    /// Locate clusters of hexes within a map according to a predicate. All
    /// items that satisfy the predicate will be clustered such that any two
    /// satisfactory hexes that are adjacent to each other will be in a cluster
    /// together. The returned clusters borrow the items in the map.
    pub fn predicate<P: Fn(&T) -> bool>(
        tiles: &OffsetPointMap<T>,
        predicate: P,
    ) -> Vec<Cluster<&'_ T>> {
        // - Create a pool of items that have yet to be clustered
        // - Grab an item from the pool
        // - If it matches the predicate, do a BFS out from that item, including
        //   all items that match the predicate
        // - Once we run out of matching items, consider the cluster complete
        // - Repeat with the remaining unclustered items

        // Sort the pool so the output order doesn't depend on hashing
        let mut pool: Vec<(OffsetPoint, &T)> =
            tiles.iter().map(|(pos, t)| (*pos, t)).collect();
        pool.sort_unstable_by_key(|(pos, _)| *pos);
        let mut remaining: OffsetPointIndexMap<&T> = pool.into_iter().collect();
        let mut clusters: Vec<Cluster<&T>> = Vec::new();

        while let Some(first_entry) = remaining.pop() {
            let mut cluster = OffsetPointIndexMap::default();
            let mut bfs_queue: VecDeque<(OffsetPoint, &T)> = VecDeque::new();
            bfs_queue.push_back(first_entry);

            while let Some((pos, item)) = bfs_queue.pop_front() {
                if predicate(item) {
                    cluster.insert(pos, item);

                    // Pull matching neighbors out of the pool and queue them
                    let rem = &mut remaining;
                    let neighbors =
                        neighbors_matching(pos, |adj| rem.contains_key(&adj));
                    bfs_queue.extend(
                        neighbors
                            .into_iter()
                            .filter_map(|adj| rem.swap_remove_entry(&adj)),
                    );
                }
            }

            if !cluster.is_empty() {
                clusters.push(Cluster::new(cluster));
            }
        }

        clusters
    }

    pub fn new(tiles: OffsetPointIndexMap<T>) -> Self {
        // Initialize the set of all hexes that are adjacent to (but not in) the
        // cluster
        let mut adjacents = OffsetPointSet::default();
        for pos in tiles.keys() {
            adjacents.extend(neighbors_matching(*pos, |adj| {
                !tiles.contains_key(&adj)
            }));
        }
        Self { tiles, adjacents }
    }

    /// A reference to the map of hexes in this cluster
    pub fn tiles(&self) -> &OffsetPointIndexMap<T> {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: OffsetPoint) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// The set of positions that are directly adjacent to at least one hex in
    /// this cluster, but NOT in the cluster themselves. **These positions do
    /// not necessarily exist on the map!**
    pub fn adjacents(&self) -> &OffsetPointSet {
        &self.adjacents
    }

    /// Add a new hex to the cluster. Panics if there is already a hex at that
    /// position, or if the new hex isn't contiguous to the cluster.
    pub fn insert(&mut self, pos: OffsetPoint, tile: T) {
        let removed = self.adjacents.remove(&pos);
        assert!(
            removed,
            "cannot add hex at {} to cluster {:?}, it is not adjacent!",
            pos,
            self
        );

        if self.tiles.contains_key(&pos) {
            panic!("hex {} is already in cluster {:?}", pos, self);
        }
        self.tiles.insert(pos, tile);
        let tiles = &self.tiles;
        self.adjacents
            .extend(neighbors_matching(pos, |adj| !tiles.contains_key(&adj)));
    }
}
