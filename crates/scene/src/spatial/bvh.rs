use foundation::bounds::GeoBounds;

/// A deterministic bounding volume hierarchy over `GeoBounds` items.
///
/// Items are identified by their position in the input sequence.
///
/// Ordering contract:
/// - `query` returns item positions in ascending order, i.e. input order.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        bounds: GeoBounds,
        items: Vec<Item>,
    },
    Internal {
        bounds: GeoBounds,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Item {
    pub index: usize,
    pub bounds: GeoBounds,
}

impl Bvh {
    pub fn build(items: Vec<Item>) -> Self {
        let mut nodes = Vec::new();
        let mut items = items;
        if !items.is_empty() {
            let _root = build_node(&mut nodes, &mut items);
        }
        Self { nodes }
    }

    /// Items whose bounds intersect `query` (open-interval overlap).
    pub fn query(&self, query: &GeoBounds) -> Vec<usize> {
        if self.nodes.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<usize> = Vec::new();
        let mut stack: Vec<usize> = vec![0];

        while let Some(idx) = stack.pop() {
            match &self.nodes[idx] {
                Node::Leaf { bounds, items } => {
                    if !bounds.intersects(query) {
                        continue;
                    }
                    for item in items {
                        if item.bounds.intersects(query) {
                            hits.push(item.index);
                        }
                    }
                }
                Node::Internal {
                    bounds,
                    left,
                    right,
                } => {
                    if !bounds.intersects(query) {
                        continue;
                    }
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }

        hits.sort_unstable();
        hits.dedup();
        hits
    }
}

const LEAF_MAX: usize = 8;

fn build_node(nodes: &mut Vec<Node>, items: &mut [Item]) -> usize {
    if items.len() <= LEAF_MAX {
        let bounds = bounds_for_items(items);
        let leaf_items = items.to_vec();
        let idx = nodes.len();
        nodes.push(Node::Leaf {
            bounds,
            items: leaf_items,
        });
        return idx;
    }

    let bounds = bounds_for_items(items);
    let split_lat = split_on_latitude(&bounds);

    items.sort_by(|a, b| {
        let ca = centroid_axis(&a.bounds, split_lat);
        let cb = centroid_axis(&b.bounds, split_lat);
        ca.total_cmp(&cb).then_with(|| a.index.cmp(&b.index))
    });

    let mid = items.len() / 2;
    let (left_items, right_items) = items.split_at_mut(mid);

    let idx = nodes.len();
    // Placeholder; patched once the children exist.
    nodes.push(Node::Leaf {
        bounds,
        items: Vec::new(),
    });

    let left = build_node(nodes, left_items);
    let right = build_node(nodes, right_items);

    nodes[idx] = Node::Internal {
        bounds,
        left,
        right,
    };
    idx
}

fn centroid_axis(b: &GeoBounds, lat_axis: bool) -> f64 {
    if lat_axis {
        (b.south + b.north) * 0.5
    } else {
        (b.west + b.east) * 0.5
    }
}

fn split_on_latitude(bounds: &GeoBounds) -> bool {
    // Ties prefer longitude.
    (bounds.north - bounds.south) > (bounds.east - bounds.west)
}

fn bounds_for_items(items: &[Item]) -> GeoBounds {
    let mut b = items[0].bounds;
    for item in &items[1..] {
        b = b.union(&item.bounds);
    }
    b
}

#[cfg(test)]
mod tests {
    use super::{Bvh, Item};
    use foundation::bounds::GeoBounds;

    fn item(index: usize, south: f64, west: f64, north: f64, east: f64) -> Item {
        Item {
            index,
            bounds: GeoBounds::new(south, west, north, east),
        }
    }

    #[test]
    fn query_returns_items_in_input_order() {
        let bvh = Bvh::build(vec![
            item(2, 0.0, 10.0, 1.0, 11.0),
            item(0, 0.0, 0.0, 1.0, 1.0),
            item(1, 0.5, 0.5, 2.0, 2.0),
        ]);
        let hits = bvh.query(&GeoBounds::new(0.25, 0.25, 1.5, 1.5));
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn touching_items_are_not_hits() {
        let bvh = Bvh::build(vec![item(0, 0.0, 0.0, 1.0, 1.0)]);
        assert!(bvh.query(&GeoBounds::new(1.0, 0.0, 2.0, 1.0)).is_empty());
    }

    #[test]
    fn large_sets_match_brute_force() {
        // Enough items to force internal nodes.
        let items: Vec<Item> = (0..100)
            .map(|i| {
                let x = (i % 10) as f64;
                let y = (i / 10) as f64;
                item(i, y, x, y + 1.5, x + 1.5)
            })
            .collect();
        let bvh = Bvh::build(items.clone());
        let q = GeoBounds::new(3.2, 4.1, 5.7, 6.3);

        let expected: Vec<usize> = items
            .iter()
            .filter(|it| it.bounds.intersects(&q))
            .map(|it| it.index)
            .collect();
        assert_eq!(bvh.query(&q), expected);
    }

    #[test]
    fn empty_tree_has_no_hits() {
        let bvh = Bvh::build(Vec::new());
        assert!(bvh.query(&GeoBounds::new(0.0, 0.0, 1.0, 1.0)).is_empty());
    }
}
