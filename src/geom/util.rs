use crate::geom::mesh;

/// Order-independent identity of a triangle edge: the smaller vertex index
/// occupies the low 32 bits, so winding never affects comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edge {
    e: u64,
}

impl Edge {
    fn new(v0: u32, v1: u32) -> Edge {
        if v0 < v1 {
            Edge {e: ((v1 as u64) << 32) | (v0 as u64)}
        }
        else {
            Edge {e: ((v0 as u64) << 32) | (v1 as u64)}
        }
    }
}

/// Packs a rotation of triangle0's vertex slots together with the slot of
/// triangle1's vertex opposite the shared edge, one byte per field starting
/// at bit 0.
fn pair_order(tri0_slot0: u32, tri0_slot1: u32, tri0_slot2: u32, tri1_slot: u32) -> i32 {
    (tri0_slot0 | (tri0_slot1 << 8) | (tri0_slot2 << 16) | (tri1_slot << 24)) as i32
}

/// Triangle0's vertex slots as packed by shared_edge, rotated so the shared
/// edge is the (last, first) pair of the rotation.
pub fn rotation(packed: i32) -> [usize; 3] {
    [(packed & 0xff) as usize,
     ((packed >> 8) & 0xff) as usize,
     ((packed >> 16) & 0xff) as usize]
}

/// Slot (0, 1 or 2) of triangle1's vertex opposite the shared edge.
pub fn opposite_vertex(packed: i32) -> usize {
    ((packed >> 24) & 0xff) as usize
}

/**
 * Tests whether two triangles share an edge; the comparison is independent
 * of winding. On a match, returns triangle0's vertex slots rotated so the
 * shared edge becomes the (last, first) pair of the rotated order, packed
 * with the slot of triangle1's vertex opposite the shared edge; decode with
 * rotation() and opposite_vertex(). Returns -1 when no edge is shared.
 *
 * Assumes the triangles share at most one edge, as on a manifold mesh;
 * duplicate or degenerate edges are not detected.
 */
pub fn shared_edge(tri0: &mesh::Triangle, tri1: &mesh::Triangle) -> i32 {
    let tri0_edge0 = Edge::new(tri0.v[0], tri0.v[1]);
    let tri0_edge1 = Edge::new(tri0.v[1], tri0.v[2]);
    let tri0_edge2 = Edge::new(tri0.v[2], tri0.v[0]);

    let tri1_edge0 = Edge::new(tri1.v[0], tri1.v[1]);
    let tri1_edge1 = Edge::new(tri1.v[1], tri1.v[2]);
    let tri1_edge2 = Edge::new(tri1.v[2], tri1.v[0]);

    // Rotate triangle 0 to force the shared edge between its last and first
    // vertex.
    if tri0_edge0 == tri1_edge0 { return pair_order(1, 2, 0, 2); }
    if tri0_edge1 == tri1_edge0 { return pair_order(2, 0, 1, 2); }
    if tri0_edge2 == tri1_edge0 { return pair_order(0, 1, 2, 2); }

    if tri0_edge0 == tri1_edge1 { return pair_order(1, 2, 0, 0); }
    if tri0_edge1 == tri1_edge1 { return pair_order(2, 0, 1, 0); }
    if tri0_edge2 == tri1_edge1 { return pair_order(0, 1, 2, 0); }

    if tri0_edge0 == tri1_edge2 { return pair_order(1, 2, 0, 1); }
    if tri0_edge1 == tri1_edge2 { return pair_order(2, 0, 1, 1); }
    if tri0_edge2 == tri1_edge2 { return pair_order(0, 1, 2, 1); }

    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::mesh::Triangle;

    #[test]
    fn shared_edge_reports_the_opposite_vertex() {
        let tri0 = Triangle::new(0, 1, 2);
        let tri1 = Triangle::new(1, 2, 3);
        let packed = shared_edge(&tri0, &tri1);
        assert!(packed >= 0);

        // Triangle 0 is rotated so the shared edge (1, 2) sits between the
        // last and first slot of the rotation.
        let order = rotation(packed);
        assert_eq!([tri0.v[order[0]], tri0.v[order[1]], tri0.v[order[2]]], [2, 0, 1]);
        assert_eq!(tri1.v[opposite_vertex(packed)], 3);
    }

    #[test]
    fn edge_matching_ignores_winding() {
        let tri0 = Triangle::new(0, 1, 2);
        let forward = shared_edge(&tri0, &Triangle::new(1, 2, 3));
        let reversed = shared_edge(&tri0, &Triangle::new(2, 1, 3));
        assert_eq!(forward, reversed);
    }

    #[test]
    fn disjoint_triangles_return_the_sentinel() {
        assert_eq!(shared_edge(&Triangle::new(0, 1, 2), &Triangle::new(3, 4, 5)), -1);
        // One shared vertex is not a shared edge.
        assert_eq!(shared_edge(&Triangle::new(0, 1, 2), &Triangle::new(2, 3, 4)), -1);
    }

    #[test]
    fn every_pairing_rotates_the_shared_edge_to_last_first() {
        // Two triangles sharing edge {7, 9}, probed through every rotation
        // and winding of both.
        let tri0_orders = [(7, 9, 4), (9, 4, 7), (4, 7, 9), (9, 7, 4), (7, 4, 9), (4, 9, 7)];
        let tri1_orders = [(9, 7, 5), (7, 5, 9), (5, 9, 7), (7, 9, 5), (9, 5, 7), (5, 7, 9)];
        for &(a, b, c) in tri0_orders.iter() {
            for &(d, e, f) in tri1_orders.iter() {
                let tri0 = Triangle::new(a, b, c);
                let tri1 = Triangle::new(d, e, f);
                let packed = shared_edge(&tri0, &tri1);
                assert!(packed >= 0, "no match for {} vs {}", tri0, tri1);

                let order = rotation(packed);
                let first = tri0.v[order[0]];
                let last = tri0.v[order[2]];
                assert_eq!(Edge::new(last, first), Edge::new(7, 9),
                           "shared edge not rotated to (last, first) for {} vs {}", tri0, tri1);
                assert_eq!(tri1.v[opposite_vertex(packed)], 5);
            }
        }
    }
}
