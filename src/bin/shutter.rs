use shutter::core;
use shutter::geom;
use shutter::geom::Prim;

fn quad_vertices(offset: f32, lift: f32) -> Vec<core::Vertex> {
    vec![
        core::Vertex::at(offset, lift, 0.0),
        core::Vertex::at(offset + 1.0, lift, 0.0),
        core::Vertex::at(offset + 1.0, lift + 1.0, 0.0),
        core::Vertex::at(offset, lift + 1.0, 0.0),
    ]
}

pub fn main() {
    env_logger::init();

    // A quad sweeping along x over the shutter interval, sagging upward at
    // the middle keyframe.
    let mut mesh = geom::TriangleMesh::new(3);
    mesh.set_triangles(geom::BufferView::from_vec(vec![
        geom::Triangle::new(0, 1, 2),
        geom::Triangle::new(0, 2, 3),
    ]));
    mesh.set_vertices(0, geom::BufferView::from_vec(quad_vertices(0.0, 0.0)));
    mesh.set_vertices(1, geom::BufferView::from_vec(quad_vertices(1.0, 0.75)));
    mesh.set_vertices(2, geom::BufferView::from_vec(quad_vertices(2.0, 0.0)));
    mesh.commit();
    if let Err(reason) = mesh.verify() {
        println!("Mesh rejected: {}", reason);
        return;
    }
    println!("{}", mesh);

    let range = core::TimeRange::full();
    for i in 0..mesh.size() {
        match mesh.linear_bounds_validated(i, &range) {
            Some(lbounds) => {
                println!("  {} moves {}..{} -> {}..{}",
                         mesh.triangle(i),
                         lbounds.bounds0.min, lbounds.bounds0.max,
                         lbounds.bounds1.min, lbounds.bounds1.max);
            },
            None => {
                println!("  {} is invalid and skipped", mesh.triangle(i));
            }
        }
    }

    let packed = geom::shared_edge(&mesh.triangle(0), &mesh.triangle(1));
    if packed >= 0 {
        let order = geom::rotation(packed);
        println!("  quad diagonal is shared: rotation ({}, {}, {}), opposite slot {}",
                 order[0], order[1], order[2], geom::opposite_vertex(packed));
    }

    // One hermite hair strand swaying over the shutter, thinning toward the
    // tip.
    let mut hair = geom::CurveGeometry::new(geom::CurveBasis::Hermite, 2);
    hair.set_curves(geom::BufferView::from_vec(vec![0u32]));
    hair.set_vertices(0, geom::BufferView::from_vec(vec![
        core::Vertex::new(0.0, 0.0, 0.0, 0.1),
        core::Vertex::new(0.5, 2.0, 0.0, 0.02),
    ]));
    hair.set_vertices(1, geom::BufferView::from_vec(vec![
        core::Vertex::new(0.0, 0.0, 0.0, 0.1),
        core::Vertex::new(1.0, 2.0, 0.0, 0.02),
    ]));
    hair.set_tangents(0, geom::BufferView::from_vec(vec![
        core::Vertex::at(0.0, 2.0, 0.0),
        core::Vertex::at(1.5, 1.0, 0.0),
    ]));
    hair.set_tangents(1, geom::BufferView::from_vec(vec![
        core::Vertex::at(0.0, 2.0, 0.0),
        core::Vertex::at(3.0, 1.0, 0.0),
    ]));
    hair.commit();
    if let Err(reason) = hair.verify() {
        println!("Hair rejected: {}", reason);
        return;
    }
    println!("{}", hair);

    let (points, tangents) = hair.gather_hermite_at_time(0, 0.5);
    println!("  mid-shutter frame: p0 {} t0 {} p1 {} t1 {}",
             points[0], tangents[0], points[1], tangents[1]);

    // The builder sees both stores through the same capability surface.
    let prims: Vec<&dyn geom::Prim> = vec![&mesh, &hair];
    for (k, prim) in prims.iter().enumerate() {
        for i in 0..prim.num_prims() {
            match prim.build_bounds(i) {
                Some(bounds) => {
                    println!("  prim {} of geometry {}: build bounds {}..{}",
                             i, k, bounds.min, bounds.max);
                },
                None => {
                    println!("  prim {} of geometry {} rejected from the build", i, k);
                }
            }
        }
    }
}
