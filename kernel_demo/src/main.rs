//! Spatial Tree Demo
//!
//! Builds a 2-D spatial tree, refines it around a focus point, then locates
//! sample points and classifies the leaves against a few primitives:
//! - Adaptive refinement until the configured maximum depth
//! - Point location with level and child-index path
//! - Sphere, plane and frustum queries over every leaf
//!
//! Usage: `tree_demo [kernel.toml | kernel.ron]`

use log::{debug, info, warn};
use spatial_kernel::foundation::logging;
use spatial_kernel::prelude::*;

// Refinement settings
const FOCUS: [f64; 2] = [0.3, 0.7];
const DEFAULT_LEVELS: usize = 5;

// Query settings
const QUERY_RADIUS: f64 = 0.15;
const SAMPLE_POINTS: [[f64; 2]; 4] = [[0.3, 0.7], [0.05, 0.05], [0.5, 0.5], [0.99, 0.2]];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => KernelConfig::load_from_file(&path)?,
        None => KernelConfig::default(),
    };
    logging::init_with_default(&config.log_level);

    println!("=== Spatial Tree Demo ===");
    println!("tolerance: {}", config.tolerance.epsilon());
    println!("max depth: {:?}", config.tree.max_depth);
    println!();

    let mut tree: SpatialTree<usize> = SpatialTree::with_config(Domain::unit(2), config.tree);
    let focus = Vector::from(FOCUS);
    let levels = refine(&mut tree, &focus)?;
    info!(
        "refined to {levels} levels: {} nodes, {} leaves",
        tree.node_count(),
        tree.leaves().len()
    );

    locate_samples(&mut tree)?;
    classify_leaves(&tree, &config.collision(), &focus)?;
    Ok(())
}

/// Split the leaf containing `focus` into quadrants until the depth limit
fn refine(tree: &mut SpatialTree<usize>, focus: &Vector) -> GeometryResult<usize> {
    let root = tree.root();
    let limit = tree.config().max_depth.unwrap_or(DEFAULT_LEVELS);
    let mut levels = 0;

    while levels < limit {
        let Some(leaf) = tree.traverse(root, focus)?.next() else {
            warn!("focus {focus} lies outside the tree");
            break;
        };
        tree.split_even(leaf, 2)?;
        levels += 1;
        debug!("level {levels}: split {}", tree.domain(leaf)?);
    }
    Ok(levels)
}

/// Find the leaf holding each sample point and count hits per leaf
fn locate_samples(tree: &mut SpatialTree<usize>) -> GeometryResult<()> {
    let root = tree.root();
    for sample in SAMPLE_POINTS {
        let point = Vector::from(sample);
        let leaves: Vec<NodeId> = tree.traverse(root, &point)?.collect();
        for leaf in &leaves {
            let hits = tree.value(*leaf)?.copied().unwrap_or(0) + 1;
            tree.set_value(*leaf, hits)?;
        }

        let Some(first) = leaves.first() else {
            warn!("{point} is outside the tree");
            continue;
        };
        info!(
            "{point:.2} -> {} leaf(s), first at level {} path {:?} domain {:.3}",
            leaves.len(),
            tree.level(*first)?,
            tree.indices(*first)?,
            tree.domain(*first)?
        );
    }
    Ok(())
}

/// Classify every leaf against a query sphere, a diagonal plane and a
/// frustum shrunk to the center of the unit square
fn classify_leaves(
    tree: &SpatialTree<usize>,
    collision: &Collision,
    focus: &Vector,
) -> GeometryResult<()> {
    let query = Sphere::new(focus.clone(), QUERY_RADIUS)?;
    let query_box = query.bounding_domain();
    let diagonal = Plane::new(Vector::vector3(1.0, -1.0, 0.0))?;
    let window = Frustum::new(vec![
        Plane::new(Vector::vector3(1.0, 0.0, -0.25))?,
        Plane::new(Vector::vector3(-1.0, 0.0, 0.75))?,
        Plane::new(Vector::vector3(0.0, 1.0, -0.25))?,
        Plane::new(Vector::vector3(0.0, -1.0, 0.75))?,
    ])?;

    let mut near_query = 0;
    let mut sides = [0usize; 3];
    let mut containment = [0usize; 3];
    for leaf in tree.leaves() {
        let domain = tree.domain(leaf)?;
        if collision.domain_domain(domain, &query_box)? {
            near_query += 1;
        }
        sides[side_slot(collision.plane_box(&diagonal, domain)?)] += 1;
        containment[containment_slot(collision.frustum_domain(&window, domain)?)] += 1;
    }

    info!("{near_query} leaves overlap the query bounds around {focus:.2}");
    info!(
        "diagonal plane: {} front, {} back, {} crossing",
        sides[0], sides[1], sides[2]
    );
    info!(
        "center window: {} inside, {} partial, {} outside",
        containment[0], containment[1], containment[2]
    );
    Ok(())
}

const fn side_slot(side: PlaneSide) -> usize {
    match side {
        PlaneSide::Front => 0,
        PlaneSide::Back => 1,
        PlaneSide::Intersecting => 2,
    }
}

const fn containment_slot(containment: Containment) -> usize {
    match containment {
        Containment::Contains => 0,
        Containment::Intersects => 1,
        Containment::Disjoint => 2,
    }
}
