//! Demonstration of terraces, cliffs and incremental chunk rebuilds

use hex_terrain::*;

fn main() -> Result<()> {
    println!("Building grid...");

    let config = GridConfigBuilder::new()
        .chunk_counts(4, 3)?
        .chunk_size(5, 5)?
        .noise_seed(42)
        .build()?;

    let mut grid = HexGrid::new(config)?;
    println!(
        "Grid: {} cells in {} chunks ({} dirty)",
        grid.cell_count(),
        grid.chunk_count(),
        grid.dirty_chunk_count()
    );

    let rebuilt = grid.rebuild_dirty_chunks();
    println!("Initial pass rebuilt {} chunks", rebuilt);
    print_stats(&grid);

    // A stepped pyramid: every ring one level lower, so each ring edge is
    // a terraced slope.
    let center = HexCoordinates::from_offset(10, 7);
    for radius in (0..4u32).rev() {
        for id in grid.cells_within_radius(center, radius) {
            grid.set_elevation(id, 4 - radius as i32);
            grid.set_color(id, colors::PALETTE[radius as usize % colors::PALETTE.len()]);
        }
    }

    // A plateau next to it, two levels above its surroundings: cliffs.
    for id in grid.cells_within_radius(HexCoordinates::from_offset(3, 3), 2) {
        grid.set_elevation(id, 3);
        grid.set_color(id, colors::YELLOW);
    }

    println!("\nAfter edits: {} chunks dirty", grid.dirty_chunk_count());
    let rebuilt = grid.rebuild_dirty_chunks();
    println!("Rebuilt {} chunks", rebuilt);
    print_stats(&grid);

    // Count edge types over the whole grid.
    let (mut flat, mut slope, mut cliff) = (0, 0, 0);
    for cell in grid.cells() {
        for (direction, neighbor) in cell.neighbors() {
            if direction > Direction::SouthEast {
                continue;
            }
            let other = grid.get_cell(neighbor).expect("neighbor handles are valid");
            match cell.edge_type(other) {
                EdgeType::Flat => flat += 1,
                EdgeType::Slope => slope += 1,
                EdgeType::Cliff => cliff += 1,
            }
        }
    }
    println!("\nEdges: {} flat, {} terraced, {} cliffs", flat, slope, cliff);

    // Pick the pyramid top from above.
    let top = grid.cell_at(center).expect("center is inside the grid");
    let origin = top.position() + Vec3::new(1.0, 100.0, 1.0);
    if let Some(cell) = grid.pick_cell(origin, Vec3::NEG_Y) {
        println!(
            "Picked cell {} at elevation {}",
            cell.coordinates(),
            cell.elevation()
        );
    }

    Ok(())
}

fn print_stats<N: NoiseSource>(grid: &HexGrid<N>) {
    let vertices: usize = grid.chunks().iter().map(|c| c.mesh().vertex_count()).sum();
    let triangles: usize = grid.chunks().iter().map(|c| c.mesh().triangle_count()).sum();
    println!("  Vertices: {}", vertices);
    println!("  Triangles: {}", triangles);
}
