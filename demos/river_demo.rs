//! Demonstration of river editing rules

use hex_terrain::*;

fn main() -> Result<()> {
    let config = GridConfigBuilder::new()
        .chunk_counts(2, 2)?
        .noise_seed(7)
        .noise_texture_size(64)?
        .build()?;

    let mut grid = HexGrid::new(config)?;
    grid.rebuild_dirty_chunks();

    // A ridge along row 5, falling off to the east.
    let row = 5;
    let ids: Vec<CellId> = (0..8)
        .filter_map(|column| grid.cell_at(HexCoordinates::from_offset(column, row)))
        .map(|cell| cell.id())
        .collect();
    for (i, &id) in ids.iter().enumerate() {
        grid.set_elevation(id, 3 - (i as i32) / 2);
    }

    // Run the river downhill along the ridge.
    for &id in &ids[..ids.len() - 1] {
        let ok = grid.set_outgoing_river(id, Direction::East);
        println!(
            "River from {}: {}",
            grid.get_cell(id).expect("valid handle").coordinates(),
            if ok { "set" } else { "refused" }
        );
    }

    // Flowing back uphill is refused.
    let last = ids[ids.len() - 1];
    let lower = ids[ids.len() - 2];
    grid.set_elevation(last, 0);
    grid.remove_river(lower);
    let uphill = grid.set_outgoing_river(last, Direction::West);
    println!("Uphill river accepted: {}", uphill);

    println!("\n{} chunks dirty", grid.dirty_chunk_count());
    grid.rebuild_dirty_chunks();

    let river_cells = grid.cells().iter().filter(|c| c.has_river()).count();
    println!("{} cells carry a river", river_cells);

    // Raising a cell in the middle of the river cuts it.
    let dam = ids[4];
    grid.set_elevation(dam, 5);
    let dam_cell = grid.get_cell(dam).expect("valid handle");
    println!(
        "After raising {}: incoming {:?}, outgoing {:?}",
        dam_cell.coordinates(),
        dam_cell.incoming_river(),
        dam_cell.outgoing_river()
    );

    let rebuilt = grid.rebuild_dirty_chunks();
    let triangles: usize = grid.chunks().iter().map(|c| c.mesh().triangle_count()).sum();
    println!("Rebuilt {} chunks, {} triangles total", rebuilt, triangles);

    Ok(())
}
