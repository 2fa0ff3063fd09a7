use std::hint::black_box;
use std::time::Instant;

use vista_common::ChunkCoord;
use vista_terrain::{TerrainConfig, TerrainGenerator, derive_mesh, gradient};

fn generator(chunk_size: u32, block_size: u32, octaves: u32) -> TerrainGenerator {
    TerrainGenerator::new(TerrainConfig {
        chunk_size,
        block_size,
        octaves,
        ..TerrainConfig::default()
    })
    .expect("valid bench config")
}

fn bench_gradient(iterations: usize) {
    let start = Instant::now();
    for i in 0..iterations {
        let _ = black_box(gradient(black_box(7), i as i32, -(i as i32)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  gradient ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_generate_chunk(chunk_size: u32, block_size: u32, octaves: u32, iterations: usize) {
    let generator = generator(chunk_size, block_size, octaves);
    let start = Instant::now();
    for i in 0..iterations {
        let coord = ChunkCoord::new((i % 10) as i32, 0);
        let _ = black_box(generator.generate_chunk(black_box(coord)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  generate_chunk (chunk={chunk_size}, block={block_size}, octaves={octaves}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_derive_mesh(chunk_size: u32, iterations: usize) {
    let generator = generator(chunk_size, 1, 8);
    let field = generator
        .generate_chunk(ChunkCoord::new(0, 0))
        .expect("chunk in range");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(derive_mesh(black_box(&field)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  derive_mesh ({chunk_size}x{chunk_size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_region(radius: u32, iterations: usize) {
    let generator = generator(64, 2, 6);
    let coords = ChunkCoord::new(0, 0)
        .square(radius)
        .expect("radius in range");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(generator.generate_region(black_box(&coords)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  generate_region ({} chunks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        coords.len()
    );
}

fn main() {
    println!("=== Terrain Generation Benchmarks ===\n");

    println!("Lattice gradient:");
    bench_gradient(1_000_000);

    println!("\nChunk generation:");
    bench_generate_chunk(16, 4, 4, 100);
    bench_generate_chunk(64, 2, 8, 20);
    bench_generate_chunk(200, 1, 8, 5);

    println!("\nMesh derivation:");
    bench_derive_mesh(64, 100);
    bench_derive_mesh(200, 10);

    println!("\nParallel region generation:");
    bench_region(1, 10);
    bench_region(2, 5);

    println!("\n=== Done ===");
}
