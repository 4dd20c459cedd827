//! Benchmarks for the vectile pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vectile::{classify, convert, Colour, RasterTile, StyleDocument, Symbol, SymbolLayer};

/// A 12x12 dense dot-grid tile (type A layout).
fn dot_grid_tile() -> RasterTile {
    let bg = Colour::rgb(230, 230, 210);
    let fg = Colour::rgb(40, 90, 40);
    let mut pixels = vec![bg; 144];
    for row in (0..12).step_by(2) {
        for col in (0..12).step_by(2) {
            pixels[row * 12 + col] = fg;
        }
    }
    RasterTile::new(12, 12, pixels)
}

/// A 64x64 three-colour tile.
fn tricolour_tile() -> RasterTile {
    let bg = Colour::rgb(240, 240, 220);
    let fg = Colour::rgb(30, 110, 50);
    let third = Colour::rgb(150, 70, 30);
    let mut pixels = vec![bg; 64 * 64];
    for row in (0..64).step_by(8) {
        for col in (0..64).step_by(8) {
            pixels[row * 64 + col] = fg;
            if row % 16 == 0 {
                pixels[row * 64 + col + 4] = third;
            }
        }
    }
    RasterTile::new(64, 64, pixels)
}

fn png_blob(tile: &RasterTile) -> Vec<u8> {
    let mut img = image::RgbaImage::new(tile.width(), tile.height());
    for y in 0..tile.height() {
        for x in 0..tile.width() {
            let colour = tile.pixel(x, y);
            img.put_pixel(x, y, image::Rgba([colour.r, colour.g, colour.b, colour.a]));
        }
    }
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

// -- Classification benchmarks --

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let small = dot_grid_tile();
    let large = tricolour_tile();

    group.bench_function("classify_12x12_grid", |b| {
        b.iter(|| classify(black_box(&small)))
    });

    group.bench_function("classify_64x64_tricolour", |b| {
        b.iter(|| classify(black_box(&large)))
    });

    group.finish();
}

// -- Conversion benchmarks --

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    let shared_blob = png_blob(&dot_grid_tile());
    let unique_blob = png_blob(&tricolour_tile());

    group.bench_function("convert_20_symbols_shared_tile", |b| {
        b.iter(|| {
            let mut document = StyleDocument::new();
            for i in 0..20 {
                document.push_symbol(Symbol::new(
                    format!("symbol-{i}"),
                    vec![SymbolLayer::Raster {
                        blob: shared_blob.clone(),
                    }],
                ));
            }
            convert(black_box(&mut document)).unwrap()
        })
    });

    group.bench_function("convert_mixed_document", |b| {
        b.iter(|| {
            let mut document = StyleDocument::new();
            document.push_symbol(Symbol::new(
                "grid",
                vec![SymbolLayer::Raster {
                    blob: shared_blob.clone(),
                }],
            ));
            document.push_symbol(Symbol::new(
                "tricolour",
                vec![SymbolLayer::Raster {
                    blob: unique_blob.clone(),
                }],
            ));
            convert(black_box(&mut document)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_classification, bench_conversion);
criterion_main!(benches);
