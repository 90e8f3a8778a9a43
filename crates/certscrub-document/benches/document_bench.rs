// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the certscrub-document crate: the placement
// arithmetic on its own, and a full render of the sample certificate with a
// replacement photo and name.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use certscrub_core::{ImageFormat, OutputSettings, ReplacementImage, Rotation};
use certscrub_document::{RedactionRequest, SampleCertificate, render, resolve_placement};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Resolve placements for all four quarter turns.
fn bench_resolve_placement(c: &mut Criterion) {
    let rotations = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];
    c.bench_function("resolve_placement (4 rotations)", |b| {
        b.iter(|| {
            for rotation in rotations {
                black_box(resolve_placement(100.0, 100.0, black_box(540), black_box(360), rotation).ok());
            }
        });
    });
}

/// Render the sample certificate with a 540x360 JPEG and a name.
fn bench_full_render(c: &mut Criterion) {
    let pdf = SampleCertificate::new().render();

    let photo = RgbImage::from_pixel(540, 360, Rgb([180, 140, 90]));
    let mut jpeg = Cursor::new(Vec::new());
    if DynamicImage::ImageRgb8(photo)
        .write_to(&mut jpeg, image::ImageFormat::Jpeg)
        .is_err()
    {
        return;
    }

    let request = RedactionRequest::new(OutputSettings::replace_all())
        .with_image(ReplacementImage::new(
            jpeg.into_inner(),
            ImageFormat::Jpeg,
            Rotation::Deg90,
        ))
        .with_name("Jane Doe");

    c.bench_function("render (sample, jpeg + name)", |b| {
        b.iter(|| black_box(render(black_box(&pdf), &request).ok()));
    });
}

criterion_group!(benches, bench_resolve_placement, bench_full_render);
criterion_main!(benches);
