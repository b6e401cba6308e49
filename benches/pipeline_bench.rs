// In: benches/pipeline_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use c64conv::ctm::{self, ColouringMethod, CtmFile, CtmFlags, CtmHeader};
use c64conv::kernels::WindowSpec;
use c64conv::pipeline::{Interleaver, Nybbler, WindowedExtractor};
use c64conv::{BinaryOutput, BoxedOutput, Output};

// --- Mock Data Generation ---

/// A repeating ramp of every byte value.
fn generate_ramp_bytes(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// A full 256-char charset with 4x4 tiles and a 40x25 screen map.
fn generate_ctm_file() -> CtmFile {
    let header = CtmHeader {
        screen_colour: 0,
        multicolor_1: 11,
        multicolor_2: 12,
        char_colour: 1,
        colouring_method: ColouringMethod::PerTile,
        flags: CtmFlags::TILE_SYSTEM | CtmFlags::MULTICOLOR,
        tile_width: 4,
        tile_height: 4,
        map_width: 40,
        map_height: 25,
    };
    let tile_count = 128;
    CtmFile {
        charset: generate_ramp_bytes(256 * 8),
        char_attributes: generate_ramp_bytes(256),
        tiles: generate_ramp_bytes(tile_count * header.tile_size()),
        tile_colours: generate_ramp_bytes(tile_count * header.tile_colour_size()),
        map: generate_ramp_bytes(header.map_size()),
        header,
    }
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

fn bench_pipeline_stages(c: &mut Criterion) {
    let data = generate_ramp_bytes(BENCH_DATA_SIZE);

    let mut group = c.benchmark_group("Pipeline Stages");
    group.throughput(criterion::Throughput::Bytes(BENCH_DATA_SIZE as u64));

    group.bench_function("Interleave x4", |b| {
        b.iter(|| {
            let outputs: Vec<BoxedOutput> = (0..4)
                .map(|_| Box::new(BinaryOutput::new()) as BoxedOutput)
                .collect();
            let mut stage = Interleaver::new(outputs).unwrap();
            black_box(stage.write(black_box(&data)))
        })
    });

    group.bench_function("Nybble (normalized)", |b| {
        b.iter(|| {
            let mut stage = Nybbler::normalized(
                Some(Box::new(BinaryOutput::new())),
                Some(Box::new(BinaryOutput::new())),
            );
            black_box(stage.write(black_box(&data)))
        })
    });

    group.bench_function("Window -> Interleave x2", |b| {
        b.iter(|| {
            let outputs: Vec<BoxedOutput> = vec![
                Box::new(BinaryOutput::new()),
                Box::new(BinaryOutput::new()),
            ];
            let window = WindowSpec::new(16, 4096, 8).unwrap();
            let mut stage = WindowedExtractor::new(window, Interleaver::new(outputs).unwrap());
            black_box(stage.write(black_box(&data)))
        })
    });

    group.finish();
}

fn bench_ctm_codec(c: &mut Criterion) {
    let file = generate_ctm_file();
    let encoded = ctm::encode(&file).unwrap();

    let mut group = c.benchmark_group("CTM5 Codec");
    group.throughput(criterion::Throughput::Bytes(encoded.len() as u64));

    group.bench_function("Decode", |b| {
        b.iter(|| black_box(ctm::decode(black_box(&encoded))))
    });
    group.bench_function("Encode", |b| {
        b.iter(|| black_box(ctm::encode(black_box(&file))))
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline_stages, bench_ctm_codec);
criterion_main!(benches);
