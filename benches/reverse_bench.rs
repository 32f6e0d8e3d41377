//! Reversal Pipeline Performance Benchmark
//!
//! Measures the three CPU-bound stages in isolation and combined:
//! frame reversal over decoded PCM, WAV encoding, and WAV decoding.
//! All fixtures are synthesized in memory, so the numbers exclude
//! filesystem effects.
//!
//! Reversal is a pure memory permutation and should run hundreds of
//! times faster than realtime; decode and encode dominate a request.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::f32::consts::PI;

use retrograde::audio::{reverse, AudioDecoder, PcmBuffer, WavEncoder};

/// Synthesize a stereo 44.1 kHz sine buffer of the given length.
fn sine_buffer(duration_s: u64) -> PcmBuffer {
    let sample_rate = 44100u32;
    let frames = sample_rate as usize * duration_s as usize;
    let mut samples = Vec::with_capacity(frames * 2);
    for frame_idx in 0..frames {
        let t = frame_idx as f32 / sample_rate as f32;
        let value = (2.0 * PI * 440.0 * t).sin() * 0.4;
        samples.push(value);
        samples.push(value);
    }
    PcmBuffer::new(samples, sample_rate, 2)
}

/// Benchmark: frame reversal across clip lengths
fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_throughput");

    for duration_s in [1u64, 10, 60] {
        let buffer = sine_buffer(duration_s);
        group.throughput(Throughput::Elements(buffer.frame_count() as u64));

        group.bench_function(BenchmarkId::new("stereo_44100", duration_s), |b| {
            b.iter(|| {
                let reversed = reverse::reverse(black_box(&buffer));
                black_box(reversed);
            });
        });
    }

    group.finish();
}

/// Benchmark: encode decoded PCM to 16-bit WAV bytes
fn bench_encode_wav(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_throughput");

    let buffer = sine_buffer(10);
    group.throughput(Throughput::Elements(buffer.frame_count() as u64));

    group.bench_function("wav_16bit_stereo_10s", |b| {
        b.iter(|| {
            let bytes = WavEncoder::encode_bytes(black_box(&buffer)).unwrap();
            black_box(bytes);
        });
    });

    group.finish();
}

/// Benchmark: decode WAV bytes back to PCM
fn bench_decode_wav(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_throughput");

    let buffer = sine_buffer(10);
    let wav = WavEncoder::encode_bytes(&buffer).unwrap();
    group.throughput(Throughput::Elements(buffer.frame_count() as u64));

    group.bench_function("wav_16bit_stereo_10s", |b| {
        b.iter_batched(
            || wav.clone(),
            |data| {
                let decoded = AudioDecoder::decode_bytes(black_box(data), Some("wav")).unwrap();
                black_box(decoded);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

/// Benchmark: decode + reverse + encode, bytes to bytes
fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_cycle");

    let buffer = sine_buffer(10);
    let wav = WavEncoder::encode_bytes(&buffer).unwrap();
    group.throughput(Throughput::Elements(buffer.frame_count() as u64));

    group.bench_function("wav_in_wav_out_10s", |b| {
        b.iter_batched(
            || wav.clone(),
            |data| {
                let decoded = AudioDecoder::decode_bytes(data, Some("wav")).unwrap();
                let reversed = reverse::reverse(&decoded);
                let bytes = WavEncoder::encode_bytes(&reversed).unwrap();
                black_box(bytes);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_reverse,
    bench_encode_wav,
    bench_decode_wav,
    bench_full_cycle,
);
criterion_main!(benches);
