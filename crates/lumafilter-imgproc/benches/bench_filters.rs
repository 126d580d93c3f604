use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lumafilter_image::{PlaneSize, VideoFormat, VideoFrame};
use lumafilter_imgproc::filter::{bilateral_frame, gaussian_blur_frame, BlurMode};
use lumafilter_imgproc::padding::PaddingMode;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Luma Filters");

    for (width, height) in [(320, 240), (640, 480), (1280, 720)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let size: PlaneSize = [*width, *height].into();
        let bytes = (0..VideoFrame::frame_len(VideoFormat::I420, size))
            .map(|i| (i % 251) as u8)
            .collect::<Vec<_>>();
        let input = VideoFrame::from_bytes(VideoFormat::I420, size, &bytes).unwrap();
        let output = VideoFrame::from_size_val(VideoFormat::I420, size, 0).unwrap();

        for sigma in [0.5f32, 1.5, 3.0].iter() {
            let parameter_string = format!("{}x{}x{}", width, height, sigma);

            group.bench_with_input(
                BenchmarkId::new("gaussian_low_pass", &parameter_string),
                &(&input, &output),
                |b, i| {
                    let (src, mut dst) = (i.0.as_frame().unwrap(), i.1.clone());
                    b.iter(|| {
                        black_box(gaussian_blur_frame(
                            &src,
                            &mut dst.as_frame_mut().unwrap(),
                            *sigma,
                            BlurMode::LowPass,
                            PaddingMode::Zero,
                        ))
                    })
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("bilateral", format!("{}x{}", width, height)),
            &(&input, &output),
            |b, i| {
                let (src, mut dst) = (i.0.as_frame().unwrap(), i.1.clone());
                b.iter(|| {
                    black_box(bilateral_frame(
                        &src,
                        &mut dst.as_frame_mut().unwrap(),
                        2.0,
                        25.0,
                        true,
                        PaddingMode::Zero,
                    ))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
