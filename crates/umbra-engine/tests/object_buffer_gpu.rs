//! Device round trips for the object buffer and the scene shader. Each test returns early when the
//! machine has no adapter at all (CI without a GPU or software rasterizer).

use std::sync::mpsc;
use std::time::{Duration, Instant};

use umbra_engine::coords::{Vec2, Viewport};
use umbra_engine::device::{GpuInit, HeadlessGpu};
use umbra_engine::paint::Color;
use umbra_engine::render::RenderTarget;
use umbra_engine::render::sdf::{SceneRecord, SdfRenderer, SdfRendererConfig};
use umbra_engine::sdf::{AMBIENT, Light, Primitive, shade_pixel};
use umbra_engine::SdfError;

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

fn headless() -> Option<HeadlessGpu> {
    match pollster::block_on(HeadlessGpu::new(GpuInit::default())) {
        Ok(Some(gpu)) => Some(gpu),
        Ok(None) => {
            eprintln!("skipping: no GPU adapter");
            None
        }
        Err(err) => {
            eprintln!("skipping: device request failed: {err:#}");
            None
        }
    }
}

fn scene() -> Vec<Primitive> {
    vec![
        Primitive::circle(Vec2::new(500.0, 450.0), 38.0).with_color(Color::RED),
        Primitive::circle(Vec2::new(300.0, 200.0), 50.0).with_color(Color::PURPLE),
        Primitive::rect(Vec2::new(400.0, 200.0), Vec2::new(50.0, 60.0))
            .with_color(Color::GREEN.with_alpha(0.8))
            .with_round_corner(10.0),
        Primitive::triangle(
            Vec2::new(100.0, 400.0),
            Vec2::new(220.0, 330.0),
            Vec2::new(180.0, 500.0),
        )
        .with_color(Color::GRAY)
        .with_round_corner(5.0),
        Primitive::rotated_rect(Vec2::new(650.0, 120.0), Vec2::new(40.0, 15.0), 33.3),
        Primitive::line(Vec2::new(20.0, 580.0), Vec2::new(780.0, 560.0), 1.5),
    ]
}

/// Waits for `staging` to map and returns its contents.
fn map_blocking(gpu: &HeadlessGpu, staging: &wgpu::Buffer) -> Vec<u8> {
    let slice = staging.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    let deadline = Instant::now() + Duration::from_secs(10);
    let mapped = loop {
        let _ = gpu.device.poll(wgpu::PollType::Poll);
        if let Ok(result) = rx.try_recv() {
            break result;
        }
        assert!(Instant::now() < deadline, "readback timed out");
        std::thread::sleep(Duration::from_millis(1));
    };
    mapped.expect("map readback buffer");

    let bytes = slice.get_mapped_range().to_vec();
    staging.unmap();
    bytes
}

/// Copies the first `count` records off the device.
fn read_back(gpu: &HeadlessGpu, src: &wgpu::Buffer, count: usize) -> Vec<SceneRecord> {
    let size = count as u64 * SceneRecord::SIZE;
    let staging = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object buffer readback"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    encoder.copy_buffer_to_buffer(src, 0, &staging, 0, size);
    gpu.queue.submit(std::iter::once(encoder.finish()));

    map_blocking(gpu, &staging)
        .chunks_exact(SceneRecord::SIZE as usize)
        .map(bytemuck::pod_read_unaligned)
        .collect()
}

#[test]
fn refresh_round_trips_every_field() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, Viewport::new(800.0, 600.0));

    let mut renderer = SdfRenderer::new(&ctx, SdfRendererConfig::default()).expect("renderer");
    let prims = scene();
    renderer.refresh(&ctx, &prims).expect("refresh");
    assert_eq!(renderer.len(), prims.len());

    let expected: Vec<SceneRecord> = prims.iter().map(SceneRecord::from).collect();
    let actual = read_back(&gpu, renderer.objects().buffer(), prims.len());
    assert_eq!(actual, expected);

    renderer.destroy();
}

#[test]
fn shrinking_scene_overwrites_prefix() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, Viewport::new(800.0, 600.0));
    let mut renderer = SdfRenderer::new(&ctx, SdfRendererConfig::default()).expect("renderer");

    renderer.refresh(&ctx, &scene()).expect("refresh full");
    let smaller = vec![Primitive::circle(Vec2::new(1.0, 2.0), 3.0).with_color(Color::BLUE)];
    renderer.refresh(&ctx, &smaller).expect("refresh small");

    assert_eq!(renderer.len(), 1);
    let actual = read_back(&gpu, renderer.objects().buffer(), 1);
    assert_eq!(actual[0], SceneRecord::from(&smaller[0]));

    renderer.destroy();
}

#[test]
fn overflow_is_rejected_and_keeps_previous_scene() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, Viewport::new(800.0, 600.0));
    let config = SdfRendererConfig {
        capacity: 4,
        ..SdfRendererConfig::default()
    };
    let mut renderer = SdfRenderer::new(&ctx, config).expect("renderer");

    let fits: Vec<Primitive> = scene().into_iter().take(4).collect();
    renderer.refresh(&ctx, &fits).expect("refresh within capacity");

    let err = renderer.refresh(&ctx, &scene()).unwrap_err();
    assert_eq!(
        err,
        SdfError::CapacityExceeded {
            requested: 6,
            capacity: 4
        }
    );
    assert_eq!(renderer.len(), 4);

    let expected: Vec<SceneRecord> = fits.iter().map(SceneRecord::from).collect();
    assert_eq!(read_back(&gpu, renderer.objects().buffer(), 4), expected);

    renderer.destroy();
}

#[test]
fn zero_capacity_fails_at_construction() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, Viewport::new(800.0, 600.0));
    let config = SdfRendererConfig {
        capacity: 0,
        ..SdfRendererConfig::default()
    };
    assert!(matches!(SdfRenderer::new(&ctx, config), Err(SdfError::ZeroCapacity)));
}

/// Side of the square offscreen target. One row is exactly 256 bytes, the
/// copy alignment, so rows need no padding.
const TARGET_SIDE: u32 = 64;

/// Clears a `TARGET_SIDE` square to transparent, then draws each layer with
/// its own renderer, in order, into one encoder. Returns the RGBA8 pixels
/// row by row.
fn draw_offscreen(gpu: &HeadlessGpu, layers: &[(&[Primitive], Light)]) -> Vec<u8> {
    let viewport = Viewport::new(TARGET_SIDE as f32, TARGET_SIDE as f32);
    let ctx = gpu.render_ctx(FORMAT, viewport);
    let mut renderers = Vec::with_capacity(layers.len());
    for (prims, _) in layers {
        let mut renderer = SdfRenderer::new(&ctx, SdfRendererConfig::default()).expect("renderer");
        renderer.refresh(&ctx, prims).expect("refresh");
        renderers.push(renderer);
    }

    let extent = wgpu::Extent3d {
        width: TARGET_SIDE,
        height: TARGET_SIDE,
        depth_or_array_layers: 1,
    };
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let bytes_per_row = TARGET_SIDE * 4;
    let staging = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("offscreen readback"),
        size: (bytes_per_row * TARGET_SIDE) as u64,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    {
        let mut target = RenderTarget::new(&mut encoder, &view);
        target.clear(Color::TRANSPARENT);
        for (renderer, (prims, light)) in renderers.iter_mut().zip(layers) {
            let uniforms = renderer.uniforms(viewport, light);
            assert_eq!(uniforms.primitive_count, prims.len() as u32);
            renderer.render(&ctx, &mut target, &uniforms);
        }
    }
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(TARGET_SIDE),
            },
        },
        extent,
    );
    gpu.queue.submit(std::iter::once(encoder.finish()));

    let pixels = map_blocking(gpu, &staging);
    for renderer in renderers {
        renderer.destroy();
    }
    pixels
}

#[test]
fn shader_output_matches_host_shading() {
    let Some(gpu) = headless() else { return };

    // The circle sits between the light and the rounded rect, so the rect's
    // lit face is partly in shadow.
    let prims = [
        Primitive::circle(Vec2::new(22.0, 32.0), 8.0).with_color(Color::RED),
        Primitive::rect(Vec2::new(48.0, 32.0), Vec2::new(6.0, 10.0))
            .with_color(Color::GREEN)
            .with_round_corner(2.0),
        Primitive::triangle(
            Vec2::new(40.0, 4.0),
            Vec2::new(60.0, 14.0),
            Vec2::new(44.0, 18.0),
        )
        .with_color(Color::GRAY.with_alpha(0.8)),
    ];
    let light = Light::new(Vec2::new(4.0, 32.0), Color::new(0.8, 0.8, 0.2, 0.8), 80.0);

    let pixels = draw_offscreen(&gpu, &[(&prims[..], light)]);
    let tolerance = 2.0 / 255.0;

    for y in 0..TARGET_SIDE {
        for x in 0..TARGET_SIDE {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let expected = shade_pixel(p, &light, &prims).premultiplied().to_array();
            let at = ((y * TARGET_SIDE + x) * 4) as usize;
            for (channel, want) in expected.iter().enumerate() {
                let got = pixels[at + channel] as f32 / 255.0;
                assert!(
                    (got - want).abs() <= tolerance,
                    "pixel ({x}, {y}) channel {channel}: gpu {got}, host {want}"
                );
            }
        }
    }
}

#[test]
fn unlit_draw_shows_flat_primitive_color() {
    let Some(gpu) = headless() else { return };
    let prims = [Primitive::circle(Vec2::new(32.0, 32.0), 10.0).with_color(Color::RED)];

    let pixels = draw_offscreen(&gpu, &[(&prims[..], Light::unlit())]);

    let center = ((32 * TARGET_SIDE + 32) * 4) as usize;
    assert_eq!(&pixels[center..center + 4], &[255, 0, 0, 255]);
    assert_eq!(&pixels[0..4], &[0, 0, 0, 0]);
}

#[test]
fn stacked_renderers_keep_their_own_uniforms() {
    let Some(gpu) = headless() else { return };
    let scene = [Primitive::circle(Vec2::new(16.0, 32.0), 8.0).with_color(Color::RED)];
    let overlay = [Primitive::circle(Vec2::new(48.0, 32.0), 8.0).with_color(Color::BLUE)];
    let far_light = Light::new(Vec2::new(5000.0, 5000.0), Color::WHITE, 80.0);

    let pixels = draw_offscreen(&gpu, &[(&scene[..], far_light), (&overlay[..], Light::unlit())]);

    let at = |x: u32, y: u32| ((y * TARGET_SIDE + x) * 4) as usize;
    // lit layer: red scaled by ambient only
    let lit = at(16, 32);
    let ambient = (AMBIENT * 255.0).round() as i32;
    assert!((pixels[lit] as i32 - ambient).abs() <= 2, "lit red {}", pixels[lit]);
    assert_eq!(pixels[lit + 3], 255);
    // unlit layer: flat blue
    let flat = at(48, 32);
    assert_eq!(&pixels[flat..flat + 4], &[0, 0, 255, 255]);
}
