use std::path::PathBuf;

use crate::ui::{self, UiState, MAX_RADIUS_AU};

pub struct ScreenshotConfig {
    pub radius_au: f64,
    pub log_mass: f64,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            radius_au: MAX_RADIUS_AU,
            log_mass: 7.0,
            width: 1920,
            height: 1080,
            output: PathBuf::from("rotation_curve.png"),
        }
    }
}

pub fn parse_args() -> Option<ScreenshotConfig> {
    let args: Vec<String> = std::env::args().collect();
    if !args.iter().any(|a| a == "--screenshot") {
        return None;
    }

    let mut config = ScreenshotConfig::default();

    let get_val = |flag: &str| -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    };

    if let Some(v) = get_val("--radius") {
        config.radius_au = v.parse().expect("Invalid --radius");
    }
    if let Some(v) = get_val("--log-mass") {
        config.log_mass = v.parse().expect("Invalid --log-mass");
    }
    if let Some(v) = get_val("--width") {
        config.width = v.parse().expect("Invalid --width");
    }
    if let Some(v) = get_val("--height") {
        config.height = v.parse().expect("Invalid --height");
    }
    if let Some(v) = get_val("--output") {
        config.output = PathBuf::from(v);
    }

    Some(config)
}

/// Render the rotation-curve plot for the given parameters into an
/// offscreen texture and save it as a PNG.
pub fn render_screenshot(config: &ScreenshotConfig) {
    let width = config.width;
    let height = config.height;

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .expect("Failed to find a suitable GPU adapter");

    log::info!("Using adapter: {:?}", adapter.get_info());

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("Screenshot Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
        },
        None,
    ))
    .expect("Failed to create device");

    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Screenshot Target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Headless egui frame: fixed screen rect, no input, UI chrome hidden so
    // only the plot panel is drawn.
    let egui_ctx = egui::Context::default();
    let mut egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

    let mut ui_state = UiState {
        show_ui: false,
        radius_au: config.radius_au,
        log_mass: config.log_mass,
        ..Default::default()
    };

    let raw_input = egui::RawInput {
        screen_rect: Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(width as f32, height as f32),
        )),
        ..Default::default()
    };
    let full_output = egui_ctx.run(raw_input, |ctx| {
        ui::draw_ui(ctx, &mut ui_state);
    });
    let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [width, height],
        pixels_per_point: 1.0,
    };

    for (id, delta) in &full_output.textures_delta.set {
        egui_renderer.update_texture(&device, &queue, *id, delta);
    }

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Screenshot Encoder"),
    });
    egui_renderer.update_buffers(&device, &queue, &mut encoder, &paint_jobs, &screen_descriptor);

    let mut pass = encoder
        .begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Screenshot Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        })
        .forget_lifetime();
    egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
    drop(pass);

    // Copy rows out with the 256-byte alignment wgpu requires.
    let bytes_per_pixel = 4u32;
    let unpadded_bytes_per_row = width * bytes_per_pixel;
    let padded_bytes_per_row = unpadded_bytes_per_row
        .div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Screenshot Readback"),
        size: (padded_bytes_per_row * height) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    encoder.copy_texture_to_buffer(
        texture.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: None,
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });
    device.poll(wgpu::Maintain::Wait);
    rx.recv()
        .expect("Map callback dropped")
        .expect("Failed to map readback buffer");

    let data = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
    for row in 0..height {
        let start = (row * padded_bytes_per_row) as usize;
        pixels.extend_from_slice(&data[start..start + unpadded_bytes_per_row as usize]);
    }
    drop(data);
    readback.unmap();

    let img = image::RgbaImage::from_raw(width, height, pixels)
        .expect("Readback buffer has wrong size");
    match img.save(&config.output) {
        Ok(()) => println!("Screenshot saved to {}", config.output.display()),
        Err(e) => {
            eprintln!("Failed to save screenshot: {e}");
            std::process::exit(1);
        }
    }
}
