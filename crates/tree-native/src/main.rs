mod gpu;
mod textures;

use std::time::Instant;

use anyhow::Context;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use gpu::{FrameBatcher, GpuState};
use textures::{ImageTextureProvider, PHOTO_TEXTURE_SIZE};
use tree_core::{pick_panel, Camera, FrameTime, InputEvent, Scene, SceneConfig};

// Pixels per wheel line, matching what browsers report for one notch.
const WHEEL_LINE_PX: f32 = 100.0;

/// Photo pattern override: `TREE_PHOTOS_DIR=/some/dir` loads `/some/dir/{index}.jpg`.
fn scene_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    if let Some(dir) = std::env::var_os("TREE_PHOTOS_DIR") {
        let pattern = std::path::Path::new(&dir).join("{index}.jpg");
        config.panels.photo_pattern = pattern.to_string_lossy().into_owned();
        log::info!("[native] photo pattern {}", config.panels.photo_pattern);
    }
    config
}

/// Winit wheel deltas are positive when scrolling up; the scene expects the DOM sign.
fn wheel_delta_px(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut provider = ImageTextureProvider::new(PHOTO_TEXTURE_SIZE);
    let mut scene = Scene::new(scene_config(), &mut provider).context("scene config")?;

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("event loop: {e}"))?;
    let window = WindowBuilder::new()
        .with_title("Signature Tree")
        .build(&event_loop)
        .map_err(|e| anyhow::anyhow!("window: {e}"))?;

    let size = window.inner_size();
    let (width, height) = (size.width.max(1) as f32, size.height.max(1) as f32);
    scene.resize(width, height);
    let mut camera = Camera::looking_at_tree(width / height);

    let mut state = pollster::block_on(GpuState::new(
        &window,
        &scene,
        provider.layers(),
        provider.size(),
    ))
    .context("gpu")?;
    drop(provider);

    let mut frame = FrameBatcher::default();
    let mut cursor = (0.0f32, 0.0f32);
    let start = Instant::now();
    let mut last = start;
    log::info!("[native] ready: space toggles, wheel morphs, click a photo to focus it");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                if size.width > 0 && size.height > 0 {
                    let (w, h) = (size.width as f32, size.height as f32);
                    scene.resize(w, h);
                    camera.aspect = w / h;
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Named(NamedKey::Space) => {
                    scene.handle_input(&InputEvent::KeyDown("Space".into()));
                }
                Key::Character(s) => {
                    scene.handle_input(&InputEvent::KeyDown(s.to_string()));
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                scene.handle_input(&InputEvent::Wheel {
                    delta_y: wheel_delta_px(delta),
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let size = state.window.inner_size();
                let (ro, rd) = camera.screen_ray(
                    cursor.0,
                    cursor.1,
                    size.width as f32,
                    size.height as f32,
                );
                let panel = pick_panel(
                    ro,
                    rd,
                    &scene.panel_world_transforms(),
                    scene.panel_half_extents(),
                );
                scene.handle_input(&InputEvent::PointerDown { panel });
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let time = FrameTime {
                elapsed: (now - start).as_secs_f32(),
                dt: (now - last).as_secs_f32(),
            };
            last = now;

            scene.update(time, &camera.pose());
            frame.clear();
            scene.draw(&mut frame);
            match state.render(&frame, camera.view_proj()) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
            }
        }
        _ => {}
    })
    .map_err(|e| anyhow::anyhow!("event loop: {e}"))
}
