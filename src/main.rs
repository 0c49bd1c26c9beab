//! Demo viewer.
//!
//! Usage: `softraster [<mesh.obj> <diffuse> <normal> <specular> <gloss>]`
//!
//! Without arguments a built-in textured quad is shown.

use std::error::Error;

use log::{error, info};

use softraster::camera::CameraController;
use softraster::window::{
    FrameLimiter, Key, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use softraster::Engine;

const SCREENSHOT_PATH: &str = "screenshot.bmp";

fn load_scene(engine: &mut Engine, args: &[String]) -> Result<(), Box<dyn Error>> {
    match args {
        [mesh, diffuse, normal, specular, gloss] => {
            engine.load_mesh(mesh)?;
            engine.load_material(diffuse, normal, specular, gloss)?;
        }
        [] => engine.load_demo_scene()?,
        _ => {
            return Err(
                "usage: softraster [<mesh.obj> <diffuse> <normal> <specular> <gloss>]".into(),
            )
        }
    }
    Ok(())
}

fn handle_key(engine: &mut Engine, key: Key) {
    match key {
        Key::ToggleDepthDisplay => engine.toggle_depth_display(),
        Key::ToggleRotation => engine.toggle_rotation(),
        Key::ToggleNormalMap => engine.toggle_normal_mapping(),
        Key::CycleShadingMode => engine.cycle_shading_mode(),
        Key::ToggleUvWrap => engine.toggle_uv_wrap(),
        Key::ToggleFrustumPolicy => engine.toggle_frustum_policy(),
        Key::SaveScreenshot => {
            if let Err(e) = engine.save_screenshot(SCREENSHOT_PATH) {
                error!("Failed to save screenshot: {}", e);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    load_scene(&mut engine, &args)?;

    let mut window = Window::new("Software Rasterizer", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut frame_limiter = FrameLimiter::new(&window);
    let controller = CameraController::default();

    info!("F4 depth | F5 rotate | F6 normal map | F7 shading | F8 uv wrap | F9 clipping | X screenshot");

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h)?;
                    engine.resize(w, h);
                }
                WindowEvent::KeyPress(key) => handle_key(&mut engine, key),
            }
        }

        let delta_time = frame_limiter.wait_and_get_delta(&window) as f32 / 1000.0;
        let input = controller.input(&window.input_state(), delta_time);
        engine.update(&input, delta_time);

        engine.render();
        window.present(engine.frame_buffer())?;
    }

    Ok(())
}
