// src/main.rs
use nannou::prelude::*;
use std::cell::RefCell;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use flowvis::{
    animation::FrameQueue,
    config::{Config, Scene},
    controllers::{OscCommand, OscController},
    draw::{DisplayList, NannouPainter},
    utilities::parse_color,
    views::{LineFlow, LineFlowConfig},
};

struct Model {
    // Core components:
    line_flow: LineFlow<DisplayList, FrameQueue>,
    painter: RefCell<NannouPainter>,
    background: Rgba,

    // Comms components:
    osc_controller: OscController,

    // FPS
    last_update: Instant,
    fps: f32,

    // Message
    debug_flag: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowvis=info")),
        )
        .init();

    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Load scene
    let scene_path = config.resolve_scene_path();
    let scene = Scene::load(&scene_path).expect("Failed to load scene file");

    // Create OSC controller
    let osc_controller =
        OscController::new(config.osc.rx_port).expect("Failed to create OSC Controller");

    // Create window
    app.new_window()
        .title("flowvis 0.1.0")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap();

    let background = parse_color(&config.window.background).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "bad background color, using black");
        rgba(0.0, 0.0, 0.0, 1.0)
    });

    let (width, height) = (config.window.width as f64, config.window.height as f64);
    let mut line_flow = LineFlow::new(
        LineFlowConfig::from_scene(scene, &config.animation),
        DisplayList::new(width, height),
        DisplayList::new(width, height),
        FrameQueue::new(),
    )
    .expect("Failed to build line flow");
    line_flow.render();

    Model {
        line_flow,
        painter: RefCell::new(NannouPainter::new(background)),
        background,
        osc_controller,
        last_update: Instant::now(),
        fps: 0.0,
        debug_flag: false,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => toggle(model),
        Key::Up => change_fps(model, 2.0),
        Key::Down => change_fps(model, 0.5),
        Key::P => {
            model.debug_flag = !model.debug_flag;
        }
        _ => (),
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    if model.debug_flag {
        model.fps = 1.0 / duration.as_secs_f32();
    }

    model.osc_controller.process_messages();
    launch_commands(model);

    // one frame request fires per native frame
    if model.line_flow.frames_mut().take_due().is_some() {
        model.line_flow.on_frame(update.since_start);
    }
}

fn launch_commands(model: &mut Model) {
    for command in model.osc_controller.take_commands() {
        match command {
            OscCommand::Start => {
                if !model.line_flow.is_running() {
                    model.line_flow.render();
                }
            }
            OscCommand::Stop => model.line_flow.stop(),
            OscCommand::Toggle => toggle(model),
            OscCommand::SetFps(fps) => {
                if let Err(e) = model.line_flow.set_fps(fps) {
                    tracing::warn!(error = %e, "ignoring OSC frame rate");
                }
            }
        }
    }
}

fn toggle(model: &mut Model) {
    if model.line_flow.is_running() {
        model.line_flow.stop();
    } else {
        model.line_flow.render();
    }
}

fn change_fps(model: &mut Model, factor: f64) {
    let current = 1.0 / model.line_flow.frame_interval().as_secs_f64();
    let fps = (current * factor).clamp(1.0, 120.0);
    match model.line_flow.set_fps(fps) {
        Ok(()) => tracing::info!(fps, "frame rate changed"),
        Err(e) => tracing::warn!(error = %e, "frame rate unchanged"),
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window = app.window_rect();
    draw.background().color(model.background);

    // textures are loaded on first use
    let mut painter = model.painter.borrow_mut();
    painter.paint(app, &draw, window, model.line_flow.static_surface());
    painter.paint(app, &draw, window, model.line_flow.flow_surface());

    if model.debug_flag {
        draw.text(&format!("FPS: {:.1}", model.fps))
            .x_y(window.left() + 60.0, window.top() - 20.0)
            .color(WHITE);
    }

    draw.to_frame(app, &frame).unwrap();
}
