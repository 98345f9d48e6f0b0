// What you SEE:
// • A dark cover fills the window; a picture hides underneath.
// • Hold Left Mouse and drag: soft dots scratch the cover away.
// • While decay is on, each dot fades after a quarter second.
// • D toggles decay. R (only while decay is off) wipes the dots away one by one.
// • ESC quits.

use scratch_off::background;
use scratch_off::compose::{LinearLight, compose, cover_gradient};
use scratch_off::config::ScratchConfig;
use scratch_off::draw::{Drawer, draw_text_5x7};
use scratch_off::error::Error;
use scratch_off::surface::ScratchSurface;
use scratch_off::types::{FrameBuffer, Mask};
use std::time::{Duration, Instant};
use tracing::info;

const HUD_COLOR: u32 = 0x00_FF_FF_FF;
const HUD_DIM: u32 = 0x00_66_66_66;

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scratch_off=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<(), Error> {
    init_logging();

    let config = ScratchConfig::default();
    config.validate()?;
    let (w, h) = (config.width, config.height);

    /* --- Window + layers ---
       Visual: window opens showing only the cover. */
    let mut drawer = Drawer::new("Scratch Off", w, h)?;
    let background = background::load_or_placeholder(&config.background_path, w, h);
    let cover = cover_gradient(w, h);
    let lut = LinearLight::new();

    let mut screen = FrameBuffer::new(w, h);
    let mut mask = Mask::new(w, h);

    /* --- Surface state ---
       Visual: nothing yet; decay starts ticking as soon as we are on screen. */
    let mut surface = ScratchSurface::new(config);
    surface.activate(Instant::now());

    /* --- Frame stats --- */
    let mut last_stats_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Keys */
        if drawer.d_pressed_once() {
            let on = surface.toggle_decay(now);
            info!(decay = on, "decay toggled");
        }
        if drawer.r_pressed_once() {
            surface.request_reset(now);
        }

        /* 2) Pointer → new fade points (one per moved sample). */
        surface.pointer(drawer.left_mouse_down(), drawer.mouse_pos(), now);

        /* 3) Timers due by now: decay sweeps and reset steps, in order. */
        surface.advance(now);

        /* 4) Mask + layers. Visual: scratched spots show the picture. */
        surface.render_mask(&mut mask);
        compose(&mut screen, &cover, &background, &mask, &lut)?;

        /* 5) HUD */
        let decay = if surface.decay_active() { "DECAY ON" } else { "DECAY OFF" };
        let status = if surface.is_resetting() { " | RESETTING" } else { "" };
        let hud = format!("{decay}{status} | POINTS: {} | {hud_fps_text}", surface.store().len());
        draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);
        let x = draw_text_5x7(&mut screen, 8, 20, "D: DECAY  ", HUD_COLOR);
        let reset_color = if surface.reset_available() { HUD_COLOR } else { HUD_DIM };
        let x = draw_text_5x7(&mut screen, x, 20, "R: RESET  ", reset_color);
        draw_text_5x7(&mut screen, x, 20, "ESC: QUIT", HUD_COLOR);

        /* 6) Present. */
        drawer.present(&screen)?;

        /* 7) Once per second: FPS on the HUD + a log line. */
        frames_this_second += 1;
        let elapsed = now.duration_since(last_stats_time);
        if elapsed >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / elapsed.as_secs_f32();
            info!(fps = f64::from(fps), points = surface.store().len(), "frame stats");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_stats_time = now;
        }
    }

    surface.teardown();
    Ok(())
}
