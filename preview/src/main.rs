//! Desktop preview of the marble exhibit show
//!
//! Runs the real session driver on a control thread against simulated
//! hardware and draws the strip, the button lamps and the motor relays.
//! Buttons are pressed with the mouse or the S, Y and N keys.

mod sim;

use std::time::Instant as StdInstant;
use std::{process, thread};

use eframe::egui::{self};
use log::{error, info};
use showrunner::{
    HardwareContext, Input, Level, Output, PinMap, SessionDriver, ShowConfig, StripLayout,
    StripVisuals,
};

use crate::sim::{PixelSink, SharedPanel, SimAudio, SimClock, SimIo, SimProcess, STRIP_LEDS};

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Radius of a relay lamp
const LAMP_RADIUS: f32 = 8.0;

const LAMP_ON: egui::Color32 = egui::Color32::from_rgb(255, 200, 60);
const LAMP_OFF: egui::Color32 = egui::Color32::from_rgb(60, 60, 60);

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let panel = SharedPanel::default();
    spawn_show(panel.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 420.0])
            .with_title("Showrunner Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "showrunner-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new(panel)))),
    )
}

/// Start the show on its own thread
///
/// A hardware fault ends the process with a non-zero code.
fn spawn_show(panel: SharedPanel) {
    let spawned = thread::Builder::new()
        .name("show".into())
        .spawn(move || {
            let layout = StripLayout::DEFAULT;
            let visuals = match StripVisuals::<_, STRIP_LEDS>::new(
                PixelSink::new(panel.clone()),
                layout,
            ) {
                Ok(visuals) => visuals,
                Err(err) => {
                    error!("invalid strip: {err}");
                    process::exit(2);
                }
            };
            let hardware = HardwareContext::new(
                SimIo::new(panel.clone()),
                SimAudio::new(panel),
                visuals,
                SimClock,
            );

            let mut driver = match SessionDriver::new(
                ShowConfig::default(),
                layout.indicators.count(),
                hardware,
                SimProcess,
            ) {
                Ok(driver) => driver,
                Err(err) => {
                    error!("invalid show: {err}");
                    process::exit(2);
                }
            };

            info!("show ready, press S to start");
            let Err(err) = driver.run();
            error!("hardware fault: {err}");
            process::exit(1);
        });

    if let Err(err) = spawned {
        error!("cannot start show thread: {err}");
        process::exit(1);
    }
}

fn output_label(output: Output) -> &'static str {
    match output {
        Output::StartLight => "Start lamp",
        Output::YesLight => "Yes lamp",
        Output::NoLight => "No lamp",
        Output::MotorInteriorYes => "Motor in/yes",
        Output::MotorInteriorNo => "Motor in/no",
        Output::MotorExteriorYes => "Motor out/yes",
        Output::MotorExteriorNo => "Motor out/no",
    }
}

struct PreviewApp {
    panel: SharedPanel,
    pins: PinMap,
    /// LED pixel size for display
    led_size: f32,
}

impl PreviewApp {
    fn new(panel: SharedPanel) -> Self {
        Self {
            panel,
            pins: PinMap::DEFAULT,
            led_size: LED_SIZE,
        }
    }

    fn handle_keys(ctx: &egui::Context) {
        let keys = [
            (egui::Key::S, Input::Start),
            (egui::Key::Y, Input::Yes),
            (egui::Key::N, Input::No),
        ];
        for (key, input) in keys {
            if ctx.input(|i| i.key_pressed(key)) {
                sim::press(input);
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        Self::handle_keys(ctx);

        let (frame, levels, track) = {
            let panel = sim::lock(&self.panel);
            (
                panel.frame.clone(),
                panel.levels,
                panel.playing(StdInstant::now()),
            )
        };

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for input in Input::ALL {
                    let lit = levels[input.light().index()] == Level::High;
                    let text = egui::RichText::new(format!("{input:?}")).color(if lit {
                        LAMP_ON
                    } else {
                        LAMP_OFF
                    });
                    if ui.button(text).clicked() {
                        sim::press(input);
                    }
                }

                ui.add_space(16.0);
                match track {
                    Some(track) => ui.label(format!("Playing: {track}")),
                    None => ui.label("Silent"),
                };

                ui.add_space(16.0);
                ui.label("Size: ");
                ui.add(egui::Slider::new(&mut self.led_size, 4.0..=32.0));
            });

            ui.add_space(8.0);

            // === Relays ===
            ui.horizontal_wrapped(|ui| {
                for output in Output::ALL {
                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(LAMP_RADIUS * 2.0, LAMP_RADIUS * 2.0),
                        egui::Sense::hover(),
                    );
                    let color = if levels[output.index()] == Level::High {
                        LAMP_ON
                    } else {
                        LAMP_OFF
                    };
                    painter.circle_filled(response.rect.center(), LAMP_RADIUS, color);
                    ui.label(format!(
                        "{} (BCM {})",
                        output_label(output),
                        self.pins.output(output)
                    ));
                    ui.add_space(8.0);
                }
            });

            ui.add_space(16.0);

            // === LED Display ===
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = frame.len().max(1).div_ceil(leds_per_row);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) = ui.allocate_painter(
                egui::vec2(available_width, height),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(self.led_size, self.led_size),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 3.0, color);
            }
        });
    }
}
