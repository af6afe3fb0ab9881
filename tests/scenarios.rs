// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! End-to-end control loop runs against mock collaborators.

use cruise_rig::config::{ControllerConfig, TICK_MS};
use cruise_rig::control::{
    AdcRead, Button, ControlLoop, ControlMode, CycleReport, Direction, DistanceSensor,
    IndicatorState, MotorDriver, Rig, StatusLamp, Telemetry, TelemetrySink,
};
use cruise_rig::drivers::{StatusDisplay, TwoLineDisplay};
use cruise_rig::PulseCounter;

struct Road {
    cm: f32,
}

impl DistanceSensor for Road {
    fn read_cm(&mut self) -> f32 {
        self.cm
    }
}

struct Panel {
    levels: [u16; 16],
}

impl AdcRead for Panel {
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.levels[ch as usize]
    }
}

#[derive(Default)]
struct Motor {
    direction: Option<Direction>,
    intensity: u8,
}

impl MotorDriver for Motor {
    fn set_direction(&mut self, dir: Direction) {
        self.direction = Some(dir);
    }

    fn set_drive_intensity(&mut self, intensity: u8) {
        self.intensity = intensity;
    }
}

#[derive(Default)]
struct Lamp {
    on: bool,
}

impl StatusLamp for Lamp {
    fn set_steady(&mut self, on: bool) {
        self.on = on;
    }
}

#[derive(Default)]
struct Console {
    lines: Vec<String>,
}

impl TelemetrySink for Console {
    fn publish(&mut self, telemetry: &Telemetry) {
        self.lines.push(telemetry.to_string());
    }
}

#[derive(Default)]
struct Screen {
    rows: [String; 2],
}

impl TwoLineDisplay for Screen {
    fn clear(&mut self) {
        self.rows = Default::default();
    }

    fn write_line(&mut self, row: u8, text: &str) {
        self.rows[row as usize] = text.to_string();
    }
}

/// Loop, collaborators and a simulated millisecond clock.
struct Harness {
    cfg: ControllerConfig,
    ctl: ControlLoop,
    rig: Rig<Road, Panel, Motor, Lamp, Lamp, (Console, StatusDisplay<Screen>)>,
    pulses: PulseCounter,
    now_ms: u32,
}

impl Harness {
    fn new(distance_cm: f32) -> Self {
        let cfg = ControllerConfig::default();
        Self {
            ctl: ControlLoop::new(cfg.clone()).expect("default config is valid"),
            rig: Rig {
                distance: Road { cm: distance_cm },
                inputs: Panel { levels: [0; 16] },
                motor: Motor::default(),
                primary_lamp: Lamp::default(),
                secondary_lamp: Lamp::default(),
                telemetry: (Console::default(), StatusDisplay::new(Screen::default())),
            },
            pulses: PulseCounter::new(cfg.edge_divisor),
            now_ms: 0,
            cfg,
        }
    }

    fn set_level(&mut self, button: Button, level: u16) {
        self.rig.inputs.levels[self.cfg.channel(button) as usize] = level;
    }

    fn cycle(&mut self) -> CycleReport {
        let report = self.ctl.step(self.now_ms, &mut self.rig, &self.pulses);
        self.now_ms += TICK_MS;
        report
    }

    /// One full press-and-release of `button`, two cycles.
    fn tap(&mut self, button: Button) -> CycleReport {
        self.set_level(button, 1023);
        let report = self.cycle();
        self.set_level(button, 0);
        self.cycle();
        report
    }

    fn speed(&self) -> i32 {
        self.ctl.modes().commanded_speed()
    }

    fn lamps(&self) -> IndicatorState {
        IndicatorState {
            primary: self.rig.primary_lamp.on,
            secondary: self.rig.secondary_lamp.on,
        }
    }
}

fn assert_output_invariants(report: &CycleReport) {
    assert!(report.drive.speed <= 100);
    let expected = (report.drive.speed as f64 * 255.0 / 100.0).round() as u8;
    assert_eq!(report.drive.intensity, expected);
    if report.drive.speed == 0 {
        assert_eq!(report.drive.direction, Direction::Stop);
    } else {
        assert_eq!(report.drive.direction, Direction::Forward);
    }
}

#[test]
fn five_increases_from_rest_drive_forward_at_thirteen() {
    let mut h = Harness::new(200.0);
    for _ in 0..5 {
        h.tap(Button::Increase);
    }

    assert_eq!(h.ctl.modes().mode(), ControlMode::Normal);
    assert_eq!(h.speed(), 5);
    assert_eq!(h.rig.motor.direction, Some(Direction::Forward));
    assert_eq!(h.rig.motor.intensity, 13);
    assert_eq!(h.lamps(), IndicatorState::NORMAL);
}

#[test]
fn acc_brakes_ten_units_in_ten_obstacle_cycles() {
    let mut h = Harness::new(200.0);
    h.ctl.modes_mut().set_commanded_speed(50);
    h.tap(Button::Engage);
    assert_eq!(h.ctl.modes().mode(), ControlMode::Acc);
    assert_eq!(h.ctl.modes().set_speed(), 50);
    assert_eq!(h.ctl.modes().speed_ceiling(), 50);
    assert_eq!(h.speed(), 50);

    h.rig.distance.cm = 10.0;
    for _ in 0..10 {
        assert_output_invariants(&h.cycle());
    }

    assert_eq!(h.speed(), 40);
    assert_eq!(h.rig.motor.intensity, 102);
    assert!(h.ctl.modes().hazard_active());

    // Keep the obstacle in place long enough to see the hazard blink in both phases.
    let mut lamp_states = Vec::new();
    for _ in 0..60 {
        lamp_states.push(h.cycle().indicators);
    }
    assert!(lamp_states.iter().all(|s| s.primary == s.secondary));
    assert!(lamp_states.contains(&IndicatorState::both(true)));
    assert!(lamp_states.contains(&IndicatorState::both(false)));
}

#[test]
fn acc_recovers_to_set_speed_once_clear() {
    let mut h = Harness::new(5.0);
    h.ctl.modes_mut().set_commanded_speed(30);
    h.tap(Button::Engage);
    for _ in 0..8 {
        h.cycle();
    }
    let low = h.speed();
    assert!(low < 30);

    h.rig.distance.cm = 120.0;
    for _ in 0..100 {
        let report = h.cycle();
        assert!(h.speed() <= 30);
        assert_output_invariants(&report);
    }
    assert_eq!(h.speed(), 30);
    assert_eq!(h.lamps(), IndicatorState::both(true));
}

#[test]
fn disconnected_ranger_reads_as_obstacle() {
    let mut h = Harness::new(0.0);
    h.ctl.modes_mut().set_commanded_speed(3);
    h.tap(Button::Engage);
    for _ in 0..5 {
        h.cycle();
    }
    assert_eq!(h.speed(), 0);
    assert_eq!(h.rig.motor.direction, Some(Direction::Stop));
    assert_eq!(h.rig.motor.intensity, 0);
}

#[test]
fn cruise_ignores_distance_and_nudges() {
    let mut h = Harness::new(200.0);
    h.ctl.modes_mut().set_commanded_speed(30);
    h.tap(Button::Set);
    assert_eq!(h.ctl.modes().mode(), ControlMode::Cruise);

    h.rig.distance.cm = 3.0;
    h.tap(Button::Increase);
    h.tap(Button::Decrease);
    h.tap(Button::Decrease);
    for _ in 0..20 {
        h.cycle();
        assert_eq!(h.speed(), 30);
    }
    assert_eq!(h.lamps(), IndicatorState::CRUISE);
    assert_eq!(h.rig.motor.intensity, 77);
}

#[test]
fn cancel_from_every_mode_restores_manual_control() {
    for entry in [None, Some(Button::Set), Some(Button::Engage)] {
        let mut h = Harness::new(200.0);
        h.ctl.modes_mut().set_commanded_speed(20);
        if let Some(button) = entry {
            h.tap(button);
        }

        h.tap(Button::Cancel);
        assert_eq!(h.ctl.modes().mode(), ControlMode::Normal);
        assert_eq!(h.lamps(), IndicatorState::NORMAL);

        h.tap(Button::Decrease);
        assert_eq!(h.speed(), 19);
    }
}

#[test]
fn held_increase_counts_once_until_released() {
    let mut h = Harness::new(200.0);

    h.set_level(Button::Increase, 900);
    for _ in 0..100 {
        h.cycle();
    }
    assert_eq!(h.speed(), 1);

    // Sagging into the dead zone is not a release.
    h.set_level(Button::Increase, 300);
    h.cycle();
    h.set_level(Button::Increase, 900);
    h.cycle();
    assert_eq!(h.speed(), 1);

    h.set_level(Button::Increase, 50);
    h.cycle();
    h.set_level(Button::Increase, 900);
    h.cycle();
    assert_eq!(h.speed(), 2);
}

#[test]
fn rate_estimate_from_forty_edges() {
    let mut h = Harness::new(200.0);
    for _ in 0..40 {
        h.pulses.on_edge();
    }

    let mut estimates = Vec::new();
    while h.now_ms <= 1000 {
        if let Some(rate) = h.cycle().rate_rpm {
            estimates.push(rate);
        }
    }
    assert_eq!(estimates, vec![15.0]);
    assert_eq!(h.ctl.estimator().rate_rpm(), 15.0);
}

#[test]
fn status_line_every_display_interval() {
    let mut h = Harness::new(33.0);
    h.ctl.modes_mut().set_commanded_speed(40);

    while h.now_ms < 1000 {
        h.cycle();
    }

    let (console, display) = &h.rig.telemetry;
    assert_eq!(console.lines.len(), 3);
    assert_eq!(
        console.lines[0],
        "Mode: Normal | Speed: 40 | RPM: 0.00 | PWM: 102 | Distance: 33.00 cm"
    );
    assert_eq!(display.panel().rows, ["Normal S:40", "R:0 P:102 D:33"]);
}

#[test]
fn lcd_follows_mode_changes_between_refreshes() {
    let mut h = Harness::new(200.0);
    h.rig.telemetry.1.banner("ACC System Start");
    assert_eq!(h.rig.telemetry.1.panel().rows[0], "ACC System Start");

    h.ctl.modes_mut().set_commanded_speed(25);
    h.tap(Button::Set);
    while h.now_ms <= 300 {
        h.cycle();
    }

    assert_eq!(h.rig.telemetry.1.panel().rows, ["Cruise S:25", "R:0 P:64 D:200"]);
}

#[test]
fn set_again_in_cruise_recaptures_set_speed() {
    let mut h = Harness::new(200.0);
    h.ctl.modes_mut().set_commanded_speed(30);
    h.tap(Button::Set);
    assert_eq!(h.ctl.modes().set_speed(), 30);

    h.ctl.modes_mut().set_commanded_speed(45);
    h.tap(Button::Set);
    assert_eq!(h.ctl.modes().mode(), ControlMode::Cruise);
    assert_eq!(h.ctl.modes().set_speed(), 45);
    for _ in 0..20 {
        h.cycle();
        assert_eq!(h.speed(), 45);
    }
    assert_eq!(h.rig.motor.intensity, 115);

    // Increase and Set in the same cycle: the nudge lands before the capture.
    h.set_level(Button::Increase, 1023);
    h.set_level(Button::Set, 1023);
    h.cycle();
    assert_eq!(h.ctl.modes().set_speed(), 46);
    assert_eq!(h.speed(), 46);
    assert_eq!(h.lamps(), IndicatorState::CRUISE);
}

#[test]
fn outputs_stay_in_range_under_button_mashing() {
    let mut h = Harness::new(200.0);
    let script = [
        Button::Decrease,
        Button::Decrease,
        Button::Engage,
        Button::Increase,
        Button::Cancel,
        Button::Set,
        Button::Increase,
        Button::Cancel,
    ];

    for (i, &button) in script.iter().cycle().take(400).enumerate() {
        h.rig.distance.cm = if i % 7 < 3 { 10.0 } else { 80.0 };
        if i % 3 == 0 {
            h.ctl.modes_mut().set_commanded_speed(95 + (i as i32 % 10));
        }
        let report = h.tap(button);
        assert_output_invariants(&report);
        assert!((0..=100).contains(&h.speed()));
    }
}
