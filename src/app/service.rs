//! Monitor orchestration.
//!
//! [`MonitorService`] owns the domain pipeline and runs it once per call
//! to [`run_cycle`](MonitorService::run_cycle):
//!
//! ```text
//!   acquire → convert → evaluate → actuate → encode → fan out
//! ```
//!
//! The service holds no hardware — everything outside the domain comes
//! in through the port traits, so the whole pipeline runs unmodified on
//! the host under test doubles.

use log::{info, warn};

use crate::actuators::ActuatorController;
use crate::config::{MonitorConfig, Variant};
use crate::hazard::{AlertState, HazardEvaluator};
use crate::reading::{Reading, SimRng};
use crate::telemetry::{TelemetryEncoder, TelemetryTransport, TransportOutcome};

use super::events::AppEvent;
use super::ports::{ActuatorPort, CollectorPort, DelayPort, EventSink, LinkPort, SensorPort};

/// What one cycle produced, for callers and tests.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub reading: Reading,
    pub alert: AlertState,
    /// `None` on standalone nodes, which never attempt remote delivery.
    pub remote: Option<TransportOutcome>,
}

pub struct MonitorService {
    config: MonitorConfig,
    evaluator: HazardEvaluator,
    controller: ActuatorController,
    encoder: TelemetryEncoder,
    transport: TelemetryTransport,
    rng: SimRng,
    cycle_count: u64,
    last_alert: Option<AlertState>,
}

impl MonitorService {
    pub fn new(config: MonitorConfig, rng_seed: u32) -> Self {
        let evaluator = HazardEvaluator::new(&config);
        let controller = ActuatorController::new(&config);
        let encoder = TelemetryEncoder::new(config.variant);
        Self {
            config,
            evaluator,
            controller,
            encoder,
            transport: TelemetryTransport::new(),
            rng: SimRng::seeded(rng_seed),
            cycle_count: 0,
            last_alert: None,
        }
    }

    /// Cycle period for the active variant, for the caller's pacing loop.
    pub fn cycle_ms(&self) -> u32 {
        self.config.cycle_ms()
    }

    /// Announce startup through the sink.
    pub fn start(&self, sink: &mut impl EventSink) {
        info!(
            "monitor starting: variant {:?}, cycle {} ms",
            self.config.variant,
            self.config.cycle_ms()
        );
        sink.emit(&AppEvent::Started(self.config.variant));
    }

    /// Run one full monitoring cycle.
    ///
    /// Ordering within the cycle is fixed: actuators are updated before
    /// any telemetry I/O, so a slow or failing collector can never delay
    /// the hazard response.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        link: &impl LinkPort,
        collector: &mut impl CollectorPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;

        let raw = hw.acquire();
        let reading = Reading::from_raw(&raw, &mut self.rng);
        let alert = self.evaluator.evaluate(&reading);
        self.note_alert_edge(alert, &reading, sink);

        // Link status is sampled once and shared by the display and the
        // remote path, so one cycle never shows a link it did not use.
        let link_up = match self.config.variant {
            Variant::Networked => Some(link.is_associated()),
            Variant::Standalone => None,
        };

        let state = self.controller.target(alert, &reading, link_up);
        self.controller.apply(&state, hw, delay);

        // The serial line always carries the full snapshot; the wire
        // record is a separate, narrower schema.
        let local = self.encoder.encode_local(&reading);
        self.transport.emit_local(&local, sink);

        let remote = match self.config.variant {
            Variant::Networked => {
                let wire = self.encoder.encode_remote(&reading);
                Some(self.transport.emit_remote(&wire, link, collector, sink))
            }
            Variant::Standalone => None,
        };

        CycleReport {
            reading,
            alert,
            remote,
        }
    }

    /// Emit edge-triggered alert events and log the transition.
    fn note_alert_edge(
        &mut self,
        alert: AlertState,
        reading: &Reading,
        sink: &mut impl EventSink,
    ) {
        if self.last_alert != Some(alert) {
            match alert {
                AlertState::Hazard => {
                    warn!(
                        "hazard raised at cycle {}: gas={} T={:.1}C vib={:.2}",
                        self.cycle_count,
                        reading.gas_triggered,
                        reading.temperature_c,
                        reading.vibration
                    );
                    sink.emit(&AppEvent::AlertRaised);
                }
                AlertState::Normal => {
                    // Boot lands here too; only log a clear after a real
                    // hazard, not on the first cycle.
                    if self.last_alert.is_some() {
                        info!("hazard cleared at cycle {}", self.cycle_count);
                        sink.emit(&AppEvent::AlertCleared);
                    }
                }
            }
            self.last_alert = Some(alert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuators::{Banner, DisplayFrame};
    use crate::app::ports::NoLink;
    use crate::reading::RawSample;

    struct FakeNode {
        raw: RawSample,
        red: Option<bool>,
        green: Option<bool>,
        buzzer_levels: Vec<bool>,
        frames: Vec<DisplayFrame>,
    }

    impl FakeNode {
        fn new(raw: RawSample) -> Self {
            Self {
                raw,
                red: None,
                green: None,
                buzzer_levels: Vec::new(),
                frames: Vec::new(),
            }
        }
    }

    impl SensorPort for FakeNode {
        fn acquire(&mut self) -> RawSample {
            self.raw
        }
    }

    impl ActuatorPort for FakeNode {
        fn set_red(&mut self, on: bool) {
            self.red = Some(on);
        }
        fn set_green(&mut self, on: bool) {
            self.green = Some(on);
        }
        fn set_buzzer(&mut self, on: bool) {
            self.buzzer_levels.push(on);
        }
        fn show_frame(&mut self, frame: &DisplayFrame) {
            self.frames.push(*frame);
        }
        fn all_off(&mut self) {}
    }

    struct FixedLink(bool);
    impl LinkPort for FixedLink {
        fn is_associated(&self) -> bool {
            self.0
        }
    }

    struct CountingCollector {
        code: i32,
        posts: usize,
    }
    impl CollectorPort for CountingCollector {
        fn post_json(&mut self, _json: &str) -> i32 {
            self.posts += 1;
            self.code
        }
    }

    struct NoDelay;
    impl DelayPort for NoDelay {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    struct CapturingSink(Vec<AppEvent>);
    impl EventSink for CapturingSink {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(event.clone());
        }
    }

    fn quiet_raw() -> RawSample {
        RawSample {
            humidity_pct: 50.0,
            temperature_c: 21.0,
            vibration_adc: 820,
            pressure_adc: 2048,
            soil_adc: 1024,
            gas_adc: 300,
            gas_triggered: false,
        }
    }

    fn hazard_raw() -> RawSample {
        RawSample {
            gas_triggered: true,
            ..quiet_raw()
        }
    }

    fn standalone_service() -> MonitorService {
        MonitorService::new(MonitorConfig::default(), 42)
    }

    fn networked_service() -> MonitorService {
        let mut config = MonitorConfig::default();
        config.variant = Variant::Networked;
        config.collector_url = heapless::String::try_from("http://collector/ingest").unwrap();
        MonitorService::new(config, 42)
    }

    #[test]
    fn quiet_cycle_is_normal_with_green_on() {
        let mut svc = standalone_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut sink = CapturingSink(Vec::new());
        let report = svc.run_cycle(&mut node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        assert_eq!(report.alert, AlertState::Normal);
        assert_eq!(report.remote, None);
        assert_eq!(node.green, Some(true));
        assert_eq!(node.red, Some(false));
        assert_eq!(node.frames[0].banner, Banner::Optimal);
    }

    #[test]
    fn hazard_cycle_pulses_and_raises_edge_event() {
        let mut svc = standalone_service();
        let mut node = FakeNode::new(hazard_raw());
        let mut sink = CapturingSink(Vec::new());
        let report = svc.run_cycle(&mut node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        assert_eq!(report.alert, AlertState::Hazard);
        assert_eq!(node.red, Some(true));
        assert_eq!(node.buzzer_levels, vec![true, false]);
        assert!(sink
            .0
            .iter()
            .any(|e| matches!(e, AppEvent::AlertRaised)));
    }

    #[test]
    fn alert_events_fire_only_on_edges() {
        let mut svc = standalone_service();
        let mut sink = CapturingSink(Vec::new());
        let mut hazard_node = FakeNode::new(hazard_raw());
        let mut quiet_node = FakeNode::new(quiet_raw());

        svc.run_cycle(&mut hazard_node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        svc.run_cycle(&mut hazard_node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        svc.run_cycle(&mut quiet_node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        svc.run_cycle(&mut quiet_node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);

        let raised = sink
            .0
            .iter()
            .filter(|e| matches!(e, AppEvent::AlertRaised))
            .count();
        let cleared = sink
            .0
            .iter()
            .filter(|e| matches!(e, AppEvent::AlertCleared))
            .count();
        assert_eq!(raised, 1);
        assert_eq!(cleared, 1);
    }

    #[test]
    fn first_quiet_cycle_emits_no_clear_event() {
        let mut svc = standalone_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut sink = CapturingSink(Vec::new());
        svc.run_cycle(&mut node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        assert!(!sink.0.iter().any(|e| matches!(e, AppEvent::AlertCleared)));
    }

    #[test]
    fn standalone_never_posts_even_with_link_up() {
        let mut svc = standalone_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut collector = CountingCollector { code: 200, posts: 0 };
        let mut sink = CapturingSink(Vec::new());
        let report = svc.run_cycle(
            &mut node,
            &FixedLink(true),
            &mut collector,
            &mut NoDelay,
            &mut sink,
        );
        assert_eq!(report.remote, None);
        assert_eq!(collector.posts, 0);
    }

    #[test]
    fn networked_posts_once_per_cycle_when_linked() {
        let mut svc = networked_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut collector = CountingCollector { code: 200, posts: 0 };
        let mut sink = CapturingSink(Vec::new());
        let report = svc.run_cycle(
            &mut node,
            &FixedLink(true),
            &mut collector,
            &mut NoDelay,
            &mut sink,
        );
        assert_eq!(report.remote, Some(TransportOutcome::Sent(200)));
        assert_eq!(collector.posts, 1);
        assert_eq!(node.frames[0].link_up, Some(true));
    }

    #[test]
    fn networked_serial_line_keeps_vibration_and_soil() {
        let mut svc = networked_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut collector = CountingCollector { code: 200, posts: 0 };
        let mut sink = CapturingSink(Vec::new());
        svc.run_cycle(
            &mut node,
            &FixedLink(true),
            &mut collector,
            &mut NoDelay,
            &mut sink,
        );
        let line = sink
            .0
            .iter()
            .find_map(|e| match e {
                AppEvent::Telemetry { line } => Some(line.clone()),
                _ => None,
            })
            .expect("one serial line per cycle");
        assert!(line.contains("\"vibration\""), "serial line: {line}");
        assert!(line.contains("\"soil_moisture\""), "serial line: {line}");
        assert!(!line.contains("\"gas_raw\""), "serial line: {line}");
    }

    #[test]
    fn networked_without_link_still_actuates_and_logs_locally() {
        let mut svc = networked_service();
        let mut node = FakeNode::new(hazard_raw());
        let mut collector = CountingCollector { code: 200, posts: 0 };
        let mut sink = CapturingSink(Vec::new());
        let report = svc.run_cycle(
            &mut node,
            &FixedLink(false),
            &mut collector,
            &mut NoDelay,
            &mut sink,
        );
        assert_eq!(report.remote, Some(TransportOutcome::SkippedNoLink));
        assert_eq!(collector.posts, 0);
        assert_eq!(node.red, Some(true));
        assert!(sink
            .0
            .iter()
            .any(|e| matches!(e, AppEvent::Telemetry { .. })));
        assert_eq!(node.frames[0].link_up, Some(false));
    }

    #[test]
    fn collector_failure_never_affects_actuators() {
        let mut svc = networked_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut collector = CountingCollector { code: -1, posts: 0 };
        let mut sink = CapturingSink(Vec::new());
        let report = svc.run_cycle(
            &mut node,
            &FixedLink(true),
            &mut collector,
            &mut NoDelay,
            &mut sink,
        );
        assert_eq!(report.remote, Some(TransportOutcome::Failed(-1)));
        assert_eq!(node.green, Some(true));
        assert_eq!(node.red, Some(false));
    }

    #[test]
    fn telemetry_line_emitted_every_cycle() {
        let mut svc = standalone_service();
        let mut node = FakeNode::new(quiet_raw());
        let mut sink = CapturingSink(Vec::new());
        for _ in 0..3 {
            svc.run_cycle(&mut node, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
        }
        let lines = sink
            .0
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry { .. }))
            .count();
        assert_eq!(lines, 3);
    }

    #[test]
    fn cycle_period_follows_variant() {
        assert_eq!(standalone_service().cycle_ms(), 500);
        assert_eq!(networked_service().cycle_ms(), 2000);
    }
}
