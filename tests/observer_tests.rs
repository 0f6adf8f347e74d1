use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use plotview_rs::api::{ChannelObserver, PlotContext, PlotEvent, PlotObserver};
use plotview_rs::core::{DeviceSize, SceneRect};
use plotview_rs::interaction::{InteractionMode, PointerButton, PointerButtons, PointerEvent};
use plotview_rs::render::NullRenderer;
use plotview_rs::{PlotConfig, PlotViewport};

type EventLog = Rc<RefCell<Vec<(PlotEvent, PlotContext)>>>;

struct RecordingObserver {
    id: String,
    log: EventLog,
}

impl RecordingObserver {
    fn new(id: &str) -> (Self, EventLog) {
        let log = EventLog::default();
        (
            Self {
                id: id.to_owned(),
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl PlotObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PlotEvent, context: PlotContext) {
        self.log.borrow_mut().push((event, context));
    }
}

fn build_plot(viewport_id: u32) -> PlotViewport<NullRenderer> {
    let config = PlotConfig::new(DeviceSize::new(800, 400))
        .with_viewport_id(viewport_id)
        .with_bounds((0.0, 100.0), (0.0, 100.0))
        .with_auto_fit(false);
    PlotViewport::new(NullRenderer::default(), config).expect("plot init")
}

#[test]
fn grid_refresh_notifies_with_viewport_id() {
    let mut plot = build_plot(3);
    let (observer, log) = RecordingObserver::new("recorder");
    plot.register_observer(Box::new(observer))
        .expect("register");

    assert!(plot.set_x_bounds(0.0, 50.0));
    let events = log.borrow();
    assert_eq!(events.len(), 1);
    let (event, context) = events[0];
    assert_eq!(event, PlotEvent::GridTicksChanged { viewport_id: 3 });
    assert_eq!(context.viewport_id, 3);
    assert_eq!(context.bounds, SceneRect::new(0.0, 50.0, 0.0, 100.0));
    assert_eq!(context.interaction_mode, InteractionMode::Idle);
}

#[test]
fn series_changes_and_resets_are_reported() {
    let mut plot = build_plot(0);
    plot.set_auto_fit(true);
    let (observer, log) = RecordingObserver::new("recorder");
    plot.register_observer(Box::new(observer))
        .expect("register");

    let id = plot.add_series("ramp", vec![0.0, 1.0, 2.0]);
    let events: Vec<PlotEvent> = log.borrow().iter().map(|(event, _)| *event).collect();
    assert_eq!(
        events,
        vec![
            PlotEvent::GridTicksChanged { viewport_id: 0 },
            PlotEvent::SceneReset {
                bounds: SceneRect::new(0.0, 2.0, 0.0, 2.0)
            },
            PlotEvent::SeriesChanged { series_id: id },
        ]
    );
    let (_, context) = log.borrow()[2];
    assert_eq!(context.series_count, 1);
}

#[test]
fn rect_zoom_commit_is_reported() {
    let mut plot = build_plot(0);
    let (observer, log) = RecordingObserver::new("recorder");
    plot.register_observer(Box::new(observer))
        .expect("register");

    plot.handle_pointer_press(PointerEvent::press(200.0, 100.0, PointerButton::Primary))
        .expect("press");
    plot.handle_pointer_move(PointerEvent::moved(
        600.0,
        300.0,
        PointerButtons::from_button(PointerButton::Primary),
    ))
    .expect("move");
    plot.handle_pointer_release(PointerEvent::release(600.0, 300.0, PointerButton::Primary))
        .expect("release");

    let events = log.borrow();
    let (last, context) = events.last().copied().expect("events recorded");
    assert_eq!(
        last,
        PlotEvent::RectZoomCommitted {
            x_applied: true,
            y_applied: true
        }
    );
    assert_eq!(context.zoom, (2.0, 2.0));
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let mut plot = build_plot(0);
    let (first, _) = RecordingObserver::new("dup");
    let (second, _) = RecordingObserver::new("dup");
    let (empty, _) = RecordingObserver::new("");

    plot.register_observer(Box::new(first)).expect("register");
    assert!(plot.register_observer(Box::new(second)).is_err());
    assert!(plot.register_observer(Box::new(empty)).is_err());
    assert_eq!(plot.observer_count(), 1);
    assert!(plot.has_observer("dup"));

    assert!(plot.unregister_observer("dup"));
    assert!(!plot.unregister_observer("dup"));
    assert_eq!(plot.observer_count(), 0);
}

#[test]
fn unregistered_observers_stop_receiving_events() {
    let mut plot = build_plot(0);
    let (observer, log) = RecordingObserver::new("recorder");
    plot.register_observer(Box::new(observer))
        .expect("register");
    plot.reset_scene();
    let seen = log.borrow().len();
    assert!(seen > 0);

    assert!(plot.unregister_observer("recorder"));
    plot.reset_scene();
    assert_eq!(log.borrow().len(), seen);
}

#[test]
fn channel_observer_forwards_events() {
    let mut plot = build_plot(9);
    let (sender, receiver) = mpsc::channel();
    plot.register_observer(Box::new(ChannelObserver::new("channel", sender)))
        .expect("register");

    plot.resize(DeviceSize::new(400, 200)).expect("resize");
    assert_eq!(
        receiver.try_recv().expect("event"),
        PlotEvent::GridTicksChanged { viewport_id: 9 }
    );
    assert!(receiver.try_recv().is_err());
}

#[test]
fn dropped_receiver_is_not_an_error() {
    let mut plot = build_plot(0);
    let (sender, receiver) = mpsc::channel();
    plot.register_observer(Box::new(ChannelObserver::new("channel", sender)))
        .expect("register");
    drop(receiver);

    plot.reset_scene();
    assert!(plot.has_observer("channel"));
}

#[test]
fn telemetry_init_is_safe_to_call_twice() {
    let first = plotview_rs::telemetry::init_default_tracing();
    let second = plotview_rs::telemetry::init_default_tracing();
    assert!(!second || !first);
    if cfg!(not(feature = "telemetry")) {
        assert!(!first);
    }
}
