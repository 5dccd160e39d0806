use tracing::debug;

use crate::actions::{ActionType, GuiAction};
use crate::consts::{DEFAULT_PRESSURE, DEFAULT_TOUCH_MAJOR};

use super::DeviceConfig;

const TRACKING_START: &str = "00000000";
const TRACKING_END: &str = "ffffffff";
const BTN_TOUCH: &str = "014a";
const BTN_TOOL_FINGER: &str = "0145";
const KEY_DOWN: &str = "00000001";
const SYN_REPORT: &str = "00000000";
const OFF_SCREEN: &str = "ffffffff";
const LEAD_IN_WAIT_S: f64 = 0.001;
/// Replayed gestures start one second after the lead-in tap.
const SCRIPT_START_S: f64 = 1.0;

/// One replayable step.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Idle time before the next gesture.
    Delay { seconds: f64 },
    Gesture {
        act_type: ActionType,
        start: (f64, f64),
        end: (f64, f64),
        commands: Vec<String>,
    },
}

/// Convert actions to events. `fps` is the sampling rate the frame indices
/// refer to; every command waits half a frame.
///
/// The first event is always an off-screen lead-in tap at time zero, which
/// makes sure the replay recorder is attached before the first real gesture.
pub fn convert_actions(actions: &[GuiAction], device: &DeviceConfig, fps: u32) -> Vec<Event> {
    let frame_s = 1.0 / fps.max(1) as f64;
    let mut events = Vec::with_capacity(actions.len() * 2 + 1);
    events.push(lead_in_tap(device));

    let mut writer = CommandWriter {
        device,
        clock: SCRIPT_START_S,
        wait: frame_s / 2.0,
        commands: Vec::new(),
    };
    let mut last_frame = 0u64;

    for action in actions {
        let (Some(&first), Some(&last)) = (action.frames.first(), action.frames.last()) else {
            continue;
        };
        let Some(centroid) = action.centroid() else {
            continue;
        };

        let delay = first.saturating_sub(last_frame) as f64 * frame_s;
        writer.clock += delay;
        events.push(Event::Delay { seconds: delay });
        last_frame = last;

        let (start, end) = match action.act_type {
            ActionType::Click => {
                writer.click(centroid);
                (centroid, centroid)
            }
            ActionType::LongClick => {
                writer.long_click(centroid, action.frames.len());
                (centroid, centroid)
            }
            ActionType::Swipe => {
                let path: Vec<(f64, f64)> = action.taps.iter().map(|t| (t.x, t.y)).collect();
                writer.swipe(&path);
                (path[0], path[path.len() - 1])
            }
        };

        events.push(Event::Gesture {
            act_type: action.act_type,
            start,
            end,
            commands: writer.take(),
        });
    }

    debug!(actions = actions.len(), events = events.len(), "Converted actions");
    events
}

fn lead_in_tap(device: &DeviceConfig) -> Event {
    let mut writer = CommandWriter {
        device,
        clock: 0.0,
        wait: LEAD_IN_WAIT_S,
        commands: Vec::new(),
    };
    writer.tap(OFF_SCREEN, OFF_SCREEN);
    Event::Gesture {
        act_type: ActionType::Click,
        start: (0.0, 0.0),
        end: (0.0, 0.0),
        commands: writer.take(),
    }
}

/// Flatten events into the command lines written to the event log.
pub fn raw_commands(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Gesture { commands, .. } => Some(commands),
            Event::Delay { .. } => None,
        })
        .flatten()
        .cloned()
        .collect()
}

struct CommandWriter<'a> {
    device: &'a DeviceConfig,
    clock: f64,
    wait: f64,
    commands: Vec<String>,
}

impl CommandWriter<'_> {
    fn emit(&mut self, kind: &str, code: &str, value: &str) {
        self.commands.push(format!(
            "[    {:.6}] {}: {} {} {}",
            self.clock, self.device.device, kind, code, value
        ));
    }

    fn abs(&mut self, code: &str, value: &str) {
        let device = self.device;
        self.emit(&device.ev_abs, code, value);
    }

    fn syn(&mut self) {
        let device = self.device;
        self.emit(&device.ev_syn, &device.ev_syn, SYN_REPORT);
    }

    fn tick(&mut self, fraction: f64) {
        self.clock += self.wait * fraction;
    }

    fn position(&mut self, (x, y): (f64, f64)) {
        let device = self.device;
        let (tx, ty) = device.to_touch(x, y);
        self.abs(&device.abs_x, &format!("{tx:08x}"));
        self.abs(&device.abs_y, &format!("{ty:08x}"));
    }

    fn begin_tracking(&mut self) {
        let device = self.device;
        self.abs(&device.tracking_id, TRACKING_START);
    }

    fn end_tracking(&mut self) {
        let device = self.device;
        self.abs(&device.tracking_id, TRACKING_END);
        self.syn();
        self.tick(1.0);
    }

    fn click(&mut self, at: (f64, f64)) {
        let (tx, ty) = self.device.to_touch(at.0, at.1);
        self.tap(&format!("{tx:08x}"), &format!("{ty:08x}"));
    }

    /// Full press-and-release at raw, already hex-encoded coordinates.
    fn tap(&mut self, x: &str, y: &str) {
        let device = self.device;
        self.begin_tracking();
        self.emit(&device.ev_key, BTN_TOUCH, KEY_DOWN);
        self.emit(&device.ev_key, BTN_TOOL_FINGER, KEY_DOWN);
        self.tick(1.0);

        self.abs(&device.abs_x, x);
        self.abs(&device.abs_y, y);
        self.tick(1.0);

        self.abs(&device.touch_major, DEFAULT_TOUCH_MAJOR);
        self.abs(&device.pressure, DEFAULT_PRESSURE);
        self.tick(1.0);

        self.syn();
        self.tick(1.0);
        self.end_tracking();
    }

    // Re-sends the position once per frame so the hold lasts as long as
    // the recorded touch.
    fn long_click(&mut self, at: (f64, f64), frames: usize) {
        self.begin_tracking();
        self.tick(1.0);
        for _ in 0..frames {
            self.position(at);
            self.tick(1.0 / 1.5);
            self.syn();
            self.tick(1.0 / 1.5);
        }
        self.syn();
        self.tick(1.0);
        self.end_tracking();
    }

    fn swipe(&mut self, path: &[(f64, f64)]) {
        self.begin_tracking();
        self.tick(1.0);
        for &point in path {
            self.position(point);
            self.tick(1.0);
            self.syn();
            self.tick(1.0);
        }
        self.end_tracking();
    }

    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }
}
