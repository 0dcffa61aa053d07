use std::{sync::Arc, time::Duration};

use avci::{Error, VehicleCmd, VehicleCmdSink};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Period between two command sends.
pub const DEFAULT_SEND_PERIOD: Duration = Duration::from_millis(100);

/// Converts a velocity in km/h to m/s.
///
/// # Example
///
/// ```
/// use assert_approx_eq::assert_approx_eq;
///
/// assert_approx_eq!(ovt_manual_control::kmph_to_mps(36.0), 10.0);
/// ```
pub fn kmph_to_mps(linear_kmph: f64) -> f64 {
    linear_kmph * 1000.0 / 3600.0
}

#[derive(Clone, Copy, Debug, Default)]
struct CommandState {
    /// m/s
    linear_velocity: f64,
    /// degrees
    steer_angle: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug)]
struct Inner {
    command: CommandState,
    mode: Mode,
}

/// Re-sends the last commanded velocity and steering angle to a
/// [`VehicleCmdSink`] at a fixed period.
///
/// The lifecycle is `Idle` (after construction) -> running (after
/// [`start`](Self::start)) -> stopped (after [`stop_now`](Self::stop_now)).
/// A stopped sender cannot be restarted; create a new one instead.
///
/// Dropping a running sender cancels the timer without sending the terminal
/// stop command. Use `stop_now` to relinquish control of the vehicle.
#[derive(Debug)]
pub struct ManualCommandSender<S>
where
    S: VehicleCmdSink,
{
    sink: Arc<S>,
    inner: Arc<Mutex<Inner>>,
    period: Duration,
    send_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S> ManualCommandSender<S>
where
    S: VehicleCmdSink + 'static,
{
    pub fn new(sink: S, period: Duration) -> Self {
        Self {
            sink: Arc::new(sink),
            inner: Arc::new(Mutex::new(Inner {
                command: CommandState::default(),
                mode: Mode::Idle,
            })),
            period,
            send_task: Mutex::new(None),
        }
    }

    pub fn new_with_default_period(sink: S) -> Self {
        Self::new(sink, DEFAULT_SEND_PERIOD)
    }

    /// Starts the periodic send task on the ambient tokio runtime. The first
    /// command is sent one period after this call.
    ///
    /// # Panics
    ///
    /// Panics if the sender was already started.
    pub fn start(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.mode != Mode::Idle {
                panic!("command send task is already started");
            }
            inner.mode = Mode::Running;
        }
        let sink = self.sink.clone();
        let inner = self.inner.clone();
        let period = self.period;
        *self.send_task.lock() = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                debug!("tick");
                let inner = inner.lock();
                if inner.mode != Mode::Running {
                    break;
                }
                let cmd = VehicleCmd::from_velocity(
                    inner.command.linear_velocity,
                    inner.command.steer_angle,
                );
                if let Err(e) = sink.send_vehicle_cmd(&cmd) {
                    warn!("failed to send vehicle command: {e}");
                }
            }
        }));
    }

    /// Stores the commanded velocity (km/h, converted to m/s once here) and
    /// steering angle (degrees). The new values are carried by the following
    /// ticks, so they reach the sink with up to one period of latency.
    ///
    /// No range or finiteness validation is applied; callers own the valid
    /// ranges. May be called in any state. Commands are only sent while the
    /// sender is running.
    pub fn set_velocity(&self, linear_kmph: f64, steer_angle_deg: f64) {
        let mut inner = self.inner.lock();
        inner.command.linear_velocity = kmph_to_mps(linear_kmph);
        inner.command.steer_angle = steer_angle_deg;
    }

    /// Cancels the periodic send task, then sends a single all-zero command.
    ///
    /// Cancelling first guarantees that the zero command is the last message
    /// the sink observes; a tick scheduled before the stop cannot overwrite
    /// it. Calling this on an already stopped sender does nothing.
    pub fn stop_now(&self) -> Result<(), Error> {
        let mut inner = self.inner.lock();
        if inner.mode == Mode::Stopped {
            return Ok(());
        }
        inner.mode = Mode::Stopped;
        if let Some(task) = self.send_task.lock().take() {
            task.abort();
        }
        // The state lock is still held: a tick blocked on it observes
        // `Stopped` and exits without sending.
        self.sink.send_vehicle_cmd(&VehicleCmd::default())
    }
}

impl<S> Drop for ManualCommandSender<S>
where
    S: VehicleCmdSink,
{
    fn drop(&mut self) {
        if let Some(task) = self.send_task.lock().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_approx_eq::assert_approx_eq;
    use avci::DummyVehicleCmdSink;

    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn test_kmph_to_mps() {
        assert_eq!(kmph_to_mps(36.0), 10.0);
        assert_eq!(kmph_to_mps(72.0), 20.0);
        assert_approx_eq!(kmph_to_mps(-18.0), -5.0);
        assert_approx_eq!(kmph_to_mps(0.0), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_last_set_velocity() {
        let sink = Arc::new(DummyVehicleCmdSink::new());
        let sender = ManualCommandSender::new(sink.clone(), PERIOD);

        sender.set_velocity(72.0, 15.0);
        sender.start();
        tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;

        let cmd = sink.last_command().unwrap();
        assert_approx_eq!(cmd.ctrl_cmd.linear_velocity, 20.0);
        assert_approx_eq!(cmd.twist_cmd.linear.x, 20.0);
        assert_approx_eq!(cmd.ctrl_cmd.steering_angle, 15.0);

        // A new command is carried by the next tick, converted once at set
        // time.
        sender.set_velocity(36.0, -5.0);
        tokio::time::sleep(PERIOD).await;
        let cmd = sink.last_command().unwrap();
        assert_approx_eq!(cmd.ctrl_cmd.linear_velocity, 10.0);
        assert_approx_eq!(cmd.twist_cmd.linear.x, 10.0);
        assert_approx_eq!(cmd.ctrl_cmd.steering_angle, -5.0);

        sender.stop_now().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_now_sends_terminal_zero() {
        let sink = Arc::new(DummyVehicleCmdSink::new());
        let sender = ManualCommandSender::new(sink.clone(), PERIOD);

        sender.set_velocity(0.0, 0.0);
        sender.start();
        tokio::time::sleep(PERIOD * 3 + PERIOD / 2).await;

        let ticks = sink.sent_commands().len();
        assert!(ticks >= 3);

        sender.stop_now().unwrap();
        let commands = sink.sent_commands();
        assert_eq!(commands.len(), ticks + 1);
        let last = commands.last().unwrap();
        assert_approx_eq!(last.ctrl_cmd.linear_velocity, 0.0);
        assert_approx_eq!(last.twist_cmd.linear.x, 0.0);

        // No tick fires after stop_now has returned.
        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(sink.sent_commands().len(), ticks + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_now_overrides_last_command() {
        let sink = Arc::new(DummyVehicleCmdSink::new());
        let sender = ManualCommandSender::new(sink.clone(), PERIOD);

        sender.set_velocity(72.0, 15.0);
        sender.start();
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        sender.stop_now().unwrap();

        let commands = sink.sent_commands();
        assert!(commands.len() >= 2);
        assert_approx_eq!(commands[0].ctrl_cmd.linear_velocity, 20.0);
        let last = commands.last().unwrap();
        assert_approx_eq!(last.ctrl_cmd.linear_velocity, 0.0);
        assert_approx_eq!(last.twist_cmd.linear.x, 0.0);
        assert_approx_eq!(last.ctrl_cmd.steering_angle, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_now_is_idempotent() {
        let sink = Arc::new(DummyVehicleCmdSink::new());
        let sender = ManualCommandSender::new(sink.clone(), PERIOD);

        sender.start();
        tokio::time::sleep(PERIOD).await;
        sender.stop_now().unwrap();
        let count = sink.sent_commands().len();

        sender.stop_now().unwrap();
        assert_eq!(sink.sent_commands().len(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_send_before_start() {
        let sink = Arc::new(DummyVehicleCmdSink::new());
        let sender = ManualCommandSender::new(sink.clone(), PERIOD);

        // Legal in any state; nothing is sent while idle.
        sender.set_velocity(36.0, 0.0);
        tokio::time::sleep(PERIOD * 3).await;
        assert!(sink.sent_commands().is_empty());

        sender.start();
        tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
        let cmd = sink.last_command().unwrap();
        assert_approx_eq!(cmd.ctrl_cmd.linear_velocity, 10.0);

        sender.stop_now().unwrap();
    }

    #[tokio::test(start_paused = true)]
    #[should_panic(expected = "already started")]
    async fn test_double_start_panics() {
        let sink = Arc::new(DummyVehicleCmdSink::new());
        let sender = ManualCommandSender::new(sink, PERIOD);
        sender.start();
        sender.start();
    }
}
