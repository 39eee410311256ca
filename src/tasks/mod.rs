//! The fixed task set.
//!
//! Three threads, created once at boot and never stopped:
//!
//! ```text
//!  Core 0 (PRO)  "sensing"   LocalExecutor: sensor │ input │ mode │ display
//!  Core 1 (APP)  "control"   LocalExecutor: control │ status
//!  Core 1 (APP)  "pwm"       blocking SoftPwm loop (lowest priority)
//! ```
//!
//! Periodic tasks are cooperative futures on a per-thread
//! `edge_executor::LocalExecutor`, sleeping on `async_io_mini` reactor
//! timers.  The control and status tasks share the indicator through a
//! `RefCell`, which is sound because they run on the same executor and
//! never hold the borrow across an await.  The PWM generator busy-waits, so
//! it gets its own thread below the control thread's priority.

pub mod acquisition;
pub mod control;
pub mod display;
pub mod mode;
pub mod status;

use core::cell::RefCell;
use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{error, info};

use crate::app::ports::{
    AmbientLightPort, ButtonPort, Clock, DisplaySink, EventSink, IndicatorPort, PotentiometerPort,
};
use crate::config::SystemConfig;
use crate::drivers::soft_pwm::SoftPwm;
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::error::Result;
use crate::shared::SharedState;

use self::mode::ModeTiming;

const SENSING_PRIORITY: u8 = 5;
const CONTROL_PRIORITY: u8 = 6;
const PWM_PRIORITY: u8 = 1;

const SENSING_STACK_KB: usize = 8;
const CONTROL_STACK_KB: usize = 8;
const PWM_STACK_KB: usize = 4;

/// Input-side ports owned by the sensing thread.
pub struct SensingPorts<A, P, B, C, D> {
    pub ambient: A,
    pub pot: P,
    pub button: B,
    pub clock: C,
    pub display: D,
}

/// Spawn sensor, input, mode and display tasks on the protocol core.
pub fn spawn_sensing<A, P, B, C, D, E>(
    shared: &'static SharedState,
    cfg: &SystemConfig,
    ports: SensingPorts<A, P, B, C, D>,
    events: E,
) -> Result<JoinHandle<()>>
where
    A: AmbientLightPort + Send + 'static,
    P: PotentiometerPort + Send + 'static,
    B: ButtonPort + Send + 'static,
    C: Clock + Send + 'static,
    D: DisplaySink + Send + 'static,
    E: EventSink + Clone + Send + 'static,
{
    let cfg = cfg.clone();
    spawn_on_core(Core::Pro, SENSING_PRIORITY, SENSING_STACK_KB, "sensing\0", move || {
        let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();

        executor
            .spawn(acquisition::sensor_task(shared, ports.ambient, cfg.sensor_period()))
            .detach();
        executor
            .spawn(acquisition::input_task(shared, ports.pot, cfg.input_period()))
            .detach();
        executor
            .spawn(mode::mode_task(
                shared,
                ports.button,
                ports.clock,
                events.clone(),
                ModeTiming {
                    poll: cfg.mode_poll(),
                    debounce_ms: cfg.debounce_ms,
                    cooldown: cfg.mode_cooldown(),
                },
            ))
            .detach();
        executor
            .spawn(display::display_task(
                shared,
                ports.display,
                events,
                cfg.display_period(),
                cfg.telemetry_every_frames(),
            ))
            .detach();

        info!("sensing tasks started");
        futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
    })
}

/// Spawn the controller and the status indicator on the application core.
///
/// The indicator shows the mode colour before the first control cycle.
pub fn spawn_control<I, E>(
    shared: &'static SharedState,
    cfg: &SystemConfig,
    indicator: I,
    events: E,
) -> Result<JoinHandle<()>>
where
    I: IndicatorPort + Send + 'static,
    E: EventSink + Send + 'static,
{
    let cfg = cfg.clone();
    spawn_on_core(Core::App, CONTROL_PRIORITY, CONTROL_STACK_KB, "control\0", move || {
        let indicator = RefCell::new(indicator);
        status::refresh_status(shared, &mut *indicator.borrow_mut());

        let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
        executor
            .spawn(control::control_task(
                shared,
                &indicator,
                events,
                cfg.control_period(),
                cfg.receive_budget(),
            ))
            .detach();
        executor
            .spawn(status::status_task(shared, &indicator, cfg.status_period()))
            .detach();

        info!("control tasks started");
        futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
    })
}

/// Spawn the software PWM generator on the application core.
///
/// The generator never blocks, so IDLE1 is starved for as long as the lamp
/// runs.  `sdkconfig.defaults` removes IDLE1 from the task watchdog;
/// without that the watchdog reports IDLE1 every timeout.
pub fn spawn_pwm<P, D>(
    shared: &'static SharedState,
    cfg: &SystemConfig,
    pin: P,
    delay: D,
) -> Result<JoinHandle<()>>
where
    P: OutputPin + Send + 'static,
    D: DelayNs + Send + 'static,
{
    let step_us = cfg.pwm_step_us;
    spawn_on_core(Core::App, PWM_PRIORITY, PWM_STACK_KB, "pwm\0", move || {
        let mut pwm = SoftPwm::new(pin, delay, step_us);
        info!("pwm started ({} us/step)", step_us);
        let Err(e) = pwm.run(&shared.brightness);
        error!("pwm: output pin failed: {:?}", e);
    })
}
