//! Control loop: one [`Controller::cycle`] per control period.

use core::cell::RefCell;
use core::time::Duration;

use crate::app::controller::Controller;
use crate::app::ports::{EventSink, IndicatorPort};
use crate::shared::SharedState;

/// The period sleep follows every cycle, latched or not.
pub async fn control_task<I, E>(
    shared: &SharedState,
    indicator: &RefCell<I>,
    mut events: E,
    period: Duration,
    receive_budget: Duration,
) where
    I: IndicatorPort,
    E: EventSink,
{
    let mut controller = Controller::new(receive_budget);
    loop {
        controller.cycle(shared, indicator, &mut events).await;
        async_io_mini::Timer::after(period).await;
    }
}
