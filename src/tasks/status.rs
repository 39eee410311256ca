//! Status LED refresh.

use core::cell::RefCell;
use core::time::Duration;

use crate::app::ports::IndicatorPort;
use crate::app::status::colour_for;
use crate::shared::SharedState;

/// Show the mode colour.  Once the emergency latch is set the controller
/// owns the indicator and this is a no-op.  Returns `true` if it wrote.
pub fn refresh_status<I: IndicatorPort>(shared: &SharedState, indicator: &mut I) -> bool {
    if shared.emergency.is_tripped() {
        return false;
    }
    indicator.show_colour(colour_for(shared.mode.get()));
    true
}

pub async fn status_task<I: IndicatorPort>(
    shared: &SharedState,
    indicator: &RefCell<I>,
    period: Duration,
) {
    loop {
        refresh_status(shared, &mut *indicator.borrow_mut());
        async_io_mini::Timer::after(period).await;
    }
}
