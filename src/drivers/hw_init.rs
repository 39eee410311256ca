//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, GPIO directions and the emergency-stop
//! interrupt using raw ESP-IDF sys calls.  Called once from `main()`
//! before any task is spawned.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR install failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;
use crate::safety::EmergencyLatch;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before any task exists; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut ADC2_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: The handles are written once in `init_adc()` before any task
/// exists.  Afterwards ADC1 is read only by the input task and ADC2 only by
/// the sensor task; both run on the same core's executor.
#[cfg(target_os = "espidf")]
unsafe fn adc_handle(unit: u32) -> adc_oneshot_unit_handle_t {
    unsafe { if unit == 2 { ADC2_HANDLE } else { ADC1_HANDLE } }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    let unit1 = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&unit1, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let unit2 = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_2,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC2_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&unit2, &raw mut ADC2_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let ret = unsafe {
        adc_oneshot_config_channel(adc_handle(pins::POT_ADC_UNIT), pins::POT_ADC_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let ret = unsafe {
        adc_oneshot_config_channel(adc_handle(pins::LDR_ADC_UNIT), pins::LDR_ADC_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC configured (ADC1 CH1=pot, ADC2 CH1=LDR)");
    Ok(())
}

/// Read a 12-bit sample.  A failed conversion reads as 0.
#[cfg(target_os = "espidf")]
pub fn adc_read(unit: u32, channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc_handle() contract; handle initialised, one reader per unit.
    let ret = unsafe { adc_oneshot_read(adc_handle(unit), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, 4095) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc_read(_unit: u32, _channel: u32) -> u16 {
    0
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // LDR comparator: push-pull output on the module, no pull.
    let ldr_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::LDR_DO_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&ldr_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    // Mode button: polled, active-low.
    let mode_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::MODE_BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&mode_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    // Emergency stop: active-low, falling-edge interrupt.
    let emg_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::EMERGENCY_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let ret = unsafe { gpio_config(&emg_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulation: inputs idle HIGH (pulled up).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::LED_PWM_GPIO,
        pins::STATUS_R_GPIO,
        pins::STATUS_G_GPIO,
        pins::STATUS_B_GPIO,
        pins::BUZZER_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (all LOW)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level is a single register write on an
    // already-configured output pin; each pin has one owning task.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// `esp_err_t` success code.
#[cfg(any(target_os = "espidf", test))]
const ESP_OK_CODE: i32 = 0;

/// Map an `esp_err_t` return to `Ok` or to `err(code)`.
#[cfg(any(target_os = "espidf", test))]
fn check(ret: i32, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    if ret == ESP_OK_CODE { Ok(()) } else { Err(err(ret)) }
}

// ── Emergency-stop ISR ────────────────────────────────────────

/// `arg` is the `&'static EmergencyLatch` registered in `init_isr_service`.
/// Only trips the latch; nothing else runs in interrupt context.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn emergency_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: arg was created from a &'static EmergencyLatch and is never freed.
    let latch = unsafe { &*(arg as *const EmergencyLatch) };
    latch.trip();
}

/// Install the per-pin GPIO ISR service and bind the emergency input.
/// Call after `init_peripherals()` and before any task is spawned.
#[cfg(target_os = "espidf")]
pub fn init_isr_service(latch: &'static EmergencyLatch) -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The handler argument
    // points at a 'static latch, valid for the program lifetime.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        check(
            gpio_set_intr_type(pins::EMERGENCY_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE),
            HwInitError::IsrInstallFailed,
        )?;
        check(
            gpio_isr_handler_add(
                pins::EMERGENCY_GPIO,
                Some(emergency_gpio_isr),
                core::ptr::from_ref(latch).cast_mut().cast(),
            ),
            HwInitError::IsrInstallFailed,
        )?;
        check(gpio_intr_enable(pins::EMERGENCY_GPIO), HwInitError::IsrInstallFailed)?;
    }
    info!("hw_init: emergency ISR armed on GPIO{}", pins::EMERGENCY_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service(_latch: &'static EmergencyLatch) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped, trip the latch directly");
    Ok(())
}
