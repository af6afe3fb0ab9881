// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::peripheral::NVIC;
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    i2c::{BlockingI2c, Mode},
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use lcd1602_driver::{lcd, sender};
use stm32f7xx_hal as hal;

use cruise_rig::{
    config::{
        ControllerConfig, EDGE_DIVISOR, LCD_I2C_HZ, PWM_FREQ_HZ, STARTUP_BANNER, STARTUP_DELAY_MS,
        TICK_MS,
    },
    control::{ControlLoop, Rig},
    drivers::{lcd1602::LCD_ADDRESS, HBridge, Hcsr04, Lcd1602Panel, StatusDisplay},
    hw::{
        clock::{self, cycles},
        pins::BoardPins,
        Adc, I2cCompat, Led, MillisClock, PulseCounter, RotationEdge, Tim4Pwm, Usart,
    },
    log_debug, log_info, log_warn,
};

/// Rotation pulses, fed by `EXTI9_5`, drained by the control loop.
static PULSES: PulseCounter = PulseCounter::new(EDGE_DIVISOR);

/// 1 kHz tick, fed by SysTick.
static CLOCK: MillisClock = MillisClock::new();

/// EXTI line 7 handle, used to clear the pending flag in the `EXTI9_5` handler.
static ROTATION: Mutex<RefCell<Option<RotationEdge>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let mut apb1 = rcc.apb1;
    let clocks = rcc.cfgr.freeze();
    let sysclk_hz = clocks.sysclk().raw();

    clock::start_systick(cp.SYST, sysclk_hz);
    cycles::enable(&mut cp.DCB, &mut cp.DWT);

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    // Status LCD on I2C1
    let i2c = BlockingI2c::i2c1(
        dp.I2C1,
        (pins.i2c1.scl, pins.i2c1.sda),
        Mode::standard(LCD_I2C_HZ.Hz()),
        &clocks,
        &mut apb1,
        10_000,
    );
    let mut i2c = I2cCompat::new(i2c);
    let mut lcd_sender = sender::I2cSender::new(&mut i2c, LCD_ADDRESS);
    let mut lcd_delay = cycles::CycleDelay::new(sysclk_hz);
    let lcd = lcd::Lcd::new(
        &mut lcd_sender,
        &mut lcd_delay,
        lcd::Config::default(),
        LCD_I2C_HZ,
    );
    let mut display = StatusDisplay::new(Lcd1602Panel::new(lcd));

    // Status lamps
    let primary_lamp = Led::active_high(pins.leds.primary);
    let secondary_lamp = Led::active_high(pins.leds.secondary);

    // Buttons: the ADC only needs channel numbers. Holding the pins keeps them in analog mode.
    let _buttons = pins.buttons;
    let adc = Adc::adc1(dp.ADC1);

    // Motor
    // Held so PD12 stays on AF2 (TIM4_CH1); the timer drives it through registers.
    let _pwm_pin = pins.motor.pwm;
    let pwm = Tim4Pwm::tim4_ch1(dp.TIM4, clocks.timclk1().raw(), PWM_FREQ_HZ);
    let motor = HBridge::new(pins.motor.in1, pins.motor.in2, pwm);

    // Ranger
    let ranger = Hcsr04::new(
        pins.ranger.trig,
        pins.ranger.echo,
        cycles::now,
        sysclk_hz / 1_000_000,
    );

    // Rotation sensor
    // Held so PE7 stays a pulled-up input while EXTI7 watches it.
    let _rotation_pin = pins.rotation;
    let rotation = RotationEdge::pe7(dp.EXTI, dp.SYSCFG);
    critical_section::with(|cs| *ROTATION.borrow(cs).borrow_mut() = Some(rotation));
    unsafe { NVIC::unmask(pac::Interrupt::EXTI9_5) };

    // Banner
    usart.println(STARTUP_BANNER);
    display.banner(STARTUP_BANNER);
    log_info!("ACC System Start");
    clock::wait_until(&CLOCK, CLOCK.now_ms(), STARTUP_DELAY_MS);

    let mut ctl = match ControlLoop::new(ControllerConfig::default()) {
        Ok(ctl) => ctl,
        Err(_) => {
            log_warn!("refusing to start with an invalid configuration");
            loop {
                cortex_m::asm::wfi();
            }
        }
    };
    if PULSES.divisor() != ctl.config().edge_divisor {
        log_warn!(
            "edge divisor {} differs from configured {}",
            PULSES.divisor(),
            ctl.config().edge_divisor
        );
    }

    let mut rig = Rig {
        distance: ranger,
        inputs: adc,
        motor,
        primary_lamp,
        secondary_lamp,
        telemetry: (usart, display),
    };

    loop {
        let report = ctl.step(CLOCK.now_ms(), &mut rig, &PULSES);
        if !report.events.is_empty() {
            log_debug!("buttons {}", report.events.bits());
        }
        clock::wait_until(&CLOCK, CLOCK.now_ms(), TICK_MS);
    }
}

#[exception]
fn SysTick() {
    CLOCK.tick();
}

#[interrupt]
fn EXTI9_5() {
    critical_section::with(|cs| {
        if let Some(edge) = ROTATION.borrow(cs).borrow_mut().as_mut() {
            if edge.is_pending() {
                edge.clear_pending();
                PULSES.on_edge();
            }
        }
    });
}
