#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use reveal_watch::{AlarmSlot, Generation, Millis, ScheduleError, Scheduler, TimerHandle};
use rp_pico::hal::fugit::ExtU32;
use rp_pico::hal::timer::{Alarm, Alarm1};

/// Reveal timers on hardware alarm 1. Arming again replaces the previous
/// countdown; a stale interrupt still pending at the NVIC is filtered by the slot.
pub struct AlarmScheduler {
    alarm: Alarm1,
    slot: AlarmSlot,
}

impl AlarmScheduler {
    pub fn new(mut alarm: Alarm1) -> Self {
        alarm.enable_interrupt();
        Self {
            alarm,
            slot: AlarmSlot::new(),
        }
    }

    /// Acknowledges the alarm interrupt. Returns the generation it was armed
    /// for, or `None` if the current countdown has not actually run out.
    pub fn acknowledge(&mut self) -> Option<Generation> {
        self.alarm.clear_interrupt();
        self.slot.acknowledge(self.alarm.finished())
    }
}

impl Scheduler for AlarmScheduler {
    fn schedule(&mut self, after: Millis, generation: Generation) -> Result<TimerHandle, ScheduleError> {
        self.alarm.clear_interrupt();
        let micros = after.to_millis().saturating_mul(1_000);
        self.alarm
            .schedule(micros.micros())
            .map_err(|_| ScheduleError::Alarm)?;
        Ok(self.slot.arm(generation))
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use super::AlarmScheduler;
    use max7219::MAX7219;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use reveal_watch::display::DEVICES;
    use reveal_watch::{
        Formatter, MatrixPanel, RandomDelay, StepCounter, TickOrchestrator, WallClock, WatchConfig,
    };
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        gpio::{bank0::Gpio15, FunctionSio, Pin, PullUp, SioInput},
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
        fugit::{RateExtU32, ExtU32},
    };
    use embedded_hal::digital::v2::ToggleableOutputPin;

    // Type definition for the MAX7219 display
    type Spi0 = Spi<rp_pico::hal::spi::Enabled, rp_pico::hal::pac::SPI0, (
        Pin<rp_pico::hal::gpio::bank0::Gpio19, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio16, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio18, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>
    )>;
    type CsPin = Pin<
        rp_pico::hal::gpio::bank0::Gpio17,
        rp_pico::hal::gpio::FunctionSio<rp_pico::hal::gpio::SioOutput>,
        rp_pico::hal::gpio::PullDown,
    >;
    type DisplayType = MAX7219<max7219::connectors::SpiConnectorSW<Spi0, CsPin>>;
    type LedPin = Pin<
        rp_pico::hal::gpio::bank0::Gpio25,
        rp_pico::hal::gpio::FunctionSio<rp_pico::hal::gpio::SioOutput>,
        rp_pico::hal::gpio::PullDown,
    >;
    type Face = TickOrchestrator<RandomDelay<SmallRng>>;

    #[shared]
    struct Shared {
        clock: WallClock,
        face: Face,
        panel: MatrixPanel,
        reveal: AlarmScheduler,
        steps: StepCounter,
    }

    #[local]
    struct Local {
        display: DisplayType,
        led: LedPin,
        alarm: Alarm0,
        button: Pin<Gpio15, FunctionSio<SioInput>, PullUp>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let config = WatchConfig::DEFAULT;
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        // Schedule first tick in 1 second
        alarm.schedule(1_000_000u32.micros()).unwrap();
        alarm.enable_interrupt();

        let mut reveal = AlarmScheduler::new(timer.alarm_1().unwrap());

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();
        let button = pins.gpio15.into_pull_up_input();
        // Each falling edge on the button counts as one step
        button.set_interrupt_enabled(rp_pico::hal::gpio::Interrupt::EdgeLow, true);

        let mosi = pins.gpio19.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let sck = pins.gpio18.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let miso = pins.gpio16.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut display = MAX7219::from_spi_cs(DEVICES, spi, cs).unwrap();
        display.power_on().unwrap();
        for i in 0..DEVICES {
            display.set_intensity(i, 0x0).unwrap();
            display.clear_display(i).unwrap();
        }

        let rng = SmallRng::seed_from_u64(timer.get_counter().ticks());
        let mut face = TickOrchestrator::new(
            Formatter::new(config.hour_format),
            &config.timing,
            RandomDelay::new(rng, &config.timing),
        );
        let clock = WallClock::new(config.start);
        let mut steps = StepCounter::new();
        let mut panel = MatrixPanel::new();

        // Show the face straight away instead of waiting for the first minute boundary
        let now = clock.now();
        defmt::info!("boot at {}", now);
        steps.sync_day(&now);
        face.on_tick(&now, &steps, &mut panel, &mut reveal);
        flush_display::spawn().ok();

        (
            Shared {
                clock,
                face,
                panel,
                reveal,
                steps,
            },
            Local {
                display,
                led,
                alarm,
                button,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock, face, panel, reveal, steps], local = [alarm, led])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        // Clear interrupt and schedule next
        ctx.local.alarm.clear_interrupt();
        if ctx.local.alarm.schedule(1_000_000u32.micros()).is_err() {
            defmt::error!("1 Hz alarm could not be re-armed");
        }

        ctx.local.led.toggle().ok();

        let Some(now) = ctx.shared.clock.lock(|c| c.tick().then(|| c.now())) else {
            return;
        };

        (ctx.shared.face, ctx.shared.panel, ctx.shared.reveal, ctx.shared.steps).lock(|face, panel, reveal, steps| {
            steps.sync_day(&now);
            face.on_tick(&now, &*steps, panel, reveal);
            defmt::info!("{=str} | {=str}", panel.date(), panel.steps());
        });

        flush_display::spawn().ok();
    }

    // Hardware Task: Timer Interrupt (reveal step)
    #[task(binds = TIMER_IRQ_1, priority = 1, shared = [face, panel, reveal])]
    fn reveal_step(ctx: reveal_step::Context) {
        (ctx.shared.face, ctx.shared.panel, ctx.shared.reveal).lock(|face, panel, reveal| {
            let Some(fired) = reveal.acknowledge() else {
                return;
            };
            let outcome = face.on_timer_fired(fired, panel, reveal);
            defmt::trace!("reveal step {}", outcome);
        });

        flush_display::spawn().ok();
    }

    // Hardware Task: GPIO Interrupt (Button Press)
    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [steps], local = [button])]
    fn button_press(mut ctx: button_press::Context) {
        ctx.local.button.clear_interrupt(rp_pico::hal::gpio::Interrupt::EdgeLow);
        ctx.shared.steps.lock(|s| s.record_step());
    }

    // Software Task: push the frame to the matrix when it changed
    #[task(shared = [panel], local = [display])]
    fn flush_display(mut ctx: flush_display::Context) {
        let Some(buffers) = ctx.shared.panel.lock(|p| p.take_dirty().then(|| p.device_buffers())) else {
            return;
        };

        let display = ctx.local.display;
        for (dev_idx, buffer) in buffers.iter().enumerate() {
            if display.write_raw(dev_idx, buffer).is_err() {
                defmt::warn!("matrix write failed on device {}", dev_idx);
            }
        }
    }
}
