#![no_std]
#![no_main]

use board::ShieldBoard;
use defmt::{info, trace};
use display::Oled;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::khz;
use engine::entropy::generate_seed;
use engine::{EventFlags, Flag, Menu, Prng};
use rand::SeedableRng;

use {defmt_rtt as _, panic_probe as _};

static FLAGS: EventFlags = EventFlags::new();

/// Raises `flag` on every falling edge of `button`. Never touches anything
/// else.
#[embassy_executor::task(pool_size = 5)]
async fn flag_source(mut button: ExtiInput<'static>, flag: &'static Flag, name: &'static str) {
    loop {
        button.wait_for_falling_edge().await;
        trace!("{} pressed", name);
        flag.raise();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_stm32::init(Default::default());

    let buttons = [
        (ExtiInput::new(p.PA0, p.EXTI0, Pull::Up), &FLAGS.sw1, "sw1"),
        (ExtiInput::new(p.PA1, p.EXTI1, Pull::Up), &FLAGS.sw2, "sw2"),
        (ExtiInput::new(p.PA2, p.EXTI2, Pull::Up), &FLAGS.sw3, "sw3"),
        (ExtiInput::new(p.PA3, p.EXTI3, Pull::Up), &FLAGS.sw4, "sw4"),
        (ExtiInput::new(p.PA4, p.EXTI4, Pull::Up), &FLAGS.exit, "exit"),
    ];
    for (button, flag, name) in buttons {
        spawner
            .spawn(flag_source(button, flag, name))
            .expect("flag source pool is sized for every button");
    }

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, khz(400), Default::default());

    let mut board = ShieldBoard {
        leds: [
            Output::new(p.PB0, Level::Low, Speed::Low),
            Output::new(p.PB1, Level::Low, Speed::Low),
            Output::new(p.PB2, Level::Low, Speed::Low),
            Output::new(p.PB12, Level::Low, Speed::Low),
            Output::new(p.PB13, Level::Low, Speed::Low),
            Output::new(p.PB14, Level::Low, Speed::Low),
            Output::new(p.PB15, Level::Low, Speed::Low),
            Output::new(p.PC13, Level::Low, Speed::Low),
        ],
        switches: [
            Input::new(p.PA8, Pull::Down),
            Input::new(p.PA9, Pull::Down),
            Input::new(p.PA10, Pull::Down),
            Input::new(p.PA15, Pull::Down),
            Input::new(p.PB3, Pull::Down),
            Input::new(p.PB4, Pull::Down),
            Input::new(p.PB5, Pull::Down),
            Input::new(p.PB8, Pull::Down),
        ],
        nav: [
            Input::new(p.PB9, Pull::Up),
            Input::new(p.PA11, Pull::Up),
            Input::new(p.PA12, Pull::Up),
            Input::new(p.PC14, Pull::Up),
        ],
        rotary_a: Input::new(p.PB10, Pull::Up),
        rotary_b: Input::new(p.PA5, Pull::Up),
        adc: Adc::new(p.ADC1),
        noise: p.PA7.degrade_adc(),
        pot: p.PA6.degrade_adc(),
        oled: Oled::new(i2c),
    };

    let seed = generate_seed(&mut board);
    info!("seed {=u32:#010x}", seed);

    Menu::new(board, &FLAGS, Prng::from_seed(seed.to_le_bytes())).run().await
}
