#![no_std]
#![no_main]

use defmt::{error, info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_rp::pwm::PwmOutput;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Ticker};
use glider_onboard::config::PWM_FREQUENCY_HZ;
use glider_onboard::{
    init_actuators, start_access_point, BindPolicy, OnboardState, Receiver, SharedOnboard,
    UdpInputSource, WatchdogConfig, WatchdogEvent, WifiPeripherals, BIND_POLICY,
    DEFAULT_WATCHDOG, LINK_PORT,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

type Onboard = SharedOnboard<CriticalSectionRawMutex, PwmOutput<'static>>;

/// PWM outputs and watchdog, shared by the receive and watchdog tasks.
static ONBOARD: StaticCell<Onboard> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Glider onboard receiver starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- PWM Setup ---
    let actuators = unwrap!(init_actuators(
        p.PWM_SLICE0,
        p.PWM_SLICE1,
        p.PIN_0,
        p.PIN_1,
        p.PIN_2,
        p.PIN_3,
        PWM_FREQUENCY_HZ,
    ));
    let onboard: &'static Onboard = ONBOARD.init(SharedOnboard::new(OnboardState::new(
        actuators,
        &DEFAULT_WATCHDOG,
    )));

    // Guard the motor before any command can arrive
    spawner.spawn(unwrap!(watchdog_task(onboard, DEFAULT_WATCHDOG)));

    // --- Wireless Setup ---
    let (stack, _control) = start_access_point(
        spawner,
        WifiPeripherals {
            pwr: p.PIN_23,
            dio: p.PIN_24,
            cs: p.PIN_25,
            clk: p.PIN_29,
            pio: p.PIO0,
            dma: p.DMA_CH0,
        },
    )
    .await;

    spawner.spawn(unwrap!(receive_task(stack, onboard)));

    info!("Glider onboard receiver initialized, waiting for commands...");

    // The access point stays up only while its control handle lives
    core::future::pending::<()>().await;
}

/// Receive task - applies every valid command datagram to the outputs.
#[embassy_executor::task]
async fn receive_task(stack: Stack<'static>, onboard: &'static Onboard) {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 256];
    let mut tx_meta = [PacketMetadata::EMPTY; 1];
    let mut tx_buffer = [0u8; 16];
    let socket = UdpSocket::new(stack, &mut rx_meta, &mut rx_buffer, &mut tx_meta, &mut tx_buffer);

    let source = match UdpInputSource::bind(socket, LINK_PORT) {
        Ok(source) => source,
        Err(e) => match BIND_POLICY {
            BindPolicy::Fatal => defmt::panic!("Failed to bind UDP port {}: {:?}", LINK_PORT, e),
            BindPolicy::Degrade => {
                error!(
                    "Failed to bind UDP port {}: {:?}, running without a listener",
                    LINK_PORT, e
                );
                return;
            }
        },
    };

    info!("Listening for commands on UDP port {}", LINK_PORT);
    Receiver::new(source, onboard).run().await
}

/// Watchdog task - cuts the motor when commands stop arriving.
#[embassy_executor::task]
async fn watchdog_task(onboard: &'static Onboard, config: WatchdogConfig) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms));
    loop {
        ticker.next().await;
        if onboard.watchdog_tick() == WatchdogEvent::Tripped {
            info!("Motor held at zero until commands resume");
        }
    }
}
