//! Wireless access point and network stack.
//!
//! The aircraft hosts its own WPA2 network so the ground station can join it
//! directly:
//!
//! ```text
//! 1. Load CYW43439 firmware and bring up the PIO SPI bus
//! 2. Spawn the CYW43 driver task
//! 3. Start the access point
//! 4. Create the embassy-net stack with a static address
//! 5. Spawn the network stack and DHCP server tasks
//! ```
//!
//! # Firmware blobs
//!
//! The CYW43439 firmware, CLM and NVRAM blobs are included from the
//! `cyw43-firmware/` directory at the repository root. They are distributed
//! with the `embassy-rs/embassy` repository under the same path.

use core::net::Ipv4Addr;

use cyw43::aligned_bytes;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::{info, unwrap, warn};
use edge_dhcp::server::{Server as DhcpServer, ServerOptions as DhcpServerOptions};
use edge_dhcp::{Options as DhcpOptions, Packet as DhcpPacket};
use embassy_executor::Spawner;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::{bind_interrupts, Peri};
use static_cell::StaticCell;

/// Network name.
pub const AP_SSID: &str = "Flyer";
/// WPA2 passphrase.
pub const AP_PASSPHRASE: &str = "groundisthelimit";
/// 2.4 GHz channel.
pub const AP_CHANNEL: u8 = 5;

/// Address of the aircraft on its own network.
pub const AP_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
pub const AP_PREFIX_LEN: u8 = 24;

/// DHCP lease pool.
pub const DHCP_RANGE_START: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 50);
pub const DHCP_RANGE_END: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 200);

/// Sockets: the command receiver and the DHCP server, plus headroom.
const SOCKET_COUNT: usize = 4;

bind_interrupts!(pub struct PioIrqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Pins and peripherals wired to the CYW43439 on the Pico W.
pub struct WifiPeripherals {
    pub pwr: Peri<'static, PIN_23>,
    pub dio: Peri<'static, PIN_24>,
    pub cs: Peri<'static, PIN_25>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
}

/// Bring up the access point and network stack.
///
/// The returned [`cyw43::Control`] must be kept alive for as long as the
/// access point should stay up.
pub async fn start_access_point(
    spawner: Spawner,
    wifi: WifiPeripherals,
) -> (Stack<'static>, cyw43::Control<'static>) {
    let fw = aligned_bytes!("../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");
    let nvram = aligned_bytes!("../../cyw43-firmware/nvram_rp2040.bin");

    let pwr = Output::new(wifi.pwr, Level::Low);
    let cs = Output::new(wifi.cs, Level::High);
    let mut pio = Pio::new(wifi.pio, PioIrqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        wifi.dio,
        wifi.clk,
        wifi.dma,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw, nvram).await;
    spawner.spawn(unwrap!(wifi_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::None)
        .await;

    info!("Starting access point '{}' on channel {}", AP_SSID, AP_CHANNEL);
    control
        .start_ap_wpa2(AP_SSID, AP_PASSPHRASE, AP_CHANNEL)
        .await;

    let net_config = embassy_net::Config::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(AP_ADDRESS, AP_PREFIX_LEN),
        gateway: None,
        dns_servers: Default::default(),
    });

    let mut rng = RoscRng;
    let seed = rng.next_u64();

    static RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        net_config,
        RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(unwrap!(net_task(runner)));
    spawner.spawn(unwrap!(dhcp_task(stack)));

    info!("Access point up at {}", defmt::Display2Format(&AP_ADDRESS));
    (stack, control)
}

/// Runs the CYW43439 driver.
#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, cyw43::SpiBus<Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>>,
) -> ! {
    runner.run().await
}

/// Runs the embassy-net network stack.
#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// DHCP server assigning addresses to ground stations joining the AP.
#[embassy_executor::task]
async fn dhcp_task(stack: Stack<'static>) {
    stack.wait_config_up().await;

    let mut rx_meta = [PacketMetadata::EMPTY; 2];
    let mut rx_buffer = [0u8; 600];
    let mut tx_meta = [PacketMetadata::EMPTY; 2];
    let mut tx_buffer = [0u8; 600];

    let mut socket = UdpSocket::new(stack, &mut rx_meta, &mut rx_buffer, &mut tx_meta, &mut tx_buffer);
    if let Err(e) = socket.bind(67) {
        warn!("DHCP server bind failed: {:?}", e);
        return;
    }

    let server_ip = Ipv4Addr::from(AP_ADDRESS.octets());
    let mut gw_buf = [Ipv4Addr::UNSPECIFIED; 1];
    let server_options = DhcpServerOptions::new(server_ip, Some(&mut gw_buf));

    let mut server = DhcpServer::<_, 8>::new_with_et(server_ip);
    server.range_start = DHCP_RANGE_START;
    server.range_end = DHCP_RANGE_END;

    info!("DHCP server running on port 67");

    let mut buf = [0u8; 600];
    loop {
        let Ok((len, _meta)) = socket.recv_from(&mut buf).await else {
            continue;
        };

        let request = match DhcpPacket::decode(&buf[..len]) {
            Ok(pkt) => pkt,
            Err(e) => {
                warn!("DHCP decode error: {}", defmt::Debug2Format(&e));
                continue;
            }
        };

        let mut opt_buf = DhcpOptions::buf();
        if let Some(reply) = server.handle_request(&mut opt_buf, &server_options, &request) {
            match reply.encode(&mut buf) {
                Ok(encoded) => {
                    // Replies go to broadcast, the client has no address yet
                    let dest = (Ipv4Address::new(255, 255, 255, 255), 68);
                    if let Err(e) = socket.send_to(encoded, dest).await {
                        warn!("DHCP send error: {:?}", e);
                    }
                }
                Err(e) => warn!("DHCP encode error: {}", defmt::Debug2Format(&e)),
            }
        }
    }
}
