//! Flash Bridge Main Application
//!
//! Entry point for the RP2040-based USB flash bridge firmware.
//! Brings up the UART toward the radio module, puts the bridge core
//! behind a shared mutex, and spawns the USB, tick, and relay tasks.

#![no_std]
#![no_main]

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_futures::select::select;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{UART0, USB};
use embassy_rp::uart::{self, BufferedInterruptHandler, BufferedUart, BufferedUartRx, BufferedUartTx};
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::{bind_interrupts, pac};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Ticker;
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, UsbDevice};
use embedded_io_async::{Read, Write};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use flash_bridge_firmware::bridge::dispatch::{Bridge, SharedBridge};
use flash_bridge_firmware::fault;
use flash_bridge_firmware::hal::gpio::{ConnectionLed, HandshakePin};
use flash_bridge_firmware::hal::uart::BridgeUart;
use flash_bridge_firmware::prelude::*;
use flash_bridge_firmware::usb::cdc::BridgeControl;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

type BoardSharedBridge = SharedBridge<BridgeUart, HandshakePin<'static>, ConnectionLed<'static>>;
type BoardControl = BridgeControl<'static, BridgeUart, HandshakePin<'static>, ConnectionLed<'static>>;

static BRIDGE: StaticCell<BoardSharedBridge> = StaticCell::new();
static CONTROL: StaticCell<BoardControl> = StaticCell::new();
static USB_STATE: StaticCell<State<'static>> = StaticCell::new();
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; USB_CONTROL_BUF_SIZE]> = StaticCell::new();
static UART_TX_BUF: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Flash bridge firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_rp::init(Default::default());

    // UART0 toward the module: 115200 8-N-1 until the host says otherwise
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = DEFAULT_BAUD_RATE;
    let uart = BufferedUart::new_with_rtscts(
        p.UART0,
        Irqs,
        p.PIN_0,
        p.PIN_1,
        p.PIN_3,
        p.PIN_2,
        UART_TX_BUF.init([0; UART_BUFFER_SIZE]),
        UART_RX_BUF.init([0; UART_BUFFER_SIZE]),
        uart_config,
    );

    // Control plane over the same peripheral, plus the two GPIO outputs
    let uart_port = BridgeUart::new(pac::UART0);
    let handshake = HandshakePin::new(Output::new(p.PIN_6, Level::High));
    let led = ConnectionLed::new(Output::new(p.PIN_25, Level::Low));

    let bridge: &'static BoardSharedBridge =
        BRIDGE.init(Mutex::new(RefCell::new(Bridge::new(uart_port, handshake, led))));

    info!("Bridge initialized, wake line released");

    // USB device: CDC ACM for enumeration and data, BridgeControl for the
    // control channel
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = embassy_usb::Config::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("Flash Bridge Project");
    usb_config.product = Some("CC31xx flash bridge");
    usb_config.serial_number = Some("0001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; USB_CONTROL_BUF_SIZE]),
    );

    builder.handler(CONTROL.init(BridgeControl::new(bridge)));
    let class = CdcAcmClass::new(&mut builder, USB_STATE.init(State::new()), USB_CDC_PACKET_SIZE);
    let usb = builder.build();

    // Spawn background tasks
    spawner.spawn(usb_task(usb)).unwrap();
    spawner.spawn(tick_task(bridge)).unwrap();
    spawner.spawn(relay_task(class, uart)).unwrap();

    info!("Tasks spawned, bridge ready");

    // Main loop - additional coordination can happen here
    loop {
        Timer::after(Duration::from_secs(10)).await;
        trace!("pending tx: {}", bridge.lock(|b| b.borrow().pending_tx()));
    }
}

/// USB device task - runs enumeration and transfer handling
#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, Driver<'static, USB>>) -> ! {
    usb.run().await
}

/// Millisecond tick task - drives the wake pulse countdown
#[embassy_executor::task]
async fn tick_task(bridge: &'static BoardSharedBridge) {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        ticker.next().await;
        bridge.lock(|b| b.borrow_mut().tick());
    }
}

/// Bulk data relay task - shuttles bytes between the CDC endpoints and the
/// module UART
#[embassy_executor::task]
async fn relay_task(
    class: CdcAcmClass<'static, Driver<'static, USB>>,
    uart: BufferedUart<'static, UART0>,
) {
    let (mut uart_rx, mut uart_tx) = uart.split();
    let (mut sender, mut receiver) = class.split();

    loop {
        receiver.wait_connection().await;
        debug!("data path up");
        let _ = select(
            host_to_module(&mut receiver, &mut uart_tx),
            module_to_host(&mut uart_rx, &mut sender),
        )
        .await;
        debug!("data path down");
    }
}

/// The host dropped the data connection
struct Disconnected;

impl From<EndpointError> for Disconnected {
    fn from(err: EndpointError) -> Self {
        match err {
            EndpointError::BufferOverflow => fault::halt("CDC packet larger than buffer"),
            EndpointError::Disabled => Self,
        }
    }
}

async fn host_to_module(
    receiver: &mut Receiver<'static, Driver<'static, USB>>,
    uart_tx: &mut BufferedUartTx<'static, UART0>,
) -> Result<(), Disconnected> {
    let mut buf = [0; USB_CDC_PACKET_SIZE as usize];
    loop {
        let n = receiver.read_packet(&mut buf).await?;
        if uart_tx.write_all(&buf[..n]).await.is_err() {
            warn!("UART TX error");
        }
    }
}

async fn module_to_host(
    uart_rx: &mut BufferedUartRx<'static, UART0>,
    sender: &mut Sender<'static, Driver<'static, USB>>,
) -> Result<(), Disconnected> {
    let mut buf = [0; USB_CDC_PACKET_SIZE as usize];
    loop {
        match uart_rx.read(&mut buf).await {
            Ok(0) => {}
            Ok(n) => sender.write_packet(&buf[..n]).await?,
            Err(_) => warn!("UART RX error"),
        }
    }
}
