use embedded_hal::serial;

use crate::config::BYTE_RING_SIZE;
use crate::utils::Ring;

/// Interrupt-driven USART1 byte buffers.
///
/// The USART1 interrupt handler feeds received bytes in with
/// [`on_receive`](Self::on_receive) and drains the transmit side with
/// [`on_transmit_ready`](Self::on_transmit_ready). Mainline code uses the
/// non-blocking `embedded_hal::serial` traits. Sharing between the two is the
/// board layer's job (a critical-section mutex around this struct).
pub struct BufferedUart {
    rx: Ring<u8, BYTE_RING_SIZE>,
    tx: Ring<u8, BYTE_RING_SIZE>,
    tx_interrupt: bool,
    rx_dropped: u32,
}

impl BufferedUart {
    pub const fn new() -> Self {
        Self {
            rx: Ring::new(),
            tx: Ring::new(),
            tx_interrupt: false,
            rx_dropped: 0,
        }
    }

    /// RXNE handler. Bytes arriving while the receive ring is full are
    /// dropped and counted.
    pub fn on_receive(&mut self, byte: u8) {
        if self.rx.push(byte).is_err() {
            self.rx_dropped = self.rx_dropped.saturating_add(1);
        }
    }

    /// TXE handler. Returns the next byte for the data register, or `None`
    /// once the ring is empty, at which point the TXE interrupt should be
    /// masked.
    pub fn on_transmit_ready(&mut self) -> Option<u8> {
        let byte = self.tx.pop();
        if byte.is_none() {
            self.tx_interrupt = false;
        }
        byte
    }

    /// Whether the TXE interrupt should currently be unmasked.
    pub fn tx_interrupt_enabled(&self) -> bool {
        self.tx_interrupt
    }

    pub fn try_read(&mut self) -> Option<u8> {
        self.rx.pop()
    }

    /// Queues `byte` for transmission. Always requests the TXE interrupt so
    /// a backed-up ring keeps draining.
    pub fn try_write(&mut self, byte: u8) -> bool {
        self.tx_interrupt = true;
        self.tx.push(byte).is_ok()
    }

    pub fn data_available(&self) -> bool {
        !self.rx.is_empty()
    }

    pub fn rx_dropped(&self) -> u32 {
        self.rx_dropped
    }
}

impl Default for BufferedUart {
    fn default() -> Self {
        Self::new()
    }
}

impl serial::Read<u8> for BufferedUart {
    type Error = core::convert::Infallible;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.try_read().ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for BufferedUart {
    type Error = core::convert::Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if self.try_write(word) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.tx.is_empty() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

/// USART1 BRR value for `baud` at `pclk_hz` (16x oversampling).
pub const fn brr_for(pclk_hz: u32, baud: u32) -> u32 {
    // Rounded fixed-point divider: mantissa in [15:4], fraction in [3:0].
    (pclk_hz + baud / 2) / baud
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::serial::{Read, Write};

    #[test]
    fn received_bytes_come_out_in_order() {
        let mut uart = BufferedUart::new();
        uart.on_receive(b'h');
        uart.on_receive(b'i');
        assert!(uart.data_available());
        assert_eq!(uart.read(), Ok(b'h'));
        assert_eq!(uart.read(), Ok(b'i'));
        assert_eq!(uart.read(), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn transmit_drains_and_masks_interrupt() {
        let mut uart = BufferedUart::new();
        uart.write(b'o').unwrap();
        uart.write(b'k').unwrap();
        assert!(uart.tx_interrupt_enabled());
        assert_eq!(uart.flush(), Err(nb::Error::WouldBlock));
        assert_eq!(uart.on_transmit_ready(), Some(b'o'));
        assert_eq!(uart.on_transmit_ready(), Some(b'k'));
        assert_eq!(uart.on_transmit_ready(), None);
        assert!(!uart.tx_interrupt_enabled());
        assert_eq!(uart.flush(), Ok(()));
    }

    #[test]
    fn overflowing_rx_counts_drops() {
        let mut uart = BufferedUart::new();
        for i in 0..(BYTE_RING_SIZE + 3) {
            uart.on_receive(i as u8);
        }
        assert_eq!(uart.rx_dropped(), 3);
        assert_eq!(uart.try_read(), Some(0));
    }

    #[test]
    fn full_tx_blocks() {
        let mut uart = BufferedUart::new();
        for _ in 0..BYTE_RING_SIZE {
            assert!(uart.try_write(b'x'));
        }
        assert_eq!(uart.write(b'y'), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn baud_divider() {
        // 8MHz / 115200 = 69.44 -> 0x45
        assert_eq!(brr_for(8_000_000, 115_200), 0x45);
    }
}
