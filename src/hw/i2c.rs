// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bridge from an `embedded-hal` 0.2 blocking I2C bus to the 1.0 [`I2c`] trait.
//!
//! stm32f7xx-hal implements the 0.2 `blocking::i2c` traits, while the LCD driver is written
//! against 1.0. Each operation of a transaction becomes its own bus transfer, with a STOP in
//! between. The display backpack only ever sees single writes, so nothing depends on repeated
//! starts.

use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Read, Write};
use embedded_hal_1::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

/// Error from the wrapped bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError<E>(pub E);

impl<E: Debug> i2c::Error for BusError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct I2cCompat<I> {
    bus: I,
}

impl<I> I2cCompat<I> {
    pub fn new(bus: I) -> Self {
        Self { bus }
    }

    pub fn free(self) -> I {
        self.bus
    }
}

impl<I, E> ErrorType for I2cCompat<I>
where
    I: Write<Error = E> + Read<Error = E>,
    E: Debug,
{
    type Error = BusError<E>;
}

impl<I, E> I2c<SevenBitAddress> for I2cCompat<I>
where
    I: Write<Error = E> + Read<Error = E>,
    E: Debug,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => self.bus.write(address, bytes).map_err(BusError)?,
                Operation::Read(buf) => self.bus.read(address, buf).map_err(BusError)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Xfer {
        Write(u8, Vec<u8>),
        Read(u8, usize),
    }

    #[derive(Default)]
    struct Bus {
        log: Vec<Xfer>,
        nack_at: Option<usize>,
    }

    impl Bus {
        fn record(&mut self, xfer: Xfer) -> Result<(), &'static str> {
            if self.nack_at == Some(self.log.len()) {
                return Err("nack");
            }
            self.log.push(xfer);
            Ok(())
        }
    }

    impl Write for Bus {
        type Error = &'static str;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
            self.record(Xfer::Write(address, bytes.to_vec()))
        }
    }

    impl Read for Bus {
        type Error = &'static str;

        fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
            buffer.fill(0xA5);
            self.record(Xfer::Read(address, buffer.len()))
        }
    }

    #[test]
    fn operations_map_to_transfers_in_order() {
        let mut i2c = I2cCompat::new(Bus::default());
        let mut buf = [0u8; 2];
        i2c.transaction(
            0x27,
            &mut [Operation::Write(&[0x08, 0x0C]), Operation::Read(&mut buf)],
        )
        .unwrap();

        assert_eq!(buf, [0xA5, 0xA5]);
        assert_eq!(
            i2c.free().log,
            vec![Xfer::Write(0x27, vec![0x08, 0x0C]), Xfer::Read(0x27, 2)]
        );
    }

    #[test]
    fn bus_error_stops_the_transaction() {
        let mut i2c = I2cCompat::new(Bus {
            nack_at: Some(1),
            ..Bus::default()
        });

        let mut ops = [
            Operation::Write(&[1]),
            Operation::Write(&[2]),
            Operation::Write(&[3]),
        ];
        let err = i2c.transaction(0x27, &mut ops).unwrap_err();

        assert_eq!(err, BusError("nack"));
        assert_eq!(i2c::Error::kind(&err), ErrorKind::Other);
        assert_eq!(i2c.free().log, vec![Xfer::Write(0x27, vec![1])]);
    }

    #[test]
    fn default_write_goes_through_transaction() {
        let mut i2c = I2cCompat::new(Bus::default());
        i2c.write(0x27, &[0x01]).unwrap();
        assert_eq!(i2c.free().log, vec![Xfer::Write(0x27, vec![0x01])]);
    }
}
