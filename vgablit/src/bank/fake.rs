//! Fake `BankedMemory` implementation for tests.

use alloc::vec;
use alloc::vec::Vec;

/// An implementation of [`BankedMemory`](super::BankedMemory) which just
/// reads and writes a buffer in local RAM, but only through bank windows
/// the way real banked video memory would.
///
/// Accessing an offset outside the window, or touching memory through a
/// window that was never selected, panics, so tests catch any code path
/// that forgets to select a bank first.
pub struct FakeBankedMemory {
    mem: Vec<u8>,
    bank_size: usize,
    separate: bool,

    read_bank: Option<usize>,
    write_bank: Option<usize>,

    switches: usize,
}

impl FakeBankedMemory {
    /// Creates zero-filled memory of `total` bytes seen through windows of
    /// `bank_size` bytes. With `separate` unset there is one shared window
    /// for both reading and writing.
    pub fn new(total: usize, bank_size: usize, separate: bool) -> Self {
        assert!(bank_size > 0, "bank size must be nonzero");
        Self {
            mem: vec![0; total],
            bank_size: bank_size,
            separate: separate,
            read_bank: None,
            write_bank: None,
            switches: 0,
        }
    }

    /// The whole backing store, bypassing the bank windows.
    pub fn raw(&self) -> &[u8] {
        &self.mem
    }

    /// How many times a select call actually moved a window.
    pub fn bank_switches(&self) -> usize {
        self.switches
    }

    fn abs(&self, bank: Option<usize>, offset: usize) -> usize {
        let bank = match bank {
            Some(bank) => bank,
            None => panic!("banked memory accessed before selecting a bank"),
        };
        assert!(
            offset < self.bank_size,
            "offset {:#x} outside {:#x}-byte bank window",
            offset,
            self.bank_size
        );
        bank * self.bank_size + offset
    }
}

impl super::BankedMemory for FakeBankedMemory {
    fn bank_size(&self) -> usize {
        self.bank_size
    }

    fn total_size(&self) -> usize {
        self.mem.len()
    }

    fn separate_windows(&self) -> bool {
        self.separate
    }

    fn select_read_bank(&mut self, bank: usize) {
        if self.read_bank != Some(bank) {
            self.switches += 1;
        }
        self.read_bank = Some(bank);
        if !self.separate {
            self.write_bank = Some(bank);
        }
    }

    fn select_write_bank(&mut self, bank: usize) {
        if self.write_bank != Some(bank) {
            self.switches += 1;
        }
        self.write_bank = Some(bank);
        if !self.separate {
            self.read_bank = Some(bank);
        }
    }

    fn peek8(&self, offset: usize) -> u8 {
        let addr = self.abs(self.read_bank, offset);
        self.mem[addr]
    }

    fn poke8(&mut self, offset: usize, v: u8) {
        let addr = self.abs(self.write_bank, offset);
        self.mem[addr] = v;
    }
}
