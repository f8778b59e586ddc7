//! The hardware collaborator behind banked bitmaps.

pub mod fake;

/// Implementations of `BankedMemory` serve as adapters between this library
/// and a specific piece of display hardware whose framebuffer is only
/// reachable through a movable window.
///
/// The main library contains no hardware implementations of this trait, in
/// order to stay portable. [`fake::FakeBankedMemory`] is a RAM-backed
/// implementation for tests and for trying things out without hardware.
///
/// Offsets passed to the peek and poke methods are relative to the start of
/// the currently-selected bank and are always less than
/// [`bank_size`](BankedMemory::bank_size). Multi-byte accesses are
/// little-endian and never straddle a bank boundary; callers fall back to
/// byte access for pixels that would.
pub trait BankedMemory {
    /// Size of one bank window in bytes.
    fn bank_size(&self) -> usize;

    /// Total number of bytes reachable through all banks.
    fn total_size(&self) -> usize;

    /// Whether reads and writes go through independently selectable
    /// windows.
    ///
    /// With a single shared window, selecting a write bank also moves the
    /// read window, so a copy between two rows of the same surface cannot
    /// keep both addressed at once.
    fn separate_windows(&self) -> bool;

    fn select_read_bank(&mut self, bank: usize);
    fn select_write_bank(&mut self, bank: usize);

    fn peek8(&self, offset: usize) -> u8;
    fn poke8(&mut self, offset: usize, v: u8);

    fn peek16(&self, offset: usize) -> u16 {
        (self.peek8(offset) as u16) | (self.peek8(offset + 1) as u16) << 8
    }

    fn peek32(&self, offset: usize) -> u32 {
        (self.peek8(offset) as u32)
            | (self.peek8(offset + 1) as u32) << 8
            | (self.peek8(offset + 2) as u32) << 16
            | (self.peek8(offset + 3) as u32) << 24
    }

    fn poke16(&mut self, offset: usize, v: u16) {
        self.poke8(offset, v as u8);
        self.poke8(offset + 1, (v >> 8) as u8);
    }

    fn poke32(&mut self, offset: usize, v: u32) {
        self.poke8(offset, v as u8);
        self.poke8(offset + 1, (v >> 8) as u8);
        self.poke8(offset + 2, (v >> 16) as u8);
        self.poke8(offset + 3, (v >> 24) as u8);
    }
}

/// Splits an absolute address into a bank number and an offset within it.
#[inline]
pub(crate) fn split_addr(mem: &dyn BankedMemory, addr: usize) -> (usize, usize) {
    let size = mem.bank_size();
    (addr / size, addr % size)
}

/// Reads an `n`-byte little-endian value at an absolute address, selecting
/// read banks as needed.
pub(crate) fn read_value(mem: &mut dyn BankedMemory, addr: usize, n: usize) -> u32 {
    let (bank, offset) = split_addr(mem, addr);
    if offset + n <= mem.bank_size() {
        mem.select_read_bank(bank);
        match n {
            1 => return mem.peek8(offset) as u32,
            2 => return mem.peek16(offset) as u32,
            4 => return mem.peek32(offset),
            _ => {}
        }
    }
    let mut v = 0u32;
    for i in 0..n {
        v |= (read_byte(mem, addr + i) as u32) << (i * 8);
    }
    v
}

/// Writes an `n`-byte little-endian value at an absolute address,
/// selecting write banks as needed.
pub(crate) fn write_value(mem: &mut dyn BankedMemory, addr: usize, n: usize, v: u32) {
    let (bank, offset) = split_addr(mem, addr);
    if offset + n <= mem.bank_size() {
        mem.select_write_bank(bank);
        match n {
            1 => return mem.poke8(offset, v as u8),
            2 => return mem.poke16(offset, v as u16),
            4 => return mem.poke32(offset, v),
            _ => {}
        }
    }
    for i in 0..n {
        write_byte(mem, addr + i, (v >> (i * 8)) as u8);
    }
}

#[inline]
pub(crate) fn read_byte(mem: &mut dyn BankedMemory, addr: usize) -> u8 {
    let (bank, offset) = split_addr(mem, addr);
    mem.select_read_bank(bank);
    mem.peek8(offset)
}

#[inline]
pub(crate) fn write_byte(mem: &mut dyn BankedMemory, addr: usize, v: u8) {
    let (bank, offset) = split_addr(mem, addr);
    mem.select_write_bank(bank);
    mem.poke8(offset, v)
}

/// Copies a run of bytes out of banked memory, switching banks only at
/// bank boundaries.
pub(crate) fn read_bytes(mem: &mut dyn BankedMemory, addr: usize, into: &mut [u8]) {
    let mut done = 0;
    while done < into.len() {
        let (bank, offset) = split_addr(mem, addr + done);
        let run = core::cmp::min(mem.bank_size() - offset, into.len() - done);
        mem.select_read_bank(bank);
        for i in 0..run {
            into[done + i] = mem.peek8(offset + i);
        }
        done += run;
    }
}

/// Copies a run of bytes into banked memory, switching banks only at
/// bank boundaries.
pub(crate) fn write_bytes(mem: &mut dyn BankedMemory, addr: usize, data: &[u8]) {
    let mut done = 0;
    while done < data.len() {
        let (bank, offset) = split_addr(mem, addr + done);
        let run = core::cmp::min(mem.bank_size() - offset, data.len() - done);
        mem.select_write_bank(bank);
        for i in 0..run {
            mem.poke8(offset + i, data[done + i]);
        }
        done += run;
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeBankedMemory;
    use super::*;

    #[test]
    fn test_value_within_bank() {
        let mut mem = FakeBankedMemory::new(64, 16, true);
        write_value(&mut mem, 20, 4, 0xdeadbeef);
        assert_eq!(read_value(&mut mem, 20, 4), 0xdeadbeef);
        assert_eq!(read_value(&mut mem, 20, 2), 0xbeef);
        assert_eq!(read_value(&mut mem, 23, 1), 0xde);
    }

    #[test]
    fn test_value_straddling_banks() {
        let mut mem = FakeBankedMemory::new(64, 16, false);
        write_value(&mut mem, 14, 3, 0x123456);
        assert_eq!(read_value(&mut mem, 14, 3), 0x123456);
        assert_eq!(mem.raw()[14..17], [0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_bytes_across_banks() {
        let mut mem = FakeBankedMemory::new(64, 16, true);
        let data: [u8; 40] = {
            let mut d = [0u8; 40];
            for (i, v) in d.iter_mut().enumerate() {
                *v = i as u8 + 1;
            }
            d
        };
        write_bytes(&mut mem, 10, &data);
        let mut back = [0u8; 40];
        read_bytes(&mut mem, 10, &mut back);
        assert_eq!(back, data);
        assert_eq!(mem.raw()[9], 0);
        assert_eq!(mem.raw()[50], 0);
    }
}
