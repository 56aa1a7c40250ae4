use dotmatrix_common::Buttons;

use super::cartridge::{Cartridge, CartridgeKind, Header, RtcRegisters, NINTENDO_LOGO};
use super::ppu::{Mode, LCDC, LY, LYC, STAT};
use super::timer::{DIV, TAC, TIMA, TMA};
use super::{GameBoy, GameBoyBus, GameBoyConfig, Joypad, Ppu, RamInit, RtcMode, Timer};
use crate::error::CartridgeError;
use crate::{CPU_CLOCK_HZ, SCREEN_WIDTH};

// ---------------------------------------------------------------------------
// Synthetic cartridges
// ---------------------------------------------------------------------------

const BANK_MARKER: usize = 0x2000;

/// Build a ROM image with a valid header. Every bank carries its own index
/// at offset 0x2000 so the mapped bank can be identified through 0x6000.
/// The entry point jumps to 0x0150.
fn make_rom(cart_type: u8, rom_size_code: u8, ram_size_code: u8) -> Vec<u8> {
    let banks = match rom_size_code {
        0x52 => 72,
        0x53 => 80,
        0x54 => 96,
        code => 2usize << code,
    };
    let mut rom = vec![0u8; banks * 0x4000];
    for bank in 0..banks {
        rom[bank * 0x4000 + BANK_MARKER] = bank as u8;
    }

    // NOP; JP 0x0150
    rom[0x0100..0x0104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
    rom[0x0104..0x0134].copy_from_slice(&NINTENDO_LOGO);
    rom[0x0134..0x0138].copy_from_slice(b"TEST");
    rom[0x0147] = cart_type;
    rom[0x0148] = rom_size_code;
    rom[0x0149] = ram_size_code;
    rom
}

/// ROM-only image with `program` placed at 0x0150.
fn rom_with_program(program: &[u8]) -> Vec<u8> {
    let mut rom = make_rom(0x00, 0x00, 0x00);
    rom[0x0150..0x0150 + program.len()].copy_from_slice(program);
    rom
}

fn cartridge(cart_type: u8, rom_size_code: u8, ram_size_code: u8) -> Cartridge {
    Cartridge::from_rom(&make_rom(cart_type, rom_size_code, ram_size_code), RtcMode::Emulated)
        .expect("synthetic ROM should load")
}

fn mapped_bank(cart: &Cartridge) -> u8 {
    cart.read(0x4000 + BANK_MARKER as u16)
}

fn zeroed_bus() -> GameBoyBus {
    GameBoyBus::new(cartridge(0x00, 0x00, 0x00))
}

// ---------------------------------------------------------------------------
// Cartridge loading
// ---------------------------------------------------------------------------

#[test]
fn image_shorter_than_header_is_rejected() {
    let err = Cartridge::from_rom(&[0u8; 0x100], RtcMode::Emulated).err();
    assert_eq!(
        err,
        Some(CartridgeError::TooSmall {
            len: 0x100,
            required: 0x150
        })
    );
}

#[test]
fn logo_mismatch_is_invalid_format() {
    let mut rom = make_rom(0x00, 0x00, 0x00);
    rom[0x0110] ^= 0xFF;
    let err = Cartridge::from_rom(&rom, RtcMode::Emulated).err();
    assert_eq!(err, Some(CartridgeError::InvalidFormat));
}

#[test]
fn image_shorter_than_declared_banks_is_rejected() {
    let mut rom = make_rom(0x01, 0x00, 0x00);
    rom[0x0148] = 0x01; // claims 4 banks, carries 2
    let err = Cartridge::from_rom(&rom, RtcMode::Emulated).err();
    assert_eq!(
        err,
        Some(CartridgeError::TooSmall {
            len: 0x8000,
            required: 0x10000
        })
    );
}

#[test]
fn unknown_cartridge_type_is_unsupported() {
    let rom = make_rom(0x19, 0x00, 0x00); // MBC5
    let err = Cartridge::from_rom(&rom, RtcMode::Emulated).err();
    assert_eq!(err, Some(CartridgeError::Unsupported(0x19)));
    assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("unsupported cartridge type 0x19"));
}

#[test]
fn header_maps_types_bank_counts_and_ram_sizes() {
    let header = Header::parse(&make_rom(0x13, 0x52, 0x03)).expect("valid header");
    assert_eq!(header.rom_banks, 72);
    assert_eq!(header.ram_size, 0x8000);
    assert_eq!(header.kind, CartridgeKind::Mbc3 { has_rtc: false });
    assert_eq!(header.title, "TEST");

    let header = Header::parse(&make_rom(0x06, 0x02, 0x00)).expect("valid header");
    assert_eq!(header.kind, CartridgeKind::Mbc2);
    assert_eq!(header.rom_banks, 8);

    let header = Header::parse(&make_rom(0x09, 0x00, 0x01)).expect("valid header");
    assert_eq!(header.kind, CartridgeKind::RomOnly);
    assert_eq!(header.ram_size, 0x800);

    let header = Header::parse(&make_rom(0x0F, 0x00, 0x00)).expect("valid header");
    assert_eq!(header.kind, CartridgeKind::Mbc3 { has_rtc: true });
}

#[test]
fn rom_only_maps_both_banks_and_ignores_rom_writes() {
    let mut cart = cartridge(0x00, 0x00, 0x00);
    assert_eq!(cart.kind(), "ROM only");
    assert_eq!(cart.read(0x0101), 0xC3);
    assert_eq!(mapped_bank(&cart), 1);

    cart.write(0x2000, 0x05);
    assert_eq!(mapped_bank(&cart), 1);
    // No RAM declared.
    assert_eq!(cart.read(0xA000), 0xFF);
}

// ---------------------------------------------------------------------------
// MBC1
// ---------------------------------------------------------------------------

#[test]
fn mbc1_bank_zero_selects_bank_one() {
    let mut cart = cartridge(0x01, 0x05, 0x00);
    assert_eq!(mapped_bank(&cart), 1);

    cart.write(0x2000, 0x00);
    assert_eq!(mapped_bank(&cart), 1);

    // Only the masked 5 bits are checked for zero.
    cart.write(0x2000, 0xE0);
    assert_eq!(mapped_bank(&cart), 1);

    cart.write(0x2000, 0x07);
    assert_eq!(mapped_bank(&cart), 7);
    // Bank 0 stays fixed in the lower window.
    assert_eq!(cart.read(BANK_MARKER as u16), 0);
}

#[test]
fn mbc1_upper_bits_extend_rom_bank_in_mode_zero() {
    let mut cart = cartridge(0x01, 0x05, 0x00); // 64 banks
    cart.write(0x2000, 0x02);
    cart.write(0x4000, 0x01);
    assert_eq!(mapped_bank(&cart), 0x22);

    // Mode 1: upper bits no longer reach the ROM bank.
    cart.write(0x6000, 0x01);
    assert_eq!(mapped_bank(&cart), 0x02);
}

#[test]
fn mbc1_bank_index_wraps_over_available_banks() {
    let mut cart = cartridge(0x01, 0x01, 0x00); // 4 banks
    cart.write(0x2000, 0x05);
    assert_eq!(mapped_bank(&cart), 1);
    cart.write(0x2000, 0x03);
    assert_eq!(mapped_bank(&cart), 3);
}

#[test]
fn mbc1_ram_is_gated_by_enable() {
    let mut cart = cartridge(0x03, 0x00, 0x02);

    cart.write(0xA000, 0x12);
    assert_eq!(cart.read(0xA000), 0xFF);

    cart.write(0x0000, 0x0A);
    cart.write(0xA000, 0x12);
    assert_eq!(cart.read(0xA000), 0x12);

    cart.write(0x0000, 0x00);
    assert_eq!(cart.read(0xA000), 0xFF);

    // Any value with 0xA in the low nibble enables.
    cart.write(0x1FFF, 0x5A);
    assert_eq!(cart.read(0xA000), 0x12);
}

#[test]
fn mbc1_mode_one_selects_ram_bank() {
    let mut cart = cartridge(0x03, 0x00, 0x03); // 4 RAM banks
    cart.write(0x0000, 0x0A);
    cart.write(0x6000, 0x01);

    cart.write(0x4000, 0x02);
    cart.write(0xA000, 0x55);

    cart.write(0x4000, 0x00);
    assert_eq!(cart.read(0xA000), 0x00);
    cart.write(0xA000, 0x66);

    cart.write(0x4000, 0x02);
    assert_eq!(cart.read(0xA000), 0x55);

    // Mode 0 always maps RAM bank 0.
    cart.write(0x6000, 0x00);
    assert_eq!(cart.read(0xA000), 0x66);
}

// ---------------------------------------------------------------------------
// MBC2
// ---------------------------------------------------------------------------

#[test]
fn mbc2_address_bit_8_selects_register() {
    let mut cart = cartridge(0x06, 0x02, 0x00); // 8 banks

    cart.write(0x2100, 0x03);
    assert_eq!(mapped_bank(&cart), 3);

    cart.write(0x2100, 0x00);
    assert_eq!(mapped_bank(&cart), 1);

    // Bit 8 clear: RAM enable, the ROM bank is untouched.
    cart.write(0x0000, 0x0A);
    assert_eq!(mapped_bank(&cart), 1);
    cart.write(0xA000, 0x0C);
    assert_eq!(cart.read(0xA000), 0xFC);

    // Bit 8 set anywhere in 0000-3FFF writes the ROM bank.
    cart.write(0x0100, 0x05);
    assert_eq!(mapped_bank(&cart), 5);
}

#[test]
fn mbc2_ram_stores_nibbles_and_mirrors() {
    let mut cart = cartridge(0x06, 0x00, 0x00);
    assert_eq!(cart.read(0xA000), 0xFF);

    cart.write(0x0000, 0x0A);
    cart.write(0xA010, 0xAB);
    assert_eq!(cart.read(0xA010), 0xFB);
    assert_eq!(cart.read(0xA210), 0xFB);
    assert_eq!(cart.read(0xBE10), 0xFB);
}

// ---------------------------------------------------------------------------
// MBC3 and RTC
// ---------------------------------------------------------------------------

#[test]
fn mbc3_bank_zero_selects_bank_one() {
    let mut cart = cartridge(0x13, 0x06, 0x00); // 128 banks
    cart.write(0x2000, 0x00);
    assert_eq!(mapped_bank(&cart), 1);

    cart.write(0x2000, 0xFF);
    assert_eq!(mapped_bank(&cart), 0x7F);

    cart.write(0x2000, 0x80);
    assert_eq!(mapped_bank(&cart), 1);
}

#[test]
fn mbc3_ram_banks_switch() {
    let mut cart = cartridge(0x13, 0x00, 0x03);
    cart.write(0x0000, 0x0A);
    for bank in 0..4u8 {
        cart.write(0x4000, bank);
        cart.write(0xA123, 0x10 + bank);
    }
    for bank in 0..4u8 {
        cart.write(0x4000, bank);
        assert_eq!(cart.read(0xA123), 0x10 + bank);
    }
}

fn rtc_cart(mode: RtcMode) -> Cartridge {
    let mut cart =
        Cartridge::from_rom(&make_rom(0x10, 0x00, 0x03), mode).expect("synthetic ROM should load");
    cart.write(0x0000, 0x0A);
    cart
}

fn latch(cart: &mut Cartridge) {
    cart.write(0x6000, 0x00);
    cart.write(0x6000, 0x01);
}

#[test]
fn mbc3_rtc_reads_latched_copy() {
    let mut cart = rtc_cart(RtcMode::Emulated);
    cart.write(0x4000, 0x08);
    cart.write(0xA000, 5);
    assert_eq!(cart.read(0xA000), 5);

    cart.tick(CPU_CLOCK_HZ * 3);
    assert_eq!(cart.read(0xA000), 5);

    latch(&mut cart);
    assert_eq!(cart.read(0xA000), 8);

    // A 1 without a preceding 0 does not latch again.
    cart.tick(CPU_CLOCK_HZ);
    cart.write(0x6000, 0x01);
    assert_eq!(cart.read(0xA000), 8);

    latch(&mut cart);
    assert_eq!(cart.read(0xA000), 9);
}

#[test]
fn mbc3_clock_runs_ahead_of_the_latched_copy() {
    let mut cart = rtc_cart(RtcMode::Emulated);
    cart.tick(CPU_CLOCK_HZ * 3 + CPU_CLOCK_HZ / 2);

    let rtc = cart.rtc().expect("MBC3+TIMER has a clock");
    assert_eq!(rtc.live().seconds, 3);
    assert_eq!(rtc.latched(), RtcRegisters::default());

    latch(&mut cart);
    let rtc = cart.rtc().expect("MBC3+TIMER has a clock");
    assert_eq!(rtc.latched(), rtc.live());

    assert!(cartridge(0x13, 0x00, 0x03).rtc().is_none());
    assert!(cartridge(0x00, 0x00, 0x00).rtc().is_none());
}

#[test]
fn mbc3_rtc_rolls_over_into_days() {
    let mut cart = rtc_cart(RtcMode::Emulated);
    for (select, value) in [(0x08, 59), (0x09, 59), (0x0A, 23), (0x0B, 0xFF), (0x0C, 0x00)] {
        cart.write(0x4000, select);
        cart.write(0xA000, value);
    }

    cart.tick(CPU_CLOCK_HZ);
    latch(&mut cart);

    let read = |cart: &mut Cartridge, select: u8| {
        cart.write(0x4000, select);
        cart.read(0xA000)
    };
    assert_eq!(read(&mut cart, 0x08), 0);
    assert_eq!(read(&mut cart, 0x09), 0);
    assert_eq!(read(&mut cart, 0x0A), 0);
    assert_eq!(read(&mut cart, 0x0B), 0x00);
    assert_eq!(read(&mut cart, 0x0C), 0x01);
}

#[test]
fn mbc3_rtc_halt_and_frozen_mode_stop_the_clock() {
    let mut cart = rtc_cart(RtcMode::Emulated);
    cart.write(0x4000, 0x0C);
    cart.write(0xA000, 0x40);
    cart.tick(CPU_CLOCK_HZ * 2);
    latch(&mut cart);
    cart.write(0x4000, 0x08);
    assert_eq!(cart.read(0xA000), 0);

    let mut cart = rtc_cart(RtcMode::Frozen);
    cart.write(0x4000, 0x08);
    cart.write(0xA000, 30);
    cart.tick(CPU_CLOCK_HZ * 10);
    latch(&mut cart);
    assert_eq!(cart.read(0xA000), 30);
}

#[test]
fn mbc3_rtc_needs_ram_enable_and_a_clock() {
    let mut cart = rtc_cart(RtcMode::Emulated);
    cart.write(0x4000, 0x08);
    cart.write(0x0000, 0x00);
    assert_eq!(cart.read(0xA000), 0xFF);

    // MBC3 without the timer chip.
    let mut cart = cartridge(0x13, 0x00, 0x03);
    cart.write(0x0000, 0x0A);
    cart.write(0x4000, 0x08);
    cart.write(0xA000, 0x12);
    assert_eq!(cart.read(0xA000), 0xFF);
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

#[test]
fn divider_starts_at_post_boot_value() {
    let timer = Timer::new();
    assert_eq!(timer.divider(), 0xABCC);
    assert_eq!(timer.get(DIV), 0xAB);
}

#[test]
fn div_write_clears_whole_counter() {
    let mut timer = Timer::new();
    timer.run(1000);
    timer.write(DIV, 0x55);
    assert_eq!(timer.divider(), 0);
    assert_eq!(timer.read(DIV), 0);

    timer.run(256);
    assert_eq!(timer.read(DIV), 1);
}

#[test]
fn div_set_loads_upper_byte() {
    let mut timer = Timer::new();
    timer.set(DIV, 0x12);
    assert_eq!(timer.divider(), 0x1200);
    assert_eq!(timer.get(DIV), 0x12);
}

#[test]
fn tima_counts_at_each_rate() {
    for (tac, period) in [(0x04u8, 1024u32), (0x05, 16), (0x06, 64), (0x07, 256)] {
        let mut timer = Timer::new();
        timer.write(DIV, 0);
        timer.write(TAC, tac);

        timer.run(period - 1);
        assert_eq!(timer.read(TIMA), 0, "TAC={tac:#04x}");
        timer.run(1);
        assert_eq!(timer.read(TIMA), 1, "TAC={tac:#04x}");
        timer.run(period * 9);
        assert_eq!(timer.read(TIMA), 10, "TAC={tac:#04x}");
    }
}

#[test]
fn div_writes_faster_than_the_rate_hold_tima() {
    for (tac, period) in [(0x04u8, 1024u32), (0x05, 16), (0x06, 64), (0x07, 256)] {
        let mut timer = Timer::new();
        timer.write(DIV, 0);
        timer.write(TAC, tac);

        for _ in 0..100 {
            timer.run(period - 1);
            timer.write(DIV, 0);
        }
        assert_eq!(timer.read(TIMA), 0, "TAC={tac:#04x}");
        assert!(!timer.interrupt_requested);
    }
}

#[test]
fn disabled_timer_does_not_count() {
    let mut timer = Timer::new();
    timer.write(TAC, 0x01);
    timer.run(10_000);
    assert_eq!(timer.read(TIMA), 0);
}

#[test]
fn tima_overflow_reloads_tma_and_requests_interrupt() {
    let mut timer = Timer::new();
    timer.write(DIV, 0);
    timer.write(TMA, 0x42);
    timer.write(TIMA, 0xFF);
    timer.write(TAC, 0x05);

    timer.run(16);
    assert_eq!(timer.read(TIMA), 0x42);
    assert!(timer.interrupt_requested);
}

#[test]
fn tac_reads_upper_bits_high() {
    let mut timer = Timer::new();
    timer.write(TAC, 0xFD);
    assert_eq!(timer.read(TAC), 0xFD);
    timer.write(TAC, 0x02);
    assert_eq!(timer.read(TAC), 0xFA);
}

// ---------------------------------------------------------------------------
// PPU
// ---------------------------------------------------------------------------

fn lcd_on(ppu: &mut Ppu, lcdc: u8) {
    ppu.write(LCDC, 0x80 | lcdc);
}

fn tick_cycles(ppu: &mut Ppu, cycles: u32, if_reg: &mut u8) {
    for _ in 0..cycles / 4 {
        ppu.tick(if_reg);
    }
}

#[test]
fn line_walks_through_oam_scan_draw_and_hblank() {
    let mut ppu = Ppu::new();
    let mut if_reg = 0;
    lcd_on(&mut ppu, 0);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.mode(), Mode::OamScan);

    tick_cycles(&mut ppu, 76, &mut if_reg);
    assert_eq!(ppu.mode(), Mode::OamScan);
    tick_cycles(&mut ppu, 4, &mut if_reg);
    assert_eq!(ppu.mode(), Mode::Draw);

    tick_cycles(&mut ppu, 168, &mut if_reg);
    assert_eq!(ppu.mode(), Mode::Draw);
    tick_cycles(&mut ppu, 4, &mut if_reg);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(ppu.line_cycles(), 252);

    tick_cycles(&mut ppu, 204, &mut if_reg);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn vblank_is_requested_once_per_frame_outside_visible_lines() {
    let mut ppu = Ppu::new();
    lcd_on(&mut ppu, 0);

    let mut requests = Vec::new();
    for _ in 0..2 * crate::CYCLES_PER_FRAME / 4 {
        let mut if_reg = 0;
        ppu.tick(&mut if_reg);
        if if_reg & 0x01 != 0 {
            requests.push((ppu.ly(), ppu.line_cycles()));
        }
    }

    assert_eq!(requests, vec![(144, 4), (144, 4)]);
    assert_eq!(ppu.frame_count(), 2);
}

#[test]
fn frame_ready_rises_on_vblank_and_is_cleared_by_host() {
    let mut ppu = Ppu::new();
    let mut if_reg = 0;
    lcd_on(&mut ppu, 0);

    tick_cycles(&mut ppu, 144 * 456, &mut if_reg);
    assert!(!ppu.is_frame_ready());
    assert_eq!(ppu.mode(), Mode::VBlank);

    tick_cycles(&mut ppu, 4, &mut if_reg);
    assert!(ppu.is_frame_ready());

    ppu.clear_frame_ready();
    assert!(!ppu.is_frame_ready());
}

#[test]
fn line_153_wraps_to_line_zero() {
    let mut ppu = Ppu::new();
    let mut if_reg = 0;
    lcd_on(&mut ppu, 0);

    tick_cycles(&mut ppu, 153 * 456, &mut if_reg);
    assert_eq!(ppu.ly(), 153);
    assert_eq!(ppu.mode(), Mode::VBlank);

    tick_cycles(&mut ppu, 456, &mut if_reg);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn coincidence_is_evaluated_four_cycles_into_each_line() {
    let mut ppu = Ppu::new();
    let mut if_reg = 0;
    ppu.write(LYC, 0);
    lcd_on(&mut ppu, 0);
    assert_eq!(ppu.read(STAT) & 0x04, 0);

    tick_cycles(&mut ppu, 4, &mut if_reg);
    assert_eq!(ppu.read(STAT) & 0x04, 0x04);

    // Still set at the end of line 0, cleared 4 cycles into line 1.
    tick_cycles(&mut ppu, 452, &mut if_reg);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(ppu.read(STAT) & 0x04, 0x04);
    tick_cycles(&mut ppu, 4, &mut if_reg);
    assert_eq!(ppu.read(STAT) & 0x04, 0);
}

#[test]
fn lyc_stat_interrupt_fires_on_rising_edge() {
    let mut ppu = Ppu::new();
    ppu.write(LYC, 3);
    ppu.write(STAT, 0x40);
    lcd_on(&mut ppu, 0);

    let mut raised_on = Vec::new();
    for _ in 0..154 * 456 / 4 {
        let mut if_reg = 0;
        ppu.tick(&mut if_reg);
        if if_reg & 0x02 != 0 {
            raised_on.push((ppu.ly(), ppu.line_cycles()));
        }
    }
    assert_eq!(raised_on, vec![(3, 4)]);
}

#[test]
fn stat_writes_only_touch_interrupt_selects() {
    let mut ppu = Ppu::new();
    lcd_on(&mut ppu, 0);
    ppu.write(STAT, 0xFF);
    assert_eq!(ppu.read(STAT), 0x80 | 0x78 | Mode::OamScan as u8);

    ppu.write(LY, 0x42);
    assert_eq!(ppu.read(LY), 0);
    // The debug path can still force it.
    ppu.set(LY, 0x42);
    assert_eq!(ppu.get(LY), 0x42);
}

#[test]
fn lcd_off_keeps_ly_and_lcd_on_restarts_frame() {
    let mut ppu = Ppu::new();
    let mut if_reg = 0;
    lcd_on(&mut ppu, 0);
    tick_cycles(&mut ppu, 5 * 456 + 100, &mut if_reg);
    assert_eq!(ppu.ly(), 5);

    ppu.write(LCDC, 0x00);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(ppu.ly(), 5);
    assert_eq!(ppu.line_cycles(), 100);

    tick_cycles(&mut ppu, 10 * 456, &mut if_reg);
    assert_eq!(ppu.ly(), 5);
    assert_eq!(if_reg, 0);

    lcd_on(&mut ppu, 0);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.line_cycles(), 0);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn vram_and_oam_are_gated_by_mode() {
    let mut ppu = Ppu::new();
    let mut if_reg = 0;
    ppu.write(0x8000, 0x11);
    ppu.write(0xFE00, 0x22);

    lcd_on(&mut ppu, 0);
    // Mode 2: OAM closed, VRAM open.
    assert_eq!(ppu.read(0x8000), 0x11);
    assert_eq!(ppu.read(0xFE00), 0xFF);
    ppu.write(0xFE00, 0x33);
    assert_eq!(ppu.get(0xFE00), 0x22);

    // Mode 3: both closed.
    tick_cycles(&mut ppu, 80, &mut if_reg);
    assert_eq!(ppu.mode(), Mode::Draw);
    assert_eq!(ppu.read(0x8000), 0xFF);
    ppu.write(0x8000, 0x44);
    assert_eq!(ppu.get(0x8000), 0x11);

    // Mode 0: both open.
    tick_cycles(&mut ppu, 172, &mut if_reg);
    assert_eq!(ppu.read(0xFE00), 0x22);
    ppu.write(0x8000, 0x55);
    assert_eq!(ppu.read(0x8000), 0x55);
}

/// Fill tile `tile` (unsigned addressing) with colour number `color`.
fn fill_tile(ppu: &mut Ppu, tile: u16, color: u8) {
    let lo = if color & 1 != 0 { 0xFF } else { 0x00 };
    let hi = if color & 2 != 0 { 0xFF } else { 0x00 };
    for row in 0..8u16 {
        ppu.set(0x8000 + tile * 16 + row * 2, lo);
        ppu.set(0x8000 + tile * 16 + row * 2 + 1, hi);
    }
}

fn set_sprite(ppu: &mut Ppu, index: u16, y: u8, x: u8, tile: u8, attrs: u8) {
    let base = 0xFE00 + index * 4;
    ppu.set(base, y);
    ppu.set(base + 1, x);
    ppu.set(base + 2, tile);
    ppu.set(base + 3, attrs);
}

/// Run the PPU from LCD-on to the end of Draw on line 0.
fn render_first_line(ppu: &mut Ppu, lcdc: u8) {
    let mut if_reg = 0;
    lcd_on(ppu, lcdc);
    tick_cycles(ppu, 252, &mut if_reg);
}

#[test]
fn lower_oam_index_wins_overlapping_sprites() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 1, 3);
    fill_tile(&mut ppu, 2, 1);

    set_sprite(&mut ppu, 7, 16, 16, 2, 0);
    set_sprite(&mut ppu, 3, 16, 16, 1, 0);
    // Sprite 7 alone further right.
    set_sprite(&mut ppu, 8, 16, 40, 2, 0);

    render_first_line(&mut ppu, 0x02);

    let frame = ppu.frame_buffer();
    let source = ppu.source_buffer();
    assert_eq!(frame[8], 3);
    assert_eq!(source[8], 4 + 3);
    assert_eq!(frame[15], 3);
    assert_eq!(frame[32], 1);
    assert_eq!(source[32], 4 + 8);
    assert_eq!(frame[16], 0);
    assert_eq!(source[16], 0);
}

#[test]
fn lower_oam_index_wins_even_when_further_right() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 1, 3);
    fill_tile(&mut ppu, 2, 1);

    // Sprite 7 covers screen X 4..12, sprite 3 covers 8..16.
    set_sprite(&mut ppu, 7, 16, 12, 2, 0);
    set_sprite(&mut ppu, 3, 16, 16, 1, 0);

    render_first_line(&mut ppu, 0x02);

    let frame = ppu.frame_buffer();
    let source = ppu.source_buffer();
    assert_eq!(frame[4], 1);
    assert_eq!(source[4], 4 + 7);
    assert_eq!(frame[8], 3);
    assert_eq!(source[8], 4 + 3);
    assert_eq!(frame[11], 3);
    assert_eq!(source[11], 4 + 3);
    assert_eq!(source[15], 4 + 3);
    assert_eq!(source[3], 0);
}

#[test]
fn transparent_sprite_pixels_let_the_next_sprite_through() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 2, 2);

    // Tile 0 is all colour 0.
    set_sprite(&mut ppu, 0, 16, 16, 0, 0);
    set_sprite(&mut ppu, 1, 16, 16, 2, 0);

    render_first_line(&mut ppu, 0x02);
    assert_eq!(ppu.frame_buffer()[8], 2);
    assert_eq!(ppu.source_buffer()[8], 4 + 1);
}

#[test]
fn behind_bg_sprite_only_shows_over_colour_zero() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF47, 0xE4);
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 1, 3);
    fill_tile(&mut ppu, 2, 1);

    // BG map (0x9800, unsigned data): tile 2 in column 1, tile 0 elsewhere.
    ppu.set(0x9801, 2);

    set_sprite(&mut ppu, 0, 16, 8, 1, 0x80); // x 0..8 over colour 0
    set_sprite(&mut ppu, 1, 16, 16, 1, 0x80); // x 8..16 over colour 1

    render_first_line(&mut ppu, 0x01 | 0x02 | 0x10);

    let frame = ppu.frame_buffer();
    assert_eq!(frame[0], 3);
    assert_eq!(ppu.source_buffer()[0], 4);
    assert_eq!(frame[8], 1);
    assert_eq!(ppu.source_buffer()[8], 1);
}

#[test]
fn sprite_flips_and_palettes() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    ppu.set(0xFF49, 0x1B); // reversed
    // Tile 1: leftmost pixel of row 0 is colour 1, rest 0.
    ppu.set(0x8010, 0x80);

    set_sprite(&mut ppu, 0, 16, 8, 1, 0x00); // x 0..8
    set_sprite(&mut ppu, 1, 16, 16, 1, 0x20); // x 8..16, X-flipped
    set_sprite(&mut ppu, 2, 16, 24, 1, 0x10); // x 16..24, OBP1
    set_sprite(&mut ppu, 3, 9, 32, 1, 0x40); // bottom row lands on line 0

    render_first_line(&mut ppu, 0x02);
    let frame = ppu.frame_buffer();
    assert_eq!(frame[0], 1);
    assert_eq!(frame[7], 0);
    assert_eq!(frame[8], 0);
    assert_eq!(frame[15], 1);
    assert_eq!(frame[16], 2);
    assert_eq!(frame[24], 1);
}

#[test]
fn at_most_ten_sprites_per_line() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 1, 3);
    for i in 0..12u16 {
        set_sprite(&mut ppu, i, 16, 8 + (i as u8) * 8, 1, 0);
    }

    render_first_line(&mut ppu, 0x02);
    let frame = ppu.frame_buffer();
    assert_eq!(frame[9 * 8], 3);
    assert_eq!(frame[10 * 8], 0);
    assert_eq!(frame[11 * 8], 0);
}

#[test]
fn sprites_partially_off_the_left_edge_are_clipped() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 1, 2);
    set_sprite(&mut ppu, 0, 16, 4, 1, 0); // x -4..4

    render_first_line(&mut ppu, 0x02);
    let frame = ppu.frame_buffer();
    assert_eq!(&frame[0..4], &[2, 2, 2, 2]);
    assert_eq!(frame[4], 0);
}

#[test]
fn tall_sprites_use_tile_pair() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF48, 0xE4);
    fill_tile(&mut ppu, 4, 1);
    fill_tile(&mut ppu, 5, 3);

    // Top on line -8: line 0 is row 8, in the second tile. Odd index is
    // rounded down to the pair.
    set_sprite(&mut ppu, 0, 8, 8, 5, 0);

    render_first_line(&mut ppu, 0x02 | 0x04);
    assert_eq!(ppu.frame_buffer()[0], 3);
}

#[test]
fn window_starts_at_wx_minus_seven_clamped() {
    let setup = |wx: u8| {
        let mut ppu = Ppu::new();
        ppu.set(0xFF47, 0xE4);
        fill_tile(&mut ppu, 1, 3);
        // Window map 0x9800 all tile 1; BG map 0x9C00 all tile 0.
        for i in 0..0x400 {
            ppu.set(0x9800 + i, 1);
        }
        ppu.set(0xFF4A, 0);
        ppu.set(0xFF4B, wx);
        render_first_line(&mut ppu, 0x01 | 0x08 | 0x10 | 0x20);
        ppu
    };

    let ppu = setup(0);
    assert_eq!(ppu.frame_buffer()[0], 3);

    let ppu = setup(7);
    assert_eq!(ppu.frame_buffer()[0], 3);

    let ppu = setup(87);
    assert_eq!(ppu.frame_buffer()[79], 0);
    assert_eq!(ppu.frame_buffer()[80], 3);
}

#[test]
fn window_waits_for_wy() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF47, 0xE4);
    fill_tile(&mut ppu, 1, 3);
    for i in 0..0x400 {
        ppu.set(0x9800 + i, 1);
    }
    ppu.set(0xFF4A, 1);
    ppu.set(0xFF4B, 7);
    render_first_line(&mut ppu, 0x01 | 0x08 | 0x10 | 0x20);
    assert_eq!(ppu.frame_buffer()[0], 0);
}

#[test]
fn background_scrolls_and_uses_signed_tile_data() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF47, 0xE4);
    // Tile 0x80 under signed addressing lives at 0x8800.
    for row in 0..8u16 {
        ppu.set(0x8800 + row * 2, 0xFF);
    }
    ppu.set(0x9802, 0x80);
    ppu.set(0xFF43, 4); // SCX

    render_first_line(&mut ppu, 0x01);
    let frame = ppu.frame_buffer();
    // Map column 2 starts at BG x=16, screen x=12.
    assert_eq!(frame[11], 0);
    assert_eq!(frame[12], 1);
    assert_eq!(frame[19], 1);
    assert_eq!(frame[20], 0);
}

#[test]
fn disabled_background_is_white() {
    let mut ppu = Ppu::new();
    ppu.set(0xFF47, 0xFF);
    render_first_line(&mut ppu, 0x00);
    assert!(ppu.frame_buffer()[..SCREEN_WIDTH].iter().all(|&s| s == 0));

    let mut ppu = Ppu::new();
    ppu.set(0xFF47, 0xFF);
    render_first_line(&mut ppu, 0x01);
    assert!(ppu.frame_buffer()[..SCREEN_WIDTH].iter().all(|&s| s == 3));
}

// ---------------------------------------------------------------------------
// Bus and DMA
// ---------------------------------------------------------------------------

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut bus = zeroed_bus();
    bus.write(0xC123, 0x77);
    assert_eq!(bus.read(0xE123), 0x77);
    bus.write(0xFDFF, 0x88);
    assert_eq!(bus.read(0xDDFF), 0x88);
}

#[test]
fn unmapped_region_reads_ff_and_drops_writes() {
    let mut bus = zeroed_bus();
    bus.write(0xFEA0, 0x12);
    assert_eq!(bus.read(0xFEA0), 0xFF);
    assert_eq!(bus.get(0xFEFF), 0xFF);
}

#[test]
fn component_registers_are_mirrored_into_io() {
    let mut bus = zeroed_bus();
    bus.write(0xFF06, 0x9A);
    assert_eq!(bus.timer.read(TMA), 0x9A);
    assert_eq!(bus.io[0x06], 0x9A);

    bus.write(0xFF42, 0x10);
    assert_eq!(bus.ppu.get(0xFF42), 0x10);
    assert_eq!(bus.io[0x42], 0x10);

    bus.write(0xFF00, 0x20);
    assert_eq!(bus.io[0x00], 0x20);
    assert_eq!(bus.read(0xFF00) & 0x30, 0x20);

    // Generic slots round-trip.
    bus.write(0xFF26, 0x80);
    assert_eq!(bus.read(0xFF26), 0x80);
}

#[test]
fn interrupt_registers() {
    let mut bus = zeroed_bus();
    bus.write(0xFF0F, 0xFF);
    assert_eq!(bus.if_reg, 0x1F);
    assert_eq!(bus.read(0xFF0F), 0xFF);
    bus.write(0xFF0F, 0x04);
    assert_eq!(bus.read(0xFF0F), 0xE4);

    bus.write(0xFFFF, 0x15);
    assert_eq!(bus.read(0xFFFF), 0x15);
    assert_eq!(bus.ie_reg, 0x15);
}

#[test]
fn dma_copies_one_byte_per_tick_after_a_wait() {
    let mut bus = zeroed_bus();
    for i in 0..0xA0u16 {
        bus.set(0xC000 + i, i as u8 ^ 0x5A);
    }

    bus.write(0xFF46, 0xC0);
    assert!(bus.dma_in_progress());
    assert_eq!(bus.get(0xFF46), 0xC0);

    bus.run_ppu(4);
    assert_eq!(bus.get(0xFE00), 0x00);

    bus.run_ppu(4);
    assert_eq!(bus.get(0xFE00), 0x5A);
    assert_eq!(bus.get(0xFE01), 0x00);

    bus.run_ppu(158 * 4);
    assert!(bus.dma_in_progress());
    assert_eq!(bus.get(0xFE9E), 0x9E ^ 0x5A);
    assert_eq!(bus.get(0xFE9F), 0x00);

    bus.run_ppu(4);
    assert!(!bus.dma_in_progress());
    assert_eq!(bus.get(0xFE9F), 0x9F ^ 0x5A);
}

#[test]
fn dma_blocks_work_ram_for_the_cpu() {
    let mut bus = zeroed_bus();
    bus.set(0xC010, 0x42);

    bus.write(0xFF46, 0xC0);
    assert_eq!(bus.read(0xC010), 0xFF);
    assert_eq!(bus.read(0xE010), 0xFF);
    bus.write(0xC010, 0x99);
    assert_eq!(bus.get(0xC010), 0x42);

    // High RAM stays reachable.
    bus.write(0xFF80, 0x11);
    assert_eq!(bus.read(0xFF80), 0x11);

    bus.run_ppu(161 * 4);
    assert_eq!(bus.read(0xC010), 0x42);
}

// ---------------------------------------------------------------------------
// Joypad
// ---------------------------------------------------------------------------

#[test]
fn joypad_reads_selected_group() {
    let mut joypad = Joypad::new();
    joypad.update(Buttons::RIGHT | Buttons::START);

    joypad.write(0xFF00, 0x20); // directions
    assert_eq!(joypad.read(0xFF00), 0xEE);

    joypad.write(0xFF00, 0x10); // actions
    assert_eq!(joypad.read(0xFF00), 0xD7);

    joypad.write(0xFF00, 0x00); // both
    assert_eq!(joypad.read(0xFF00), 0xC6);

    joypad.write(0xFF00, 0x30); // none
    assert_eq!(joypad.read(0xFF00), 0xFF);
}

#[test]
fn joypad_interrupt_on_press_and_release_in_selected_group() {
    let mut joypad = Joypad::new();
    joypad.write(0xFF00, 0x20);

    joypad.update(Buttons::LEFT);
    assert!(joypad.interrupt_requested);
    joypad.interrupt_requested = false;

    joypad.update(Buttons::empty());
    assert!(joypad.interrupt_requested);
    joypad.interrupt_requested = false;

    // Action group is not selected.
    joypad.update(Buttons::A);
    assert!(!joypad.interrupt_requested);

    // Unchanged snapshot.
    joypad.write(0xFF00, 0x10);
    joypad.update(Buttons::A);
    assert!(!joypad.interrupt_requested);
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[test]
fn board_applies_post_boot_state() {
    let gb = GameBoy::new(&rom_with_program(&[0x18, 0xFE])).expect("valid ROM");
    assert_eq!(gb.cpu().regs.pc, 0x0100);
    assert_eq!(gb.bus().get(LCDC), 0x91);
    assert_eq!(gb.bus().get(0xFF47), 0xFC);
    assert_eq!(gb.bus().get(0xFF48), 0xFF);
    assert_eq!(gb.bus().get(0xFF10), 0x80);
    assert_eq!(gb.bus().get(0xFF0F), 0xE1);
    assert_eq!(gb.bus().get(0xFFFF), 0x00);
    assert!(gb.bus().ppu.lcd_enabled());
    assert_eq!(gb.bus().get(0xC000), 0);
}

#[test]
fn board_without_post_boot_state_starts_cleared() {
    let config = GameBoyConfig::builder()
        .post_boot_state(false)
        .ram_init(RamInit::Zeroed)
        .build();
    let gb = GameBoy::with_config(&rom_with_program(&[]), config).expect("valid ROM");
    assert_eq!(gb.cpu().regs.pc, 0x0000);
    assert_eq!(gb.cpu().regs.af(), 0x0000);
    assert!(!gb.bus().ppu.lcd_enabled());
}

#[test]
fn board_rejects_bad_images() {
    assert_eq!(
        GameBoy::new(&[0u8; 16]).err(),
        Some(CartridgeError::TooSmall {
            len: 16,
            required: 0x150
        })
    );
}

#[test]
fn rom_only_program_runs_end_to_end() {
    // 0150: LD A,0x42; LD (0xC000),A; INC A
    // 0156: JP 0x0156
    let program = [0x3E, 0x42, 0xEA, 0x00, 0xC0, 0x3C, 0xC3, 0x56, 0x01];
    let mut gb = GameBoy::new(&rom_with_program(&program)).expect("valid ROM");

    let cycles: u32 = (0..5).map(|_| gb.step()).sum();

    assert_eq!(cycles, 4 + 16 + 8 + 16 + 4);
    assert_eq!(gb.bus().get(0xC000), 0x42);
    assert_eq!(gb.cpu().regs.a, 0x43);
    assert_eq!(gb.cpu().regs.pc, 0x0156);

    // The program parks in its loop; nothing it wrote moves.
    for _ in 0..50 {
        assert_eq!(gb.step(), 16);
        assert_eq!(gb.cpu().regs.pc, 0x0156);
    }
    assert_eq!(gb.cpu().regs.a, 0x43);
    assert_eq!(gb.bus().get(0xC000), 0x42);
}

#[test]
fn timer_interrupt_request_is_polled_end_to_end() {
    // 0150: DI
    // 0151: LD A,5        ; timer on, 16-cycle rate
    // 0153: LDH (07),A
    // 0155: LDH A,(0F)
    // 0157: AND 4
    // 0159: JR Z,-6
    // 015B: JR -2
    let program = [
        0xF3, 0x3E, 0x05, 0xE0, 0x07, 0xF0, 0x0F, 0xE6, 0x04, 0x28, 0xFA, 0x18, 0xFE,
    ];
    let mut gb = GameBoy::new(&rom_with_program(&program)).expect("valid ROM");

    let mut steps = 0;
    while gb.cpu().regs.pc != 0x015B {
        gb.step();
        steps += 1;
        assert!(steps < 5_000, "timer interrupt never requested");
    }
    assert_ne!(gb.bus().if_reg & 0x04, 0);
}

#[test]
fn halted_cpu_services_timer_interrupt() {
    // 0150: LD A,4 ; LDH (FF),A   IE = timer
    // 0154: LD A,5 ; LDH (07),A   TAC
    // 0158: EI
    // 0159: HALT
    // 015A: JR -2
    // 0050: LD B,0x99 ; RETI
    let mut rom = rom_with_program(&[
        0x3E, 0x04, 0xE0, 0xFF, 0x3E, 0x05, 0xE0, 0x07, 0xFB, 0x76, 0x18, 0xFE,
    ]);
    rom[0x0050..0x0053].copy_from_slice(&[0x06, 0x99, 0xD9]);
    let mut gb = GameBoy::new(&rom).expect("valid ROM");

    let mut steps = 0;
    while gb.cpu().regs.b != 0x99 {
        gb.step();
        steps += 1;
        assert!(steps < 5_000, "timer interrupt never serviced");
    }
    assert_eq!(gb.bus().if_reg & 0x04, 0);
    assert!(!gb.cpu().ime);

    gb.step(); // RETI
    assert!(gb.cpu().ime);
    assert_eq!(gb.cpu().regs.pc, 0x015A);
}

#[test]
fn step_frame_stops_at_frame_ready() {
    let mut gb = GameBoy::new(&rom_with_program(&[0x18, 0xFE])).expect("valid ROM");

    let cycles = gb.step_frame();
    assert!(gb.is_frame_ready());
    assert!(cycles <= crate::CYCLES_PER_FRAME);
    assert_eq!(gb.bus().ppu.ly(), 144);
    assert_ne!(gb.bus().if_reg & 0x01, 0);

    gb.clear_frame_ready();
    assert!(!gb.is_frame_ready());

    gb.step_frame();
    assert!(gb.is_frame_ready());
    assert_eq!(gb.bus().ppu.frame_count(), 2);
    assert_eq!(gb.frame_buffer().len(), 160 * 144);
}

#[test]
fn step_frame_with_lcd_off_runs_one_frame_of_cycles() {
    let config = GameBoyConfig::builder().post_boot_state(false).build();
    let mut gb = GameBoy::with_config(&rom_with_program(&[0x18, 0xFE]), config)
        .expect("valid ROM");

    let cycles = gb.step_frame();
    assert!(cycles >= crate::CYCLES_PER_FRAME);
    assert!(!gb.is_frame_ready());
}

#[test]
fn button_press_raises_joypad_interrupt_through_board() {
    let mut gb = GameBoy::new(&rom_with_program(&[0x18, 0xFE])).expect("valid ROM");
    gb.bus_mut().write(0xFF00, 0x10); // select actions
    gb.bus_mut().if_reg = 0;

    gb.set_buttons(Buttons::START);
    gb.step();
    assert_ne!(gb.bus().if_reg & 0x10, 0);
    assert_eq!(gb.bus().read(0xFF00) & 0x0F, 0x07);
}

#[test]
fn mbc3_clock_follows_emulated_cycles_through_board() {
    let mut rom = make_rom(0x10, 0x00, 0x03);
    rom[0x0150..0x0152].copy_from_slice(&[0x18, 0xFE]);
    let mut gb = GameBoy::new(&rom).expect("valid ROM");

    let mut elapsed = 0;
    while elapsed < CPU_CLOCK_HZ * 2 {
        elapsed += gb.step();
    }

    let bus = gb.bus_mut();
    bus.write(0x0000, 0x0A);
    bus.write(0x4000, 0x08);
    bus.write(0x6000, 0x00);
    bus.write(0x6000, 0x01);
    assert_eq!(bus.read(0xA000), 2);
}
