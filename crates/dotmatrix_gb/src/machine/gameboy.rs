use dotmatrix_common::Buttons;

use super::cartridge::Cartridge;
use super::config::GameBoyConfig;
use super::GameBoyBus;
use crate::cpu::{Cpu, InterruptFlags};
use crate::error::CartridgeError;
use crate::CYCLES_PER_FRAME;

/// High-level Game Boy machine.
///
/// Composes the CPU with the bus (which owns the cartridge, PPU, timer and
/// joypad). The CPU is the only time source: every [`GameBoy::step`] runs
/// one instruction and then advances the peripherals by the cycles it took.
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: GameBoyBus,
}

impl GameBoy {
    /// Build a machine with the default configuration.
    pub fn new(rom: &[u8]) -> Result<Self, CartridgeError> {
        Self::with_config(rom, GameBoyConfig::default())
    }

    pub fn with_config(rom: &[u8], config: GameBoyConfig) -> Result<Self, CartridgeError> {
        let cartridge = Cartridge::from_rom(rom, config.rtc_mode)?;
        let mut bus = GameBoyBus::new(cartridge);
        bus.init_internal_ram(config.ram_init);

        let cpu = if config.post_boot_state {
            bus.apply_dmg_initial_io_state();
            Cpu::new()
        } else {
            Cpu::powered_off()
        };

        Ok(Self { cpu, bus })
    }

    /// Service interrupts, execute one instruction and advance every
    /// peripheral by the cycles consumed. Returns the cycle count.
    pub fn step(&mut self) -> u32 {
        let mut cycles = self.cpu.handle_interrupts(&mut self.bus);
        cycles += self.cpu.step(&mut self.bus);

        self.bus.run_ppu(cycles);
        self.bus.timer.run(cycles);
        self.bus.cartridge.tick(cycles);

        if self.bus.timer.interrupt_requested {
            self.bus.timer.interrupt_requested = false;
            self.bus.if_reg |= InterruptFlags::TIMER.bits();
        }
        if self.bus.joypad.interrupt_requested {
            self.bus.joypad.interrupt_requested = false;
            self.bus.if_reg |= InterruptFlags::JOYPAD.bits();
        }

        cycles
    }

    /// Run until the PPU completes another frame or one frame's worth of
    /// cycles has elapsed (the LCD may be off). Returns the cycles run.
    pub fn step_frame(&mut self) -> u32 {
        let start = self.bus.ppu.frame_count();
        let mut elapsed = 0;
        while elapsed < CYCLES_PER_FRAME {
            elapsed += self.step();
            if self.bus.ppu.frame_count() != start {
                break;
            }
        }
        elapsed
    }

    /// Latch the host's current button state.
    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.bus.joypad.update(buttons);
    }

    /// 160x144 shade indices (0 lightest, 3 darkest), row-major.
    pub fn frame_buffer(&self) -> &[u8] {
        self.bus.ppu.frame_buffer()
    }

    pub fn is_frame_ready(&self) -> bool {
        self.bus.ppu.is_frame_ready()
    }

    pub fn clear_frame_ready(&mut self) {
        self.bus.ppu.clear_frame_ready();
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn bus(&self) -> &GameBoyBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut GameBoyBus {
        &mut self.bus
    }
}
