use typed_builder::TypedBuilder;

/// Power-on contents of work RAM and high RAM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RamInit {
    /// All zero. Deterministic across runs.
    #[default]
    Zeroed,
    /// Random bytes, as on real hardware.
    Random,
}

/// How the MBC3 real-time clock advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RtcMode {
    /// Driven by emulated cycles: one second per 4 194 304 cycles.
    #[default]
    Emulated,
    /// Never advances; the registers only hold what software writes.
    Frozen,
}

/// Machine construction options.
///
/// ```
/// use dotmatrix_gb::{GameBoyConfig, RamInit};
///
/// let config = GameBoyConfig::builder().ram_init(RamInit::Random).build();
/// assert!(config.post_boot_state);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// Start from the register and I/O state the boot ROM leaves behind,
    /// with PC at 0x0100. When false everything starts cleared.
    #[builder(default = true)]
    pub post_boot_state: bool,
    #[builder(default)]
    pub ram_init: RamInit,
    #[builder(default)]
    pub rtc_mode: RtcMode,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
