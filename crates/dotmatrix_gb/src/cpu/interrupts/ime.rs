use super::super::Cpu;

impl Cpu {
    /// Turn on IME once the instruction following EI has completed.
    ///
    /// `armed_before` is the pending state sampled before that instruction
    /// ran, so the EI instruction itself never enables IME.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self, armed_before: bool) {
        if armed_before && self.ime_enable_pending {
            self.ime = true;
            self.ime_enable_pending = false;
        }
    }
}
