use crate::core::pipeline::engine::Controller;

impl Controller {
    /// Read the instruction at the current PC and latch it, raw, into
    /// `IF`. Decoding is `ID`'s job — a malformed fetch only surfaces as
    /// an error once something downstream tries to decode it.
    pub(crate) fn fetch_stage(&mut self) {
        let pc = self.pc.read();
        let word = self.memory.load_u32(pc).unwrap_or(0);
        self.if_id.slot = Some((pc, word));
        self.pc.write(pc.wrapping_add(4));
    }
}
