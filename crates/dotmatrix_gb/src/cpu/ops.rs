//! Instruction handlers referenced from [`super::opcodes::OPCODES`].
//!
//! All of them share the [`Handler`](super::opcodes::Handler) shape. They
//! run after the opcode byte is fetched and never count cycles; the
//! descriptor row prices the [`Outcome`](super::opcodes::Outcome) they
//! report.

pub(super) mod arith;
pub(super) mod bits;
pub(super) mod flow;
pub(super) mod load;
pub(super) mod misc;
