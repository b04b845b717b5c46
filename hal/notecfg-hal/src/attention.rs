//! Notecard attention line abstraction
//!
//! The ATTN line is a hardware signal the Notecard uses to interrupt the
//! host. The connection-mode and motion-trigger commands switch it on and
//! off; the GPIO wiring is owned by the board support code.

/// Attention / interrupt line control
pub trait AttentionLine {
    /// Arm the attention line
    fn enable(&mut self);

    /// Disarm the attention line
    fn disable(&mut self);
}
