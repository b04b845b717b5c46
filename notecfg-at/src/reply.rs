//! Query reply buffer
//!
//! Query handlers write their answer into a bounded buffer the dispatcher
//! owns and echoes back over the serial link.

use heapless::String;

/// Reply buffer capacity
///
/// Sized for the longest possible reply, `1:` followed by a full-length
/// APN.
pub const REPLY_CAPACITY: usize = 260;

/// Bounded reply string for query handlers
pub type ReplyBuffer = String<REPLY_CAPACITY>;
