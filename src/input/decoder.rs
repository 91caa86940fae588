//! Escape-sequence decoder for the raw keyboard byte stream.
//!
//! Each poll delivers a small buffer (at most a handful of bytes) that is
//! scanned left to right in one pass. Arrow keys arrive as the three-byte CSI
//! sequences `ESC [ A` / `ESC [ B`.
//!
//! Known limitation, kept deliberately: the decoder holds no state across
//! reads. An escape sequence split across two non-blocking reads loses its ESC
//! byte and the tail bytes are decoded independently, so that keypress is
//! dropped. Buffering partial sequences across polls is out of scope.

use crate::input::InputEvent;

const ESC: u8 = 0x1b;
const CSI_OPEN: u8 = b'[';
const CODE_UP: u8 = b'A';
const CODE_DOWN: u8 = b'B';

/// Decode one read buffer into an ordered event sequence.
///
/// Quit takes immediate precedence: once a `q`/`Q` is seen, the rest of the
/// buffer is not processed.
pub fn decode(buf: &[u8]) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut i = 0;

    while i < buf.len() {
        match buf[i] {
            ESC if i + 2 < buf.len() && buf[i + 1] == CSI_OPEN => {
                events.push(match buf[i + 2] {
                    CODE_UP => InputEvent::MoveUp,
                    CODE_DOWN => InputEvent::MoveDown,
                    _ => InputEvent::Ignored,
                });
                i += 3;
            }
            // Incomplete sequence in this buffer, or ESC not followed by '[':
            // drop the ESC and decode the following bytes on their own.
            ESC => {
                i += 1;
            }
            b'q' | b'Q' => {
                events.push(InputEvent::Quit);
                break;
            }
            _ => {
                events.push(InputEvent::Ignored);
                i += 1;
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_arrow_decodes_to_move_up() {
        assert_eq!(decode(&[0x1b, 0x5b, 0x41]), vec![InputEvent::MoveUp]);
    }

    #[test]
    fn down_arrow_decodes_to_move_down() {
        assert_eq!(decode(&[0x1b, 0x5b, 0x42]), vec![InputEvent::MoveDown]);
    }

    #[test]
    fn unmapped_csi_code_consumes_three_bytes_as_ignored() {
        // Right arrow ('C') has no mapping.
        assert_eq!(decode(&[0x1b, 0x5b, 0x43]), vec![InputEvent::Ignored]);
    }

    #[test]
    fn lone_trailing_escape_is_dropped() {
        assert_eq!(decode(&[0x1b]), Vec::new());
    }

    #[test]
    fn truncated_sequence_reprocesses_tail_bytes() {
        // ESC '[' with the final byte missing: ESC dropped, '[' on its own.
        assert_eq!(decode(&[0x1b, 0x5b]), vec![InputEvent::Ignored]);
    }

    #[test]
    fn escape_not_opening_a_csi_is_dropped() {
        assert_eq!(
            decode(&[0x1b, b'x', b'y']),
            vec![InputEvent::Ignored, InputEvent::Ignored]
        );
    }

    #[test]
    fn quit_stops_the_scan() {
        let events = decode(&[b'q', 0x1b, 0x5b, 0x41]);
        assert_eq!(events, vec![InputEvent::Quit]);

        let events = decode(&[b'x', b'Q', b'x']);
        assert_eq!(events, vec![InputEvent::Ignored, InputEvent::Quit]);
    }

    #[test]
    fn consecutive_arrows_decode_in_arrival_order() {
        let events = decode(&[0x1b, 0x5b, 0x41, 0x1b, 0x5b, 0x42]);
        assert_eq!(events, vec![InputEvent::MoveUp, InputEvent::MoveDown]);
    }

    #[test]
    fn other_bytes_decode_to_ignored() {
        assert_eq!(
            decode(&[b'a', b' ']),
            vec![InputEvent::Ignored, InputEvent::Ignored]
        );
    }
}
