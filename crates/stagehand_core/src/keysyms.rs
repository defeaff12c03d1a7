//! Key symbol translation
//!
//! Key symbols are the platform's symbolic key identifiers (the X11 keysym
//! space). They are distinct from Unicode: most printable Latin-1 keysyms
//! coincide with their code point, keysyms with a `0x01` top byte encode a
//! UCS code point directly, and everything else goes through a static table.

use crate::keysym_table::KEYSYM_TO_UNICODE;

/// Top-byte marker for keysyms that directly encode a 24-bit UCS code point
const DIRECT_UCS_MARKER: u32 = 0x0100_0000;

/// Non-character key symbols produced by the platform backends
pub mod keys {
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const PAUSE: u32 = 0xff13;
    pub const SCROLL_LOCK: u32 = 0xff14;
    pub const ESCAPE: u32 = 0xff1b;
    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const PAGE_UP: u32 = 0xff55;
    pub const PAGE_DOWN: u32 = 0xff56;
    pub const END: u32 = 0xff57;
    pub const INSERT: u32 = 0xff63;
    pub const MENU: u32 = 0xff67;
    pub const NUM_LOCK: u32 = 0xff7f;
    pub const KP_ENTER: u32 = 0xff8d;
    pub const F1: u32 = 0xffbe;
    pub const F2: u32 = 0xffbf;
    pub const F3: u32 = 0xffc0;
    pub const F4: u32 = 0xffc1;
    pub const F5: u32 = 0xffc2;
    pub const F6: u32 = 0xffc3;
    pub const F7: u32 = 0xffc4;
    pub const F8: u32 = 0xffc5;
    pub const F9: u32 = 0xffc6;
    pub const F10: u32 = 0xffc7;
    pub const F11: u32 = 0xffc8;
    pub const F12: u32 = 0xffc9;
    pub const SHIFT_L: u32 = 0xffe1;
    pub const SHIFT_R: u32 = 0xffe2;
    pub const CONTROL_L: u32 = 0xffe3;
    pub const CONTROL_R: u32 = 0xffe4;
    pub const CAPS_LOCK: u32 = 0xffe5;
    pub const META_L: u32 = 0xffe7;
    pub const META_R: u32 = 0xffe8;
    pub const ALT_L: u32 = 0xffe9;
    pub const ALT_R: u32 = 0xffea;
    pub const SUPER_L: u32 = 0xffeb;
    pub const SUPER_R: u32 = 0xffec;
    pub const DELETE: u32 = 0xffff;

    /// Placeholder for keys the platform could not identify
    pub const VOID_SYMBOL: u32 = 0x00ff_ffff;
}

#[inline]
fn is_latin1_identity(value: u32) -> bool {
    (0x0020..=0x007e).contains(&value) || (0x00a0..=0x00ff).contains(&value)
}

/// Convert a key symbol to the corresponding Unicode code point
///
/// Returns 0 if the key symbol has no character equivalent.
pub fn keysym_to_unicode(keysym: u32) -> u32 {
    if is_latin1_identity(keysym) {
        return keysym;
    }

    if keysym & 0xff00_0000 == DIRECT_UCS_MARKER {
        return keysym & 0x00ff_ffff;
    }

    match KEYSYM_TO_UNICODE.binary_search_by_key(&keysym, |&(sym, _)| sym) {
        Ok(index) => KEYSYM_TO_UNICODE[index].1,
        Err(_) => 0,
    }
}

/// Convert a Unicode code point to a key symbol
///
/// Input sources that only see characters (IME-less desktop keyboards,
/// text injected by tests) use this to fill in `keyval`. Code points
/// without a legacy keysym are encoded directly with the `0x01` prefix.
pub fn unicode_to_keysym(ucs: u32) -> u32 {
    if is_latin1_identity(ucs) {
        return ucs;
    }

    // The table is sorted by keysym, not code point
    if let Some(&(sym, _)) = KEYSYM_TO_UNICODE.iter().find(|&&(_, code)| code == ucs) {
        return sym;
    }

    DIRECT_UCS_MARKER | (ucs & 0x00ff_ffff)
}
