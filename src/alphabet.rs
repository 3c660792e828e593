//! Nucleotide alphabet policy.
//!
//! Both matchers work over the uppercase alphabet `A C G T N`. Any other byte
//! seen while scanning is not an error: it resets the automaton to its root
//! and breaks whatever match was in progress.
//!
//! The gap parser treats `N` differently: inside a gapped pattern it stands
//! for "any one symbol", so literal runs there are built from [`BASES`] only.

/// Symbols the scanner accepts.
pub const SYMBOLS: &[u8; 5] = b"ACGTN";

/// Unambiguous bases; the only symbols allowed inside a gapped literal run.
pub const BASES: &[u8; 4] = b"ACGT";

/// The ambiguous base.
pub const WILDCARD: u8 = b'N';

const fn membership(symbols: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < symbols.len() {
        table[symbols[i] as usize] = true;
        i += 1;
    }
    table
}

static SYMBOL_TABLE: [bool; 256] = membership(SYMBOLS);
static BASE_TABLE: [bool; 256] = membership(BASES);

/// Whether the scanner may take a transition on `byte`.
#[inline]
pub fn is_symbol(byte: u8) -> bool {
    SYMBOL_TABLE[byte as usize]
}

/// Whether `byte` can appear inside a gapped literal run.
#[inline]
pub fn is_base(byte: u8) -> bool {
    BASE_TABLE[byte as usize]
}

/// True if every byte of `seq` is a scanner symbol.
pub fn is_valid_sequence(seq: &[u8]) -> bool {
    seq.iter().all(|&b| is_symbol(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        for &b in SYMBOLS {
            assert!(is_symbol(b));
        }
        assert!(!is_symbol(b'X'));
        assert!(!is_symbol(b'a'), "lowercase is outside the alphabet");
        assert!(!is_symbol(b'.'));
    }

    #[test]
    fn test_n_is_symbol_but_not_base() {
        assert!(is_symbol(WILDCARD));
        assert!(!is_base(WILDCARD));
        assert!(is_base(b'G'));
    }

    #[test]
    fn test_valid_sequence() {
        assert!(is_valid_sequence(b"ACGTNNA"));
        assert!(is_valid_sequence(b""));
        assert!(!is_valid_sequence(b"ACXGT"));
    }
}
