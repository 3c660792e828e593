//! Greedy classification of differences between two sequences.
//!
//! This is a linear two-cursor walk, not an alignment: each mismatch is
//! labelled by looking one symbol ahead, which is enough for sparse point
//! changes and single-symbol indels.

use std::fmt;

/// One difference between a reference and another sequence.
///
/// Positions are 0-based indices into the reference unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Substitution of one symbol.
    Snp { pos: usize, from: u8, to: u8 },
    /// Reference symbol missing from the other sequence.
    Deletion { pos: usize, base: u8 },
    /// Extra symbol in the other sequence, before reference `pos`.
    Insertion { pos: usize, base: u8 },
    /// Mismatch the lookahead could not explain.
    Complex { ref_pos: usize, other_pos: usize },
    /// Reference symbol left over after the other sequence ended.
    DeletionAtEnd { base: u8 },
    /// Other-sequence symbol left over after the reference ended.
    InsertionAtEnd { base: u8 },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mutation::Snp { pos, from, to } => {
                write!(f, "SNP at pos {pos}: {} -> {}", from as char, to as char)
            }
            Mutation::Deletion { pos, base } => {
                write!(f, "Deletion at pos {pos}: deleted {}", base as char)
            }
            Mutation::Insertion { pos, base } => {
                write!(f, "Insertion at pos {pos}: inserted {}", base as char)
            }
            Mutation::Complex { ref_pos, other_pos } => {
                write!(f, "Complex mutation around pos {ref_pos}/{other_pos}")
            }
            Mutation::DeletionAtEnd { base } => write!(f, "Deletion at end: {}", base as char),
            Mutation::InsertionAtEnd { base } => write!(f, "Insertion at end: {}", base as char),
        }
    }
}

/// Classify every difference between `reference` and `other`.
///
/// On a mismatch the first rule that applies wins:
/// 1. the next symbols agree: SNP
/// 2. the next reference symbol equals the current other symbol: deletion
/// 3. the current reference symbol equals the next other symbol: insertion
/// 4. otherwise: complex change, both cursors advance
///
/// ```
/// use motifscan::mutations::{compare_sequences, Mutation};
///
/// let diff = compare_sequences("ACGT", "AGGT");
/// assert_eq!(diff, vec![Mutation::Snp { pos: 1, from: b'C', to: b'G' }]);
/// ```
pub fn compare_sequences<A, B>(reference: &A, other: &B) -> Vec<Mutation>
where
    A: AsRef<[u8]> + ?Sized,
    B: AsRef<[u8]> + ?Sized,
{
    let (a, b) = (reference.as_ref(), other.as_ref());
    let mut changes = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            i += 1;
            j += 1;
            continue;
        }

        let next_a = a.get(i + 1);
        let next_b = b.get(j + 1);
        if next_a.is_some() && next_a == next_b {
            changes.push(Mutation::Snp {
                pos: i,
                from: a[i],
                to: b[j],
            });
            i += 1;
            j += 1;
        } else if next_a == Some(&b[j]) {
            changes.push(Mutation::Deletion { pos: i, base: a[i] });
            i += 1;
        } else if next_b == Some(&a[i]) {
            changes.push(Mutation::Insertion { pos: i, base: b[j] });
            j += 1;
        } else {
            changes.push(Mutation::Complex {
                ref_pos: i,
                other_pos: j,
            });
            i += 1;
            j += 1;
        }
    }

    changes.extend(a[i..].iter().map(|&base| Mutation::DeletionAtEnd { base }));
    changes.extend(b[j..].iter().map(|&base| Mutation::InsertionAtEnd { base }));
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert!(compare_sequences("GATTACA", "GATTACA").is_empty());
        assert!(compare_sequences("", "").is_empty());
    }

    #[test]
    fn test_snp() {
        assert_eq!(
            compare_sequences("ACGTACGT", "ACGAACGT"),
            vec![Mutation::Snp {
                pos: 3,
                from: b'T',
                to: b'A'
            }]
        );
    }

    #[test]
    fn test_deletion() {
        assert_eq!(
            compare_sequences("ACGTC", "ACTC"),
            vec![Mutation::Deletion { pos: 2, base: b'G' }]
        );
    }

    #[test]
    fn test_insertion() {
        assert_eq!(
            compare_sequences("ACTA", "ACGTA"),
            vec![Mutation::Insertion { pos: 2, base: b'G' }]
        );
    }

    #[test]
    fn test_complex() {
        assert_eq!(
            compare_sequences("AACCA", "AGTTA"),
            vec![
                Mutation::Complex {
                    ref_pos: 1,
                    other_pos: 1
                },
                Mutation::Complex {
                    ref_pos: 2,
                    other_pos: 2
                },
                Mutation::Snp {
                    pos: 3,
                    from: b'C',
                    to: b'T'
                },
            ]
        );
    }

    #[test]
    fn test_last_symbol_mismatch_is_complex() {
        // No lookahead exists at the final position.
        assert_eq!(
            compare_sequences("ACG", "ACT"),
            vec![Mutation::Complex {
                ref_pos: 2,
                other_pos: 2
            }]
        );
    }

    #[test]
    fn test_trailing_symbols() {
        assert_eq!(
            compare_sequences("ACGTA", "ACG"),
            vec![
                Mutation::DeletionAtEnd { base: b'T' },
                Mutation::DeletionAtEnd { base: b'A' },
            ]
        );
        assert_eq!(
            compare_sequences("AC", "ACGG"),
            vec![
                Mutation::InsertionAtEnd { base: b'G' },
                Mutation::InsertionAtEnd { base: b'G' },
            ]
        );
        assert_eq!(
            compare_sequences("", "T"),
            vec![Mutation::InsertionAtEnd { base: b'T' }]
        );
    }

    #[test]
    fn test_display() {
        let lines: Vec<String> = [
            Mutation::Snp {
                pos: 4,
                from: b'A',
                to: b'G',
            },
            Mutation::Deletion { pos: 1, base: b'C' },
            Mutation::Insertion { pos: 7, base: b'T' },
            Mutation::Complex {
                ref_pos: 3,
                other_pos: 5,
            },
            Mutation::DeletionAtEnd { base: b'A' },
            Mutation::InsertionAtEnd { base: b'N' },
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(
            lines,
            vec![
                "SNP at pos 4: A -> G",
                "Deletion at pos 1: deleted C",
                "Insertion at pos 7: inserted T",
                "Complex mutation around pos 3/5",
                "Deletion at end: A",
                "Insertion at end: N",
            ]
        );
    }
}
