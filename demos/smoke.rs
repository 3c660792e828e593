//! End-to-end smoke test for motifscan

use motifscan::dot::{to_dot, DotOptions};
use motifscan::fasta::{parse_fasta, parse_patterns, PatternFilter};
use motifscan::mutations::compare_sequences;
use motifscan::{search_with_gaps, Automaton, Error, GappedMatcher, SearchConfig};

fn main() {
    println!("Running motifscan smoke tests...\n");

    test_exact_counts();
    test_reset_on_invalid_symbol();
    test_stream_positions();
    test_gapped_scenario();
    test_gapped_parse_error();
    test_fasta_pipeline();
    test_dot_export();
    test_diff();

    println!("\n✅ All smoke tests passed!");
}

fn test_exact_counts() {
    let automaton = Automaton::from_patterns(["AC", "CG"]);
    let (count, matches) = automaton.search_detailed("ACG");
    assert_eq!(count, 2);
    let found: Vec<_> = matches.iter().map(|m| (m.end, m.pattern())).collect();
    assert_eq!(found, vec![(1, 0), (2, 1)]);
    println!("✓ Exact counts");
}

fn test_reset_on_invalid_symbol() {
    let automaton = Automaton::from_patterns(["ACGT"]);
    assert_eq!(automaton.search("ACXGT"), 0);
    assert_eq!(automaton.search("ACGTxACGT"), 2);
    println!("✓ Out-of-alphabet symbols reset the scan");
}

fn test_stream_positions() {
    let automaton = Automaton::from_patterns(["GATTACA", "TACA", "A"]);
    let ends: Vec<_> = automaton
        .search_stream("GATTACA")
        .map(|m| (m.end, m.pattern()))
        .collect();
    assert_eq!(ends, vec![(1, 2), (4, 2), (6, 0), (6, 1), (6, 2)]);
    println!("✓ Streaming search");
}

fn test_gapped_scenario() {
    let found = search_with_gaps("ACXGT", &["AC.GT"], 2).unwrap();
    assert_eq!(found[&0], vec![(0, 5), (0, 5)]);

    let config = SearchConfig::with_min_seed_len(2).dedup_intervals(true);
    let matcher = GappedMatcher::new(&["GA{3}CA", "T.A"], config).unwrap();
    let found = matcher.search("GATTACATGT");
    assert_eq!(found[&0], vec![(0, 7)]);
    assert_eq!(found[&1], vec![(2, 5)]);
    println!("✓ Gapped search");
}

fn test_gapped_parse_error() {
    match search_with_gaps("ACGT", &["AC{3"], 2) {
        Err(Error::Parse { index: 0, .. }) => {}
        other => panic!("expected a parse error, got {other:?}"),
    }
    println!("✓ Malformed gap is rejected");
}

fn test_fasta_pipeline() {
    let records = parse_fasta(">chr\nGAATTC\nnnGATC\n");
    let patterns = parse_patterns("gaattc\nGATC\nAC.GT\n", PatternFilter::Exact);
    assert_eq!(patterns, vec!["GAATTC", "GATC"]);

    let automaton = Automaton::from_patterns(&patterns);
    assert_eq!(automaton.search(&records[0].seq), 2);
    println!("✓ FASTA and pattern loading");
}

fn test_dot_export() {
    let automaton = Automaton::from_patterns(["ACG", "CG"]);
    let dot = to_dot(&automaton, DotOptions::default());
    assert!(dot.starts_with("digraph aho {"));
    assert!(dot.contains("style=dashed,color=gray"));
    println!("✓ DOT export");
}

fn test_diff() {
    let changes = compare_sequences("GATTACA", "GACTACA");
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].to_string(), "SNP at pos 2: T -> C");
    println!("✓ Sequence diff");
}
