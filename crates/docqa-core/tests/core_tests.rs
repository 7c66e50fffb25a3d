use std::collections::HashSet;
use std::path::PathBuf;

use docqa_core::assembler::{assemble, ChunkingConfig};
use docqa_core::{Error, SourceFragments};

fn manual() -> SourceFragments {
    let mut pages = Vec::new();
    for i in 0..6 {
        pages.push(format!("Section {i}. {}", "Operating instructions for the pump. ".repeat(20)));
    }
    SourceFragments::new("docs/manual.pdf", pages)
}

fn warranty() -> SourceFragments {
    SourceFragments::new("docs/warranty.pdf", vec!["The warranty period is 12 months.".to_string()])
}

#[test]
fn assemble_keeps_provenance_for_every_source() {
    let cfg = ChunkingConfig { max_chars: 400, overlap_chars: 80 };
    let units = assemble(&[manual(), warranty()], &cfg).expect("assemble");

    let sources: HashSet<PathBuf> = units.iter().map(|u| u.source.clone()).collect();
    assert_eq!(sources.len(), 2, "both documents contribute units");

    let warranty_units: Vec<_> = units.iter().filter(|u| u.source.ends_with("warranty.pdf")).collect();
    assert_eq!(warranty_units.len(), 1);
    assert_eq!(warranty_units[0].content, "The warranty period is 12 months.");
    assert_eq!(warranty_units[0].position, 0);

    assert!(units.iter().all(|u| !u.content.trim().is_empty()));
    assert!(units.iter().all(|u| u.content.chars().count() <= cfg.max_chars));
}

#[test]
fn assemble_is_a_pure_function_of_its_input() {
    let cfg = ChunkingConfig::default();
    let files = [manual(), warranty()];
    assert_eq!(assemble(&files, &cfg).expect("first"), assemble(&files, &cfg).expect("second"));
}

#[test]
fn a_corpus_of_blank_pages_is_rejected() {
    let blank = SourceFragments::new("docs/scan.pdf", vec![String::new(), " \n ".to_string()]);
    assert!(matches!(assemble(&[blank], &ChunkingConfig::default()), Err(Error::EmptyCorpus)));
}
