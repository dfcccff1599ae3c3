use super::{segment, Depth, DepthError};
use crate::section::Section;
use crate::token::{tokenize, Token};

const SAMPLE: &str = "# A\nx\n## B\n```js\n1\n```\n## C\ny";

#[test]
fn test_depth_two_splits_at_second_level() {
    let sections = segment(&tokenize(SAMPLE), Depth::TWO);

    assert_eq!(sections.len(), 3);

    assert_eq!(sections[0].heading_descriptor(), Some((1, "A")));
    assert_eq!(
        sections[0].tokens().collect::<Vec<_>>(),
        vec![Token::heading(1, "A"), Token::text("x")]
    );

    assert_eq!(sections[1].heading_descriptor(), Some((2, "B")));
    assert_eq!(
        sections[1].tokens().collect::<Vec<_>>(),
        vec![Token::heading(2, "B"), Token::code(Some("js"), "1")]
    );

    assert_eq!(sections[2].heading_descriptor(), Some((2, "C")));
    assert_eq!(
        sections[2].tokens().collect::<Vec<_>>(),
        vec![Token::heading(2, "C"), Token::text("y")]
    );
}

#[test]
fn test_depth_one_keeps_subheadings_as_content() {
    let tokens = tokenize(SAMPLE);
    let sections = segment(&tokens, Depth::ONE);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading_descriptor(), Some((1, "A")));
    assert_eq!(sections[0].tokens().collect::<Vec<_>>(), tokens);
}

#[test]
fn test_leading_content_forms_headingless_section() {
    let sections = segment(&tokenize("intro\n# First\nbody"), Depth::ONE);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].heading, None);
    assert_eq!(sections[0].id, "preface");
    assert_eq!(sections[0].members, vec![Token::text("intro")]);
    assert_eq!(sections[1].heading_descriptor(), Some((1, "First")));
}

#[test]
fn test_deep_heading_before_first_boundary_stays_in_preface() {
    let sections = segment(&tokenize("### Deep\ntext\n# Top\nmore"), Depth::TWO);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].heading, None);
    assert_eq!(
        sections[0].members,
        vec![Token::heading(3, "Deep"), Token::text("text")]
    );
}

#[test]
fn test_heading_without_content_is_kept() {
    let sections = segment(&tokenize("# Empty\n# Full\ncontent\n# Trailing"), Depth::ONE);

    let titles: Vec<&str> = sections.iter().map(Section::title).collect();
    assert_eq!(titles, vec!["Empty", "Full", "Trailing"]);
    assert!(sections[0].members.is_empty());
    assert_eq!(
        sections[2].tokens().collect::<Vec<_>>(),
        vec![Token::heading(1, "Trailing")]
    );
}

#[test]
fn test_single_heading_document() {
    let sections = segment(&tokenize("# Title"), Depth::ONE);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].id, "title");
    assert_eq!(sections[0].heading_descriptor(), Some((1, "Title")));
}

#[test]
fn test_nested_heading_pair_across_depths() {
    let tokens = tokenize("# A\n## B");

    let counts: Vec<usize> = Depth::ALL
        .iter()
        .map(|depth| segment(&tokens, *depth).len())
        .collect();
    assert_eq!(counts, vec![1, 2, 2]);

    let deep = segment(&tokens, Depth::TWO);
    assert_eq!(deep[0].heading_descriptor(), Some((1, "A")));
    assert_eq!(deep[1].heading_descriptor(), Some((2, "B")));
}

#[test]
fn test_blank_preface_is_dropped() {
    let sections = segment(&tokenize("\n\n   \n# A\nx"), Depth::ONE);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].index, 0);
    assert_eq!(sections[0].title(), "A");
}

#[test]
fn test_no_tokens_no_sections() {
    assert!(segment(&[], Depth::THREE).is_empty());
}

#[test]
fn test_indices_are_sequential() {
    let sections = segment(&tokenize("intro\n# A\n# B\nb\n# C"), Depth::ONE);

    let indices: Vec<usize> = sections.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(sections[0].id, "preface");
    assert_eq!(sections[3].title(), "C");
}

#[test]
fn test_level_one_count_matches_headings() {
    let tokens = tokenize("# A\n# B\n## b\n# C\n```\n# not\n```");
    assert_eq!(segment(&tokens, Depth::ONE).len(), 3);

    let with_preface = tokenize("lead\n# A\n# B");
    assert_eq!(segment(&with_preface, Depth::ONE).len(), 3);
}

#[test]
fn test_ids_are_unique() {
    let sections = segment(
        &tokenize("# Setup\na\n# Setup\nb\n# Setup-1\nc\n# ???\nd"),
        Depth::ONE,
    );

    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["setup", "setup-1", "setup-1-1", "section"]);
}

#[test]
fn test_sections_subdivide_as_depth_increases() {
    let tokens = tokenize("# A\na\n## B\nb\n### C\nc\n## D\nd\n# E\ne");

    let counts: Vec<usize> = Depth::ALL
        .iter()
        .map(|depth| segment(&tokens, *depth).len())
        .collect();

    assert_eq!(counts, vec![2, 4, 5]);
}

#[test]
fn test_code_fence_headings_never_split() {
    let tokens = tokenize("# A\n```\n# inside\n## inside\n```\ntail");

    for depth in Depth::ALL {
        let sections = segment(&tokens, depth);
        assert_eq!(sections.len(), 1, "depth {depth}");
    }
}

#[test]
fn test_code_blocks_accessor() {
    let sections = segment(
        &tokenize("# A\n```sh\nls\n```\ntext\n~~~\nraw\n~~~"),
        Depth::ONE,
    );

    let blocks: Vec<_> = sections[0].code_blocks().collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].language.as_deref(), Some("sh"));
    assert_eq!(blocks[1].body, "raw");
}

#[test]
fn test_depth_validation() {
    assert_eq!(Depth::new(2), Ok(Depth::TWO));
    assert_eq!(Depth::new(0), Err(DepthError::OutOfRange(0)));
    assert_eq!(Depth::new(4), Err(DepthError::OutOfRange(4)));
    assert_eq!("3".parse::<Depth>(), Ok(Depth::THREE));
    assert_eq!("-1".parse::<Depth>(), Err(DepthError::OutOfRange(-1)));
    assert!(matches!("two".parse::<Depth>(), Err(DepthError::NotANumber(_))));
}
