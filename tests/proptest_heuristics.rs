use omnisumma::heuristics::{
    classify_sentiment, detect_topics, extract_bullet_points, extract_keywords,
    segment_chapters, select_paragraphs, text, MAX_BULLETS, MAX_KEYWORDS, MAX_TOPICS,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn paragraph() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,10}", 1..12).prop_map(|words| format!("{}.", words.join(" ")))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(paragraph(), 1..15).prop_map(|ps| ps.join("\n\n"))
}

fn retention() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.3, 0.6, 0.9])
}

proptest! {
    #[test]
    fn prop_selected_paragraphs_are_a_subset_led_by_the_first(doc in document(), r in retention()) {
        let input = text::paragraphs(&doc);
        let output = select_paragraphs(&doc, r);
        let selected = text::paragraphs(&output);

        prop_assert!(!selected.is_empty());
        prop_assert_eq!(selected[0], input[0]);
        for p in &selected {
            prop_assert!(input.contains(p));
        }
    }

    #[test]
    fn prop_keywords_capped_and_disjoint(doc in document()) {
        let keywords = extract_keywords(&doc);
        prop_assert!(keywords.len() <= MAX_KEYWORDS);

        let mut seen = HashSet::new();
        for keyword in &keywords {
            for word in keyword.to_lowercase().split(' ') {
                prop_assert!(seen.insert(word.to_string()), "word {} repeated", word);
            }
        }
    }

    #[test]
    fn prop_heuristics_are_deterministic(doc in document()) {
        prop_assert_eq!(extract_keywords(&doc), extract_keywords(&doc));
        prop_assert_eq!(extract_bullet_points(&doc), extract_bullet_points(&doc));
        prop_assert_eq!(classify_sentiment(&doc), classify_sentiment(&doc));
        prop_assert_eq!(detect_topics(&doc), detect_topics(&doc));
        prop_assert_eq!(segment_chapters(&doc), segment_chapters(&doc));
        prop_assert_eq!(select_paragraphs(&doc, 0.6), select_paragraphs(&doc, 0.6));
    }

    #[test]
    fn prop_bullets_and_topics_capped(doc in document()) {
        prop_assert!(extract_bullet_points(&doc).len() <= MAX_BULLETS);
        let topics = detect_topics(&doc);
        prop_assert!(!topics.is_empty() && topics.len() <= MAX_TOPICS);
    }

    #[test]
    fn prop_chapters_cover_every_paragraph_in_order(doc in document()) {
        let chapters = segment_chapters(&doc);
        prop_assert!(!chapters.is_empty() && chapters.len() <= 4);

        let rejoined: Vec<&str> = chapters
            .iter()
            .flat_map(|c| text::paragraphs(&c.content))
            .collect();
        prop_assert_eq!(rejoined, text::paragraphs(&doc));
    }
}

#[test]
fn seven_paragraphs_make_four_chapters() {
    let doc = (1..=7)
        .map(|i| format!("Paragraph {} text.", i))
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(segment_chapters(&doc).len(), 4);
}

#[test]
fn one_paragraph_makes_a_summary_chapter() {
    let chapters = segment_chapters("A single paragraph of text.");
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].title, "Summary");
}

#[test]
fn two_plain_paragraphs_give_two_bullets() {
    let doc = "Rivers flow to the sea. Fish swim upstream. Bears wait nearby.\n\n\
               Mountains rise above clouds. Snow covers peaks. Climbers rest below.";
    let bullets = extract_bullet_points(doc);
    assert_eq!(
        bullets,
        vec!["Rivers flow to the sea.", "Mountains rise above clouds."]
    );
    assert!(bullets.iter().all(|b| b.ends_with('.')));
}
