use speakeval::application::services::PronunciationAnalyzer;
use speakeval::domain::Word;

const THRESHOLD: f64 = 0.85;

fn analyzer() -> PronunciationAnalyzer {
    PronunciationAnalyzer::new(THRESHOLD)
}

#[test]
fn given_no_words_when_analyzing_then_scores_zero() {
    let report = analyzer().analyze(&[]);

    assert_eq!(report.pronunciation_score, 0);
    assert!(report.mispronounced_words.is_empty());
}

#[test]
fn given_mixed_confidences_when_analyzing_then_averages_to_percentage() {
    let words = [
        Word::new("hello", 0.0, 0.4, 0.9),
        Word::new("world", 1.1, 1.5, 0.6),
    ];

    let report = analyzer().analyze(&words);

    assert_eq!(report.pronunciation_score, 75);
    assert_eq!(report.mispronounced_words.len(), 1);
    let flagged = &report.mispronounced_words[0];
    assert_eq!(flagged.word, "world");
    assert_eq!(flagged.start, 1.1);
    assert_eq!(flagged.confidence, 0.6);
}

#[test]
fn given_all_confident_words_when_analyzing_then_flags_nothing() {
    let words = [
        Word::new("clear", 0.0, 0.3, 0.9),
        Word::new("speech", 0.4, 0.8, 0.95),
        Word::new("here", 0.9, 1.1, 1.0),
    ];

    let report = analyzer().analyze(&words);

    assert_eq!(report.pronunciation_score, 95);
    assert!(report.mispronounced_words.is_empty());
}

#[test]
fn given_word_at_threshold_when_analyzing_then_not_flagged() {
    // Only strictly-below-threshold confidence counts as mispronounced.
    let words = [Word::new("edge", 0.0, 0.3, 0.85)];

    let report = analyzer().analyze(&words);

    assert!(report.mispronounced_words.is_empty());
}

#[test]
fn given_multiple_weak_words_when_analyzing_then_preserves_order() {
    let words = [
        Word::new("first", 0.0, 0.3, 0.5),
        Word::new("solid", 0.4, 0.7, 0.9),
        Word::new("second", 0.8, 1.1, 0.4),
        Word::new("third", 1.2, 1.5, 0.3),
    ];

    let report = analyzer().analyze(&words);

    let flagged: Vec<&str> = report
        .mispronounced_words
        .iter()
        .map(|w| w.word.as_str())
        .collect();
    assert_eq!(flagged, ["first", "second", "third"]);
}
