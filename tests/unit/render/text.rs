use super::*;

fn ten_per_char(s: &str) -> f64 {
    s.chars().count() as f64 * 10.0
}

const TEXT: &str = "aaaa bbbb cccc dddd eeee";

#[test]
fn wraps_greedily_within_height() {
    let lines = wrap_text(ten_per_char, TEXT, 0.0, 100.0, 10.0, 25.0);
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["aaaa bbbb", "cccc dddd", "eeee"]);
    let ys: Vec<f64> = lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![0.0, 10.0, 20.0]);
}

#[test]
fn overflow_truncates_with_ellipsis() {
    let lines = wrap_text(ten_per_char, TEXT, 0.0, 100.0, 10.0, 15.0);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "aaaa bbbb");
    assert_eq!(lines[1].text, "cccc dddd...");
}

#[test]
fn short_text_is_one_line_and_overlong_word_is_kept() {
    let lines = wrap_text(ten_per_char, "hi", 5.0, 100.0, 10.0, 50.0);
    assert_eq!(
        lines,
        vec![WrappedLine {
            text: "hi".to_string(),
            y: 5.0
        }]
    );
    let long = wrap_text(ten_per_char, "abcdefghijklmnop", 0.0, 50.0, 10.0, 50.0);
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].text, "abcdefghijklmnop");
}

#[test]
fn shaping_rejects_bad_sizes() {
    let mut engine = TextEngine::default();
    assert!(matches!(
        engine.shape("1", FontSpec::SERIF_BOLD, 0.0, TextBrushRgba8::default()),
        Err(CardError::Validation(_))
    ));
    assert_eq!(engine.measure("", FontSpec::SANS, 12.0).unwrap(), 0.0);
}

#[test]
fn missing_font_dir_falls_back_and_misses_are_stable() {
    let mut engine = TextEngine::new(Some(PathBuf::from("/nonexistent/animecard-fonts")));
    let first = engine.font(FontSpec::SERIF_BOLD).is_ok();
    let second = engine.font(FontSpec::SERIF_BOLD).is_ok();
    assert_eq!(first, second);
    if first {
        let w = engine.measure("2500", FontSpec::SERIF_BOLD, 24.0).unwrap();
        assert!(w > 0.0);
        assert_eq!(engine.loaded_fonts().len(), 1);
    }
}
