#![no_main]
use glyphcrack::cipher::PatternMatcher;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = (split as usize).min(rest.len());
    let (pattern, text) = rest.split_at(split);

    let found: Vec<usize> = PatternMatcher::new(pattern).find(text).offsets().collect();
    let expected: Vec<usize> = if pattern.is_empty() || pattern.len() > text.len() {
        Vec::new()
    } else {
        (0..=text.len() - pattern.len())
            .filter(|&i| &text[i..i + pattern.len()] == pattern)
            .collect()
    };
    assert_eq!(found, expected);
});
