/// Sentence end followed by the space a paragraph break replaces.
const SENTENCE_END: &str = ". ";

/// Inserts a paragraph break after every `period`-th sentence end.
///
/// Occurrences of `". "` are counted left to right, starting at 1. For
/// every occurrence whose count is a multiple of `period`, the space is
/// replaced by two newlines and the period is kept. A `period` of 0 leaves
/// the text untouched.
pub fn paragraphs(text: &str, period: usize) -> String {
	if period == 0 {
		return text.to_owned();
	}

	let mut formatted = String::with_capacity(text.len() + text.len() / 32);
	let mut rest = text;
	let mut count = 0;

	while let Some(position) = rest.find(SENTENCE_END) {
		count += 1;
		formatted.push_str(&rest[..=position]);
		if count % period == 0 {
			formatted.push_str("\n\n");
		} else {
			formatted.push(' ');
		}
		rest = &rest[position + SENTENCE_END.len()..];
	}

	formatted.push_str(rest);
	formatted
}

#[cfg(test)]
mod tests {
	use super::*;

	/// `width` filler characters with a sentence end at each position.
	fn text_with_stops(width: usize, stops: &[usize]) -> String {
		(0..width)
			.map(|i| {
				if stops.contains(&i) {
					'.'
				} else if i > 0 && stops.contains(&(i - 1)) {
					' '
				} else {
					'x'
				}
			})
			.collect()
	}

	#[test]
	fn only_the_fourth_sentence_end_breaks() {
		let text = text_with_stops(70, &[5, 20, 40, 60]);
		let formatted = paragraphs(&text, 4);

		let mut expected = text.clone();
		expected.replace_range(61..62, "\n\n");
		assert_eq!(formatted, expected);
		assert_eq!(&formatted[5..7], ". ");
		assert_eq!(&formatted[20..22], ". ");
		assert_eq!(&formatted[40..42], ". ");
		assert_eq!(&formatted[60..63], ".\n\n");
	}

	#[test]
	fn breaks_repeat_every_period() {
		let text = "A a. B b. C c. D d. E e.";
		assert_eq!(paragraphs(text, 2), "A a. B b.\n\nC c. D d.\n\nE e.");
		assert_eq!(paragraphs(text, 1), "A a.\n\nB b.\n\nC c.\n\nD d.\n\nE e.");
	}

	#[test]
	fn other_terminators_and_trailing_period_are_not_counted() {
		let text = "Why? Lo! Amen. Selah. Go.";
		assert_eq!(paragraphs(text, 2), "Why? Lo! Amen. Selah.\n\nGo.");
	}

	#[test]
	fn zero_period_leaves_text_alone() {
		assert_eq!(paragraphs("A a. B b.", 0), "A a. B b.");
	}
}
