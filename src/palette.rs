/// A text color offered by the color picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColorOption {
    pub name: &'static str,
    pub value: &'static str,
}

impl TextColorOption {
    const fn named(name: &'static str) -> Self {
        Self { name, value: name }
    }
}

/// Picker order, lightest first
pub static TEXT_COLORS: [TextColorOption; 5] = [
    TextColorOption::named("gainsboro"),
    TextColorOption::named("lightgray"),
    TextColorOption::named("darkgray"),
    TextColorOption::named("gray"),
    TextColorOption::named("black"),
];

/// The palette entry shown as selected for `value`.
///
/// Colors outside the palette are stored as-is but display as the first entry.
pub fn text_color_option(value: &str) -> &'static TextColorOption {
    TEXT_COLORS
        .iter()
        .find(|option| option.value == value)
        .unwrap_or(&TEXT_COLORS[0])
}

pub fn is_palette_color(value: &str) -> bool {
    TEXT_COLORS.iter().any(|option| option.value == value)
}
