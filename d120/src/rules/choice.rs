use serde::{Deserialize, Serialize};

use crate::rules::color::Color;

pub const MIN_CHOICES: usize = 2;
pub const MAX_CHOICES: usize = 12;
pub const MAX_NAME_LEN: usize = 40;

pub const PALETTE: [Color; MAX_CHOICES] = [
    Color::from_hex(0xc9a84c),
    Color::from_hex(0x7c9dbf),
    Color::from_hex(0xa07cc5),
    Color::from_hex(0x7cbf95),
    Color::from_hex(0xbf7c7c),
    Color::from_hex(0x7cb5bf),
    Color::from_hex(0xbf9a7c),
    Color::from_hex(0x9abf7c),
    Color::from_hex(0xbf7cb0),
    Color::from_hex(0x7c8abf),
    Color::from_hex(0xbfb87c),
    Color::from_hex(0x7cbfb8),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    pub color: Color,
}

impl Choice {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Name shown for the entry at `index` (0-based) when its own name is blank.
    pub fn placeholder_name(index: usize) -> String {
        format!("Choice {}", index + 1)
    }

    /// Color an editor hands to the entry at `index` (0-based) when it is added.
    pub fn palette_color(index: usize) -> Color {
        PALETTE.get(index).copied().unwrap_or(Color::GRAY)
    }

    /// A fresh entry for position `index`, named and colored after it.
    pub fn placeholder(index: usize) -> Self {
        Self::new(Self::placeholder_name(index), Self::palette_color(index))
    }
}

pub fn default_choices() -> Vec<Choice> {
    vec![
        Choice::new("Tabla", Color::from_hex(0xc9a84c)),
        Choice::new("Steamhouse Lounge", Color::from_hex(0x7c9dbf)),
        Choice::new("Office Bar", Color::from_hex(0xa07cc5)),
    ]
}

pub fn check_count(count: usize) -> crate::Result<()> {
    if (MIN_CHOICES..=MAX_CHOICES).contains(&count) {
        Ok(())
    } else {
        Err(crate::Error::ChoiceCount { count })
    }
}

/// Cuts a name down to [`MAX_NAME_LEN`] characters.
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

/// Trims every name and replaces blank ones with their positional placeholder.
pub fn normalize_names(choices: Vec<Choice>) -> Vec<Choice> {
    choices
        .into_iter()
        .enumerate()
        .map(|(i, choice)| {
            let trimmed = choice.name.trim();
            let name = if trimmed.is_empty() {
                Choice::placeholder_name(i)
            } else {
                truncate_name(trimmed)
            };
            Choice { name, ..choice }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_choices() {
        let choices = default_choices();
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].name, "Tabla");
        assert_eq!(choices[2].color.to_string(), "#a07cc5");
    }

    #[test]
    fn test_check_count() {
        assert!(check_count(1).is_err());
        assert!(check_count(2).is_ok());
        assert!(check_count(12).is_ok());
        assert_eq!(check_count(13), Err(crate::Error::ChoiceCount { count: 13 }));
    }

    #[test]
    fn test_normalize_names() {
        let choices = vec![
            Choice::new("  Tabla ", PALETTE[0]),
            Choice::new("Office Bar", PALETTE[1]),
            Choice::new("   ", PALETTE[2]),
            Choice::new("", PALETTE[3]),
        ];
        let names: Vec<_> = normalize_names(choices)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Tabla", "Office Bar", "Choice 3", "Choice 4"]);
    }

    #[test]
    fn test_palette_fallback() {
        assert_eq!(Choice::palette_color(0), PALETTE[0]);
        assert_eq!(Choice::palette_color(12), Color::GRAY);
    }
}
