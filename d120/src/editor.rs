use crate::{
    error::Error,
    rules::{
        choice::{Choice, MAX_CHOICES, MIN_CHOICES, check_count, normalize_names, truncate_name},
        color::Color,
        partition::{RangedChoice, partition},
    },
};

/// A working copy of the choice list, edited in place and handed back on save.
///
/// Dropping the draft is a cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceDraft {
    entries: Vec<Choice>,
}

impl ChoiceDraft {
    pub fn new(choices: &[Choice]) -> Self {
        Self {
            entries: choices.to_vec(),
        }
    }

    pub fn entries(&self) -> &[Choice] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_grow(&self) -> bool {
        self.entries.len() < MAX_CHOICES
    }

    pub fn can_shrink(&self) -> bool {
        self.entries.len() > MIN_CHOICES
    }

    /// Adds or drops entries at the end of the list.
    pub fn change_count(&mut self, delta: isize) -> crate::Result<()> {
        let count = self.entries.len().saturating_add_signed(delta);
        check_count(count)?;

        if count > self.entries.len() {
            let start = self.entries.len();
            self.entries.extend((start..count).map(Choice::placeholder));
        } else {
            self.entries.truncate(count);
        }
        Ok(())
    }

    pub fn set_name(&mut self, index: usize, name: &str) -> crate::Result<()> {
        self.entry_mut(index)?.name = truncate_name(name);
        Ok(())
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> crate::Result<()> {
        self.entry_mut(index)?.color = color;
        Ok(())
    }

    /// Ranges as they would be after saving; blank names show as placeholders.
    pub fn preview(&self) -> Vec<RangedChoice> {
        partition(&normalize_names(self.entries.clone()))
    }

    pub fn save(self) -> crate::Result<Vec<Choice>> {
        check_count(self.entries.len())?;
        Ok(normalize_names(self.entries))
    }

    fn entry_mut(&mut self, index: usize) -> crate::Result<&mut Choice> {
        self.entries
            .get_mut(index)
            .ok_or(Error::NoSuchChoice { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::choice::{PALETTE, default_choices};

    #[test]
    fn test_grow_uses_palette() {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.change_count(1).unwrap();
        assert_eq!(draft.len(), 4);
        assert_eq!(draft.entries()[3], Choice::new("Choice 4", PALETTE[3]));

        draft.change_count(2).unwrap();
        assert_eq!(draft.entries()[5].name, "Choice 6");
        assert_eq!(draft.entries()[5].color, PALETTE[5]);
    }

    #[test]
    fn test_count_bounds() {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.change_count(-1).unwrap();
        assert!(!draft.can_shrink());
        assert_eq!(draft.change_count(-1), Err(Error::ChoiceCount { count: 1 }));
        assert_eq!(draft.len(), 2);
        assert!(draft.change_count(-5).is_err());

        draft.change_count(10).unwrap();
        assert!(!draft.can_grow());
        assert_eq!(draft.change_count(1), Err(Error::ChoiceCount { count: 13 }));
        assert_eq!(draft.len(), 12);
    }

    #[test]
    fn test_shrink_drops_last() {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.change_count(-1).unwrap();
        let names: Vec<_> = draft.entries().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Tabla", "Steamhouse Lounge"]);
    }

    #[test]
    fn test_blank_name_defaults_on_save() {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.set_name(2, "   ").unwrap();
        draft.set_name(0, "  Noodle Bar  ").unwrap();
        let saved = draft.save().unwrap();
        assert_eq!(saved[0].name, "Noodle Bar");
        assert_eq!(saved[2].name, "Choice 3");
        assert_eq!(saved[2].color, default_choices()[2].color);
    }

    #[test]
    fn test_name_is_capped() {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.set_name(1, &"x".repeat(100)).unwrap();
        assert_eq!(draft.entries()[1].name.chars().count(), 40);
    }

    #[test]
    fn test_bad_index() {
        let mut draft = ChoiceDraft::new(&default_choices());
        assert_eq!(
            draft.set_color(3, Color::WHITE),
            Err(Error::NoSuchChoice { index: 3 })
        );
        assert!(draft.set_name(9, "nope").is_err());
    }

    #[test]
    fn test_preview_matches_main_view() {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.change_count(4).unwrap();
        let preview = draft.preview();
        let saved = draft.clone().save().unwrap();
        assert_eq!(preview, partition(&saved));
        assert_eq!(preview[0].range_label(), "1\u{2013}18");
    }

    #[test]
    fn test_cancel_leaves_original() {
        let original = default_choices();
        let mut draft = ChoiceDraft::new(&original);
        draft.set_name(0, "Changed").unwrap();
        drop(draft);
        assert_eq!(original[0].name, "Tabla");
    }
}
