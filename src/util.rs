use enum_map::Enum;
use ratatui::layout::{Rect, Size};
use std::path::{Path, PathBuf};

pub(crate) trait EnumExt: Enum {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// `area` is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Replace a leading `~` path component with the user's home directory
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 30, 10), Size::new(8, 6), Rect::new(11, 2, 8, 6))]
    #[case(Rect::new(5, 1, 20, 9), Size::new(8, 7), Rect::new(11, 2, 8, 7))]
    #[case(Rect::new(0, 0, 10, 4), Size::new(20, 8), Rect::new(0, 0, 10, 4))]
    #[case(Rect::ZERO, Size::new(3, 3), Rect::ZERO)]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] expected: Rect) {
        assert_eq!(center_rect(area, size), expected);
    }

    #[test]
    fn expand_plain_path() {
        assert_eq!(
            expand_tilde(Path::new("/tmp/scores.txt")),
            PathBuf::from("/tmp/scores.txt")
        );
    }

    #[test]
    fn expand_home_path() {
        let expanded = expand_tilde(Path::new("~/scores.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("scores.txt"));
        }
    }
}
